//! Identifier conversion helpers
//!
//! Search filters derive their request parameter names from an entity type
//! name, so `MusicAlbum` becomes the `search_music_album.*` parameter family.

/// Converts a CamelCase or PascalCase identifier to snake_case.
///
/// An underscore is inserted before an uppercase letter that follows a
/// lowercase letter or digit, and before a capitalized word that follows
/// another letter (which keeps acronyms intact).
///
/// # Examples
///
/// ```
/// use datagrid::text::to_snake_case;
///
/// assert_eq!(to_snake_case("Music"), "music");
/// assert_eq!(to_snake_case("AdminRole"), "admin_role");
/// assert_eq!(to_snake_case("HTTPResponse"), "http_response");
/// ```
pub fn to_snake_case(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut result = String::with_capacity(name.len() + 4);
	for (i, &ch) in chars.iter().enumerate() {
		if ch.is_ascii_uppercase() && i > 0 {
			let prev = chars[i - 1];
			let next = chars.get(i + 1);
			let camel_boundary = prev.is_ascii_lowercase() || prev.is_ascii_digit();
			let acronym_boundary =
				prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
			if camel_boundary || acronym_boundary {
				result.push('_');
			}
		}
		result.push(ch.to_ascii_lowercase());
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_single_word() {
		assert_eq!(to_snake_case("Music"), "music");
		assert_eq!(to_snake_case("music"), "music");
	}

	#[test]
	fn test_camel_boundaries() {
		assert_eq!(to_snake_case("SomeEntityClass"), "some_entity_class");
		assert_eq!(to_snake_case("camelCase"), "camel_case");
		assert_eq!(to_snake_case("Rev2Payload"), "rev2_payload");
	}

	#[test]
	fn test_acronyms() {
		assert_eq!(to_snake_case("HTTPResponse"), "http_response");
		assert_eq!(to_snake_case("APIKey"), "api_key");
	}

	#[test]
	fn test_empty() {
		assert_eq!(to_snake_case(""), "");
	}
}
