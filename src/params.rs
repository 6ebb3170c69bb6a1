//! Read-only request parameters
//!
//! A thin, string-keyed view of the incoming request's query arguments.
//! Lookup is case-sensitive and values are plain strings; iteration order is
//! deterministic so generated URLs are stable.

use std::collections::BTreeMap;

/// Incoming request arguments, as a read-only string map
///
/// # Examples
///
/// ```
/// use datagrid::params::RequestParams;
///
/// let params = RequestParams::from_pairs([("order_by", "id.desc")]);
/// assert_eq!(params.get("order_by"), Some("id.desc"));
/// assert_eq!(params.get("Order_By"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
	values: BTreeMap<String, String>,
}

impl RequestParams {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a parameter map from key/value pairs.
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			values: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Looks up a parameter value.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Sets a parameter, replacing any previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.insert(key.into(), value.into());
	}

	/// Removes a parameter.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.values.remove(key)
	}

	/// Iterates over all parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns true when no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::from_pairs(iter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_is_case_sensitive() {
		let params = RequestParams::from_pairs([("select.genre", "all")]);
		assert_eq!(params.get("select.genre"), Some("all"));
		assert_eq!(params.get("Select.Genre"), None);
	}

	#[test]
	fn test_iteration_is_key_ordered() {
		let params = RequestParams::from_pairs([("b", "2"), ("a", "1")]);
		let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["a", "b"]);
	}
}
