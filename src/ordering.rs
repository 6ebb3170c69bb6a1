//! Sort-direction resolution from request `order_by` specifications
//!
//! The wire format is `order_by=<attribute>.<asc|desc>`, with a comma-separated
//! list allowed. Each column resolves its own effective direction from the
//! full spec string once, at construction.

use serde::Serialize;
use std::fmt;

/// Sort direction for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order (`asc`)
	Ascending,
	/// Descending order (`desc`)
	Descending,
}

impl SortDirection {
	/// The wire token for this direction.
	pub fn token(self) -> &'static str {
		match self {
			SortDirection::Ascending => "asc",
			SortDirection::Descending => "desc",
		}
	}

	/// Returns the opposite direction.
	pub fn toggle(self) -> Self {
		match self {
			SortDirection::Ascending => SortDirection::Descending,
			SortDirection::Descending => SortDirection::Ascending,
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.token())
	}
}

/// Builds the canonical `<attribute>.<asc|desc>` token.
pub fn order_token(attribute: &str, direction: SortDirection) -> String {
	format!("{attribute}.{}", direction.token())
}

/// Resolves the effective direction for `attribute` from an `order_by` spec.
///
/// The spec is split on commas; each trimmed token is compared case-sensitively
/// against `<attribute>.asc` and `<attribute>.desc`. The **last** matching
/// token wins, so later entries in the same list override earlier ones for the
/// same attribute. Returns `None` when the spec is empty or contains no match;
/// the caller picks a default.
///
/// # Examples
///
/// ```
/// use datagrid::ordering::{SortDirection, resolve_direction};
///
/// assert_eq!(resolve_direction("id", "id.desc"), Some(SortDirection::Descending));
/// assert_eq!(resolve_direction("id", ""), None);
/// assert_eq!(
///     resolve_direction("id", "name.asc,id.desc,id.asc"),
///     Some(SortDirection::Ascending)
/// );
/// ```
pub fn resolve_direction(attribute: &str, order_by: &str) -> Option<SortDirection> {
	let asc = order_token(attribute, SortDirection::Ascending);
	let desc = order_token(attribute, SortDirection::Descending);
	let mut direction = None;
	for token in order_by.split(',') {
		let token = token.trim();
		if token == asc {
			direction = Some(SortDirection::Ascending);
		} else if token == desc {
			direction = Some(SortDirection::Descending);
		}
	}
	direction
}

/// One resolved ORDER BY clause of the final query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderClause {
	/// Attribute (or alias) to sort by
	pub attribute: String,
	/// Direction to sort in
	pub direction: SortDirection,
}

impl OrderClause {
	/// Creates an order clause.
	pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			attribute: attribute.into(),
			direction,
		}
	}
}
