//! Cell values and dotted attribute-path resolution
//!
//! Rows coming back from a [`QuerySource`](crate::query::QuerySource) are not
//! required to be any particular struct; they only need to expose named
//! attributes through the [`Record`] trait. Column attribute paths such as
//! `artist.name` are resolved with [`resolve_path`], which walks nested
//! records and reports a miss as [`Lookup::Missing`] instead of panicking.

use std::cmp::Ordering;
use std::fmt;

/// A single displayable cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value, rendered as an empty string
	Null,
	/// Boolean value
	Bool(bool),
	/// Integer value
	Int(i64),
	/// Floating-point value
	Float(f64),
	/// Text value
	Str(String),
}

impl Value {
	/// Returns true for `Null` and for the empty string.
	pub fn is_empty(&self) -> bool {
		matches!(self, Value::Null) || matches!(self, Value::Str(s) if s.is_empty())
	}

	/// Total ordering used when sorting rows by column value.
	///
	/// Values of the same kind compare naturally; numbers compare across
	/// `Int`/`Float`; anything else falls back to comparing display text.
	/// `Null` sorts before everything.
	pub fn compare(&self, other: &Value) -> Ordering {
		match (self, other) {
			(Value::Null, Value::Null) => Ordering::Equal,
			(Value::Null, _) => Ordering::Less,
			(_, Value::Null) => Ordering::Greater,
			(Value::Bool(a), Value::Bool(b)) => a.cmp(b),
			(Value::Int(a), Value::Int(b)) => a.cmp(b),
			(Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
			(Value::Int(a), Value::Float(b)) => {
				(*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
			}
			(Value::Float(a), Value::Int(b)) => {
				a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
			}
			(Value::Str(a), Value::Str(b)) => a.cmp(b),
			(a, b) => a.to_string().cmp(&b.to_string()),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Float(x) => write!(f, "{x}"),
			Value::Str(s) => f.write_str(s),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Str(s)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Int(i64::from(i))
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Value::Float(x)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

/// Outcome of looking up one attribute on a record
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
	/// The attribute exists and carries this value
	Found(Value),
	/// The attribute (or an intermediate segment of a dotted path) is absent
	Missing,
}

impl Lookup {
	/// Unwraps the value, substituting an empty string for a miss.
	pub fn or_empty(self) -> Value {
		match self {
			Lookup::Found(value) => value,
			Lookup::Missing => Value::Str(String::new()),
		}
	}
}

/// A row object with named-attribute access
///
/// Implemented by whatever row type a [`QuerySource`](crate::query::QuerySource)
/// produces. `get` resolves a leaf attribute; `child` descends into a nested
/// record for dotted-path traversal and defaults to "no children".
pub trait Record {
	/// Looks up a leaf attribute by name.
	fn get(&self, attribute: &str) -> Lookup;

	/// Returns the nested record behind `attribute`, if there is one.
	fn child(&self, attribute: &str) -> Option<&dyn Record> {
		let _ = attribute;
		None
	}
}

/// Resolves a dotted attribute path against a record.
///
/// Intermediate segments are traversed through [`Record::child`]; the final
/// segment is read with [`Record::get`]. Any absent segment yields
/// [`Lookup::Missing`].
pub fn resolve_path(record: &dyn Record, path: &str) -> Lookup {
	let mut current = record;
	let mut segments = path.split('.').peekable();
	while let Some(segment) = segments.next() {
		if segments.peek().is_none() {
			return current.get(segment);
		}
		match current.child(segment) {
			Some(next) => current = next,
			None => return Lookup::Missing,
		}
	}
	Lookup::Missing
}

/// JSON objects double as records, so `MemorySource<serde_json::Value>` can
/// serve ad-hoc data without a dedicated row struct. Arrays and objects are
/// not leaf values; nested objects are reached through `child`.
impl Record for serde_json::Value {
	fn get(&self, attribute: &str) -> Lookup {
		match self.get(attribute) {
			Some(serde_json::Value::Null) => Lookup::Found(Value::Null),
			Some(serde_json::Value::Bool(b)) => Lookup::Found(Value::Bool(*b)),
			Some(serde_json::Value::Number(n)) => match n.as_i64() {
				Some(i) => Lookup::Found(Value::Int(i)),
				None => Lookup::Found(Value::Float(n.as_f64().unwrap_or(0.0))),
			},
			Some(serde_json::Value::String(s)) => Lookup::Found(Value::Str(s.clone())),
			Some(_) | None => Lookup::Missing,
		}
	}

	fn child(&self, attribute: &str) -> Option<&dyn Record> {
		match self.get(attribute) {
			Some(value @ serde_json::Value::Object(_)) => Some(value as &dyn Record),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_resolve_flat_attribute() {
		let record = json!({"name": "Royal Blood", "id": 4});
		assert_eq!(
			resolve_path(&record, "name"),
			Lookup::Found(Value::Str("Royal Blood".into()))
		);
		assert_eq!(resolve_path(&record, "id"), Lookup::Found(Value::Int(4)));
	}

	#[test]
	fn test_resolve_dotted_path() {
		let record = json!({"artist": {"country": {"code": "gb"}}});
		assert_eq!(
			resolve_path(&record, "artist.country.code"),
			Lookup::Found(Value::Str("gb".into()))
		);
	}

	#[test]
	fn test_missing_intermediate_is_missing() {
		let record = json!({"artist": {"name": "IDLES"}});
		assert_eq!(resolve_path(&record, "label.name"), Lookup::Missing);
		assert_eq!(resolve_path(&record, "artist.country.code"), Lookup::Missing);
	}

	#[test]
	fn test_missing_resolves_to_empty() {
		let record = json!({});
		assert_eq!(
			resolve_path(&record, "anything").or_empty(),
			Value::Str(String::new())
		);
	}

	#[test]
	fn test_value_ordering_across_kinds() {
		assert_eq!(Value::Int(2).compare(&Value::Int(10)), Ordering::Less);
		assert_eq!(Value::Int(2).compare(&Value::Float(1.5)), Ordering::Greater);
		assert_eq!(Value::Null.compare(&Value::Int(0)), Ordering::Less);
		assert_eq!(
			Value::Str("a".into()).compare(&Value::Str("b".into())),
			Ordering::Less
		);
	}
}
