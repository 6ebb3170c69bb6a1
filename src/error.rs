//! Error types for table construction, filtering, and rendering

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors produced while building or rendering a table
#[derive(Debug, Error)]
pub enum TableError {
	/// A select filter received a request value outside its declared choice
	/// set. Signals a malformed or tampered request; callers should map this
	/// to a client-error response.
	#[error("invalid choice for `{param}`: {value}")]
	BadChoice {
		/// The request parameter that carried the bad value
		param: String,
		/// The rejected value
		value: String,
	},

	/// A table was built without a query source
	#[error("table requires a query source")]
	MissingSource,

	/// Template rendering failed
	#[error("template rendering failed")]
	Template(#[from] tera::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bad_choice_message_names_parameter() {
		let err = TableError::BadChoice {
			param: "select.genre".into(),
			value: "rock".into(),
		};
		assert_eq!(err.to_string(), "invalid choice for `select.genre`: rock");
	}
}
