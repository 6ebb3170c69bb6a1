//! Request-driven filters
//!
//! Every filter resolves the current request parameters into an optional
//! [`Predicate`]; `None` means "no constraint, do not filter". The variants
//! form a closed set:
//!
//! - [`SelectFilter`]: exact-choice filter over an enumerated value set,
//!   `select.<attribute>=<name>` on the wire
//! - [`SearchFilter`]: case-insensitive substring search gated by a matching
//!   search type, `search_<entity>.type` / `search_<entity>.word` on the wire
//! - [`AliasedSearchFilter`]: substring search against an aliased or derived
//!   column expression
//! - [`SearchFilterSet`]: ORs together every substring filter declared on a
//!   table's columns, backing the table-wide search form

use crate::column::Column;
use crate::error::{Result, TableError};
use crate::params::RequestParams;
use crate::query::Predicate;
use crate::text::to_snake_case;

/// Name of the synthetic choice that lifts a select filter's constraint
pub const ALL_CHOICE: &str = "all";

/// One selectable option of a [`SelectFilter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
	/// Wire value of the option
	pub name: String,
	/// Human-readable description shown in the form
	pub description: String,
}

impl Choice {
	/// Creates a choice.
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
		}
	}
}

/// Restricts an attribute to one of an enumerated set of values
///
/// A synthetic `all` choice is prepended to the declared ones. When the
/// request carries no value (and no default is configured) the filter fails
/// open to the full declared set (an allow-list, not a no-op). A value
/// outside the declared set is a [`TableError::BadChoice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFilter {
	attribute: String,
	choices: Vec<Choice>,
	default: Option<String>,
}

impl SelectFilter {
	/// Creates a select filter over the given choices.
	pub fn new(attribute: impl Into<String>, choices: Vec<Choice>) -> Self {
		let mut all = vec![Choice::new(ALL_CHOICE, "All")];
		all.extend(choices);
		Self {
			attribute: attribute.into(),
			choices: all,
			default: None,
		}
	}

	/// Sets the value assumed when the request carries none.
	pub fn default_choice(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// The filtered attribute.
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// All choices, the synthetic `all` included.
	pub fn choices(&self) -> &[Choice] {
		&self.choices
	}

	/// The request parameter this filter reads.
	pub fn param(&self) -> String {
		format!("select.{}", self.attribute)
	}

	/// The currently effective choice value, if any.
	pub fn selected<'a>(&'a self, params: &'a RequestParams) -> Option<&'a str> {
		params.get(&self.param()).or(self.default.as_deref())
	}

	/// Resolves this filter against the request.
	pub fn to_predicate(&self, params: &RequestParams) -> Result<Option<Predicate>> {
		let param = self.param();
		let value = params.get(&param).or(self.default.as_deref());
		let names: Vec<String> = self.choices.iter().map(|c| c.name.clone()).collect();
		match value {
			None | Some("") => Ok(Some(Predicate::In(self.attribute.clone(), names))),
			Some(value) if !names.iter().any(|n| n == value) => Err(TableError::BadChoice {
				param,
				value: value.to_owned(),
			}),
			Some(ALL_CHOICE) => Ok(None),
			Some(value) => Ok(Some(Predicate::Eq(
				self.attribute.clone(),
				value.to_owned(),
			))),
		}
	}
}

/// The `search_<identifier>.type` / `search_<identifier>.word` parameter pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
	/// Parameter naming the attribute being searched
	pub type_param: String,
	/// Parameter carrying the search text
	pub word_param: String,
}

impl SearchParams {
	/// Derives the parameter pair for a search identifier.
	pub fn for_identifier(identifier: &str) -> Self {
		Self {
			type_param: format!("search_{identifier}.type"),
			word_param: format!("search_{identifier}.word"),
		}
	}
}

/// Case-insensitive substring search on one attribute
///
/// Parameter names are derived from the owning entity's type name converted
/// to snake_case: an entity `Music` reads `search_music.type` and
/// `search_music.word`. The filter only constrains the query when the
/// request's `.type` names this filter's attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
	entity: String,
	attribute: String,
}

impl SearchFilter {
	/// Creates a search filter for `attribute` of the entity type `entity`.
	pub fn new(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
		Self {
			entity: entity.into(),
			attribute: attribute.into(),
		}
	}

	/// The searched attribute.
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// The derived request parameter pair.
	pub fn params(&self) -> SearchParams {
		SearchParams::for_identifier(&to_snake_case(&self.entity))
	}

	/// Resolves this filter against the request.
	pub fn to_predicate(&self, params: &RequestParams) -> Option<Predicate> {
		let names = self.params();
		if params.get(&names.type_param) == Some(self.attribute.as_str()) {
			let word = params.get(&names.word_param).unwrap_or_default();
			Some(Predicate::Contains(self.attribute.clone(), word.to_owned()))
		} else {
			None
		}
	}
}

/// Substring search against an aliased or derived column expression
///
/// Same contract as [`SearchFilter`], but the parameter identifier is
/// caller-supplied (not derived from a type name) and the match targets the
/// aliased expression, needed when the query joins an aliased relation whose
/// attribute is not addressable on the root entity. Unlike [`SearchFilter`],
/// an empty search word produces no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedSearchFilter {
	identifier: String,
	alias: String,
}

impl AliasedSearchFilter {
	/// Creates an aliased search filter.
	pub fn new(identifier: impl Into<String>, alias: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
			alias: alias.into(),
		}
	}

	/// The aliased expression being searched.
	pub fn alias(&self) -> &str {
		&self.alias
	}

	/// The derived request parameter pair.
	pub fn params(&self) -> SearchParams {
		SearchParams::for_identifier(&self.identifier)
	}

	/// Resolves this filter against the request.
	pub fn to_predicate(&self, params: &RequestParams) -> Option<Predicate> {
		let names = self.params();
		let word = params.get(&names.word_param).unwrap_or_default();
		if !word.is_empty() && params.get(&names.type_param) == Some(self.alias.as_str()) {
			Some(Predicate::Contains(self.alias.clone(), word.to_owned()))
		} else {
			None
		}
	}
}

/// Table-wide OR aggregation of every substring filter on any column
///
/// Collects the [`SearchFilter`]s and [`AliasedSearchFilter`]s declared on a
/// table's columns, visible or not, and combines their active predicates
/// with OR. An empty aggregation yields no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterSet {
	identifier: String,
}

impl SearchFilterSet {
	/// Creates a filter set with an explicit parameter identifier.
	pub fn new(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
		}
	}

	/// Creates a filter set whose identifier is derived from an entity type
	/// name, the way [`SearchFilter`] derives its parameters.
	pub fn for_entity(entity: &str) -> Self {
		Self::new(to_snake_case(entity))
	}

	/// The request parameter pair the search form submits.
	pub fn params(&self) -> SearchParams {
		SearchParams::for_identifier(&self.identifier)
	}

	/// Resolves this filter set against the request and the table's columns.
	pub fn to_predicate(&self, columns: &[Column], params: &RequestParams) -> Option<Predicate> {
		let mut predicates = Vec::new();
		for column in columns {
			for filter in column.filters() {
				match filter {
					Filter::Search(search) => {
						if let Some(predicate) = search.to_predicate(params) {
							predicates.push(predicate);
						}
					}
					Filter::SearchAlias(search) => {
						if let Some(predicate) = search.to_predicate(params) {
							predicates.push(predicate);
						}
					}
					Filter::Select(_) | Filter::SearchSet(_) => {}
				}
			}
		}
		Predicate::or(predicates)
	}
}

/// The closed set of filters a table or column can carry
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// Exact-choice filter
	Select(SelectFilter),
	/// Substring search on a directly addressable attribute
	Search(SearchFilter),
	/// Substring search on an aliased expression
	SearchAlias(AliasedSearchFilter),
	/// OR aggregation of a table's substring filters
	SearchSet(SearchFilterSet),
}

impl Filter {
	/// Resolves this filter into an optional predicate.
	///
	/// `columns` is consulted by [`Filter::SearchSet`] only. `Ok(None)` means
	/// the filter imposes no constraint on the current request.
	pub fn to_predicate(
		&self,
		columns: &[Column],
		params: &RequestParams,
	) -> Result<Option<Predicate>> {
		match self {
			Filter::Select(filter) => filter.to_predicate(params),
			Filter::Search(filter) => Ok(filter.to_predicate(params)),
			Filter::SearchAlias(filter) => Ok(filter.to_predicate(params)),
			Filter::SearchSet(filter) => Ok(filter.to_predicate(columns, params)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_search_params_derivation() {
		let filter = SearchFilter::new("Music", "name");
		let names = filter.params();
		assert_eq!(names.type_param, "search_music.type");
		assert_eq!(names.word_param, "search_music.word");
	}

	#[test]
	fn test_search_filter_requires_matching_type() {
		let filter = SearchFilter::new("Music", "name");
		let params = RequestParams::from_pairs([
			("search_music.type", "genre"),
			("search_music.word", "rock"),
		]);
		assert_eq!(filter.to_predicate(&params), None);
	}

	#[test]
	fn test_aliased_search_requires_word() {
		let filter = AliasedSearchFilter::new("tag_type", "type");
		let params = RequestParams::from_pairs([("search_tag_type.type", "type")]);
		assert_eq!(filter.to_predicate(&params), None);

		let params = RequestParams::from_pairs([
			("search_tag_type.type", "type"),
			("search_tag_type.word", "genre"),
		]);
		assert_eq!(
			filter.to_predicate(&params),
			Some(Predicate::Contains("type".into(), "genre".into()))
		);
	}

	#[test]
	fn test_select_filter_prepends_all_choice() {
		let filter = SelectFilter::new("t", vec![Choice::new("genre", "Genre")]);
		assert_eq!(filter.choices()[0].name, ALL_CHOICE);
		assert_eq!(filter.choices().len(), 2);
	}

	#[test]
	fn test_select_filter_empty_value_fails_open() {
		let filter = SelectFilter::new("t", vec![Choice::new("genre", "")]);
		let params = RequestParams::from_pairs([("select.t", "")]);
		assert_eq!(
			filter.to_predicate(&params).unwrap(),
			Some(Predicate::In("t".into(), vec!["all".into(), "genre".into()]))
		);
	}
}
