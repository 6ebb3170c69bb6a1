//! Predicate composition and query planning
//!
//! Filters produce [`Predicate`]s, columns produce
//! [`OrderClause`](crate::ordering::OrderClause)s, and [`QueryPlan::build`]
//! composes both into the one executable description a
//! [`QuerySource`] runs. The crate ships [`MemorySource`], which evaluates
//! plans over an in-memory row collection; SQL-backed sources implement the
//! same trait by translating predicates into WHERE clauses.

use crate::column::Column;
use crate::error::Result;
use crate::filters::Filter;
use crate::ordering::{OrderClause, SortDirection};
use crate::params::RequestParams;
use crate::value::{Lookup, Record, Value, resolve_path};
use std::cmp::Ordering;

/// A boolean condition over one row, composable with AND/OR
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// Attribute equals the given value (compared in display form)
	Eq(String, String),
	/// Attribute equals any of the given values
	In(String, Vec<String>),
	/// Attribute contains the given text, case-insensitively
	Contains(String, String),
	/// Every sub-predicate holds
	And(Vec<Predicate>),
	/// At least one sub-predicate holds
	Or(Vec<Predicate>),
}

impl Predicate {
	/// Conjoins predicates; `None` when the list is empty, the lone element
	/// when there is exactly one.
	pub fn and(mut predicates: Vec<Predicate>) -> Option<Predicate> {
		match predicates.len() {
			0 => None,
			1 => predicates.pop(),
			_ => Some(Predicate::And(predicates)),
		}
	}

	/// Disjoins predicates, with the same empty/singleton collapsing as
	/// [`Predicate::and`]. An empty aggregation means "no constraint", never
	/// an always-false predicate.
	pub fn or(mut predicates: Vec<Predicate>) -> Option<Predicate> {
		match predicates.len() {
			0 => None,
			1 => predicates.pop(),
			_ => Some(Predicate::Or(predicates)),
		}
	}

	/// Evaluates this predicate against one record.
	///
	/// A missing attribute satisfies nothing.
	pub fn matches(&self, record: &dyn Record) -> bool {
		match self {
			Predicate::Eq(attribute, value) => match resolve_path(record, attribute) {
				Lookup::Found(found) => found.to_string() == *value,
				Lookup::Missing => false,
			},
			Predicate::In(attribute, values) => match resolve_path(record, attribute) {
				Lookup::Found(found) => values.contains(&found.to_string()),
				Lookup::Missing => false,
			},
			Predicate::Contains(attribute, needle) => match resolve_path(record, attribute) {
				Lookup::Found(found) => found
					.to_string()
					.to_lowercase()
					.contains(&needle.to_lowercase()),
				Lookup::Missing => false,
			},
			Predicate::And(predicates) => predicates.iter().all(|p| p.matches(record)),
			Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(record)),
		}
	}
}

/// The composed, executable description of one table query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
	/// Conjunction of all active filter predicates, if any
	pub filter: Option<Predicate>,
	/// ORDER BY clauses in column declaration order
	pub order: Vec<OrderClause>,
	/// Index (into the full column list) of the column that received the
	/// forced default sort because no column declared one. The presentation
	/// layer reflects the applied default in that column's header.
	pub applied_default_column: Option<usize>,
}

impl QueryPlan {
	/// Composes filters and column orderings into a plan.
	///
	/// Filter predicates are ANDed in declaration order; a filter yielding no
	/// constraint contributes nothing. Each visible column with a resolved
	/// direction contributes one ORDER BY clause; when none does, the first
	/// visible column is forced to Descending and reported through
	/// [`QueryPlan::applied_default_column`].
	///
	/// Fails with [`TableError::BadChoice`](crate::TableError::BadChoice)
	/// when a select filter received a value outside its choice set.
	pub fn build(columns: &[Column], filters: &[Filter], params: &RequestParams) -> Result<Self> {
		let mut predicates = Vec::new();
		for filter in filters {
			if let Some(predicate) = filter.to_predicate(columns, params)? {
				predicates.push(predicate);
			}
		}

		let mut order = Vec::new();
		for column in columns.iter().filter(|c| c.is_visible()) {
			if let Some(direction) = column.order() {
				order.push(OrderClause::new(column.attribute(), direction));
			}
		}
		let mut applied_default_column = None;
		if order.is_empty() {
			if let Some((index, column)) =
				columns.iter().enumerate().find(|(_, c)| c.is_visible())
			{
				order.push(OrderClause::new(
					column.attribute(),
					SortDirection::Descending,
				));
				applied_default_column = Some(index);
			}
		}

		Ok(Self {
			filter: Predicate::and(predicates),
			order,
			applied_default_column,
		})
	}
}

/// A countable, sliceable sequence of rows behind the table
///
/// Stands in for the relational engine. `count` runs the filtered but
/// unordered query; `fetch` runs the filtered, ordered query and materializes
/// exactly the `[offset, offset + limit)` slice.
pub trait QuerySource {
	/// The row type this source produces
	type Row: Record;

	/// Number of rows matching the filter.
	fn count(&self, filter: Option<&Predicate>) -> usize;

	/// The requested slice of matching rows, in the requested order.
	fn fetch(
		&self,
		filter: Option<&Predicate>,
		order: &[OrderClause],
		offset: usize,
		limit: usize,
	) -> Vec<Self::Row>;
}

/// In-memory [`QuerySource`] over a row collection
///
/// Evaluates predicates and orderings directly against [`Record`] lookups.
/// Sorting is stable, so rows tied on every order clause keep their original
/// relative order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<R> {
	rows: Vec<R>,
}

impl<R> MemorySource<R> {
	/// Wraps a row collection.
	pub fn new(rows: Vec<R>) -> Self {
		Self { rows }
	}

	/// Number of rows before any filtering.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true when the source holds no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl<R: Record + Clone> QuerySource for MemorySource<R> {
	type Row = R;

	fn count(&self, filter: Option<&Predicate>) -> usize {
		self.rows
			.iter()
			.filter(|row| filter.is_none_or(|p| p.matches(*row as &dyn Record)))
			.count()
	}

	fn fetch(
		&self,
		filter: Option<&Predicate>,
		order: &[OrderClause],
		offset: usize,
		limit: usize,
	) -> Vec<R> {
		let mut matching: Vec<&R> = self
			.rows
			.iter()
			.filter(|row| filter.is_none_or(|p| p.matches(*row as &dyn Record)))
			.collect();
		matching.sort_by(|a, b| compare_records(*a as &dyn Record, *b as &dyn Record, order));
		matching
			.into_iter()
			.skip(offset)
			.take(limit)
			.cloned()
			.collect()
	}
}

fn compare_records(a: &dyn Record, b: &dyn Record, order: &[OrderClause]) -> Ordering {
	for clause in order {
		let left = ordering_key(a, &clause.attribute);
		let right = ordering_key(b, &clause.attribute);
		let ordering = match clause.direction {
			SortDirection::Ascending => left.compare(&right),
			SortDirection::Descending => right.compare(&left),
		};
		if ordering != Ordering::Equal {
			return ordering;
		}
	}
	Ordering::Equal
}

fn ordering_key(record: &dyn Record, attribute: &str) -> Value {
	match resolve_path(record, attribute) {
		Lookup::Found(value) => value,
		Lookup::Missing => Value::Null,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn rows() -> Vec<serde_json::Value> {
		vec![
			json!({"id": 1, "name": "Oldies But Goodies 9"}),
			json!({"id": 2, "name": "Singles"}),
			json!({"id": 3, "name": "Nine Lives"}),
		]
	}

	#[test]
	fn test_contains_is_case_insensitive() {
		let predicate = Predicate::Contains("name".into(), "nine".into());
		let matched: Vec<_> = rows().into_iter().filter(|r| predicate.matches(r)).collect();
		assert_eq!(matched.len(), 1);
		assert_eq!(matched[0]["id"], 3);
	}

	#[test]
	fn test_or_composition() {
		let predicate = Predicate::Or(vec![
			Predicate::Eq("id".into(), "1".into()),
			Predicate::Eq("id".into(), "3".into()),
		]);
		let source = MemorySource::new(rows());
		assert_eq!(source.count(Some(&predicate)), 2);
	}

	#[test]
	fn test_and_collapses_empty_and_singleton() {
		assert_eq!(Predicate::and(vec![]), None);
		let single = Predicate::Eq("id".into(), "1".into());
		assert_eq!(Predicate::and(vec![single.clone()]), Some(single));
	}

	#[test]
	fn test_missing_attribute_matches_nothing() {
		let predicate = Predicate::Eq("nope".into(), "1".into());
		let source = MemorySource::new(rows());
		assert_eq!(source.count(Some(&predicate)), 0);
	}

	#[test]
	fn test_fetch_orders_and_slices() {
		let source = MemorySource::new(rows());
		let order = [OrderClause::new("id", SortDirection::Descending)];
		let fetched = source.fetch(None, &order, 1, 2);
		let ids: Vec<_> = fetched.iter().map(|r| r["id"].as_i64().unwrap()).collect();
		assert_eq!(ids, vec![2, 1]);
	}
}
