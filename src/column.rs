//! Column declarations and cell projection

use crate::filters::Filter;
use crate::ordering::{SortDirection, resolve_direction};
use crate::value::{Record, Value, resolve_path};
use std::fmt;
use std::sync::Arc;

/// Link target of a linked column
#[derive(Clone)]
pub enum LinkTarget {
	/// Every cell links to the same URL
	Fixed(String),
	/// The URL is derived from the row's record
	Derived(Arc<dyn Fn(&dyn Record) -> String + Send + Sync>),
}

impl LinkTarget {
	/// Resolves the link for one record.
	pub fn resolve(&self, record: &dyn Record) -> String {
		match self {
			LinkTarget::Fixed(url) => url.clone(),
			LinkTarget::Derived(build) => build(record),
		}
	}
}

impl fmt::Debug for LinkTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LinkTarget::Fixed(url) => f.debug_tuple("Fixed").field(url).finish(),
			LinkTarget::Derived(_) => f.debug_tuple("Derived").finish_non_exhaustive(),
		}
	}
}

/// One declared column of a table
///
/// A column pairs a header label with a dotted attribute path, plus the
/// filters, sortability, and visibility that govern how it participates in
/// query construction. Invisible columns render nothing but their filters
/// still feed the table-wide search.
///
/// # Examples
///
/// ```
/// use datagrid::column::Column;
///
/// let column = Column::new("Artist", "artist.name")
///     .order_by("artist.name.asc")
///     .sortable(true);
/// assert_eq!(column.attribute(), "artist.name");
/// ```
#[derive(Debug, Clone)]
pub struct Column {
	label: String,
	attribute: String,
	filters: Vec<Filter>,
	order: Option<SortDirection>,
	sortable: bool,
	visible: bool,
	classes: Vec<String>,
	default: Option<Value>,
	link: Option<LinkTarget>,
}

impl Column {
	/// Creates a sortable, visible column.
	pub fn new(label: impl Into<String>, attribute: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			attribute: attribute.into(),
			filters: Vec::new(),
			order: None,
			sortable: true,
			visible: true,
			classes: Vec::new(),
			default: None,
			link: None,
		}
	}

	/// Resolves this column's sort direction from a request `order_by` spec.
	///
	/// The direction is derived once, here; an empty or non-matching spec
	/// leaves the column unordered.
	pub fn order_by(mut self, spec: &str) -> Self {
		self.order = resolve_direction(&self.attribute, spec);
		self
	}

	/// Attaches a filter.
	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	/// Sets whether the header offers sorting.
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether the column is rendered. Invisible columns keep feeding
	/// the table-wide search filters.
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Adds a CSS class applied to this column's cells.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.classes.push(class.into());
		self
	}

	/// Sets the value substituted when attribute resolution comes up empty.
	pub fn default_value(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// Turns cells of this column into links.
	pub fn link(mut self, target: LinkTarget) -> Self {
		self.link = Some(target);
		self
	}

	/// Appends a filter after construction.
	pub fn add_filter(&mut self, filter: Filter) {
		self.filters.push(filter);
	}

	/// The header label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// The dotted attribute path.
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// The filters attached to this column.
	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	/// The resolved sort direction, if the request ordered by this column.
	pub fn order(&self) -> Option<SortDirection> {
		self.order
	}

	/// Whether the header offers sorting.
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Whether the column is rendered.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// CSS classes applied to this column's cells.
	pub fn classes(&self) -> &[String] {
		&self.classes
	}

	/// Projects one record into this column's cell at `(col, row)`.
	///
	/// The attribute path is resolved with dotted traversal; a miss yields an
	/// empty string, which the declared default then replaces.
	pub fn cell(&self, col: usize, row: usize, record: &dyn Record) -> Cell {
		let mut value = resolve_path(record, &self.attribute).or_empty();
		if value.is_empty() {
			if let Some(default) = &self.default {
				value = default.clone();
			}
		}
		Cell {
			col,
			row,
			value,
			link: self.link.as_ref().map(|target| target.resolve(record)),
			classes: self.classes.clone(),
		}
	}
}

/// One addressable cell of the rendered table
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
	/// Column position
	pub col: usize,
	/// Row position
	pub row: usize,
	/// Display value
	pub value: Value,
	/// Optional link target
	pub link: Option<String>,
	/// CSS classes inherited from the column
	pub classes: Vec<String>,
}
