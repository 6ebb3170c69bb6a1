//! Table schema: the presentation-layer structure tying everything together
//!
//! A [`Table`] owns its [`Column`]s, its table-level [`Filter`]s, a
//! [`QuerySource`], and the current [`Pager`]. One table instance lives for
//! one request: [`Table::select`] re-derives rows and pager from scratch each
//! call, so calling it twice with unchanged parameters yields identical
//! output.

use crate::column::{Cell, Column};
use crate::error::{Result, TableError};
use crate::filters::Filter;
use crate::ordering::{SortDirection, order_token};
use crate::pager::Pager;
use crate::params::RequestParams;
use crate::query::{Predicate, QueryPlan, QuerySource};
use crate::render::{Environment, TemplateName};
use serde::Serialize;
use tera::Context;

/// One row of projected cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
	cells: Vec<Cell>,
}

impl Row {
	/// Creates an empty row.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a cell.
	pub fn push(&mut self, cell: Cell) {
		self.cells.push(cell);
	}

	/// The row's cells in column order.
	pub fn cells(&self) -> &[Cell] {
		&self.cells
	}

	/// Number of cells.
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	/// Returns true when the row holds no cells.
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
}

/// Builder for [`Table`]
///
/// The query source is the one mandatory collaborator; [`TableBuilder::build`]
/// fails with [`TableError::MissingSource`] without it. A missing environment
/// falls back to the default tera-backed one.
#[derive(Debug)]
pub struct TableBuilder<S> {
	entity: String,
	label: String,
	unit_label: String,
	columns: Vec<Column>,
	filters: Vec<Filter>,
	base_filter: Option<Predicate>,
	source: Option<S>,
	environment: Option<Environment>,
	params: RequestParams,
}

impl<S: QuerySource> TableBuilder<S> {
	/// Starts a builder for the given entity type name and table label.
	pub fn new(entity: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			entity: entity.into(),
			label: label.into(),
			unit_label: "row".to_owned(),
			columns: Vec::new(),
			filters: Vec::new(),
			base_filter: None,
			source: None,
			environment: None,
			params: RequestParams::new(),
		}
	}

	/// Appends a column.
	pub fn column(mut self, column: Column) -> Self {
		self.columns.push(column);
		self
	}

	/// Appends a table-level filter.
	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	/// Sets the counted-noun label shown next to the result count.
	pub fn unit_label(mut self, unit_label: impl Into<String>) -> Self {
		self.unit_label = unit_label.into();
		self
	}

	/// Constrains the base query, standing in for a pre-built query object.
	pub fn base_filter(mut self, predicate: Predicate) -> Self {
		self.base_filter = Some(predicate);
		self
	}

	/// Sets the query source.
	pub fn source(mut self, source: S) -> Self {
		self.source = Some(source);
		self
	}

	/// Sets the rendering environment.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = Some(environment);
		self
	}

	/// Sets the incoming request parameters.
	pub fn params(mut self, params: RequestParams) -> Self {
		self.params = params;
		self
	}

	/// Builds the table.
	pub fn build(self) -> Result<Table<S>> {
		let source = self.source.ok_or(TableError::MissingSource)?;
		let environment = match self.environment {
			Some(environment) => environment,
			None => Environment::new()?,
		};
		Ok(Table {
			entity: self.entity,
			label: self.label,
			unit_label: self.unit_label,
			columns: self.columns,
			filters: self.filters,
			base_filter: self.base_filter,
			source,
			environment,
			params: self.params,
			rows: Vec::new(),
			pager: Pager::default(),
			applied_default_column: None,
		})
	}
}

/// A paginated, filterable, sortable data table
pub struct Table<S: QuerySource> {
	entity: String,
	label: String,
	unit_label: String,
	columns: Vec<Column>,
	filters: Vec<Filter>,
	base_filter: Option<Predicate>,
	source: S,
	environment: Environment,
	params: RequestParams,
	rows: Vec<Row>,
	pager: Pager,
	applied_default_column: Option<usize>,
}

impl<S: QuerySource> Table<S> {
	/// Starts a [`TableBuilder`].
	pub fn builder(entity: impl Into<String>, label: impl Into<String>) -> TableBuilder<S> {
		TableBuilder::new(entity, label)
	}

	/// Appends a table-level filter after construction.
	pub fn add_filter(&mut self, filter: Filter) {
		self.filters.push(filter);
	}

	/// The entity type name this table lists.
	pub fn entity(&self) -> &str {
		&self.entity
	}

	/// The table label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// All declared columns, visible or not.
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// The rows materialized by the last [`Table::select`].
	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	/// The pager derived by the last [`Table::select`].
	pub fn pager(&self) -> &Pager {
		&self.pager
	}

	/// The request parameters this table was built with.
	pub fn params(&self) -> &RequestParams {
		&self.params
	}

	/// Index of the column that received the forced default sort during the
	/// last [`Table::select`], if no column declared an order.
	pub fn applied_default_column(&self) -> Option<usize> {
		self.applied_default_column
	}

	/// The direction column `index` is effectively sorted by: its declared
	/// order, or the forced default reported by the query plan.
	pub fn effective_order(&self, index: usize) -> Option<SortDirection> {
		let column = self.columns.get(index)?;
		column.order().or_else(|| {
			(self.applied_default_column == Some(index)).then_some(SortDirection::Descending)
		})
	}

	fn combined_filter(&self, plan_filter: Option<Predicate>) -> Option<Predicate> {
		match (self.base_filter.clone(), plan_filter) {
			(Some(base), Some(plan)) => Predicate::and(vec![base, plan]),
			(base, plan) => base.or(plan),
		}
	}

	/// Number of rows matching the active filters.
	///
	/// Runs the filtered but unordered query, so a count-only path never pays
	/// for a sort.
	pub fn count(&self) -> Result<usize> {
		let plan = QueryPlan::build(&self.columns, &self.filters, &self.params)?;
		let filter = self.combined_filter(plan.filter);
		Ok(self.source.count(filter.as_ref()))
	}

	/// Selects one page of rows, replacing the table's rows and pager.
	///
	/// Builds the query plan from the current filters and orderings, fetches
	/// exactly `[offset, offset + limit)`, projects each record through the
	/// visible columns, and re-derives the pager from the matching row count.
	/// Idempotent: repeated calls with unchanged state produce identical rows
	/// and pager. Returns `&mut Self` for chaining.
	pub fn select(&mut self, offset: usize, limit: usize) -> Result<&mut Self> {
		let plan = QueryPlan::build(&self.columns, &self.filters, &self.params)?;
		let filter = self.combined_filter(plan.filter);
		let count = self.source.count(filter.as_ref());
		let records = self.source.fetch(filter.as_ref(), &plan.order, offset, limit);
		tracing::debug!(
			entity = %self.entity,
			count,
			fetched = records.len(),
			offset,
			limit,
			"selected table page"
		);

		self.rows = records
			.iter()
			.enumerate()
			.map(|(row_index, record)| {
				let mut row = Row::new();
				for (col_index, column) in
					self.columns.iter().filter(|c| c.is_visible()).enumerate()
				{
					row.push(column.cell(col_index, row_index, record));
				}
				row
			})
			.collect();
		self.pager = Pager::new(limit, offset, count);
		self.applied_default_column = plan.applied_default_column;
		Ok(self)
	}

	/// Renders the whole table to HTML through the configured environment.
	pub fn render(&self) -> Result<String> {
		let environment = &self.environment;

		let mut column_fragments = Vec::new();
		for (index, column) in self.columns.iter().enumerate() {
			if !column.is_visible() {
				continue;
			}
			column_fragments.push(self.render_column_header(index, column)?);
		}

		let mut row_fragments = Vec::new();
		for row in &self.rows {
			row_fragments.push(self.render_row(row)?);
		}

		let mut filter_fragments = Vec::new();
		for filter in &self.filters {
			if let Some(fragment) = self.render_filter(filter)? {
				filter_fragments.push(fragment);
			}
		}

		let pager_fragment = self.render_pager()?;

		let mut context = Context::new();
		context.insert(
			"table",
			&TableContext {
				label: environment.translate(&self.label),
				count: self.pager.count,
				unit_label: self.unit_label.clone(),
				filters: filter_fragments,
				columns: column_fragments,
				rows: row_fragments,
				pager: pager_fragment,
				colspan: self.columns.iter().filter(|c| c.is_visible()).count(),
			},
		);
		environment.render(TemplateName::Table, &context)
	}

	fn render_cell(&self, cell: &Cell) -> Result<String> {
		let mut context = Context::new();
		context.insert(
			"cell",
			&CellContext {
				value: cell.value.to_string(),
				url: cell.link.clone(),
				classes: cell.classes.clone(),
			},
		);
		let template = if cell.link.is_some() {
			TemplateName::LinkedCell
		} else {
			TemplateName::Cell
		};
		self.environment.render(template, &context)
	}

	fn render_row(&self, row: &Row) -> Result<String> {
		let mut fragments = Vec::new();
		for cell in row.cells() {
			fragments.push(self.render_cell(cell)?);
		}
		let mut context = Context::new();
		context.insert("cells", &fragments);
		self.environment.render(TemplateName::Row, &context)
	}

	fn render_column_header(&self, index: usize, column: &Column) -> Result<String> {
		let order = self.effective_order(index);
		// Unsorted headers link to descending first, matching the default
		// sort the query plan would force.
		let next = order.map_or(SortDirection::Descending, SortDirection::toggle);
		let sort_url = self.environment.build_url(
			&self.params,
			&[("order_by", order_token(column.attribute(), next))],
		);
		let mut context = Context::new();
		context.insert(
			"column",
			&ColumnContext {
				label: self.environment.translate(column.label()),
				attribute: column.attribute().to_owned(),
				sortable: column.is_sortable(),
				order: order.map(|direction| direction.token().to_owned()),
				sort_url,
				classes: column.classes().to_vec(),
			},
		);
		self.environment.render(TemplateName::Column, &context)
	}

	fn render_pager(&self) -> Result<String> {
		let pages: Vec<PageContext> = self
			.pager
			.pages()
			.into_iter()
			.map(|page| PageContext {
				number: page.number,
				selected: page.selected,
				url: self.environment.build_url(
					&self.params,
					&[
						("offset", page.offset.to_string()),
						("limit", page.limit.to_string()),
					],
				),
			})
			.collect();
		let mut context = Context::new();
		context.insert("pages", &pages);
		self.environment.render(TemplateName::Pager, &context)
	}

	fn render_filter(&self, filter: &Filter) -> Result<Option<String>> {
		match filter {
			Filter::Select(select) => {
				let selected = select.selected(&self.params);
				let choices: Vec<ChoiceContext> = select
					.choices()
					.iter()
					.map(|choice| ChoiceContext {
						name: choice.name.clone(),
						description: self.environment.translate(&choice.description),
						selected: selected == Some(choice.name.as_str()),
					})
					.collect();
				let mut context = Context::new();
				context.insert(
					"filter",
					&SelectFilterContext {
						param: select.param(),
						attribute: select.attribute().to_owned(),
						choices,
					},
				);
				Ok(Some(
					self.environment.render(TemplateName::SelectFilter, &context)?,
				))
			}
			Filter::SearchSet(set) => {
				let names = set.params();
				let current_type = self.params.get(&names.type_param);
				let types: Vec<SearchTypeContext> = self
					.columns
					.iter()
					.flat_map(|column| {
						column.filters().iter().filter_map(|f| match f {
							Filter::Search(search) => Some(SearchTypeContext {
								attribute: search.attribute().to_owned(),
								label: self.environment.translate(column.label()),
								selected: current_type == Some(search.attribute()),
							}),
							Filter::SearchAlias(search) => Some(SearchTypeContext {
								attribute: search.alias().to_owned(),
								label: self.environment.translate(column.label()),
								selected: current_type == Some(search.alias()),
							}),
							_ => None,
						})
					})
					.collect();
				let mut context = Context::new();
				context.insert(
					"filter",
					&SearchSetContext {
						type_param: names.type_param.clone(),
						word_param: names.word_param.clone(),
						word: self
							.params
							.get(&names.word_param)
							.unwrap_or_default()
							.to_owned(),
						types,
					},
				);
				Ok(Some(
					self.environment
						.render(TemplateName::SearchFilterSet, &context)?,
				))
			}
			// Column-level search filters render as part of the search form,
			// not standalone.
			Filter::Search(_) | Filter::SearchAlias(_) => Ok(None),
		}
	}
}

impl<S: QuerySource> std::fmt::Debug for Table<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Table")
			.field("entity", &self.entity)
			.field("label", &self.label)
			.field("columns", &self.columns.len())
			.field("filters", &self.filters.len())
			.field("rows", &self.rows.len())
			.field("pager", &self.pager)
			.finish_non_exhaustive()
	}
}

#[derive(Serialize)]
struct TableContext {
	label: String,
	count: usize,
	unit_label: String,
	filters: Vec<String>,
	columns: Vec<String>,
	rows: Vec<String>,
	pager: String,
	colspan: usize,
}

#[derive(Serialize)]
struct CellContext {
	value: String,
	url: Option<String>,
	classes: Vec<String>,
}

#[derive(Serialize)]
struct ColumnContext {
	label: String,
	attribute: String,
	sortable: bool,
	order: Option<String>,
	sort_url: String,
	classes: Vec<String>,
}

#[derive(Serialize)]
struct PageContext {
	number: usize,
	selected: bool,
	url: String,
}

#[derive(Serialize)]
struct SelectFilterContext {
	param: String,
	attribute: String,
	choices: Vec<ChoiceContext>,
}

#[derive(Serialize)]
struct ChoiceContext {
	name: String,
	description: String,
	selected: bool,
}

#[derive(Serialize)]
struct SearchSetContext {
	type_param: String,
	word_param: String,
	word: String,
	types: Vec<SearchTypeContext>,
}

#[derive(Serialize)]
struct SearchTypeContext {
	attribute: String,
	label: String,
	selected: bool,
}
