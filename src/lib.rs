//! Server-rendered HTML data grids for Rust web applications
//!
//! This crate renders paginated, filterable, sortable HTML tables backed by a
//! relational query layer: an admin-style data grid without hand-written
//! query/pagination/templating glue for every table.
//!
//! # Architecture
//!
//! - **Pager**: offset/limit pagination with a sliding page-number window,
//!   first and last page always pinned
//! - **Ordering**: `order_by=<attr>.<asc|desc>` resolution with a
//!   deterministic default
//! - **Filters**: a closed set of request-driven predicates (exact choice,
//!   substring search, aliased substring search, table-wide OR aggregation)
//! - **Query plan**: filters ANDed in declaration order plus per-column
//!   ORDER BY clauses, executed by a [`QuerySource`]
//! - **Table/Row/Cell**: the presentation structure handed to the
//!   tera-backed [`Renderer`](render::Renderer)
//!
//! # Example
//!
//! ```
//! use datagrid::{Column, MemorySource, RequestParams, Table};
//! use serde_json::json;
//!
//! let source = MemorySource::new(vec![
//!     json!({"id": 1, "name": "Elbow"}),
//!     json!({"id": 2, "name": "Doves"}),
//! ]);
//! let mut table = Table::builder("Music", "Albums")
//!     .column(Column::new("ID", "id").order_by("id.asc"))
//!     .column(Column::new("Name", "name"))
//!     .params(RequestParams::from_pairs([("order_by", "id.asc")]))
//!     .source(source)
//!     .build()
//!     .unwrap();
//! table.select(0, 10).unwrap();
//! assert_eq!(table.rows().len(), 2);
//! let html = table.render().unwrap();
//! assert!(html.contains("Elbow"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod filters;
pub mod ordering;
pub mod pager;
pub mod params;
pub mod query;
pub mod render;
pub mod table;
pub mod text;
pub mod value;

// Re-exports for convenience
pub use column::{Cell, Column, LinkTarget};
pub use error::{Result, TableError};
pub use filters::{
	AliasedSearchFilter, Choice, Filter, SearchFilter, SearchFilterSet, SelectFilter,
};
pub use ordering::{OrderClause, SortDirection, resolve_direction};
pub use pager::{Page, Pager};
pub use params::RequestParams;
pub use query::{MemorySource, Predicate, QueryPlan, QuerySource};
pub use render::{Environment, Renderer, TemplateName};
pub use table::{Row, Table, TableBuilder};
pub use value::{Lookup, Record, Value, resolve_path};
