//! Rendering environment: templates, URL building, translation
//!
//! The process-wide environment singleton of classic server frameworks is
//! replaced by an explicit [`Environment`] handed to the table builder. It
//! bundles the three collaborators the presentation layer needs: a
//! [`Renderer`] (tera-backed by default, with the crate's templates
//! embedded), a URL builder for sort-header and pager links, and a
//! translation hook for labels. Tests inject stubs instead of patching
//! globals.

use crate::error::Result;
use crate::params::RequestParams;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;
use tera::{Context, Tera};

/// The fixed logical template identifiers the table renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
	/// A plain `<td>` cell
	Cell,
	/// A `<td>` cell wrapping a link
	LinkedCell,
	/// A `<tr>` row of pre-rendered cells
	Row,
	/// A `<th>` column header
	Column,
	/// The whole table
	Table,
	/// The page-number footer
	Pager,
	/// An exact-choice filter form
	SelectFilter,
	/// The table-wide substring search form
	SearchFilterSet,
}

impl TemplateName {
	/// The template file name behind this identifier.
	pub fn file_name(self) -> &'static str {
		match self {
			TemplateName::Cell => "cell.html",
			TemplateName::LinkedCell => "linked_cell.html",
			TemplateName::Row => "row.html",
			TemplateName::Column => "column.html",
			TemplateName::Table => "table.html",
			TemplateName::Pager => "pager.html",
			TemplateName::SelectFilter => "select_filter.html",
			TemplateName::SearchFilterSet => "search_filter_set.html",
		}
	}
}

/// Turns a template name and context into markup
pub trait Renderer {
	/// Renders one template.
	fn render(&self, template: TemplateName, context: &Context) -> Result<String>;
}

/// Default [`Renderer`] backed by tera with the crate's embedded templates
///
/// Autoescaping is on for all templates; pre-rendered fragments are passed
/// back in explicitly marked `safe`.
pub struct TeraRenderer {
	tera: Tera,
}

impl TeraRenderer {
	/// Builds the renderer from the embedded template set.
	pub fn new() -> Result<Self> {
		let mut tera = Tera::default();
		tera.add_raw_templates(vec![
			("cell.html", include_str!("../templates/cell.html")),
			("linked_cell.html", include_str!("../templates/linked_cell.html")),
			("row.html", include_str!("../templates/row.html")),
			("column.html", include_str!("../templates/column.html")),
			("table.html", include_str!("../templates/table.html")),
			("pager.html", include_str!("../templates/pager.html")),
			("select_filter.html", include_str!("../templates/select_filter.html")),
			(
				"search_filter_set.html",
				include_str!("../templates/search_filter_set.html"),
			),
		])?;
		Ok(Self { tera })
	}
}

impl Renderer for TeraRenderer {
	fn render(&self, template: TemplateName, context: &Context) -> Result<String> {
		Ok(self.tera.render(template.file_name(), context)?)
	}
}

impl fmt::Debug for TeraRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TeraRenderer").finish_non_exhaustive()
	}
}

/// Builds a relative URL from the current request parameters plus overrides
pub type UrlBuilder = Arc<dyn Fn(&RequestParams, &[(&str, String)]) -> String + Send + Sync>;

/// Translates a label for the active locale
pub type Translator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Default URL builder: the current query string with overrides applied.
///
/// Overridden keys replace any current value; the result is a relative URL of
/// the form `?a=1&b=2` with keys in deterministic order.
pub fn query_string_url(params: &RequestParams, overrides: &[(&str, String)]) -> String {
	let mut merged: std::collections::BTreeMap<String, String> = params
		.iter()
		.map(|(k, v)| (k.to_owned(), v.to_owned()))
		.collect();
	for (key, value) in overrides {
		merged.insert((*key).to_owned(), value.clone());
	}
	let mut url = String::from("?");
	for (i, (key, value)) in merged.iter().enumerate() {
		if i > 0 {
			url.push('&');
		}
		let _ = write!(url, "{}={}", encode_component(key), encode_component(value));
	}
	url
}

/// Percent-encodes a query-string component.
fn encode_component(text: &str) -> String {
	let mut encoded = String::with_capacity(text.len());
	for byte in text.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
				encoded.push(byte as char);
			}
			_ => {
				let _ = write!(encoded, "%{byte:02X}");
			}
		}
	}
	encoded
}

/// Explicit rendering configuration for one table
///
/// # Examples
///
/// ```
/// use datagrid::render::Environment;
///
/// let env = Environment::new().unwrap().translator(|label| label.to_uppercase());
/// assert_eq!(env.translate("name"), "NAME");
/// ```
#[derive(Clone)]
pub struct Environment {
	renderer: Arc<dyn Renderer + Send + Sync>,
	url_builder: UrlBuilder,
	translator: Translator,
}

impl Environment {
	/// Creates the default environment: embedded tera templates, query-string
	/// URL builder, identity translation.
	pub fn new() -> Result<Self> {
		Ok(Self::with_renderer(Arc::new(TeraRenderer::new()?)))
	}

	/// Creates an environment around a custom renderer.
	pub fn with_renderer(renderer: Arc<dyn Renderer + Send + Sync>) -> Self {
		Self {
			renderer,
			url_builder: Arc::new(query_string_url),
			translator: Arc::new(|label| label.to_owned()),
		}
	}

	/// Replaces the URL builder.
	pub fn url_builder(
		mut self,
		build: impl Fn(&RequestParams, &[(&str, String)]) -> String + Send + Sync + 'static,
	) -> Self {
		self.url_builder = Arc::new(build);
		self
	}

	/// Replaces the translation hook.
	pub fn translator(mut self, translate: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
		self.translator = Arc::new(translate);
		self
	}

	/// Renders one template through the configured renderer.
	pub fn render(&self, template: TemplateName, context: &Context) -> Result<String> {
		self.renderer.render(template, context)
	}

	/// Builds a relative URL from `params` with `overrides` applied.
	pub fn build_url(&self, params: &RequestParams, overrides: &[(&str, String)]) -> String {
		(self.url_builder)(params, overrides)
	}

	/// Translates a label.
	pub fn translate(&self, label: &str) -> String {
		(self.translator)(label)
	}
}

impl fmt::Debug for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Environment").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_query_string_url_merges_overrides() {
		let params = RequestParams::from_pairs([("order_by", "id.desc"), ("offset", "0")]);
		let url = query_string_url(&params, &[("offset", "20".to_owned())]);
		assert_eq!(url, "?offset=20&order_by=id.desc");
	}

	#[test]
	fn test_query_string_url_encodes_values() {
		let params = RequestParams::from_pairs([("search_music.word", "a b&c")]);
		let url = query_string_url(&params, &[]);
		assert_eq!(url, "?search_music.word=a%20b%26c");
	}
}
