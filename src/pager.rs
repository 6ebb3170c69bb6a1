//! Offset/limit pagination with a sliding page-number window
//!
//! The pager turns `(limit, offset, count)` into the list of page links a
//! table footer shows: page 1 is always pinned first, then a window of
//! `padding` consecutive pages around the current one, then the last page as
//! a trailing jump target when the window stops short of it.
//!
//! ```text
//! count=1000, limit=10, offset=100  →  [1] [11 12 13 14 15 16 17 18 19 20] [100]
//! ```

use serde::Serialize;

/// Rows per page when the request does not say otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// Offset when the request does not say otherwise
pub const DEFAULT_OFFSET: usize = 0;

/// Window size when the caller does not say otherwise
pub const DEFAULT_PADDING: usize = 10;

/// One entry in the pager: a page number with its slice coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
	/// 1-based page number
	pub number: usize,
	/// Offset of the page's first row
	pub offset: usize,
	/// Rows per page
	pub limit: usize,
	/// Whether this is the page currently shown
	pub selected: bool,
}

/// Pagination state for one result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
	/// Rows per page; never zero
	pub limit: usize,
	/// Offset of the current page's first row
	pub offset: usize,
	/// Total number of matching rows
	pub count: usize,
	/// Window size; never zero
	pub padding: usize,
}

impl Pager {
	/// Creates a pager with the default window size.
	pub fn new(limit: usize, offset: usize, count: usize) -> Self {
		Self::with_padding(limit, offset, count, DEFAULT_PADDING)
	}

	/// Creates a pager with an explicit window size.
	///
	/// A zero `limit` or `padding` would divide by zero downstream and is
	/// normalized to 1 and [`DEFAULT_PADDING`] respectively.
	pub fn with_padding(limit: usize, offset: usize, count: usize, padding: usize) -> Self {
		Self {
			limit: limit.max(1),
			offset,
			count,
			padding: if padding == 0 { DEFAULT_PADDING } else { padding },
		}
	}

	/// Parses a pager from raw request strings.
	///
	/// Pagination input is untrusted; a malformed field is not an error.
	/// When any of the four values fails to parse as a non-negative integer
	/// the whole pager falls back to the defaults
	/// `{limit: 10, offset: 0, count: 0, padding: 10}`.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid::pager::Pager;
	///
	/// let pager = Pager::from_request("10", "40", "1000", "10");
	/// assert_eq!(pager.current_page(), 5);
	///
	/// let fallback = Pager::from_request("ten", "40", "1000", "10");
	/// assert_eq!((fallback.limit, fallback.offset, fallback.count), (10, 0, 0));
	/// ```
	pub fn from_request(limit: &str, offset: &str, count: &str, padding: &str) -> Self {
		match (
			limit.parse::<usize>(),
			offset.parse::<usize>(),
			count.parse::<usize>(),
			padding.parse::<usize>(),
		) {
			(Ok(limit), Ok(offset), Ok(count), Ok(padding)) => {
				Self::with_padding(limit, offset, count, padding)
			}
			_ => {
				tracing::debug!(limit, offset, count, padding, "malformed pagination input, using defaults");
				Self::with_padding(DEFAULT_LIMIT, DEFAULT_OFFSET, 0, DEFAULT_PADDING)
			}
		}
	}

	/// Total number of pages, `ceil(count / limit)`.
	pub fn total_pages(&self) -> usize {
		self.count.div_ceil(self.limit)
	}

	/// 1-based number of the page the current offset falls in.
	pub fn current_page(&self) -> usize {
		self.offset / self.limit + 1
	}

	/// Builds the (unselected) page entry for a page number.
	pub fn page(&self, number: usize) -> Page {
		Page {
			number,
			offset: self.limit * (number.max(1) - 1),
			limit: self.limit,
			selected: false,
		}
	}

	/// Computes the visible page window.
	///
	/// Page 1 always comes first. Then every page in
	/// `[window_start, window_start + padding - 1]` clamped to the total page
	/// count, where `window_start = ((current - 1) / padding) * padding + 1`,
	/// skipping a duplicate of page 1. If the window stops short of the last
	/// page, the last page is appended as a jump target, so first and last are
	/// always pinned. Exactly the entry whose number equals the current page
	/// is `selected`.
	pub fn pages(&self) -> Vec<Page> {
		let total = self.total_pages();
		let current = self.current_page();
		let window_start = (current - 1) / self.padding * self.padding + 1;
		let window_end = window_start + self.padding - 1;

		let mut pages = vec![self.numbered(1, current)];
		let mut number = window_start;
		while number <= window_end && number <= total {
			if number > 1 {
				pages.push(self.numbered(number, current));
			}
			number += 1;
		}
		if number <= total {
			pages.push(self.numbered(total, current));
		}
		pages
	}

	fn numbered(&self, number: usize, current: usize) -> Page {
		Page {
			selected: number == current,
			..self.page(number)
		}
	}
}

impl Default for Pager {
	fn default() -> Self {
		Self::new(DEFAULT_LIMIT, DEFAULT_OFFSET, 0)
	}
}
