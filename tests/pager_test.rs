//! Pager window behavior over a large result set

use datagrid::pager::{DEFAULT_PADDING, Page, Pager};
use proptest::prelude::*;
use rstest::*;

fn window(numbers: &[usize], current: usize, limit: usize) -> Vec<Page> {
	numbers
		.iter()
		.map(|&number| Page {
			number,
			offset: (number - 1) * limit,
			limit,
			selected: number == current,
		})
		.collect()
}

#[rstest]
#[case(0, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 100], 1)]
#[case(40, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 100], 5)]
#[case(100, vec![1, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 100], 11)]
#[case(940, vec![1, 91, 92, 93, 94, 95, 96, 97, 98, 99, 100], 95)]
#[case(90, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 100], 10)]
fn test_thousand_row_windows(
	#[case] offset: usize,
	#[case] expected: Vec<usize>,
	#[case] current: usize,
) {
	let pager = Pager::new(10, offset, 1000);
	assert_eq!(pager.pages(), window(&expected, current, 10));
	assert_eq!(pager.current_page(), current);
}

#[rstest]
fn test_first_window_pins_first_and_last_page() {
	let pager = Pager::new(10, 0, 1000);
	let pages = pager.pages();
	assert_eq!(pages.first().map(|p| p.number), Some(1));
	assert_eq!(pages.last().map(|p| p.number), Some(100));
}

#[rstest]
fn test_malformed_request_input_falls_back_wholesale() {
	let pager = Pager::from_request("ten", "40", "1000", "10");
	assert_eq!(pager.limit, 10);
	assert_eq!(pager.offset, 0);
	assert_eq!(pager.count, 0);
	assert_eq!(pager.padding, DEFAULT_PADDING);
}

#[rstest]
fn test_negative_request_input_falls_back() {
	let pager = Pager::from_request("10", "-40", "1000", "10");
	assert_eq!((pager.limit, pager.offset, pager.count), (10, 0, 0));
}

#[rstest]
fn test_well_formed_request_input_is_used() {
	let pager = Pager::from_request("10", "40", "1000", "10");
	assert_eq!(pager.current_page(), 5);
	assert_eq!(pager.total_pages(), 100);
}

#[rstest]
fn test_page_entries_carry_slice_coordinates() {
	let pager = Pager::new(10, 100, 1000);
	for page in pager.pages() {
		assert_eq!(page.offset, (page.number - 1) * 10);
		assert_eq!(page.limit, 10);
	}
}

proptest! {
	/// For any in-range offset: the window is non-empty, strictly increasing,
	/// pinned by page 1 and the last page, and exactly one entry is selected.
	#[test]
	fn window_is_well_formed(
		limit in 1usize..50,
		count in 1usize..5000,
		padding in 1usize..25,
		offset_seed in 0usize..5000,
	) {
		let offset = offset_seed % count;
		let pager = Pager::with_padding(limit, offset, count, padding);
		let pages = pager.pages();

		prop_assert!(!pages.is_empty());
		prop_assert_eq!(pages[0].number, 1);
		for pair in pages.windows(2) {
			prop_assert!(pair[0].number < pair[1].number);
		}
		prop_assert_eq!(pages.last().unwrap().number, pager.total_pages());

		let selected: Vec<_> = pages.iter().filter(|p| p.selected).collect();
		prop_assert_eq!(selected.len(), 1);
		prop_assert_eq!(selected[0].number, pager.current_page());
	}

	/// Every page number stays within [1, total_pages].
	#[test]
	fn window_stays_in_bounds(
		limit in 1usize..50,
		count in 1usize..5000,
		padding in 1usize..25,
		offset_seed in 0usize..5000,
	) {
		let offset = offset_seed % count;
		let pager = Pager::with_padding(limit, offset, count, padding);
		for page in pager.pages() {
			prop_assert!(page.number >= 1);
			prop_assert!(page.number <= pager.total_pages());
		}
	}
}
