//! Filter resolution and ordering-spec behavior

use datagrid::query::{MemorySource, Predicate, QuerySource};
use datagrid::{
	AliasedSearchFilter, Choice, Column, Filter, RequestParams, SearchFilter, SearchFilterSet,
	SelectFilter, SortDirection, TableError, resolve_direction,
};
use rstest::*;
use serde_json::json;

fn genre_filter() -> SelectFilter {
	SelectFilter::new(
		"t",
		vec![Choice::new("genre", "Genre"), Choice::new("country", "Country")],
	)
}

#[rstest]
fn test_resolve_direction_token_forms() {
	assert_eq!(resolve_direction("id", "id.desc"), Some(SortDirection::Descending));
	assert_eq!(resolve_direction("id", ""), None);
	assert_eq!(
		resolve_direction("id", "name.asc,id.desc,id.asc"),
		Some(SortDirection::Ascending)
	);
}

#[rstest]
#[case("genre")]
#[case("country")]
fn test_select_filter_constrains_to_equality(#[case] choice: &str) {
	let params = RequestParams::from_pairs([("select.t", choice)]);
	let predicate = genre_filter().to_predicate(&params).unwrap();
	assert_eq!(predicate, Some(Predicate::Eq("t".into(), choice.into())));
}

#[rstest]
fn test_select_filter_all_lifts_constraint() {
	let params = RequestParams::from_pairs([("select.t", "all")]);
	assert_eq!(genre_filter().to_predicate(&params).unwrap(), None);
}

#[rstest]
fn test_select_filter_without_value_fails_open_to_declared_set() {
	let predicate = genre_filter().to_predicate(&RequestParams::new()).unwrap();
	assert_eq!(
		predicate,
		Some(Predicate::In(
			"t".into(),
			vec!["all".into(), "genre".into(), "country".into()]
		))
	);
}

#[rstest]
fn test_select_filter_default_choice_applies_without_value() {
	let filter = genre_filter().default_choice("genre");
	let predicate = filter.to_predicate(&RequestParams::new()).unwrap();
	assert_eq!(predicate, Some(Predicate::Eq("t".into(), "genre".into())));
}

#[rstest]
fn test_select_filter_rejects_undeclared_choice() {
	let params = RequestParams::from_pairs([("select.t", "rock")]);
	let err = genre_filter().to_predicate(&params).unwrap_err();
	match err {
		TableError::BadChoice { param, value } => {
			assert_eq!(param, "select.t");
			assert_eq!(value, "rock");
		}
		other => panic!("expected BadChoice, got {other:?}"),
	}
}

#[rstest]
fn test_search_filter_round_trip() {
	// Entity `Music` derives search_music.* parameter names
	let filter = SearchFilter::new("Music", "name");
	let names = filter.params();
	assert_eq!(names.type_param, "search_music.type");
	assert_eq!(names.word_param, "search_music.word");

	let params = RequestParams::from_pairs([
		("search_music.type", "name"),
		("search_music.word", "9"),
	]);
	let predicate = filter.to_predicate(&params).expect("type matches");

	let matching = json!({"name": "Oldies But Goodies 9"});
	let other = json!({"name": "Singles"});
	assert!(predicate.matches(&matching));
	assert!(!predicate.matches(&other));
}

#[rstest]
fn test_search_filter_ignores_other_search_types() {
	let filter = SearchFilter::new("Music", "name");
	let params = RequestParams::from_pairs([
		("search_music.type", "genre"),
		("search_music.word", "9"),
	]);
	assert_eq!(filter.to_predicate(&params), None);
}

#[rstest]
fn test_aliased_search_filter_uses_identifier_verbatim() {
	let filter = AliasedSearchFilter::new("tag_type", "type");
	let params = RequestParams::from_pairs([
		("search_tag_type.type", "type"),
		("search_tag_type.word", "genre"),
	]);
	assert_eq!(
		filter.to_predicate(&params),
		Some(Predicate::Contains("type".into(), "genre".into()))
	);
}

#[rstest]
fn test_search_set_ors_column_filters() {
	let columns = vec![
		Column::new("Name", "name").filter(Filter::Search(SearchFilter::new("Music", "name"))),
		Column::new("Genre", "genre")
			.visible(false)
			.filter(Filter::Search(SearchFilter::new("Music", "genre"))),
	];
	let set = SearchFilterSet::for_entity("Music");

	// Only the matching search type contributes; a single active filter
	// collapses to its own predicate.
	let params = RequestParams::from_pairs([
		("search_music.type", "genre"),
		("search_music.word", "rock"),
	]);
	assert_eq!(
		set.to_predicate(&columns, &params),
		Some(Predicate::Contains("genre".into(), "rock".into()))
	);

	// No active filter yields no constraint, never an always-false predicate.
	assert_eq!(set.to_predicate(&columns, &RequestParams::new()), None);
}

#[rstest]
fn test_search_set_predicate_filters_source() {
	let source = MemorySource::new(vec![
		json!({"name": "Nine Lives", "genre": "rock"}),
		json!({"name": "Singles", "genre": "jazz"}),
	]);
	let columns =
		vec![Column::new("Name", "name").filter(Filter::Search(SearchFilter::new("Music", "name")))];
	let params = RequestParams::from_pairs([
		("search_music.type", "name"),
		("search_music.word", "nine"),
	]);
	let predicate = SearchFilterSet::for_entity("Music")
		.to_predicate(&columns, &params)
		.expect("search is active");
	assert_eq!(source.count(Some(&predicate)), 1);
}
