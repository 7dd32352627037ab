use super::common::*;
use crate::workflows::funder::applications::domain::ApplicationId;
use crate::workflows::funder::applications::query::compute_view;
use crate::workflows::funder::applications::selection::SelectionSet;
use crate::workflows::funder::applications::view_state::{ViewChange, ViewState};

#[test]
fn toggle_adds_then_removes_an_id() {
    let mut selection = SelectionSet::new();

    selection.toggle(ApplicationId::new("3"));
    assert!(selection.is_selected(&ApplicationId::new("3")));
    assert_eq!(selection.len(), 1);

    selection.toggle(ApplicationId::new("3"));
    assert!(selection.is_empty());
}

#[test]
fn toggle_accepts_ids_outside_the_visible_page() {
    let mut selection = SelectionSet::from_ids(app_ids(&["1"]));

    selection.toggle(ApplicationId::new("not-on-this-page"));

    assert_eq!(selection.ids(), app_ids(&["1", "not-on-this-page"]).as_slice());
}

#[test]
fn toggle_all_selects_exactly_the_visible_page() {
    let records = samples();
    let view = compute_view(&records, &ViewState::default().apply(ViewChange::PageSize(page(3))));
    let visible = view.visible_ids();
    let mut selection = SelectionSet::from_ids(app_ids(&["8"]));

    selection.toggle_all(&visible);

    assert_eq!(selection, SelectionSet::from_ids(app_ids(&["5", "4", "1"])));
    assert!(selection.all_selected(&visible));
    assert!(!selection.is_selected(&ApplicationId::new("8")));
}

#[test]
fn toggle_all_twice_restores_an_empty_selection() {
    let visible = app_ids(&["1", "2", "3"]);
    let mut selection = SelectionSet::new();

    selection.toggle_all(&visible);
    selection.toggle_all(&visible);

    assert!(selection.is_empty());
}

#[test]
fn toggle_all_twice_restores_a_full_selection() {
    let visible = app_ids(&["1", "2", "3"]);
    let mut selection = SelectionSet::from_ids(app_ids(&["3", "1", "2"]));

    selection.toggle_all(&visible);
    assert!(selection.is_empty());

    selection.toggle_all(&visible);
    assert_eq!(selection, SelectionSet::from_ids(visible.clone()));
}

#[test]
fn partial_selection_becomes_full_on_toggle_all() {
    let visible = app_ids(&["1", "2", "3"]);
    let mut selection = SelectionSet::from_ids(app_ids(&["2"]));
    assert!(!selection.all_selected(&visible));

    selection.toggle_all(&visible);

    assert!(selection.all_selected(&visible));
}

#[test]
fn select_all_does_not_merge_across_pages() {
    let records = numbered_records(15);
    let first_page = ViewState::with_page_size(page(10));
    let second_page = first_page.apply(ViewChange::GoToPage(page(2)));

    let mut selection = SelectionSet::new();
    selection.toggle_all(&compute_view(&records, &first_page).visible_ids());
    assert_eq!(selection.len(), 10);

    let visible = compute_view(&records, &second_page).visible_ids();
    selection.toggle_all(&visible);

    assert_eq!(selection.len(), 5);
    assert_eq!(selection, SelectionSet::from_ids(visible));
}

#[test]
fn empty_page_is_never_all_selected() {
    let selection = SelectionSet::new();

    assert!(!selection.all_selected(&[]));
}

#[test]
fn clear_empties_the_selection() {
    let mut selection = SelectionSet::from_ids(app_ids(&["1", "2"]));

    selection.clear();

    assert!(selection.is_empty());
}

#[test]
fn retain_visible_drops_rows_that_left_the_page() {
    let mut selection = SelectionSet::from_ids(app_ids(&["1", "2", "3"]));

    selection.retain_visible(&app_ids(&["2", "3", "4"]));

    assert_eq!(selection.into_ids(), app_ids(&["2", "3"]));
}

#[test]
fn equality_ignores_order() {
    assert_eq!(
        SelectionSet::from_ids(app_ids(&["1", "2"])),
        SelectionSet::from_ids(app_ids(&["2", "1"]))
    );
}

#[test]
fn deserializing_drops_duplicate_ids() {
    let selection: SelectionSet =
        serde_json::from_str(r#"["4", "1", "4"]"#).expect("selection parses");

    assert_eq!(selection.ids(), app_ids(&["4", "1"]).as_slice());
    assert_eq!(
        serde_json::to_value(&selection).expect("serializes"),
        serde_json::json!(["4", "1"])
    );
}
