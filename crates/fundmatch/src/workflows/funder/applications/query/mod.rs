//! Pure filter, sort and paginate pipeline behind the funder application table.
//!
//! Recomputed from scratch on every call; nothing is cached between calls.

mod filter;
mod paginate;
mod sort;

pub use paginate::{page_bounds, total_pages};
pub use sort::compare_records;

use std::collections::HashSet;

use serde::Serialize;

use super::domain::{ApplicationId, ApplicationRecord};
use super::view_state::ViewState;

/// One rendered page plus the pagination metadata the table footer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView<'a> {
    pub page: Vec<&'a ApplicationRecord>,
    pub total_matches: usize,
    pub total_pages: usize,
}

impl ApplicationView<'_> {
    pub fn visible_ids(&self) -> Vec<ApplicationId> {
        self.page.iter().map(|record| record.id.clone()).collect()
    }
}

/// Filters, stably sorts and slices `records` according to `state`.
///
/// The current page is used as given; a page past the end yields an empty
/// slice and callers clamp with [`ViewState::clamped`].
pub fn compute_view<'a>(records: &'a [ApplicationRecord], state: &ViewState) -> ApplicationView<'a> {
    let mut matched: Vec<&ApplicationRecord> = records
        .iter()
        .filter(|record| filter::matches(record, state))
        .collect();

    sort::sort_records(&mut matched, state.sort_key, state.sort_direction);

    let total_matches = matched.len();
    let total_pages = total_pages(total_matches, state.page_size);
    let page = paginate::slice_page(matched, state.current_page, state.page_size);

    ApplicationView {
        page,
        total_matches,
        total_pages,
    }
}

/// Distinct grant titles in first-seen order, for the grant filter menu.
pub fn unique_grants(records: &[ApplicationRecord]) -> Vec<String> {
    distinct(records.iter().map(|record| record.grant_title.as_str()))
}

/// Distinct sectors in first-seen order, for the category filter menu.
pub fn unique_sectors(records: &[ApplicationRecord]) -> Vec<String> {
    distinct(records.iter().map(|record| record.sector.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
