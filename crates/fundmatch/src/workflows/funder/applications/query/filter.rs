use super::super::domain::{ApplicationRecord, ApplicationStatus};
use super::super::view_state::{GrantFilter, SectorFilter, StatusFilter, ViewState};

pub(crate) fn matches(record: &ApplicationRecord, state: &ViewState) -> bool {
    matches_search(record, &state.search_term)
        && state.status_filter.matches(&record.status)
        && state.grant_filter.matches(&record.grant_title)
        && state.sector_filter.matches(&record.sector)
}

/// Case-insensitive substring match on company, grant title or sector.
fn matches_search(record: &ApplicationRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    [
        record.company_name.as_str(),
        record.grant_title.as_str(),
        record.sector.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

impl StatusFilter {
    pub fn matches(&self, status: &ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected.is_recognized() && expected == status,
        }
    }
}

impl GrantFilter {
    pub fn matches(&self, grant_title: &str) -> bool {
        match self {
            GrantFilter::All => true,
            GrantFilter::Only(expected) => expected == grant_title,
        }
    }
}

impl SectorFilter {
    pub fn matches(&self, sector: &str) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Only(expected) => expected.to_lowercase() == sector.to_lowercase(),
        }
    }
}
