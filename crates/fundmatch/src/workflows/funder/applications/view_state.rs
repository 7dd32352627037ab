use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::ApplicationStatus;

/// Rows per page on the funder dashboard.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("default page size must be positive"),
};

const ALL: &str = "all";

/// Errors raised when a view parameter arrives in string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewStateError {
    #[error("unknown application status '{0}'")]
    UnknownStatus(String),
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownSortDirection(String),
}

/// Status column filter. `"all"` disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl FromStr for StatusFilter {
    type Err = ViewStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ALL {
            return Ok(Self::All);
        }
        ApplicationStatus::from_label(value)
            .map(Self::Only)
            .ok_or_else(|| ViewStateError::UnknownStatus(value.to_string()))
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ViewStateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::All => ALL.to_string(),
            StatusFilter::Only(status) => status.into(),
        }
    }
}

/// Grant column filter, matched against the exact grant title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrantFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for GrantFilter {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for GrantFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<GrantFilter> for String {
    fn from(value: GrantFilter) -> Self {
        match value {
            GrantFilter::All => ALL.to_string(),
            GrantFilter::Only(title) => title,
        }
    }
}

/// Sector ("category") filter, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectorFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for SectorFilter {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for SectorFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SectorFilter> for String {
    fn from(value: SectorFilter) -> Self {
        match value {
            SectorFilter::All => ALL.to_string(),
            SectorFilter::Only(sector) => sector,
        }
    }
}

/// Sortable columns of the application table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CompanyName,
    GrantTitle,
    Sector,
    Stage,
    Location,
    Employees,
    Amount,
    Status,
    Priority,
    Score,
    SubmittedDate,
    LastActivity,
    Reviewer,
}

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Text,
    Numeric,
    Currency,
    Date,
}

impl SortKey {
    pub const fn all() -> [Self; 13] {
        [
            Self::CompanyName,
            Self::GrantTitle,
            Self::Sector,
            Self::Stage,
            Self::Location,
            Self::Employees,
            Self::Amount,
            Self::Status,
            Self::Priority,
            Self::Score,
            Self::SubmittedDate,
            Self::LastActivity,
            Self::Reviewer,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::GrantTitle => "grantTitle",
            Self::Sector => "sector",
            Self::Stage => "stage",
            Self::Location => "location",
            Self::Employees => "employees",
            Self::Amount => "amount",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Score => "score",
            Self::SubmittedDate => "submittedDate",
            Self::LastActivity => "lastActivity",
            Self::Reviewer => "reviewer",
        }
    }

    pub const fn kind(self) -> SortKind {
        match self {
            Self::SubmittedDate | Self::LastActivity => SortKind::Date,
            Self::Amount => SortKind::Currency,
            Self::Score => SortKind::Numeric,
            Self::CompanyName
            | Self::GrantTitle
            | Self::Sector
            | Self::Stage
            | Self::Location
            | Self::Employees
            | Self::Status
            | Self::Priority
            | Self::Reviewer => SortKind::Text,
        }
    }
}

impl FromStr for SortKey {
    type Err = ViewStateError;

    /// Accepts the camelCase column names and their snake_case spelling.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == folded)
            .ok_or_else(|| ViewStateError::UnknownSortKey(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ViewStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ViewStateError::UnknownSortDirection(value.to_string())),
        }
    }
}

/// Header arrow for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// Search, filter, sort and page parameters of one rendered application table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub grant_filter: GrantFilter,
    pub sector_filter: SectorFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub current_page: NonZeroUsize,
    pub page_size: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// A single user interaction with the table controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    Search(String),
    Status(StatusFilter),
    Grant(GrantFilter),
    Sector(SectorFilter),
    SortBy(SortKey),
    GoToPage(NonZeroUsize),
    PageSize(NonZeroUsize),
}

impl ViewState {
    /// Dashboard defaults: newest submissions first, page 1.
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            grant_filter: GrantFilter::All,
            sector_filter: SectorFilter::All,
            sort_key: SortKey::SubmittedDate,
            sort_direction: SortDirection::Descending,
            current_page: NonZeroUsize::MIN,
            page_size,
        }
    }

    /// Returns the state after `change`. Filter and page size changes go back to
    /// page 1; re-selecting the active sort column flips its direction and a new
    /// column starts ascending.
    pub fn apply(&self, change: ViewChange) -> Self {
        let mut next = self.clone();
        match change {
            ViewChange::Search(term) => {
                next.search_term = term;
                next.current_page = NonZeroUsize::MIN;
            }
            ViewChange::Status(filter) => {
                next.status_filter = filter;
                next.current_page = NonZeroUsize::MIN;
            }
            ViewChange::Grant(filter) => {
                next.grant_filter = filter;
                next.current_page = NonZeroUsize::MIN;
            }
            ViewChange::Sector(filter) => {
                next.sector_filter = filter;
                next.current_page = NonZeroUsize::MIN;
            }
            ViewChange::SortBy(key) => {
                if next.sort_key == key {
                    next.sort_direction = next.sort_direction.flipped();
                } else {
                    next.sort_key = key;
                    next.sort_direction = SortDirection::Ascending;
                }
            }
            ViewChange::GoToPage(page) => next.current_page = page,
            ViewChange::PageSize(size) => {
                next.page_size = size;
                next.current_page = NonZeroUsize::MIN;
            }
        }
        next
    }

    /// Index of the first row on the current page.
    pub fn page_start(&self) -> usize {
        (self.current_page.get() - 1).saturating_mul(self.page_size.get())
    }

    /// Falls back to page 1 once the result set no longer reaches the current
    /// page's first row.
    pub fn clamped(&self, total_matches: usize) -> Self {
        if self.current_page.get() > 1 && self.page_start() >= total_matches {
            let mut next = self.clone();
            next.current_page = NonZeroUsize::MIN;
            next
        } else {
            self.clone()
        }
    }

    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        if self.sort_key != key {
            return SortIndicator::Unsorted;
        }
        match self.sort_direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero page")
    }

    #[test]
    fn defaults_follow_dashboard_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.sort_key, SortKey::SubmittedDate);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.current_page.get(), 1);
        assert_eq!(state.page_size.get(), 10);
        assert_eq!(state.status_filter, StatusFilter::All);
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let state = ViewState::default().apply(ViewChange::GoToPage(page(3)));
        assert_eq!(state.current_page.get(), 3);

        let searched = state.apply(ViewChange::Search("tech".to_string()));
        assert_eq!(searched.current_page.get(), 1);
        assert_eq!(searched.search_term, "tech");

        let by_grant = state.apply(ViewChange::Grant(GrantFilter::from("Green Energy Initiative")));
        assert_eq!(by_grant.current_page.get(), 1);

        let sorted = state.apply(ViewChange::SortBy(SortKey::Amount));
        assert_eq!(sorted.current_page.get(), 3);
    }

    #[test]
    fn sorting_same_column_flips_direction() {
        let state = ViewState::default();

        let flipped = state.apply(ViewChange::SortBy(SortKey::SubmittedDate));
        assert_eq!(flipped.sort_direction, SortDirection::Ascending);

        let other = flipped.apply(ViewChange::SortBy(SortKey::Score));
        assert_eq!(other.sort_key, SortKey::Score);
        assert_eq!(other.sort_direction, SortDirection::Ascending);
        assert_eq!(other.sort_indicator(SortKey::Score), SortIndicator::Ascending);
        assert_eq!(other.sort_indicator(SortKey::Amount), SortIndicator::Unsorted);

        let again = other.apply(ViewChange::SortBy(SortKey::Score));
        assert_eq!(again.sort_indicator(SortKey::Score), SortIndicator::Descending);
    }

    #[test]
    fn clamped_returns_to_first_page_when_results_shrink() {
        let state = ViewState::default().apply(ViewChange::GoToPage(page(3)));
        assert_eq!(state.page_start(), 20);

        assert_eq!(state.clamped(23).current_page.get(), 3);
        assert_eq!(state.clamped(20).current_page.get(), 1);
        assert_eq!(state.clamped(0).current_page.get(), 1);
        assert_eq!(ViewState::default().clamped(0).current_page.get(), 1);
    }

    #[test]
    fn string_forms_parse_or_fail_loudly() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Approved".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(ApplicationStatus::Approved))
        );
        assert_eq!(
            "approved".parse::<StatusFilter>(),
            Err(ViewStateError::UnknownStatus("approved".to_string()))
        );

        assert_eq!("submittedDate".parse::<SortKey>(), Ok(SortKey::SubmittedDate));
        assert_eq!("last_activity".parse::<SortKey>(), Ok(SortKey::LastActivity));
        assert!("revenue".parse::<SortKey>().is_err());
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Descending));
    }

    #[test]
    fn sort_keys_map_to_typed_comparators() {
        assert_eq!(SortKey::Amount.kind(), SortKind::Currency);
        assert_eq!(SortKey::Score.kind(), SortKind::Numeric);
        assert_eq!(SortKey::LastActivity.kind(), SortKind::Date);
        assert_eq!(SortKey::Reviewer.kind(), SortKind::Text);
    }

    #[test]
    fn view_state_deserializes_with_defaults() {
        let state: ViewState = serde_json::from_value(serde_json::json!({
            "searchTerm": "green",
            "statusFilter": "Approved",
            "sortKey": "amount",
            "sortDirection": "asc",
            "currentPage": 2
        }))
        .expect("view state parses");

        assert_eq!(state.search_term, "green");
        assert_eq!(state.status_filter, StatusFilter::Only(ApplicationStatus::Approved));
        assert_eq!(state.grant_filter, GrantFilter::All);
        assert_eq!(state.sort_key, SortKey::Amount);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.current_page.get(), 2);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);

        let rejected = serde_json::from_value::<ViewState>(serde_json::json!({
            "statusFilter": "Escalated"
        }));
        assert!(rejected.is_err());

        let zero_page = serde_json::from_value::<ViewState>(serde_json::json!({
            "currentPage": 0
        }));
        assert!(zero_page.is_err());
    }
}
