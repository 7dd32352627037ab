//! Funder application table: filtering, sorting, pagination and the bulk
//! selection that drives approve, reject and export.

pub mod domain;
pub mod query;
pub mod repository;
pub mod router;
pub mod selection;
pub mod service;
pub mod view_state;

#[cfg(test)]
mod tests;

pub use domain::{
    Amount, ApplicationId, ApplicationRecord, ApplicationStatus, BadgeTone, Priority, Score,
    ScoreOutOfRange,
};
pub use query::{compute_view, unique_grants, unique_sectors, ApplicationView};
pub use repository::{
    ensure_unique_ids, BulkAction, BulkActionDispatcher, BulkActionRequest, DispatchError,
    RecordSource, SourceError, UnknownBulkAction,
};
pub use router::{application_router, ApplicationPageResponse, ApplicationRowView};
pub use selection::SelectionSet;
pub use service::{ApplicationDeskService, BulkActionReceipt, DeskServiceError};
pub use view_state::{
    GrantFilter, SectorFilter, SortDirection, SortIndicator, SortKey, SortKind, StatusFilter,
    ViewChange, ViewState, ViewStateError, DEFAULT_PAGE_SIZE,
};
