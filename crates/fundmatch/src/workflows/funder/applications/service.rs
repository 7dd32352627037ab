use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use super::query::{compute_view, unique_grants, unique_sectors, ApplicationView};
use super::repository::{
    BulkAction, BulkActionDispatcher, BulkActionRequest, DispatchError, RecordSource, SourceError,
};
use super::selection::SelectionSet;
use super::view_state::ViewState;
use crate::workflows::funder::grants::{GrantPortfolio, GrantView};

/// Service composing the loaded record collection, the query pipeline and the
/// bulk-action dispatcher.
pub struct ApplicationDeskService<D> {
    records: Arc<Vec<ApplicationRecord>>,
    dispatcher: Arc<D>,
    portfolio: Arc<GrantPortfolio>,
    page_size: NonZeroUsize,
}

impl<D> ApplicationDeskService<D>
where
    D: BulkActionDispatcher + 'static,
{
    /// Loads the full collection once from `source`.
    pub fn load<S: RecordSource + ?Sized>(
        source: &S,
        dispatcher: Arc<D>,
        portfolio: GrantPortfolio,
        page_size: NonZeroUsize,
    ) -> Result<Self, DeskServiceError> {
        let records = source.load()?;
        info!(
            records = records.len(),
            grants = portfolio.all().len(),
            "application desk loaded"
        );
        Ok(Self {
            records: Arc::new(records),
            dispatcher,
            portfolio: Arc::new(portfolio),
            page_size,
        })
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    /// Initial table state using the configured page size.
    pub fn default_view(&self) -> ViewState {
        ViewState::with_page_size(self.page_size)
    }

    /// Runs the query pipeline for `view` as given.
    pub fn query(&self, view: &ViewState) -> ApplicationView<'_> {
        let result = compute_view(&self.records, view);
        debug!(
            search = %view.search_term,
            sort_key = view.sort_key.as_str(),
            sort_direction = view.sort_direction.as_str(),
            page = view.current_page.get(),
            matches = result.total_matches,
            "application query"
        );
        result
    }

    /// Runs the query and, when the requested page no longer exists, falls back
    /// to page 1. Returns the view that was actually rendered.
    pub fn query_clamped(&self, view: &ViewState) -> (ViewState, ApplicationView<'_>) {
        let result = self.query(view);
        let clamped = view.clamped(result.total_matches);
        if clamped == *view {
            return (clamped, result);
        }
        let result = self.query(&clamped);
        (clamped, result)
    }

    pub fn grant_options(&self) -> Vec<String> {
        unique_grants(&self.records)
    }

    pub fn sector_options(&self) -> Vec<String> {
        unique_sectors(&self.records)
    }

    pub fn status_options(&self) -> Vec<ApplicationStatus> {
        ApplicationStatus::recognized().to_vec()
    }

    pub fn active_grants(&self) -> Vec<GrantView> {
        self.portfolio
            .active()
            .into_iter()
            .map(|grant| grant.view())
            .collect()
    }

    /// Any grant in the portfolio, open or not.
    pub fn grant(&self, grant_id: &str) -> Option<GrantView> {
        self.portfolio.find(grant_id).map(|grant| grant.view())
    }

    /// Funds already committed across every grant in the portfolio.
    pub fn total_allocated(&self) -> u64 {
        self.portfolio.total_allocated()
    }

    /// Hands the selected ids to the external handler and returns the cleared
    /// selection. On failure the caller keeps its selection.
    pub fn bulk_action(
        &self,
        action: BulkAction,
        selection: &SelectionSet,
    ) -> Result<BulkActionReceipt, DeskServiceError> {
        if selection.is_empty() {
            return Err(DeskServiceError::EmptySelection);
        }

        let known: HashSet<&ApplicationId> = self.records.iter().map(|record| &record.id).collect();
        if let Some(unknown) = selection.ids().iter().find(|id| !known.contains(id)) {
            warn!(%action, application_id = %unknown, "bulk action references unknown application");
            return Err(DeskServiceError::UnknownApplication(unknown.clone()));
        }

        let application_ids = selection.ids().to_vec();
        self.dispatcher.dispatch(BulkActionRequest {
            action,
            application_ids: application_ids.clone(),
        })?;
        info!(%action, count = application_ids.len(), "bulk action dispatched");

        Ok(BulkActionReceipt {
            action,
            dispatched: application_ids,
            selection: SelectionSet::new(),
        })
    }
}

/// Outcome of a dispatched bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionReceipt {
    pub action: BulkAction,
    pub dispatched: Vec<ApplicationId>,
    pub selection: SelectionSet,
}

/// Error raised by the application desk service.
#[derive(Debug, thiserror::Error)]
pub enum DeskServiceError {
    #[error("no applications selected")]
    EmptySelection,
    #[error("unknown application '{0}'")]
    UnknownApplication(ApplicationId),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
