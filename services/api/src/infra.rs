use chrono::NaiveDate;
use fundmatch::config::DeskConfig;
use fundmatch::error::AppError;
use fundmatch::workflows::funder::applications::{
    ApplicationDeskService, BulkActionDispatcher, BulkActionRequest, DispatchError, RecordSource,
    SourceError,
};
use fundmatch::workflows::funder::{sample_grants, CsvRecordSource, GrantPortfolio, SampleRecords};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Bulk handler used until a review backend is wired in: logs each action and
/// keeps it in memory.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBulkDispatcher {
    requests: Arc<Mutex<Vec<BulkActionRequest>>>,
}

impl BulkActionDispatcher for InMemoryBulkDispatcher {
    fn dispatch(&self, request: BulkActionRequest) -> Result<(), DispatchError> {
        let mut guard = self
            .requests
            .lock()
            .map_err(|_| DispatchError::Transport("bulk action log poisoned".to_string()))?;
        info!(
            action = %request.action,
            applications = request.application_ids.len(),
            "bulk action recorded"
        );
        guard.push(request);
        Ok(())
    }
}

impl InMemoryBulkDispatcher {
    pub(crate) fn requests(&self) -> Vec<BulkActionRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// The configured CSV export, or the built-in sample applications.
pub(crate) fn record_source(desk: &DeskConfig) -> Box<dyn RecordSource> {
    match &desk.records_csv {
        Some(path) => Box::new(CsvRecordSource::from_path(path)),
        None => Box::new(SampleRecords),
    }
}

pub(crate) fn grant_portfolio() -> Result<GrantPortfolio, AppError> {
    let grants = sample_grants()
        .map_err(|err| SourceError::Unavailable(format!("sample grants: {err}")))?;
    Ok(GrantPortfolio::new(grants))
}

pub(crate) fn load_desk<D>(
    desk: &DeskConfig,
    dispatcher: Arc<D>,
) -> Result<ApplicationDeskService<D>, AppError>
where
    D: BulkActionDispatcher + 'static,
{
    let source = record_source(desk);
    let service =
        ApplicationDeskService::load(source.as_ref(), dispatcher, grant_portfolio()?, desk.page_size)?;
    Ok(service)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
