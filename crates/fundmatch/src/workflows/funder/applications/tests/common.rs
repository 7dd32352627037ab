use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::funder::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, Priority, Score,
};
use crate::workflows::funder::applications::repository::{
    BulkActionDispatcher, BulkActionRequest, DispatchError,
};
use crate::workflows::funder::applications::{
    application_router, ApplicationDeskService, ViewState,
};
use crate::workflows::funder::grants::GrantPortfolio;
use crate::workflows::funder::sample::{sample_grants, sample_records, SampleRecords};

pub(super) fn page(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("non-zero")
}

pub(super) fn samples() -> Vec<ApplicationRecord> {
    sample_records().expect("sample records load")
}

pub(super) fn record(id: &str, company: &str) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId::new(id),
        company_name: company.to_string(),
        grant_title: "Tech Innovation Grant 2024".to_string(),
        sector: "Technology".to_string(),
        stage: "Seed".to_string(),
        location: "California".to_string(),
        employees: "10".to_string(),
        amount: "$10,000".to_string(),
        status: ApplicationStatus::UnderReview,
        priority: Priority::Medium,
        score: Score::new(50).expect("valid score"),
        submitted_date: "2024-02-01".to_string(),
        last_activity: "2024-02-02".to_string(),
        reviewer: Some("John Smith".to_string()),
        documents: 1,
        chat_messages: 0,
    }
}

pub(super) fn with_amount(id: &str, amount: &str) -> ApplicationRecord {
    let mut record = record(id, &format!("Company {id}"));
    record.amount = amount.to_string();
    record
}

/// `count` records with ids `r01..`, all otherwise equal.
pub(super) fn numbered_records(count: usize) -> Vec<ApplicationRecord> {
    (1..=count)
        .map(|n| record(&format!("r{n:02}"), &format!("Company {n:02}")))
        .collect()
}

pub(super) fn ids(records: &[&ApplicationRecord]) -> Vec<String> {
    records.iter().map(|record| record.id.0.clone()).collect()
}

pub(super) fn app_ids(values: &[&str]) -> Vec<ApplicationId> {
    values.iter().map(|value| ApplicationId::new(*value)).collect()
}

pub(super) fn unfiltered(page_size: usize) -> ViewState {
    ViewState::with_page_size(page(page_size))
}

#[derive(Default, Clone)]
pub(super) struct MemoryDispatcher {
    requests: Arc<Mutex<Vec<BulkActionRequest>>>,
}

impl MemoryDispatcher {
    pub(super) fn requests(&self) -> Vec<BulkActionRequest> {
        self.requests.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl BulkActionDispatcher for MemoryDispatcher {
    fn dispatch(&self, request: BulkActionRequest) -> Result<(), DispatchError> {
        self.requests
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(request);
        Ok(())
    }
}

pub(super) struct OfflineDispatcher;

impl BulkActionDispatcher for OfflineDispatcher {
    fn dispatch(&self, _request: BulkActionRequest) -> Result<(), DispatchError> {
        Err(DispatchError::Transport("review backend offline".to_string()))
    }
}

pub(super) fn portfolio() -> GrantPortfolio {
    GrantPortfolio::new(sample_grants().expect("sample grants load"))
}

pub(super) fn build_service() -> (
    ApplicationDeskService<MemoryDispatcher>,
    Arc<MemoryDispatcher>,
) {
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let service = ApplicationDeskService::load(
        &SampleRecords,
        dispatcher.clone(),
        portfolio(),
        page(10),
    )
    .expect("service loads");
    (service, dispatcher)
}

pub(super) fn offline_service() -> ApplicationDeskService<OfflineDispatcher> {
    ApplicationDeskService::load(
        &SampleRecords,
        Arc::new(OfflineDispatcher),
        portfolio(),
        page(10),
    )
    .expect("service loads")
}

pub(super) fn router_with_service(
    service: ApplicationDeskService<MemoryDispatcher>,
) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
