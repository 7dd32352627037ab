use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationId, ApplicationRecord, BadgeTone};
use super::repository::{BulkAction, BulkActionDispatcher};
use super::selection::SelectionSet;
use super::service::{ApplicationDeskService, DeskServiceError};
use super::view_state::{SortIndicator, SortKey, ViewState};

/// Router builder exposing the application table and bulk-action endpoints.
pub fn application_router<D>(service: Arc<ApplicationDeskService<D>>) -> Router
where
    D: BulkActionDispatcher + 'static,
{
    Router::new()
        .route(
            "/api/v1/funder/applications/query",
            post(query_handler::<D>),
        )
        .route(
            "/api/v1/funder/applications/filters",
            get(filters_handler::<D>),
        )
        .route(
            "/api/v1/funder/applications/selection/toggle",
            post(toggle_handler),
        )
        .route(
            "/api/v1/funder/applications/selection/toggle-all",
            post(toggle_all_handler),
        )
        .route("/api/v1/funder/applications/bulk", post(bulk_handler::<D>))
        .route("/api/v1/funder/grants", get(grants_handler::<D>))
        .route("/api/v1/funder/grants/:grant_id", get(grant_handler::<D>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryRequest {
    #[serde(default)]
    pub(crate) view: Option<ViewState>,
}

/// A table row: the record plus the display hints the table renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRowView {
    #[serde(flatten)]
    pub record: ApplicationRecord,
    pub score_label: String,
    pub status_tone: BadgeTone,
    pub priority_tone: BadgeTone,
}

impl From<&ApplicationRecord> for ApplicationRowView {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            score_label: record.score.display(),
            status_tone: record.status.tone(),
            priority_tone: record.priority.tone(),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPageResponse {
    pub view: ViewState,
    pub rows: Vec<ApplicationRowView>,
    pub total_matches: usize,
    pub total_pages: usize,
    pub sort_indicators: BTreeMap<SortKey, SortIndicator>,
}

pub(crate) async fn query_handler<D>(
    State(service): State<Arc<ApplicationDeskService<D>>>,
    axum::Json(request): axum::Json<QueryRequest>,
) -> Response
where
    D: BulkActionDispatcher + 'static,
{
    let requested = request.view.unwrap_or_else(|| service.default_view());
    let (view, result) = service.query_clamped(&requested);

    let sort_indicators = SortKey::all()
        .into_iter()
        .map(|key| (key, view.sort_indicator(key)))
        .collect();
    let rows = result
        .page
        .iter()
        .map(|record| ApplicationRowView::from(*record))
        .collect();

    let response = ApplicationPageResponse {
        rows,
        total_matches: result.total_matches,
        total_pages: result.total_pages,
        sort_indicators,
        view,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn filters_handler<D>(
    State(service): State<Arc<ApplicationDeskService<D>>>,
) -> Response
where
    D: BulkActionDispatcher + 'static,
{
    let statuses: Vec<String> = service
        .status_options()
        .into_iter()
        .map(String::from)
        .collect();
    let payload = json!({
        "grants": service.grant_options(),
        "sectors": service.sector_options(),
        "statuses": statuses,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleRequest {
    #[serde(default)]
    pub(crate) selection: SelectionSet,
    pub(crate) id: ApplicationId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToggleAllRequest {
    #[serde(default)]
    pub(crate) selection: SelectionSet,
    pub(crate) visible_ids: Vec<ApplicationId>,
}

pub(crate) async fn toggle_handler(axum::Json(request): axum::Json<ToggleRequest>) -> Response {
    let ToggleRequest { mut selection, id } = request;
    selection.toggle(id);
    (StatusCode::OK, axum::Json(json!({ "selection": selection }))).into_response()
}

pub(crate) async fn toggle_all_handler(
    axum::Json(request): axum::Json<ToggleAllRequest>,
) -> Response {
    let ToggleAllRequest {
        mut selection,
        visible_ids,
    } = request;
    selection.toggle_all(&visible_ids);
    let all_selected = selection.all_selected(&visible_ids);
    let payload = json!({
        "selection": selection,
        "allSelected": all_selected,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkRequest {
    pub(crate) action: String,
    #[serde(default)]
    pub(crate) selection: SelectionSet,
}

pub(crate) async fn bulk_handler<D>(
    State(service): State<Arc<ApplicationDeskService<D>>>,
    axum::Json(request): axum::Json<BulkRequest>,
) -> Response
where
    D: BulkActionDispatcher + 'static,
{
    let action = match request.action.parse::<BulkAction>() {
        Ok(action) => action,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.bulk_action(action, &request.selection) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(DeskServiceError::EmptySelection) => {
            let payload = json!({ "error": DeskServiceError::EmptySelection.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err @ DeskServiceError::UnknownApplication(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err @ DeskServiceError::Dispatch(_)) => {
            let payload = json!({
                "error": err.to_string(),
                "selection": request.selection,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn grants_handler<D>(
    State(service): State<Arc<ApplicationDeskService<D>>>,
) -> Response
where
    D: BulkActionDispatcher + 'static,
{
    let payload = json!({
        "grants": service.active_grants(),
        "totalAllocated": service.total_allocated(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn grant_handler<D>(
    State(service): State<Arc<ApplicationDeskService<D>>>,
    Path(grant_id): Path<String>,
) -> Response
where
    D: BulkActionDispatcher + 'static,
{
    match service.grant(&grant_id) {
        Some(grant) => (StatusCode::OK, axum::Json(json!({ "grant": grant }))).into_response(),
        None => {
            let payload = json!({ "error": format!("grant {} not found", grant_id) });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
