use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ServiceError,
    handlers::resolve_as_of,
    services::expiry::{self, ExpiryOverview, ExpiryRow, ExpiryView},
    ApiResponse, AppState,
};

pub fn expiry_routes() -> Router<AppState> {
    Router::new()
        .route("/table", get(get_expiry_table))
        .route("/overview", get(get_expiry_overview))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpiryTableQuery {
    pub as_of: Option<String>,
    /// One of "All", "Expired", "Expiring Soon", "Expiring in 30 Days";
    /// anything else falls back to "All"
    pub view: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpiryOverviewQuery {
    pub as_of: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/expiry/table",
    params(ExpiryTableQuery),
    responses(
        (status = 200, description = "Expiry-management table rows", body = ApiResponse<Vec<ExpiryRow>>)
    ),
    tag = "Expiry"
)]
pub async fn get_expiry_table(
    State(state): State<AppState>,
    Query(params): Query<ExpiryTableQuery>,
) -> Result<Json<ApiResponse<Vec<ExpiryRow>>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let view = params
        .view
        .as_deref()
        .map(ExpiryView::parse)
        .unwrap_or_default();
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(expiry::expiry_rows(
        &snapshot, today, view,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/expiry/overview",
    params(ExpiryOverviewQuery),
    responses(
        (status = 200, description = "Expiry counters over the full product table", body = ApiResponse<ExpiryOverview>)
    ),
    tag = "Expiry"
)]
pub async fn get_expiry_overview(
    State(state): State<AppState>,
    Query(params): Query<ExpiryOverviewQuery>,
) -> Result<Json<ApiResponse<ExpiryOverview>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(expiry::expiry_overview(
        &snapshot, today,
    ))))
}
