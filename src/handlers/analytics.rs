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
    services::metrics::{
        self, ProfitBreakdown, RealtimeMetrics, SalesPoint, SalesSummary, WastePoint, WasteSummary,
        DEFAULT_TOP_CATEGORIES, DEFAULT_WASTE_MONTHS,
    },
    services::notifications::{self, Notification},
    ApiResponse, AppState,
};

/// Build the analytics Router scoped under `/api/v1/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/realtime", get(get_realtime_metrics))
        .route("/sales/monthly", get(get_monthly_sales))
        .route("/sales/summary", get(get_sales_summary))
        .route("/profit/categories", get(get_top_profit_categories))
        .route("/waste/monthly", get(get_monthly_waste))
        .route("/waste/quarterly", get(get_quarterly_waste))
        .route("/notifications", get(get_notifications))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AsOfQuery {
    /// Reference date (YYYY-MM-DD); defaults to the current UTC date
    pub as_of: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProfitQuery {
    pub as_of: Option<String>,
    /// Size of the profit ranking (default: 5)
    #[param(minimum = 1, maximum = 20)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct WasteQuery {
    pub as_of: Option<String>,
    /// Number of months in the waste chart (default: 3)
    #[param(minimum = 1, maximum = 24)]
    pub months: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/realtime",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Real-time counters", body = ApiResponse<RealtimeMetrics>)
    ),
    tag = "Analytics"
)]
pub async fn get_realtime_metrics(
    State(state): State<AppState>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<ApiResponse<RealtimeMetrics>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let snapshot = state.snapshots.load();
    let result = metrics::realtime_metrics(&snapshot, today, &state.config.baselines);
    Ok(Json(ApiResponse::success(result)))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/sales/monthly",
    responses(
        (status = 200, description = "Monthly sales series (last five months)", body = ApiResponse<Vec<SalesPoint>>)
    ),
    tag = "Analytics"
)]
pub async fn get_monthly_sales(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SalesPoint>>>, ServiceError> {
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(metrics::monthly_sales_series(
        &snapshot,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/sales/summary",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Trailing five-month sales comparison", body = ApiResponse<SalesSummary>)
    ),
    tag = "Analytics"
)]
pub async fn get_sales_summary(
    State(state): State<AppState>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<ApiResponse<SalesSummary>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(metrics::trailing_sales_comparison(
        &snapshot, today,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/profit/categories",
    params(ProfitQuery),
    responses(
        (status = 200, description = "Top categories by profit over the 90-day window", body = ApiResponse<ProfitBreakdown>),
        (status = 400, description = "Invalid ranking size", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_top_profit_categories(
    State(state): State<AppState>,
    Query(params): Query<ProfitQuery>,
) -> Result<Json<ApiResponse<ProfitBreakdown>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_CATEGORIES);
    if top_n == 0 || top_n > 20 {
        return Err(ServiceError::ValidationError(
            "top_n must be between 1 and 20".to_string(),
        ));
    }
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(metrics::top_categories_by_profit(
        &snapshot, today, top_n,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/waste/monthly",
    params(WasteQuery),
    responses(
        (status = 200, description = "Monthly waste series", body = ApiResponse<Vec<WastePoint>>),
        (status = 400, description = "Invalid month count", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_monthly_waste(
    State(state): State<AppState>,
    Query(params): Query<WasteQuery>,
) -> Result<Json<ApiResponse<Vec<WastePoint>>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let months = params.months.unwrap_or(DEFAULT_WASTE_MONTHS);
    if months == 0 || months > 24 {
        return Err(ServiceError::ValidationError(
            "months must be between 1 and 24".to_string(),
        ));
    }
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(metrics::monthly_waste_series(
        &snapshot, today, months,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/waste/quarterly",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Quarter-over-quarter waste comparison", body = ApiResponse<WasteSummary>)
    ),
    tag = "Analytics"
)]
pub async fn get_quarterly_waste(
    State(state): State<AppState>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<ApiResponse<WasteSummary>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(metrics::quarterly_waste_comparison(
        &snapshot, today,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/notifications",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Dashboard notification feed", body = ApiResponse<Vec<Notification>>)
    ),
    tag = "Analytics"
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    Query(params): Query<AsOfQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ServiceError> {
    let today = resolve_as_of(params.as_of.as_deref())?;
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(notifications::notifications(
        &snapshot, today,
    ))))
}
