use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use tracing::info;

use crate::{
    errors::ServiceError,
    store::{DatasetPayload, TableCounts},
    ApiResponse, AppState,
};

pub fn dataset_routes() -> Router<AppState> {
    Router::new()
        .route("/", put(replace_dataset))
        .route("/summary", get(get_dataset_summary))
}

#[utoipa::path(
    put,
    path = "/api/v1/datasets",
    request_body = DatasetPayload,
    responses(
        (status = 200, description = "Dataset replaced; row counts of the new snapshot", body = ApiResponse<TableCounts>),
        (status = 400, description = "Malformed payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Datasets"
)]
pub async fn replace_dataset(
    State(state): State<AppState>,
    Json(payload): Json<DatasetPayload>,
) -> Result<Json<ApiResponse<TableCounts>>, ServiceError> {
    let snapshot = payload.into_snapshot();
    let counts = snapshot.table_counts();
    info!(
        products = counts.products,
        sales = counts.sales,
        inventory = counts.inventory,
        "dataset replaced"
    );
    state.snapshots.replace(snapshot);
    Ok(Json(ApiResponse::success(counts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/datasets/summary",
    responses(
        (status = 200, description = "Row counts of the current snapshot", body = ApiResponse<TableCounts>)
    ),
    tag = "Datasets"
)]
pub async fn get_dataset_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TableCounts>>, ServiceError> {
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(snapshot.table_counts())))
}
