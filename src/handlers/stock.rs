use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ServiceError,
    services::stock::{self, ProductDetail, StockFacets, StockFilter, StockRow},
    ApiResponse, AppState,
};

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/table", get(get_stock_table))
        .route("/facets", get(get_stock_facets))
        .route("/products/:product_id", get(get_product_detail))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StockTableQuery {
    /// Case-insensitive substring over name, id, and supplier
    pub search: Option<String>,
    /// Exact category, or "all" for no restriction
    pub category: Option<String>,
    /// Exact supplier, or "all" for no restriction
    pub supplier: Option<String>,
    /// "In Stock", "Low Stock", "Out of Stock", or "all"
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/table",
    params(StockTableQuery),
    responses(
        (status = 200, description = "Stock-management table rows", body = ApiResponse<Vec<StockRow>>)
    ),
    tag = "Stock"
)]
pub async fn get_stock_table(
    State(state): State<AppState>,
    Query(params): Query<StockTableQuery>,
) -> Result<Json<ApiResponse<Vec<StockRow>>>, ServiceError> {
    let filter = StockFilter {
        search: params.search,
        category: params.category,
        supplier: params.supplier,
        status: params.status,
    };
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(stock::stock_rows(
        &snapshot, &filter,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/facets",
    responses(
        (status = 200, description = "Distinct filter values for the stock table", body = ApiResponse<StockFacets>)
    ),
    tag = "Stock"
)]
pub async fn get_stock_facets(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StockFacets>>, ServiceError> {
    let snapshot = state.snapshots.load();
    Ok(Json(ApiResponse::success(stock::stock_facets(&snapshot))))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/products/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product identifier")
    ),
    responses(
        (status = 200, description = "Product detail with profitability figures", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Unknown product id", body = crate::errors::ErrorResponse)
    ),
    tag = "Stock"
)]
pub async fn get_product_detail(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetail>>, ServiceError> {
    let snapshot = state.snapshots.load();
    let detail = stock::product_detail(&snapshot, &product_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Product with id {product_id} not found")))?;
    Ok(Json(ApiResponse::success(detail)))
}
