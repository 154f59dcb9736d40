//! OpenAPI document and Swagger UI wiring.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    errors::ErrorResponse,
    handlers,
    services::{
        expiry::{ExpiryBand, ExpiryOverview, ExpiryRow, RowAction},
        metrics::{
            CategoryProfit, ChangeDirection, ChangeIndicator, ProfitBreakdown, RealtimeMetrics,
            SalesPoint, SalesSummary, WastePoint, WasteSummary,
        },
        notifications::{Notification, NotificationKind},
        stock::{ProductDetail, StockFacets, StockRow, StockStatus},
    },
    store::{DatasetPayload, TableCounts},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::analytics::get_realtime_metrics,
        handlers::analytics::get_monthly_sales,
        handlers::analytics::get_sales_summary,
        handlers::analytics::get_top_profit_categories,
        handlers::analytics::get_monthly_waste,
        handlers::analytics::get_quarterly_waste,
        handlers::analytics::get_notifications,
        handlers::expiry::get_expiry_table,
        handlers::expiry::get_expiry_overview,
        handlers::stock::get_stock_table,
        handlers::stock::get_stock_facets,
        handlers::stock::get_product_detail,
        handlers::datasets::replace_dataset,
        handlers::datasets::get_dataset_summary,
    ),
    components(schemas(
        ErrorResponse,
        RealtimeMetrics,
        ChangeIndicator,
        ChangeDirection,
        SalesPoint,
        SalesSummary,
        ProfitBreakdown,
        CategoryProfit,
        WastePoint,
        WasteSummary,
        Notification,
        NotificationKind,
        ExpiryRow,
        ExpiryBand,
        ExpiryOverview,
        RowAction,
        StockRow,
        StockFacets,
        StockStatus,
        ProductDetail,
        DatasetPayload,
        TableCounts,
    )),
    tags(
        (name = "Analytics", description = "Dashboard metrics, charts, and notifications"),
        (name = "Expiry", description = "Expiry classification table and overview"),
        (name = "Stock", description = "Stock table, filter facets, and product detail"),
        (name = "Datasets", description = "Snapshot replacement and inspection"),
    ),
    info(
        title = "InvAI Analytics API",
        description = "Inventory analytics: metrics derivation and table filtering over in-memory tabular data",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
