use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{handlers, state::AppState};

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 SALES DASHBOARD
        // ========================================
        .route(
            "/api/d400/categories",
            get(handlers::d400_sales_dashboard::get_categories),
        )
        .route(
            "/api/d400/overview",
            get(handlers::d400_sales_dashboard::get_overview),
        )
        .route(
            "/api/d400/monthly",
            get(handlers::d400_sales_dashboard::get_monthly),
        )
        .route(
            "/api/d400/forecast",
            get(handlers::d400_sales_dashboard::get_forecast),
        )
        .route("/api/d400/goal", get(handlers::d400_sales_dashboard::get_goal))
        .route("/api/d400/rows", get(handlers::d400_sales_dashboard::get_rows))
        .route(
            "/api/d400/export",
            get(handlers::d400_sales_dashboard::export_csv),
        )
        .route(
            "/api/d400/export/xlsx",
            get(handlers::d400_sales_dashboard::export_xlsx),
        )
        // ========================================
        // INDICATORS
        // ========================================
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .with_state(state)
}
