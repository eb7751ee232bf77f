use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use contracts::dashboards::d400_sales_dashboard::dto::{
    CategoryFilter, ForecastResponse, GoalProgressRequest, GoalProgressResponse, MonthlyBucket,
    OverviewResponse, RowsRequest, SalesRow,
};
use contracts::domain::a002_order::aggregate::Category;

use crate::api::state::AppState;
use crate::dashboards::d400_sales_dashboard::{export, service};
use crate::shared::error::DashboardError;
use crate::shared::format::{format_amount, format_number};

/// GET /api/d400/categories
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, DashboardError> {
    let categories = service::get_categories(&state.cache).await?;
    tracing::info!(
        "D400 Dashboard: Returning {} categories",
        categories.len()
    );
    Ok(Json(categories))
}

/// GET /api/d400/overview?categories=Hardware,Software
pub async fn get_overview(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<OverviewResponse>, DashboardError> {
    tracing::info!(
        "D400 Dashboard: Getting overview for categories {:?}",
        filter.categories
    );

    let overview = service::get_overview(&state.cache, &filter).await?;
    tracing::info!(
        "D400 Dashboard: {} orders, revenue {}",
        format_number(overview.transaction_count),
        format_amount(overview.total_revenue)
    );
    Ok(Json(overview))
}

/// GET /api/d400/monthly?categories=...
pub async fn get_monthly(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<MonthlyBucket>>, DashboardError> {
    let monthly = service::get_monthly(&state.cache, &filter).await?;
    tracing::info!("D400 Dashboard: Returning {} monthly buckets", monthly.len());
    Ok(Json(monthly))
}

/// GET /api/d400/forecast?categories=...
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<ForecastResponse>, DashboardError> {
    Ok(Json(service::get_forecast(&state.cache, &filter).await?))
}

/// GET /api/d400/goal?categories=...&target=1000000
pub async fn get_goal(
    State(state): State<AppState>,
    Query(request): Query<GoalProgressRequest>,
) -> Result<Json<GoalProgressResponse>, DashboardError> {
    let progress = service::get_goal(&state.cache, &request, state.annual_goal).await?;
    tracing::info!(
        "D400 Dashboard: Goal {:.1}% of {}",
        progress.percent,
        format_amount(progress.target)
    );
    Ok(Json(progress))
}

/// GET /api/d400/rows?categories=...&limit=50
pub async fn get_rows(
    State(state): State<AppState>,
    Query(request): Query<RowsRequest>,
) -> Result<Json<Vec<SalesRow>>, DashboardError> {
    Ok(Json(service::get_rows(&state.cache, &request).await?))
}

/// GET /api/d400/export?categories=...
///
/// Filtered rows as a CSV attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<impl IntoResponse, DashboardError> {
    let body = service::export_csv(&state.cache, &filter).await?;
    Ok(attachment(export::EXPORT_CONTENT_TYPE, export::EXPORT_FILE_NAME, body))
}

/// GET /api/d400/export/xlsx?categories=...
///
/// Filtered rows as a spreadsheet attachment.
pub async fn export_xlsx(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<impl IntoResponse, DashboardError> {
    let body = service::export_xlsx(&state.cache, &filter).await?;
    Ok(attachment(export::XLSX_CONTENT_TYPE, export::XLSX_FILE_NAME, body))
}

fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> impl IntoResponse {
    let disposition = format!("attachment; filename=\"{}\"", file_name);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
}
