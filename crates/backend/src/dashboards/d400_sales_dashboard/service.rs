use contracts::dashboards::d400_sales_dashboard::dto::{
    parse_category_list, CategoryFilter, ForecastResponse, GoalProgressRequest,
    GoalProgressResponse, MonthlyBucket, OverviewResponse, RowsRequest, SalesRow,
};
use contracts::domain::a002_order::aggregate::Category;

use super::aggregation::{self, filter_by_categories};
use super::projection::{project_next_quarter, LinearProjector, Projector};
use super::{export, goal};
use crate::shared::data::dataset_cache::DatasetCache;
use crate::shared::error::DashboardError;
use crate::shared::format::format_amount;

pub const DEFAULT_ROWS_LIMIT: usize = 50;

fn selected_categories(raw: Option<&str>) -> Result<Vec<Category>, DashboardError> {
    parse_category_list(raw).map_err(DashboardError::BadRequest)
}

fn non_empty(rows: Vec<SalesRow>) -> Result<Vec<SalesRow>, DashboardError> {
    if rows.is_empty() {
        Err(DashboardError::InsufficientData(
            "no orders match the selected categories".to_string(),
        ))
    } else {
        Ok(rows)
    }
}

// ============================================================================
// Pure builders (rows -> response)
// ============================================================================

pub fn build_overview(
    rows: &[SalesRow],
    selected: &[Category],
) -> Result<OverviewResponse, DashboardError> {
    let filtered = non_empty(filter_by_categories(rows, selected))?;

    let total_revenue = aggregation::total_of(&filtered);
    let transaction_count = filtered.len();
    Ok(OverviewResponse {
        total_revenue,
        transaction_count,
        average_ticket: total_revenue / transaction_count as f64,
        category_mix: aggregation::category_mix(&filtered),
        monthly: aggregation::resample_monthly(&filtered),
    })
}

pub fn build_monthly(
    rows: &[SalesRow],
    selected: &[Category],
) -> Result<Vec<MonthlyBucket>, DashboardError> {
    let filtered = non_empty(filter_by_categories(rows, selected))?;
    Ok(aggregation::resample_monthly(&filtered))
}

pub fn build_forecast<P: Projector>(
    projector: &P,
    rows: &[SalesRow],
    selected: &[Category],
) -> Result<ForecastResponse, DashboardError> {
    let history = build_monthly(rows, selected)?;
    let forecast = project_next_quarter(projector, history)?;
    let projected_total = forecast.projected_total();

    tracing::info!(
        "D400 Dashboard: {} projection over {} months, next quarter {}",
        projector.name(),
        forecast.history.len(),
        format_amount(projected_total)
    );

    Ok(ForecastResponse {
        model: projector.name().to_string(),
        history: forecast.history,
        projected: forecast.projected,
        projected_total,
    })
}

pub fn build_goal(
    rows: &[SalesRow],
    selected: &[Category],
    target: f64,
) -> Result<GoalProgressResponse, DashboardError> {
    let actual = aggregation::total_of(&filter_by_categories(rows, selected));
    goal::goal_progress(actual, target)
}

// ============================================================================
// Cached entry points used by the HTTP handlers
// ============================================================================

pub async fn get_categories(cache: &DatasetCache) -> Result<Vec<Category>, DashboardError> {
    let rows = cache.rows().await?;
    Ok(aggregation::available_categories(&rows))
}

pub async fn get_overview(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<OverviewResponse, DashboardError> {
    let selected = selected_categories(filter.categories.as_deref())?;
    let rows = cache.rows().await?;
    build_overview(&rows, &selected)
}

pub async fn get_monthly(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<Vec<MonthlyBucket>, DashboardError> {
    let selected = selected_categories(filter.categories.as_deref())?;
    let rows = cache.rows().await?;
    build_monthly(&rows, &selected)
}

pub async fn get_forecast(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<ForecastResponse, DashboardError> {
    let selected = selected_categories(filter.categories.as_deref())?;
    let rows = cache.rows().await?;
    build_forecast(&LinearProjector, &rows, &selected)
}

pub async fn get_goal(
    cache: &DatasetCache,
    request: &GoalProgressRequest,
    default_target: f64,
) -> Result<GoalProgressResponse, DashboardError> {
    let target = request.target.unwrap_or(default_target);
    if !target.is_finite() || target <= 0.0 {
        // reject before touching the store
        return Err(DashboardError::InvalidGoal(target));
    }
    let selected = selected_categories(request.categories.as_deref())?;
    let rows = cache.rows().await?;
    build_goal(&rows, &selected, target)
}

pub async fn get_rows(
    cache: &DatasetCache,
    request: &RowsRequest,
) -> Result<Vec<SalesRow>, DashboardError> {
    let selected = selected_categories(request.categories.as_deref())?;
    let rows = cache.rows().await?;
    let limit = request.limit.unwrap_or(DEFAULT_ROWS_LIMIT);
    Ok(filter_by_categories(&rows, &selected)
        .into_iter()
        .take(limit)
        .collect())
}

async fn export_rows(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<Vec<SalesRow>, DashboardError> {
    let selected = selected_categories(filter.categories.as_deref())?;
    let rows = cache.rows().await?;
    Ok(filter_by_categories(&rows, &selected))
}

/// CSV of every filtered row. An empty selection exports the header only.
pub async fn export_csv(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<Vec<u8>, DashboardError> {
    let filtered = export_rows(cache, filter).await?;
    tracing::info!("D400 Dashboard: exporting {} rows as CSV", filtered.len());
    export::rows_to_csv(&filtered)
        .map_err(|e| DashboardError::Internal(format!("CSV export failed: {}", e)))
}

/// Spreadsheet workbook of every filtered row, same columns as the CSV.
pub async fn export_xlsx(
    cache: &DatasetCache,
    filter: &CategoryFilter,
) -> Result<Vec<u8>, DashboardError> {
    let filtered = export_rows(cache, filter).await?;
    tracing::info!("D400 Dashboard: exporting {} rows as xlsx", filtered.len());
    export::rows_to_xlsx(&filtered)
        .map_err(|e| DashboardError::Internal(format!("xlsx export failed: {}", e)))
}
