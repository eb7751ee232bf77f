use axum::{extract::State, Json};
use contracts::dashboards::d400_sales_dashboard::dto::parse_category_list;
use contracts::shared::indicators::*;

use crate::api::state::AppState;
use crate::shared::error::DashboardError;
use crate::shared::indicators::{metadata, registry::REGISTRY};

/// POST /api/indicators/compute
///
/// Batch-computes a set of indicators for the given context (period, categories).
pub async fn compute_indicators(
    State(state): State<AppState>,
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Result<Json<ComputeIndicatorsResponse>, DashboardError> {
    tracing::info!(
        "Indicators: computing {} indicators for period {:?}..{:?}",
        req.indicator_ids.len(),
        req.context.date_from,
        req.context.date_to,
    );

    // categories are shared by the whole batch
    parse_category_list(req.context.categories.as_deref()).map_err(DashboardError::BadRequest)?;

    let rows = state.cache.rows().await?;
    let values = REGISTRY.compute(&req.indicator_ids, &rows, &req.context);

    tracing::info!("Indicators: returning {} values", values.len());
    Ok(Json(ComputeIndicatorsResponse { values }))
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog())
}
