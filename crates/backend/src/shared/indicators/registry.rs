use contracts::dashboards::d400_sales_dashboard::dto::SalesRow;
use contracts::shared::indicators::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::compute::sales;
use super::metadata::ids;
use crate::shared::error::DashboardError;

type ComputeFn = fn(&[SalesRow], &IndicatorContext) -> Result<IndicatorValue, DashboardError>;

/// Process-wide registry, built on first use.
pub static REGISTRY: Lazy<IndicatorRegistry> = Lazy::new(IndicatorRegistry::new);

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::sales_revenue().0, sales::compute_sales_revenue);
        fns.insert(ids::sales_order_count().0, sales::compute_sales_order_count);
        fns.insert(ids::sales_avg_check().0, sales::compute_sales_avg_check);

        Self { fns }
    }

    /// Compute a batch of indicators in request order. Unknown ids are skipped.
    pub fn compute(
        &self,
        ids: &[IndicatorId],
        rows: &[SalesRow],
        ctx: &IndicatorContext,
    ) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                match compute_fn(rows, ctx) {
                    Ok(val) => results.push(val),
                    Err(e) => {
                        tracing::warn!("indicator {} compute error: {}", id.0, e);
                        results.push(IndicatorValue {
                            id: id.clone(),
                            value: None,
                            previous_value: None,
                            change_percent: None,
                            status: IndicatorStatus::Neutral,
                            subtitle: Some(format!("Error: {}", e.user_message())),
                        });
                    }
                }
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}
