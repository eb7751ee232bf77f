use serde::{Deserialize, Serialize};

pub const DEFAULT_CUSTOMER_COUNT: u32 = 50;
pub const DEFAULT_HISTORY_DAYS: u32 = 730;
pub const DEFAULT_MAX_ORDERS_PER_DAY: u32 = 5;

/// Parameters of a demo data generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub customer_count: u32,
    /// Length of the historical window, ending at the run date
    pub history_days: u32,
    /// Orders per day are drawn uniformly from `0..=max_orders_per_day`
    pub max_orders_per_day: u32,
    /// Fixed seed for a reproducible dataset; drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            customer_count: DEFAULT_CUSTOMER_COUNT,
            history_days: DEFAULT_HISTORY_DAYS,
            max_orders_per_day: DEFAULT_MAX_ORDERS_PER_DAY,
            seed: None,
        }
    }
}
