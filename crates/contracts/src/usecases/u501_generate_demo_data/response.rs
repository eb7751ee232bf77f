use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of a completed generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub customers_written: usize,
    pub orders_written: usize,
    /// First day of the historical window
    pub window_start: NaiveDate,
    /// Run date; every order is dated strictly before it
    pub window_end: NaiveDate,
    /// Seed that reproduces this dataset
    pub seed: u64,
}
