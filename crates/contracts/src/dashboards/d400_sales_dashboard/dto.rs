use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_customer::aggregate::Sector;
use crate::domain::a002_order::aggregate::Category;

// ============================================================================
// Rows & series
// ============================================================================

/// One order joined with its customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    pub date: NaiveDate,
    pub total: f64,
    pub product: String,
    pub category: Category,
    /// Customer name
    pub customer: String,
    pub sector: Sector,
}

/// Sum of totals for one calendar month, labelled with the month's last day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: NaiveDate,
    pub total: f64,
}

/// Predicted total at a future date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
}

// ============================================================================
// Requests
// ============================================================================

/// Category selection shared by every dashboard endpoint.
///
/// `categories` is a comma separated list (`Hardware,Software`).
/// Absent means "all categories", present but empty means "none".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFilter {
    #[serde(default)]
    pub categories: Option<String>,
}

/// GET /api/d400/goal?categories=...&target=...
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalProgressRequest {
    #[serde(default)]
    pub categories: Option<String>,
    /// Annual target; the configured goal is used when absent
    #[serde(default)]
    pub target: Option<f64>,
}

/// GET /api/d400/rows?categories=...&limit=...
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowsRequest {
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Parse a comma separated category list, `None` selects every category.
pub fn parse_category_list(raw: Option<&str>) -> Result<Vec<Category>, String> {
    let Some(raw) = raw else {
        return Ok(Category::ALL.to_vec());
    };

    let mut selected = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let category: Category = part.parse()?;
        if !selected.contains(&category) {
            selected.push(category);
        }
    }
    Ok(selected)
}

// ============================================================================
// Responses
// ============================================================================

/// Executive summary for the current selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub total_revenue: f64,
    pub transaction_count: usize,
    pub average_ticket: f64,
    /// Revenue per category, in `Category::ALL` order, categories without orders omitted
    pub category_mix: Vec<CategoryShare>,
    pub monthly: Vec<MonthlyBucket>,
}

/// Historical monthly series plus the next-quarter projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Name of the projector that produced the forecast (e.g. "linear")
    pub model: String,
    pub history: Vec<MonthlyBucket>,
    pub projected: Vec<ProjectionPoint>,
    /// Sum of the projected totals (may be negative on a downward trend)
    pub projected_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressResponse {
    pub actual: f64,
    pub target: f64,
    /// Bounded to [0, 1]
    pub fraction: f64,
    pub percent: f64,
    pub reached: bool,
}

/// Error body returned by every dashboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine readable kind: "store_unavailable", "insufficient_data",
    /// "invalid_goal", "bad_request" or "internal"
    pub error: String,
    pub message: String,
}
