use chrono::{Days, NaiveDate};
use contracts::dashboards::d400_sales_dashboard::dto::{parse_category_list, SalesRow};
use contracts::shared::indicators::*;

use crate::dashboards::d400_sales_dashboard::aggregation::{
    filter_by_categories, filter_by_dates, total_of,
};
use crate::shared::error::DashboardError;
use crate::shared::indicators::metadata::ids;

// ---------------------------------------------------------------------------
// Internal aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct SalesAgg {
    total_revenue: f64,
    order_count: usize,
}

impl SalesAgg {
    fn avg_check(&self) -> f64 {
        if self.order_count > 0 {
            self.total_revenue / self.order_count as f64
        } else {
            0.0
        }
    }
}

fn aggregate(
    rows: &[SalesRow],
    categories: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<SalesAgg, DashboardError> {
    let selected = parse_category_list(categories).map_err(DashboardError::BadRequest)?;
    let filtered = filter_by_dates(&filter_by_categories(rows, &selected), from, to);
    Ok(SalesAgg {
        total_revenue: total_of(&filtered),
        order_count: filtered.len(),
    })
}

/// The period of equal length ending the day before `date_from`.
/// Only defined when both bounds are set.
pub fn previous_period(ctx: &IndicatorContext) -> Option<(NaiveDate, NaiveDate)> {
    let (from, to) = (ctx.date_from?, ctx.date_to?);
    if to < from {
        return None;
    }
    let span = (to - from).num_days() as u64;
    let prev_to = from.checked_sub_days(Days::new(1))?;
    let prev_from = prev_to.checked_sub_days(Days::new(span))?;
    Some((prev_from, prev_to))
}

/// Current and, when a comparison window exists, previous aggregates
fn fetch_pair(
    rows: &[SalesRow],
    ctx: &IndicatorContext,
) -> Result<(SalesAgg, Option<SalesAgg>), DashboardError> {
    let categories = ctx.categories.as_deref();
    let cur = aggregate(rows, categories, ctx.date_from, ctx.date_to)?;
    let prev = match previous_period(ctx) {
        Some((from, to)) => Some(aggregate(rows, categories, Some(from), Some(to))?),
        None => None,
    };
    Ok((cur, prev))
}

pub fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

pub fn status_by_change(change: Option<f64>, higher_is_good: bool) -> IndicatorStatus {
    match change {
        Some(c) if c > 5.0 => {
            if higher_is_good {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            }
        }
        Some(c) if c < -5.0 => {
            if higher_is_good {
                IndicatorStatus::Bad
            } else {
                IndicatorStatus::Good
            }
        }
        _ => IndicatorStatus::Neutral,
    }
}

fn indicator(id: IndicatorId, cur: f64, prev: Option<f64>) -> IndicatorValue {
    let change = prev.and_then(|p| pct_change(cur, p));
    IndicatorValue {
        id,
        value: Some(cur),
        previous_value: prev,
        change_percent: change,
        status: status_by_change(change, true),
        subtitle: None,
    }
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_sales_revenue(
    rows: &[SalesRow],
    ctx: &IndicatorContext,
) -> Result<IndicatorValue, DashboardError> {
    let (cur, prev) = fetch_pair(rows, ctx)?;
    Ok(indicator(
        ids::sales_revenue(),
        cur.total_revenue,
        prev.map(|p| p.total_revenue),
    ))
}

pub fn compute_sales_order_count(
    rows: &[SalesRow],
    ctx: &IndicatorContext,
) -> Result<IndicatorValue, DashboardError> {
    let (cur, prev) = fetch_pair(rows, ctx)?;
    Ok(indicator(
        ids::sales_order_count(),
        cur.order_count as f64,
        prev.map(|p| p.order_count as f64),
    ))
}

pub fn compute_sales_avg_check(
    rows: &[SalesRow],
    ctx: &IndicatorContext,
) -> Result<IndicatorValue, DashboardError> {
    let (cur, prev) = fetch_pair(rows, ctx)?;
    Ok(indicator(
        ids::sales_avg_check(),
        cur.avg_check(),
        prev.map(|p| p.avg_check()),
    ))
}
