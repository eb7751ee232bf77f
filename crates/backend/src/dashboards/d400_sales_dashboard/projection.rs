use chrono::{Datelike, Days, NaiveDate};
use contracts::dashboards::d400_sales_dashboard::dto::{MonthlyBucket, ProjectionPoint};

use crate::shared::error::DashboardError;

/// Number of projected points ("next quarter")
pub const PROJECTION_STEPS: u64 = 3;
/// Spacing between projected points, in days
pub const STEP_DAYS: u64 = 30;

/// Day number since the common era, `0001-01-01` is day 1
pub fn ordinal(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// A fitted model that can be evaluated at any date
pub trait Trend {
    fn predict(&self, date: NaiveDate) -> f64;
}

/// Fits a [`Trend`] to a monthly series. Implementations are interchangeable
/// behind [`project_next_quarter`].
pub trait Projector {
    type Fitted: Trend;

    fn name(&self) -> &'static str;

    fn fit(&self, history: &[MonthlyBucket]) -> Result<Self::Fitted, DashboardError>;
}

// ============================================================================
// Linear least squares
// ============================================================================

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Ordinary least squares over `(x, y)` points.
    ///
    /// Sums are taken around the means so that large day ordinals stay well conditioned.
    pub fn fit_points(points: &[(f64, f64)]) -> Result<Self, DashboardError> {
        if points.len() < 2 {
            return Err(DashboardError::InsufficientData(format!(
                "a trend line needs at least 2 monthly buckets, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

        if sxx == 0.0 {
            return Err(DashboardError::InsufficientData(
                "all buckets share the same date".to_string(),
            ));
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl Trend for LinearTrend {
    fn predict(&self, date: NaiveDate) -> f64 {
        self.evaluate(ordinal(date))
    }
}

/// First-degree polynomial fit of monthly totals against the day ordinal
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProjector;

impl Projector for LinearProjector {
    type Fitted = LinearTrend;

    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit(&self, history: &[MonthlyBucket]) -> Result<LinearTrend, DashboardError> {
        let points: Vec<(f64, f64)> = history
            .iter()
            .map(|b| (ordinal(b.month), b.total))
            .collect();
        LinearTrend::fit_points(&points)
    }
}

// ============================================================================
// Forecast
// ============================================================================

#[derive(Debug, Clone)]
pub struct Forecast {
    pub history: Vec<MonthlyBucket>,
    pub projected: Vec<ProjectionPoint>,
}

impl Forecast {
    pub fn projected_total(&self) -> f64 {
        self.projected.iter().map(|p| p.total).sum()
    }
}

/// Fit `history` and evaluate the trend 30, 60 and 90 days after the last month.
///
/// Predictions are returned as computed; a downward trend may yield negative totals.
pub fn project_next_quarter<P: Projector>(
    projector: &P,
    history: Vec<MonthlyBucket>,
) -> Result<Forecast, DashboardError> {
    let trend = projector.fit(&history)?;
    let last = history
        .last()
        .map(|b| b.month)
        .ok_or_else(|| DashboardError::InsufficientData("empty history".to_string()))?;

    let projected = (1..=PROJECTION_STEPS)
        .map(|step| {
            let date = last.checked_add_days(Days::new(STEP_DAYS * step)).ok_or_else(|| {
                DashboardError::Internal(format!("projection date out of range after {}", last))
            })?;
            Ok(ProjectionPoint {
                date,
                total: trend.predict(date),
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    tracing::debug!(
        "{} projection from {} buckets: {:?}",
        projector.name(),
        history.len(),
        projected
    );

    Ok(Forecast { history, projected })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bucket(month: NaiveDate, total: f64) -> MonthlyBucket {
        MonthlyBucket { month, total }
    }

    #[test]
    fn test_exact_line_through_three_points() {
        let trend = LinearTrend::fit_points(&[(1.0, 100.0), (2.0, 200.0), (3.0, 300.0)]).unwrap();
        assert!((trend.slope - 100.0).abs() < 1e-9);
        assert!(trend.intercept.abs() < 1e-9);
        assert!((trend.evaluate(4.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_least_squares_on_noisy_points() {
        // y = 2x + 1 with symmetric noise
        let trend =
            LinearTrend::fit_points(&[(0.0, 1.5), (1.0, 2.5), (2.0, 5.5), (3.0, 6.5)]).unwrap();
        assert!((trend.slope - 1.8).abs() < 1e-9);
        assert!((trend.intercept - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_fewer_than_two_points_is_insufficient() {
        assert!(matches!(
            LinearTrend::fit_points(&[]),
            Err(DashboardError::InsufficientData(_))
        ));
        assert!(matches!(
            LinearProjector.fit(&[bucket(d(2025, 1, 31), 10.0)]),
            Err(DashboardError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_identical_dates_are_insufficient() {
        let same = d(2025, 1, 31);
        assert!(matches!(
            LinearProjector.fit(&[bucket(same, 1.0), bucket(same, 2.0)]),
            Err(DashboardError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_ordinal_matches_common_era_day_count() {
        assert_eq!(ordinal(d(1, 1, 1)), 1.0);
        assert_eq!(ordinal(d(2025, 1, 31)) - ordinal(d(2024, 12, 31)), 31.0);
    }

    #[test]
    fn test_projection_dates_and_values() {
        // 10 per day growth across real month ends
        let base = d(2025, 1, 31);
        let history: Vec<MonthlyBucket> = [d(2025, 1, 31), d(2025, 2, 28), d(2025, 3, 31)]
            .into_iter()
            .map(|m| bucket(m, 1000.0 + 10.0 * (ordinal(m) - ordinal(base))))
            .collect();

        let forecast = project_next_quarter(&LinearProjector, history.clone()).unwrap();
        assert_eq!(forecast.history, history);
        assert_eq!(
            forecast.projected.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![d(2025, 4, 30), d(2025, 5, 30), d(2025, 6, 29)]
        );
        let expected_first = 1000.0 + 10.0 * (ordinal(d(2025, 4, 30)) - ordinal(base));
        assert!((forecast.projected[0].total - expected_first).abs() < 1e-6);
        assert!(forecast.projected.windows(2).all(|w| w[1].total > w[0].total));
    }

    #[test]
    fn test_downward_trend_is_not_clamped() {
        let history = vec![
            bucket(d(2025, 1, 31), 300.0),
            bucket(d(2025, 2, 28), 150.0),
            bucket(d(2025, 3, 31), 10.0),
        ];
        let forecast = project_next_quarter(&LinearProjector, history).unwrap();
        assert!(forecast.projected.last().unwrap().total < 0.0);
        assert!(forecast.projected_total() < forecast.projected[0].total * 3.0);
    }

    struct FlatProjector;

    struct Flat(f64);

    impl Trend for Flat {
        fn predict(&self, _date: NaiveDate) -> f64 {
            self.0
        }
    }

    impl Projector for FlatProjector {
        type Fitted = Flat;

        fn name(&self) -> &'static str {
            "flat"
        }

        fn fit(&self, history: &[MonthlyBucket]) -> Result<Flat, DashboardError> {
            history
                .last()
                .map(|b| Flat(b.total))
                .ok_or_else(|| DashboardError::InsufficientData("empty".into()))
        }
    }

    #[test]
    fn test_projector_is_substitutable() {
        let history = vec![bucket(d(2025, 1, 31), 42.0)];
        let forecast = project_next_quarter(&FlatProjector, history).unwrap();
        assert_eq!(forecast.projected.len(), 3);
        assert!((forecast.projected_total() - 126.0).abs() < 1e-9);
    }
}
