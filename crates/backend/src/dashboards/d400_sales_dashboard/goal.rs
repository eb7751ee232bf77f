use contracts::dashboards::d400_sales_dashboard::dto::GoalProgressResponse;

use crate::shared::error::DashboardError;

/// `min(actual / target, 1.0)` bounded to `[0, 1]`.
///
/// Returns exactly `1.0` iff `actual >= target`. A target that is not a
/// positive finite number is rejected.
pub fn progress_fraction(actual: f64, target: f64) -> Result<f64, DashboardError> {
    if !target.is_finite() || target <= 0.0 {
        return Err(DashboardError::InvalidGoal(target));
    }
    if actual >= target {
        return Ok(1.0);
    }
    Ok((actual / target).clamp(0.0, 1.0))
}

pub fn goal_progress(actual: f64, target: f64) -> Result<GoalProgressResponse, DashboardError> {
    let fraction = progress_fraction(actual, target)?;
    Ok(GoalProgressResponse {
        actual,
        target,
        fraction,
        percent: fraction * 100.0,
        reached: fraction == 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_progress() {
        assert_eq!(progress_fraction(250_000.0, 1_000_000.0).unwrap(), 0.25);
        let goal = goal_progress(500.0, 2000.0).unwrap();
        assert_eq!(goal.percent, 25.0);
        assert!(!goal.reached);
    }

    #[test]
    fn test_progress_is_capped_at_one() {
        assert_eq!(progress_fraction(3_000_000.0, 1_000_000.0).unwrap(), 1.0);
        assert_eq!(progress_fraction(1_000_000.0, 1_000_000.0).unwrap(), 1.0);
        assert!(goal_progress(10.0, 10.0).unwrap().reached);
    }

    #[test]
    fn test_progress_stays_below_one_until_reached() {
        let target = 1.0e15;
        let actual = target - 1.0;
        assert!(actual < target);
        let fraction = progress_fraction(actual, target).unwrap();
        assert!(fraction < 1.0);
    }

    #[test]
    fn test_bounds_over_a_grid() {
        for target in [0.01, 1.0, 999.99, 1.0e6] {
            for actual in [0.0, 0.005, 1.0, 500.0, 1.0e6, 1.0e9] {
                let f = progress_fraction(actual, target).unwrap();
                assert!((0.0..=1.0).contains(&f));
                assert_eq!(f == 1.0, actual >= target);
            }
        }
    }

    #[test]
    fn test_non_positive_target_is_rejected() {
        for target in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                progress_fraction(100.0, target),
                Err(DashboardError::InvalidGoal(_))
            ));
        }
    }
}
