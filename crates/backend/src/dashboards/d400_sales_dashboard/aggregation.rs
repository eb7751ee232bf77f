use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d400_sales_dashboard::dto::{CategoryShare, MonthlyBucket, SalesRow};
use contracts::domain::a002_order::aggregate::Category;
use std::collections::BTreeMap;

/// Rows whose category is in `selected`. An empty selection yields no rows.
pub fn filter_by_categories(rows: &[SalesRow], selected: &[Category]) -> Vec<SalesRow> {
    rows.iter()
        .filter(|r| selected.contains(&r.category))
        .cloned()
        .collect()
}

/// Rows dated within the inclusive bounds; a missing bound is open.
pub fn filter_by_dates(
    rows: &[SalesRow],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<SalesRow> {
    rows.iter()
        .filter(|r| from.map_or(true, |f| r.date >= f) && to.map_or(true, |t| r.date <= t))
        .cloned()
        .collect()
}

/// Last calendar day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Sum totals per calendar month, labelled by month end, in chronological order.
///
/// Only months with at least one row appear; gaps are not filled with zeros.
pub fn resample_monthly(rows: &[SalesRow]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        *buckets.entry(month_end(row.date)).or_insert(0.0) += row.total;
    }
    buckets
        .into_iter()
        .map(|(month, total)| MonthlyBucket { month, total })
        .collect()
}

pub fn total_of(rows: &[SalesRow]) -> f64 {
    rows.iter().map(|r| r.total).sum()
}

/// Revenue per category in `Category::ALL` order, categories without rows omitted
pub fn category_mix(rows: &[SalesRow]) -> Vec<CategoryShare> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let matching: Vec<f64> = rows
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.total)
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(CategoryShare {
                    category,
                    total: matching.iter().sum(),
                })
            }
        })
        .collect()
}

/// Distinct categories present in the data, in `Category::ALL` order
pub fn available_categories(rows: &[SalesRow]) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| rows.iter().any(|r| r.category == *c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_customer::aggregate::Sector;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: NaiveDate, total: f64, category: Category) -> SalesRow {
        SalesRow {
            date,
            total,
            product: category.products()[0].name.to_string(),
            category,
            customer: "Company Retail 1".to_string(),
            sector: Sector::Retail,
        }
    }

    fn sample() -> Vec<SalesRow> {
        vec![
            row(d(2024, 11, 3), 100.0, Category::Hardware),
            row(d(2024, 11, 30), 50.25, Category::Software),
            row(d(2024, 12, 31), 20.0, Category::Services),
            row(d(2025, 2, 1), 300.0, Category::Hardware),
            row(d(2025, 2, 28), 7.5, Category::Software),
        ]
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(month_end(d(2025, 2, 10)), d(2025, 2, 28));
        assert_eq!(month_end(d(2024, 12, 1)), d(2024, 12, 31));
        assert_eq!(month_end(d(2024, 4, 30)), d(2024, 4, 30));
    }

    #[test]
    fn test_filter_matches_individual_rows() {
        let rows = sample();
        let subsets: [&[Category]; 4] = [
            &[Category::Hardware],
            &[Category::Software, Category::Services],
            &[Category::Services],
            &Category::ALL,
        ];
        for selected in subsets {
            let expected: f64 = rows
                .iter()
                .filter(|r| selected.contains(&r.category))
                .map(|r| r.total)
                .sum();
            let filtered = filter_by_categories(&rows, selected);
            assert!(filtered.iter().all(|r| selected.contains(&r.category)));
            assert!((total_of(&filtered) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_selection_is_empty() {
        assert!(filter_by_categories(&sample(), &[]).is_empty());
    }

    #[test]
    fn test_resample_conserves_totals_and_skips_gaps() {
        let rows = sample();
        let buckets = resample_monthly(&rows);

        // January 2025 has no orders and is not synthesized
        assert_eq!(
            buckets.iter().map(|b| b.month).collect::<Vec<_>>(),
            vec![d(2024, 11, 30), d(2024, 12, 31), d(2025, 2, 28)]
        );
        assert!((buckets[0].total - 150.25).abs() < 1e-9);

        let bucket_sum: f64 = buckets.iter().map(|b| b.total).sum();
        assert!((bucket_sum - total_of(&rows)).abs() < 1e-9);
    }

    #[test]
    fn test_resample_ignores_input_order() {
        let mut rows = sample();
        rows.reverse();
        let buckets = resample_monthly(&rows);
        assert!(buckets.windows(2).all(|w| w[0].month < w[1].month));
    }

    #[test]
    fn test_filter_by_dates_is_inclusive() {
        let rows = filter_by_dates(&sample(), Some(d(2024, 11, 30)), Some(d(2025, 2, 1)));
        assert_eq!(rows.len(), 3);
        assert_eq!(filter_by_dates(&sample(), None, None).len(), 5);
    }

    #[test]
    fn test_category_mix_and_available() {
        let rows = filter_by_categories(&sample(), &[Category::Hardware, Category::Software]);
        let mix = category_mix(&rows);
        assert_eq!(mix.len(), 2);
        assert_eq!(mix[0].category, Category::Hardware);
        assert!((mix[0].total - 400.0).abs() < 1e-9);
        assert_eq!(
            available_categories(&rows),
            vec![Category::Hardware, Category::Software]
        );
    }
}
