use anyhow::Result;
use chrono::{Local, NaiveDate};
use contracts::usecases::u501_generate_demo_data::{
    request::GenerateRequest, response::GenerationReport,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::TransactionTrait;
use std::path::Path;

use super::planner;
use crate::domain::{a001_customer, a002_order};
use crate::shared::data::db::{self, SCHEMA_VERSION};

/// Regenerate the store for a window ending today.
///
/// Destructive: both tables are dropped first. Must not run while the
/// dashboard server is reading the same file.
pub async fn generate(path: &Path, request: &GenerateRequest) -> Result<GenerationReport> {
    generate_at(path, request, Local::now().date_naive()).await
}

pub async fn generate_at(
    path: &Path,
    request: &GenerateRequest,
    today: NaiveDate,
) -> Result<GenerationReport> {
    let seed = request.seed.unwrap_or_else(rand::random);
    tracing::info!(
        "Generating {} customers over {} days (seed {})",
        request.customer_count,
        request.history_days,
        seed
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let plan = planner::plan_dataset(request, today, &mut rng)?;

    let conn = db::open_for_write(path).await?;
    let txn = conn.begin().await?;
    db::recreate_schema(&txn).await?;
    let customers_written = a001_customer::repository::insert_all(&txn, &plan.customers).await?;
    let orders_written = a002_order::repository::insert_all(&txn, &plan.orders).await?;
    txn.commit().await?;
    db::write_schema_version(&conn, SCHEMA_VERSION).await?;
    conn.close().await?;

    Ok(GenerationReport {
        customers_written,
        orders_written,
        window_start: plan.window_start,
        window_end: plan.window_end,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_generated_store_keeps_referential_integrity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("sales.db");
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let request = GenerateRequest {
            seed: Some(11),
            ..GenerateRequest::default()
        };

        let report = generate_at(&path, &request, today).await.unwrap();
        assert_eq!(report.seed, 11);
        assert_eq!(report.window_end, today);

        let conn = db::connect(&path, db::OpenMode::ReadOnly).await.unwrap();
        let customers = a001_customer::repository::list_all(&conn).await.unwrap();
        let orders = a002_order::repository::list_all(&conn).await.unwrap();
        assert_eq!(db::read_schema_version(&conn).await.unwrap(), SCHEMA_VERSION);
        conn.close().await.unwrap();

        assert_eq!(customers.len(), 50);
        assert_eq!(report.customers_written, 50);
        assert_eq!(orders.len(), report.orders_written);

        let ids: HashSet<i32> = customers.iter().map(|c| c.id).collect();
        for order in &orders {
            assert!(ids.contains(&order.customer_id));
            assert!((1..=50).contains(&order.customer_id));
            assert!(order.total > 0.0);
            assert!(order.date >= report.window_start && order.date < today);
        }
    }

    #[tokio::test]
    async fn test_regeneration_discards_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.db");
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let big = GenerateRequest {
            customer_count: 10,
            history_days: 60,
            max_orders_per_day: 5,
            seed: Some(5),
        };
        let small = GenerateRequest {
            customer_count: 3,
            history_days: 5,
            max_orders_per_day: 1,
            seed: Some(5),
        };

        generate_at(&path, &big, today).await.unwrap();
        let report = generate_at(&path, &small, today).await.unwrap();

        let conn = db::connect(&path, db::OpenMode::ReadOnly).await.unwrap();
        let customers = a001_customer::repository::list_all(&conn).await.unwrap();
        let orders = a002_order::repository::list_all(&conn).await.unwrap();
        conn.close().await.unwrap();

        assert_eq!(customers.len(), 3);
        assert_eq!(orders.len(), report.orders_written);
        assert!(orders.len() <= 5);
    }
}
