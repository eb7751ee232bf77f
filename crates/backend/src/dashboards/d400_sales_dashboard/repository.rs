use chrono::NaiveDate;
use contracts::dashboards::d400_sales_dashboard::dto::SalesRow;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait,
};
use std::path::Path;

use crate::domain::a001_customer::repository as customers;
use crate::domain::a002_order::repository::{self as orders, DATE_FORMAT};
use crate::shared::data::db::{self, OpenMode, SCHEMA_VERSION};
use crate::shared::error::DashboardError;

/// Raw joined row as returned by SQLite
#[derive(Debug, FromQueryResult)]
struct JoinedRow {
    date: String,
    total: f64,
    product: String,
    category: String,
    customer: String,
    sector: String,
}

impl JoinedRow {
    fn parse(self) -> Result<SalesRow, String> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| format!("bad order date '{}': {}", self.date, e))?;
        Ok(SalesRow {
            date,
            total: self.total,
            product: self.product,
            category: self.category.parse()?,
            customer: self.customer,
            sector: self.sector.parse()?,
        })
    }
}

/// Load every order joined with its customer, ordered by date.
///
/// The store is opened read-only and closed before returning. A missing file,
/// a schema version mismatch, missing tables or unparseable values all map
/// to [`DashboardError::StoreUnavailable`].
pub async fn load_sales_rows(path: &Path) -> Result<Vec<SalesRow>, DashboardError> {
    let store_name = path.display().to_string();
    let unavailable =
        |reason: String| DashboardError::store_unavailable(store_name.clone(), reason);

    if !path.is_file() {
        return Err(unavailable("file not found".to_string()));
    }

    let conn = db::connect(path, OpenMode::ReadOnly)
        .await
        .map_err(|e| unavailable(format!("cannot open: {}", e)))?;

    let result = query_joined(&conn).await;

    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close store {}: {}", store_name, e);
    }

    let raw = result.map_err(unavailable)?;
    let rows = raw
        .into_iter()
        .map(JoinedRow::parse)
        .collect::<Result<Vec<_>, _>>()
        .map_err(unavailable)?;

    tracing::info!("Loaded {} sales rows from {}", rows.len(), store_name);
    Ok(rows)
}

async fn query_joined(conn: &DatabaseConnection) -> Result<Vec<JoinedRow>, String> {
    let version = db::read_schema_version(conn)
        .await
        .map_err(|e| format!("cannot read schema version: {}", e))?;
    if version != SCHEMA_VERSION {
        return Err(format!(
            "schema version {} does not match expected {}",
            version, SCHEMA_VERSION
        ));
    }

    orders::Entity::find()
        .select_only()
        .column_as(orders::Column::Date, "date")
        .column_as(orders::Column::Total, "total")
        .column_as(orders::Column::Product, "product")
        .column_as(orders::Column::Category, "category")
        .column_as(customers::Column::Name, "customer")
        .column_as(customers::Column::Sector, "sector")
        .join(JoinType::InnerJoin, orders::Relation::Customer.def())
        .order_by_asc(orders::Column::Date)
        .order_by_asc(orders::Column::OrderId)
        .into_model::<JoinedRow>()
        .all(conn)
        .await
        .map_err(|e| format!("query failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_customer::aggregate::{Customer, Sector};
    use contracts::domain::a002_order::aggregate::{Category, Order};
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn seeded_store(path: &Path) {
        let conn = db::open_for_write(path).await.unwrap();
        db::recreate_schema(&conn).await.unwrap();
        db::write_schema_version(&conn, SCHEMA_VERSION).await.unwrap();
        customers::insert_all(
            &conn,
            &[
                Customer::synthetic(1, Sector::Health),
                Customer::synthetic(2, Sector::Retail),
            ],
        )
        .await
        .unwrap();
        let order = |id, customer_id, date, total, category: Category| Order {
            id,
            customer_id,
            date,
            total,
            product: category.products()[0].name.to_string(),
            category,
        };
        orders::insert_all(
            &conn,
            &[
                order(1, 2, d(2025, 3, 5), 410.5, Category::Hardware),
                order(2, 1, d(2025, 1, 9), 99.99, Category::Services),
                order(3, 1, d(2025, 3, 5), 12.0, Category::Software),
            ],
        )
        .await
        .unwrap();
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_joins_and_sorts_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        seeded_store(&path).await;

        let rows = load_sales_rows(&path).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, d(2025, 1, 9));
        assert_eq!(rows[0].customer, "Company Health 1");
        assert_eq!(rows[0].sector, Sector::Health);
        assert_eq!(rows[0].category, Category::Services);
        // same date: order id breaks the tie
        assert_eq!(rows[1].total, 410.5);
        assert_eq!(rows[1].customer, "Company Retail 2");
        assert_eq!(rows[2].category, Category::Software);
    }

    #[tokio::test]
    async fn test_missing_file_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err = load_sales_rows(&path).await.unwrap_err();
        assert!(matches!(err, DashboardError::StoreUnavailable { .. }));
        // read-only mode must not create the file
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_store_without_tables_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let conn = db::open_for_write(&path).await.unwrap();
        db::write_schema_version(&conn, SCHEMA_VERSION).await.unwrap();
        conn.close().await.unwrap();

        let err = load_sales_rows(&path).await.unwrap_err();
        assert!(matches!(err, DashboardError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_schema_version_mismatch_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.db");
        seeded_store(&path).await;
        let conn = db::open_for_write(&path).await.unwrap();
        db::write_schema_version(&conn, SCHEMA_VERSION + 1).await.unwrap();
        conn.close().await.unwrap();

        match load_sales_rows(&path).await.unwrap_err() {
            DashboardError::StoreUnavailable { reason, .. } => {
                assert!(reason.contains("schema version"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_category_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.db");
        seeded_store(&path).await;
        let conn = db::open_for_write(&path).await.unwrap();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "UPDATE pedidos SET category = 'Toys' WHERE order_id = 1".to_string(),
        ))
        .await
        .unwrap();
        conn.close().await.unwrap();

        let err = load_sales_rows(&path).await.unwrap_err();
        assert!(matches!(err, DashboardError::StoreUnavailable { .. }));
    }
}
