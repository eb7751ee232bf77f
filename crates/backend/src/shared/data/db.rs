use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, EntityName, Schema,
    Statement,
};
use std::path::Path;

use crate::domain::{a001_customer, a002_order};

/// Version of the `clientes`/`pedidos` layout, stored in `PRAGMA user_version`.
/// Bump whenever an entity definition changes.
pub const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Dashboard side: never creates or modifies the file
    ReadOnly,
    /// Generator side: creates the file when missing
    ReadWriteCreate,
}

impl OpenMode {
    fn query(&self) -> &'static str {
        match self {
            OpenMode::ReadOnly => "ro",
            OpenMode::ReadWriteCreate => "rwc",
        }
    }
}

pub fn build_sqlite_url(path: &Path, mode: OpenMode) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode={}", prefix, normalized, mode.query())
}

pub async fn connect(path: &Path, mode: OpenMode) -> Result<DatabaseConnection, DbErr> {
    let url = build_sqlite_url(path, mode);
    tracing::debug!("Connecting to {}", url);
    Database::connect(&url).await
}

/// Open (or create) the store for writing; parent directories are created as needed.
pub async fn open_for_write(path: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(connect(path, OpenMode::ReadWriteCreate).await?)
}

/// Drop both tables and recreate them from the entity definitions.
pub async fn recreate_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();

    // pedidos references clientes, drop it first
    for table in [
        a002_order::repository::Entity.table_name(),
        a001_customer::repository::Entity.table_name(),
    ] {
        tracing::info!("Dropping table {} if it exists", table);
        conn.execute(Statement::from_string(
            backend,
            format!("DROP TABLE IF EXISTS {}", table),
        ))
        .await?;
    }

    let schema = Schema::new(backend);
    let create_customers = schema.create_table_from_entity(a001_customer::repository::Entity);
    conn.execute(backend.build(&create_customers)).await?;
    let create_orders = schema.create_table_from_entity(a002_order::repository::Entity);
    conn.execute(backend.build(&create_orders)).await?;
    tracing::info!("Created tables clientes and pedidos");

    Ok(())
}

pub async fn read_schema_version<C: ConnectionTrait>(conn: &C) -> Result<i32, DbErr> {
    let row = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "PRAGMA user_version".to_string(),
        ))
        .await?;
    match row {
        Some(row) => row.try_get::<i32>("", "user_version"),
        None => Ok(0),
    }
}

pub async fn write_schema_version<C: ConnectionTrait>(conn: &C, version: i32) -> Result<(), DbErr> {
    // PRAGMA does not accept bound parameters
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("PRAGMA user_version = {}", version),
    ))
    .await?;
    Ok(())
}
