use contracts::dashboards::d400_sales_dashboard::dto::SalesRow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::dashboards::d400_sales_dashboard::repository;
use crate::shared::error::DashboardError;

struct CachedDataset {
    modified: SystemTime,
    rows: Arc<Vec<SalesRow>>,
}

/// Memoizes the loaded sales rows, keyed on the store's modification time.
///
/// Any change to the store file (or its WAL sidecar) triggers a reload on
/// the next request.
pub struct DatasetCache {
    path: PathBuf,
    state: Mutex<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    pub async fn rows(&self) -> Result<Arc<Vec<SalesRow>>, DashboardError> {
        let modified = store_modified(&self.path)?;

        let hit = self
            .lock()
            .as_ref()
            .filter(|cached| cached.modified == modified)
            .map(|cached| Arc::clone(&cached.rows));
        if let Some(rows) = hit {
            tracing::debug!("Dataset cache hit ({} rows)", rows.len());
            return Ok(rows);
        }

        tracing::info!("Dataset cache miss, loading {}", self.path.display());
        let rows = Arc::new(repository::load_sales_rows(&self.path).await?);
        *self.lock() = Some(CachedDataset {
            modified,
            rows: Arc::clone(&rows),
        });
        Ok(rows)
    }

    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CachedDataset>> {
        // the cached value is always replaced whole, a poisoned guard is still consistent
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn store_modified(path: &Path) -> Result<SystemTime, DashboardError> {
    let unavailable = |e: std::io::Error| {
        DashboardError::store_unavailable(path.display().to_string(), e)
    };

    let main = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(unavailable)?;

    let mut wal = path.as_os_str().to_owned();
    wal.push("-wal");
    let wal = std::fs::metadata(PathBuf::from(wal))
        .and_then(|m| m.modified())
        .ok();

    Ok(wal.map_or(main, |w| w.max(main)))
}
