use std::path::PathBuf;
use std::sync::Arc;

use crate::shared::data::dataset_cache::DatasetCache;

/// Shared by every handler through `axum::extract::State`
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DatasetCache>,
    /// Target used by the goal endpoint when the request carries none
    pub annual_goal: f64,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>, annual_goal: f64) -> Self {
        Self {
            cache: Arc::new(DatasetCache::new(db_path)),
            annual_goal,
        }
    }
}
