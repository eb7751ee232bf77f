use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// `logs/` next to the executable, `target/logs` when the exe path is unknown
pub fn log_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| Path::new("target").join("logs"))
}

/// Initialize tracing.
///
/// Logs go to:
/// - stdout (coloured)
/// - `<log dir>/<log_file_name>` (plain text, appended)
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn initialize(log_file_name: &str) -> anyhow::Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        anyhow::anyhow!("Cannot create log directory {}: {}", log_dir.display(), e)
    })?;

    let log_file_path = log_dir.join(log_file_name);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            anyhow::anyhow!("Cannot open log file {}: {}", log_file_path.display(), e)
        })?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    tracing::info!(
        "Logging to stdout and {} (filter: {})",
        log_file_path.display(),
        log_level
    );
    Ok(())
}
