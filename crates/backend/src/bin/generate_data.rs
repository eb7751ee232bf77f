//! Rebuild the sales data store with synthetic customers and orders.
//!
//! Parameters come from the `[generator]` section of config.toml.

use backend::shared::config;
use backend::shared::format::format_number;
use backend::system;
use backend::usecases::u501_generate_demo_data::executor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize("generate_data.log")?;

    let config = config::load_config()?;
    let db_path = config::get_database_path(&config)?;
    tracing::info!("Regenerating sales data store at {}", db_path.display());

    let report = match executor::generate(&db_path, &config.generator).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Data generation failed: {:#}", e);
            return Err(e);
        }
    };

    tracing::info!(
        "Wrote {} customers and {} orders for {}..{} (seed {})",
        format_number(report.customers_written),
        format_number(report.orders_written),
        report.window_start,
        report.window_end,
        report.seed
    );
    Ok(())
}
