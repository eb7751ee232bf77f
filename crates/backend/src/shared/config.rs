use contracts::usecases::u501_generate_demo_data::request::GenerateRequest;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GenerateRequest,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Annual sales target used when a goal request omits `target`
    pub annual_goal: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            annual_goal: 1_000_000.0,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/sales_dashboard.db"

[server]
host = "0.0.0.0"
port = 3000

[generator]
customer_count = 50
history_days = 730
max_orders_per_day = 5

[dashboard]
annual_goal = 1000000.0
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for config_path in candidates {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return parse_config(&std::fs::read_to_string(&config_path)?);
        }
        tracing::debug!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/sales_dashboard.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.generator, GenerateRequest::default());
        assert_eq!(config.dashboard.annual_goal, 1_000_000.0);
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse_config("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generator.customer_count, 50);
        assert_eq!(config.generator.seed, None);
    }

    #[test]
    fn test_generator_seed_and_overrides() {
        let config = parse_config(
            "[database]\npath = \"x.db\"\n[generator]\nseed = 7\nhistory_days = 30\n",
        )
        .unwrap();
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.generator.history_days, 30);
        assert_eq!(config.generator.max_orders_per_day, 5);
    }

    #[test]
    fn test_absolute_database_path_is_kept() {
        let config = parse_config("[database]\npath = \"/var/data/sales.db\"\n").unwrap();
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/var/data/sales.db")
        );
    }
}
