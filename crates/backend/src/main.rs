use axum::http::{header, Method};
use axum::middleware;
use backend::api::state::AppState;
use backend::routes::configure_routes;
use backend::shared::config;
use backend::system;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize("backend.log")?;

    let config = config::load_config()?;
    let db_path = config::get_database_path(&config)?;
    if db_path.exists() {
        tracing::info!("Sales data store: {}", db_path.display());
    } else {
        // the server still starts; dashboard endpoints answer 503 until the store exists
        tracing::warn!(
            "Sales data store not found at {}. Run `generate_data` to create it.",
            db_path.display()
        );
    }

    let state = AppState::new(db_path, config.dashboard.annual_goal);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = configure_routes(state)
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server host {}: {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. \
                     Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
