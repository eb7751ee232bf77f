use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_number;

/// Logs each HTTP request:
/// - local timestamp
/// - duration (ms)
/// - response size (thousands separated)
/// - status code
/// - method and path
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} | {:>5}ms | {:>12} | {} {:>6} {} ({})",
                Local::now().format("%H:%M:%S"),
                start.elapsed().as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let line = format!(
        "{} | {:>5}ms | {:>12} | {} {:>6} {}",
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        format_number(bytes.len()),
        parts.status.as_u16(),
        method,
        uri.path()
    );
    if parts.status.is_success() {
        tracing::info!("{}", line);
    } else {
        tracing::warn!("{}", line);
    }

    Response::from_parts(parts, Body::from(bytes))
}
