use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d400_sales_dashboard::dto::ErrorResponse;
use thiserror::Error;

/// Recoverable dashboard failures, each mapped to a user-visible message
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("store unavailable at {path}: {reason}")]
    StoreUnavailable { path: String, reason: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid goal {0}: target must be a positive number")]
    InvalidGoal(f64),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn store_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::StoreUnavailable { .. } => "store_unavailable",
            DashboardError::InsufficientData(_) => "insufficient_data",
            DashboardError::InvalidGoal(_) => "invalid_goal",
            DashboardError::BadRequest(_) => "bad_request",
            DashboardError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::InvalidGoal(_) | DashboardError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            DashboardError::StoreUnavailable { path, reason } => format!(
                "Sales data store at {} is not available ({}). Run `generate_data` first.",
                path, reason
            ),
            DashboardError::InsufficientData(detail) => {
                format!("No data for the current selection: {}", detail)
            }
            DashboardError::InvalidGoal(target) => {
                format!("Goal target must be greater than zero, got {}", target)
            }
            DashboardError::BadRequest(detail) => detail.clone(),
            DashboardError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
