use super::schema::ErrorResponse;
use crate::service::gateway_service::UpstreamError;
use crate::service::polling_service::PollError;
use crate::service::submission_service::SubmissionError;
use axum::Json;
use axum::http::StatusCode;

pub const MASKED_REASON: &str = "An internal server error occurred";

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code,
            message: message.into(),
        }
    }

    pub fn bad_gateway(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            code,
            message: message.into(),
        }
    }

    pub fn gateway_timeout(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            code,
            message: message.into(),
        }
    }

    /// Production hides the message of every 5xx behind a fixed reason.
    pub fn render(self, production: bool) -> (StatusCode, Json<ErrorResponse>) {
        let reason = if production && self.status.is_server_error() {
            MASKED_REASON.to_string()
        } else {
            self.message
        };
        (
            self.status,
            Json(ErrorResponse {
                error_code: self.code.to_string(),
                reason,
            }),
        )
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match &err {
            UpstreamError::Transport { timeout: true, .. } => {
                Self::gateway_timeout("UPSTREAM_TIMEOUT", err.to_string())
            }
            UpstreamError::Transport { .. } => {
                Self::bad_gateway("UPSTREAM_UNAVAILABLE", err.to_string())
            }
            UpstreamError::Shape(_) => Self::bad_gateway("UPSTREAM_BAD_RESPONSE", err.to_string()),
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Upstream { source, .. } if source.is_timeout() => {
                Self::gateway_timeout("UPSTREAM_TIMEOUT", format!("submission failed: {source}"))
            }
            SubmissionError::Upstream { kind, source } => Self::bad_gateway(
                "SUBMISSION_FAILED",
                format!("failed to start {kind} job: {source}"),
            ),
            SubmissionError::MissingIdentifier(field) => Self::bad_gateway(
                "MISSING_JOB_ID",
                format!("upstream response carried no {field}"),
            ),
        }
    }
}

impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        if err.source.is_timeout() {
            return Self::gateway_timeout("UPSTREAM_TIMEOUT", err.to_string());
        }
        Self::bad_gateway("POLL_FAILED", err.to_string())
    }
}
