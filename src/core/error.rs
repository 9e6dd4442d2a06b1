use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Outbound gateway call that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStage {
    /// OAuth client-credentials token request
    Token,
    /// STK push (payment initiation) request
    StkPush,
}

impl fmt::Display for GatewayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayStage::Token => write!(f, "token request"),
            GatewayStage::StkPush => write!(f, "STK push request"),
        }
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network, TLS, timeout or body read failure talking to the gateway
    #[error("Gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway answered with a non-2xx status
    #[error("Gateway rejected {stage}: {status}")]
    Upstream {
        stage: GatewayStage,
        status: reqwest::StatusCode,
    },

    /// Gateway answered 2xx but the body is not what the contract promises
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    /// Invalid caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_)
            | AppError::Transport(_)
            | AppError::Upstream { .. }
            | AppError::MalformedResponse(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        AppError::MalformedResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
