use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::pricing::FetchError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Malformed or semantically invalid request
    InvalidRequest(String),
    /// Market prices could not be retrieved
    PriceFetch(FetchError),
    /// Readings fall outside every returned price bucket
    UnpricedIntervals { count: usize, first_timestamp: i64 },
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::PriceFetch(err) => write!(f, "Price fetch error: {}", err),
            Self::UnpricedIntervals {
                count,
                first_timestamp,
            } => write!(
                f,
                "No market price for {} interval(s), first at {}",
                count, first_timestamp
            ),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PriceFetch(err) => Some(err),
            _ => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PriceFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnpricedIntervals { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Upstream details stay in the logs.
    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::PriceFetch(_) => "Failed to fetch market prices".to_string(),
            Self::UnpricedIntervals { .. } => self.to_string(),
            Self::InternalError(_) => "Failed to calculate energy cost".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        Self::PriceFetch(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}
