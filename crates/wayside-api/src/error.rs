use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use wayside_core::error::WaysideError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<WaysideError> for ApiError {
    fn from(err: WaysideError) -> Self {
        let details = err.to_string();

        if err.is_upstream() {
            tracing::warn!(error = %err, "External service failed");
            return Self::bad_gateway("External service failed").with_details(details);
        }

        match &err {
            WaysideError::RouteLoad { .. } | WaysideError::InvalidRoute { .. } => {
                Self::bad_request("Invalid route").with_details(details)
            }
            WaysideError::ConfigInvalid { .. } | WaysideError::ConfigMissing { .. } => {
                Self::bad_request("Invalid parameters").with_details(details)
            }
            WaysideError::NoRoute => Self::not_found("No route found").with_details(details),
            WaysideError::NoMatchingAmenity { .. } => {
                Self::not_found("No matching amenity").with_details(details)
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::internal("Internal error").with_details(details)
            }
        }
    }
}
