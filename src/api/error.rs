use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

use crate::service::ServiceError;

/// Which identifier a request carried, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    Category,
    Context,
    Item,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdField::Category => f.write_str("Category Id"),
            IdField::Context => f.write_str("Context Id"),
            IdField::Item => f.write_str("Item Id"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid {field}. {field} = {value}")]
    InvalidIdentifier { field: IdField, value: String },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier { .. } | ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::PageOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Service(ServiceError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            ApiError::InvalidParameter(_) => "INVALID_PARAMETER",
            ApiError::Service(ServiceError::PageOutOfRange { .. }) => "PAGE_OUT_OF_RANGE",
            ApiError::Service(ServiceError::Unavailable(_)) => "SERVICE_UNAVAILABLE",
            ApiError::Service(ServiceError::Database(_)) => "SERVICE_FAILURE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            // Backend details stay in the log.
            match &self {
                ApiError::Service(ServiceError::Unavailable(_)) => self.to_string(),
                _ => "Internal service failure".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
