//! HTTP mapping for [`Error`].

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body of every failed request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl Error {
    /// Status code this error is answered with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::CustomerNotFound { .. } | Self::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the log
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            ErrorBody {
                error: "Internal server error".to_string(),
                field: None,
            }
        } else {
            let field = match &self {
                Self::Validation { field, .. } => Some(field.clone()),
                _ => None,
            };
            ErrorBody {
                error: self.to_string(),
                field,
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::validation("phone", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::SessionExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::OrderNotFound { id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Conflict {
                message: "dup".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::Database(sea_orm::DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
