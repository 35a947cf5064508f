//! Application error taxonomy and its single HTTP serializer.
//!
//! Every layer signals failures as an [`AppError`]. Only the
//! [`IntoResponse`] implementation below turns one into an HTTP response, so
//! all failures share the `{"success": false, "error": "<message>"}` shape.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgDatabaseError;

/// Failure kinds surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Entity lookup miss (404).
    #[error("{0}")]
    NotFound(String),

    /// Missing, expired or otherwise invalid identity token (401).
    #[error("{0}")]
    Unauthenticated(String),

    /// Identity lacks a permitted role or does not own the resource (403).
    #[error("{0}")]
    Forbidden(String),

    /// Malformed query, payload, or a storage-level constraint rejection (400).
    #[error("{0}")]
    ValidationFailed(String),

    /// Uniqueness constraint violated (400).
    #[error("{0}")]
    DuplicateKey(String),

    /// Unclassified failure (500). The message is safe to show to clients.
    #[error("{0}")]
    ServerError(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::DuplicateKey(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::ServerError(message.into())
    }

    /// HTTP status paired with each kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ValidationFailed(_) | AppError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            AppError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(m)
            | AppError::Unauthenticated(m)
            | AppError::Forbidden(m)
            | AppError::ValidationFailed(m)
            | AppError::DuplicateKey(m)
            | AppError::ServerError(m) => m,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let message = if self.message().is_empty() {
            "Server Error".to_string()
        } else {
            self.message().to_string()
        };

        let mut response =
            (status, Json(json!({ "success": false, "error": message }))).into_response();

        if matches!(self, AppError::Unauthenticated(_)) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Classifies a storage failure into the taxonomy.
///
/// Constraint violations raised by PostgreSQL become client errors; anything
/// else is logged and reported as a generic server error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::not_found("Resource not found");
    }

    if let Some(db) = e.as_database_error() {
        let detail = db
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(|pg| pg.detail())
            .map(str::to_string);

        match db.kind() {
            ErrorKind::UniqueViolation => {
                let message = match detail {
                    Some(detail) => format!("Duplicate field value entered: {detail}"),
                    None => "Duplicate field value entered".to_string(),
                };
                return AppError::duplicate(message);
            }
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return AppError::validation(detail.unwrap_or_else(|| db.message().to_string()));
            }
            _ => {}
        }

        // invalid_text_representation, string_data_right_truncation, numeric_value_out_of_range
        if matches!(db.code().as_deref(), Some("22P02" | "22001" | "22003")) {
            return AppError::validation(db.message().to_string());
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::server("Server Error")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for '{field}'"),
                })
            })
            .collect();
        messages.sort();

        AppError::validation(messages.join(", "))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %e, "token verification failed");
        AppError::unauthenticated("Not authorized to access this route")
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        tracing::error!(error = %e, "password hashing failed");
        AppError::server("Server Error")
    }
}
