use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::AuthError;
use persistence::StoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid field values")]
    InvalidFields(Vec<ValidationDetail>),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl ApiError {
    fn auth_status(err: &AuthError) -> StatusCode {
        match err {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailExists => StatusCode::CONFLICT,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, error_code, message) = match self {
            ApiError::Auth(err) => {
                if !err.is_validation() {
                    tracing::error!("Credential storage error: {}", err);
                }
                (
                    Self::auth_status(&err),
                    err.code().to_string(),
                    err.message_key().to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found".into(), msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict".into(), msg),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error".into(), msg)
            }
            ApiError::InvalidFields(fields) => {
                let message = if fields.len() == 1 {
                    fields[0].message.clone()
                } else {
                    format!("{} validation errors", fields.len())
                };
                details = Some(fields);
                (StatusCode::BAD_REQUEST, "validation_error".into(), message)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".into(),
                    "internalError".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(format!("Store error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::InvalidFields(details)
    }
}
