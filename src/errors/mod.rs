use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    err_user_not_found, CODE_INTERNAL_ERROR, CODE_USER_NOT_FOUND, CODE_VALIDATION_FAILED,
    ERR_DATABASE, ERR_VALIDATION_FAILED,
};

/// A single rejected field, named the way it is spelled in JSON bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request [{code}]: {message}")]
    BadRequest { code: String, message: String },
    #[error("Not Found [{code}]: {message}")]
    NotFound { code: String, message: String },
    #[error("Internal Server Error [{code}]: {message}")]
    InternalServerError { code: String, message: String },
    #[error("Validation Error [{code}]: {errors:?}")]
    ValidationError {
        code: String,
        errors: Vec<FieldError>,
    },
}

impl ApiError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        ApiError::NotFound {
            code: CODE_USER_NOT_FOUND.to_string(),
            message: err_user_not_found(id),
        }
    }

    pub fn internal(message: &str) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.to_string(),
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError {
            code: CODE_VALIDATION_FAILED.to_string(),
            errors,
        }
    }

    /// Replace the generic message of a server-side failure with one naming
    /// the operation that failed. Other variants pass through untouched.
    pub fn during(self, operation: &str) -> Self {
        match self {
            ApiError::InternalServerError { code, .. } => ApiError::InternalServerError {
                code,
                message: operation.to_string(),
            },
            other => other,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::InternalServerError { code, message } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: message.clone(),
                errors: None,
            },
            ApiError::ValidationError { code, errors } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: ERR_VALIDATION_FAILED.to_string(),
                errors: Some(errors.clone()),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Driver details stay in the log; clients only see the generic message.
        error!("Database error: {}", err);
        ApiError::internal(ERR_DATABASE)
    }
}
