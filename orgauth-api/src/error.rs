/// Error handling for the API server
///
/// All handlers return `Result<T, ApiError>`. Errors render as
///
/// ```json
/// { "status": "Not found", "message": "Organization not found", "statusCode": 404 }
/// ```
///
/// except validation failures, which list every rejected field:
///
/// ```json
/// { "errors": [ { "field": "email", "message": "Email already exists" } ] }
/// ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orgauth_shared::{
    accounts::AccountError,
    auth::{jwt::JwtError, password::PasswordError},
    store::StoreError,
    tenancy::TenancyError,
    validation::FieldError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): unparseable body
    BadRequest(String),

    /// Login failed (401); never says which credential was wrong
    AuthenticationFailed,

    /// Missing or invalid bearer token (401)
    Unauthorized(String),

    /// Not found (404), also used for resources the caller may not see
    NotFound(String),

    /// Unprocessable entity (422)
    Validation(Vec<FieldError>),

    /// Internal server error (500); details are logged, not returned
    Internal(String),
}

/// Error envelope for everything except validation failures
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub status_code: u16,
}

/// Validation failure body
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub errors: Vec<FieldError>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::AuthenticationFailed => write!(f, "Authentication failed"),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(errors) => write!(f, "Validation failed: {} errors", errors.len()),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (label, message) = match self {
            ApiError::Validation(errors) => {
                return (status, Json(ValidationResponse { errors })).into_response();
            }
            // Clients expect this label with the 401.
            ApiError::AuthenticationFailed => ("Bad request", "Authentication failed".to_string()),
            ApiError::BadRequest(msg) => ("Bad request", msg),
            ApiError::Unauthorized(msg) => ("Unauthorized", msg),
            ApiError::NotFound(msg) => ("Not found", msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ("Internal server error", "An internal error occurred".to_string())
            }
        };

        let body = Json(ErrorResponse {
            status: label.to_string(),
            message,
            status_code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Syntax errors and a missing JSON content type; type mismatches inside
/// a well-formed body are handled by [`crate::extract::JsonBody`].
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Validation(vec![FieldError::new(
                "email",
                "Email already exists",
            )]),
            StoreError::MissingReference => {
                ApiError::NotFound("User or organization not found".to_string())
            }
            StoreError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => ApiError::Internal(msg),
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            _ => ApiError::Unauthorized("Invalid token".to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => ApiError::Validation(errors),
            AccountError::DuplicateEmail => StoreError::DuplicateEmail.into(),
            AccountError::AuthenticationFailed => ApiError::AuthenticationFailed,
            AccountError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AccountError::Store(e) => e.into(),
            AccountError::Password(e) => e.into(),
            AccountError::Token(e) => e.into(),
        }
    }
}

impl From<TenancyError> for ApiError {
    fn from(err: TenancyError) -> Self {
        match err {
            TenancyError::Validation(errors) => ApiError::Validation(errors),
            TenancyError::OrganisationNotFound => {
                ApiError::NotFound("Organization not found".to_string())
            }
            TenancyError::MemberReferenceNotFound => StoreError::MissingReference.into(),
            TenancyError::Store(e) => e.into(),
        }
    }
}
