/// Authentication endpoints
///
/// - `POST /auth/register` - Register a user with a default organisation
/// - `POST /auth/login` - Exchange credentials for an access token
///
/// Both return a session:
///
/// ```json
/// {
///   "status": "success",
///   "message": "Login successful",
///   "data": {
///     "accessToken": "eyJ...",
///     "user": {
///       "userId": "uuid",
///       "firstName": "John",
///       "lastName": "Doe",
///       "email": "john@example.com",
///       "phone": "1234567890"
///     }
///   }
/// }
/// ```

use crate::{app::AppState, error::ApiResult, extract::JsonBody, response::ApiResponse};
use axum::extract::State;
use orgauth_shared::accounts::{self, LoginInput, RegistrationInput, Session};

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "firstName": "John",
///   "lastName": "Doe",
///   "email": "john@example.com",
///   "password": "password",
///   "phone": "1234567890"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a JSON object
/// - `422 Unprocessable Entity`: Email taken, a field has the wrong JSON
///   type, or fields are invalid (all listed)
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegistrationInput>,
) -> ApiResult<ApiResponse<Session>> {
    let session = accounts::register(state.store.as_ref(), state.jwt_secret(), input).await?;

    Ok(ApiResponse::created("Registration successful", session))
}

/// Login with email and password
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password, indistinguishable
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> ApiResult<ApiResponse<Session>> {
    let session = accounts::login(state.store.as_ref(), state.jwt_secret(), input).await?;

    Ok(ApiResponse::ok("Login successful", session))
}
