/// User profile endpoint
///
/// `GET /api/users/:id` returns the public profile of any user to any
/// authenticated caller.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::extract::{Path, State};
use orgauth_shared::{accounts, models::UserProfile};
use uuid::Uuid;

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserProfile>> {
    let user_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let profile = accounts::user_profile(state.store.as_ref(), user_id).await?;

    Ok(ApiResponse::ok("User retrieved successfully", profile))
}
