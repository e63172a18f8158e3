/// Organisation endpoints
///
/// All routes require a bearer token; the authenticated user is read from
/// the [`AuthContext`] the JWT layer puts in the request extensions.
///
/// - `GET  /api/organisations` - Organisations the caller belongs to
/// - `POST /api/organisations` - Create one, caller becomes a member
/// - `GET  /api/organisations/:orgId` - One organisation, members only
/// - `POST /api/organisations/:orgId/users` - Add a user to an organisation

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    response::ApiResponse,
};
use axum::{
    extract::{Path, State},
    Extension,
};
use orgauth_shared::{
    auth::middleware::AuthContext,
    models::Organisation,
    tenancy::{self, AddMemberInput, OrganisationInput},
};
use serde::Serialize;
use uuid::Uuid;

/// List payload
#[derive(Debug, Serialize)]
pub struct OrganisationList {
    pub organisations: Vec<Organisation>,
}

fn parse_org_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Organization not found".to_string()))
}

pub async fn list_organisations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<OrganisationList>> {
    let organisations = tenancy::list_organisations(state.store.as_ref(), auth.user_id).await?;

    Ok(ApiResponse::ok(
        "Organizations retrieved successfully",
        OrganisationList { organisations },
    ))
}

/// # Errors
///
/// - `404 Not Found`: Unknown id, or the caller is not a member
pub async fn get_organisation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(org_id): Path<String>,
) -> ApiResult<ApiResponse<Organisation>> {
    let org_id = parse_org_id(&org_id)?;

    let organisation =
        tenancy::get_organisation(state.store.as_ref(), auth.user_id, org_id).await?;

    Ok(ApiResponse::ok(
        "Organization retrieved successfully",
        organisation,
    ))
}

/// # Errors
///
/// - `422 Unprocessable Entity`: Blank `name`
pub async fn create_organisation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(input): JsonBody<OrganisationInput>,
) -> ApiResult<ApiResponse<Organisation>> {
    let organisation =
        tenancy::create_organisation(state.store.as_ref(), auth.user_id, input).await?;

    Ok(ApiResponse::created(
        "Organization created successfully",
        organisation,
    ))
}

/// # Errors
///
/// - `404 Not Found`: Unknown user or organisation
/// - `422 Unprocessable Entity`: Missing or malformed `userId`
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(org_id): Path<String>,
    JsonBody(input): JsonBody<AddMemberInput>,
) -> ApiResult<ApiResponse<()>> {
    let org_id = Uuid::parse_str(&org_id)
        .map_err(|_| ApiError::NotFound("User or organization not found".to_string()))?;

    tenancy::add_member(
        state.store.as_ref(),
        auth.user_id,
        org_id,
        input,
        state.config.tenancy.invite_policy(),
    )
    .await?;

    Ok(ApiResponse::message(
        "User added to organization successfully",
    ))
}
