/// Organisation operations scoped to the requesting user
///
/// Every function takes the authenticated user's id. Reads only return
/// organisations that user is a member of; an organisation the user cannot
/// see is reported exactly like one that does not exist.
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::store::Store;
/// use orgauth_shared::tenancy::{create_organisation, get_organisation, OrganisationInput};
/// use uuid::Uuid;
///
/// # async fn example(store: &dyn Store, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let org = create_organisation(store, user_id, OrganisationInput {
///     name: "Acme".to_string(),
///     description: None,
/// })
/// .await?;
///
/// let fetched = get_organisation(store, user_id, org.id).await?;
/// assert_eq!(fetched, org);
/// # Ok(())
/// # }
/// ```

use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{require_membership, AuthzError};
use crate::models::{Membership, NewOrganisation, Organisation};
use crate::store::{Store, StoreError};
use crate::validation::{check, not_blank, parse_user_id, FieldError};

/// Error type for tenancy operations
#[derive(Debug, thiserror::Error)]
pub enum TenancyError {
    /// One or more fields failed validation
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Unknown organisation, or one the requester is not a member of
    #[error("Organization not found")]
    OrganisationNotFound,

    /// Add-member referenced an unknown user or organisation
    #[error("User or organization not found")]
    MemberReferenceNotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TenancyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingReference => TenancyError::MemberReferenceNotFound,
            other => TenancyError::Store(other),
        }
    }
}

impl From<AuthzError> for TenancyError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotMember(_) => TenancyError::OrganisationNotFound,
            AuthzError::Store(e) => TenancyError::Store(e),
        }
    }
}

/// Create-organisation request body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganisationInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    pub description: Option<String>,
}

/// Add-member request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMemberInput {
    pub user_id: Option<String>,
}

/// Invite policy for [`add_member`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvitePolicy {
    /// Any authenticated user may add members to any organisation
    #[default]
    Open,

    /// Only members of an organisation may add members to it
    MembersOnly,
}

/// Organisations the user belongs to, in membership order
pub async fn list_organisations(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<Vec<Organisation>, TenancyError> {
    let organisations = store.organisations_for_user(user_id).await?;
    debug!(user_id = %user_id, count = organisations.len(), "Listed organisations");
    Ok(organisations)
}

/// Fetches one organisation if the requester is a member of it
///
/// # Errors
///
/// Returns `OrganisationNotFound` both for unknown ids and for
/// organisations the requester does not belong to.
pub async fn get_organisation(
    store: &dyn Store,
    requester: Uuid,
    org_id: Uuid,
) -> Result<Organisation, TenancyError> {
    require_membership(store, requester, org_id).await?;

    store
        .find_organisation(org_id)
        .await?
        .ok_or(TenancyError::OrganisationNotFound)
}

/// Creates an organisation and makes the requester its first member
pub async fn create_organisation(
    store: &dyn Store,
    requester: Uuid,
    input: OrganisationInput,
) -> Result<Organisation, TenancyError> {
    check(&input, &["name", "description"]).map_err(TenancyError::Validation)?;

    let (organisation, _) = store
        .create_organisation_with_member(
            NewOrganisation {
                name: input.name,
                description: input.description,
            },
            requester,
        )
        .await?;

    info!(user_id = %requester, org_id = %organisation.id, "Organisation created");
    Ok(organisation)
}

/// Links the user named in `input` to `org_id`
///
/// # Errors
///
/// - `Validation` on `userId` when it is missing or not a UUID
/// - `OrganisationNotFound` under [`InvitePolicy::MembersOnly`] when the
///   requester is not a member
/// - `MemberReferenceNotFound` when either id is unknown
pub async fn add_member(
    store: &dyn Store,
    requester: Uuid,
    org_id: Uuid,
    input: AddMemberInput,
    policy: InvitePolicy,
) -> Result<Membership, TenancyError> {
    let user_id = parse_user_id(input.user_id.as_deref())
        .map_err(|e| TenancyError::Validation(vec![e]))?;

    if policy == InvitePolicy::MembersOnly {
        require_membership(store, requester, org_id).await?;
    }

    let membership = store.insert_membership(user_id, org_id).await?;

    info!(
        user_id = %user_id,
        org_id = %org_id,
        added_by = %requester,
        "Member added to organisation"
    );
    Ok(membership)
}
