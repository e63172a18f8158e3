/// Membership checks
///
/// The permission model has a single level: a user may see an organisation
/// if and only if a membership links them to it. There are no roles.
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::auth::authorization::require_membership;
/// use orgauth_shared::store::Store;
/// use uuid::Uuid;
///
/// # async fn example(store: &dyn Store, user_id: Uuid, org_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// require_membership(store, user_id, org_id).await?;
/// # Ok(())
/// # }
/// ```

use uuid::Uuid;

use crate::store::{Store, StoreError};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// User is not a member of the organisation
    #[error("Not a member of organisation {0}")]
    NotMember(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Checks that `user_id` belongs to `org_id`
///
/// An unknown organisation id is indistinguishable from one the user is not
/// a member of.
///
/// # Errors
///
/// Returns `AuthzError::NotMember` if no membership exists
pub async fn require_membership(
    store: &dyn Store,
    user_id: Uuid,
    org_id: Uuid,
) -> Result<(), AuthzError> {
    if !store.is_member(user_id, org_id).await? {
        return Err(AuthzError::NotMember(org_id));
    }

    Ok(())
}
