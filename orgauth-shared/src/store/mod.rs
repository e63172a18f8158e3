/// Persistence seam
///
/// Every component receives a [`Store`] handle instead of reaching for a
/// global connection. Two implementations ship with the crate:
///
/// - [`PgStore`]: PostgreSQL via sqlx, used by the server
/// - [`MemoryStore`]: in-process maps, used by tests and demos
///
/// Composite writes (`register_account`, `create_organisation_with_member`)
/// are atomic in both: either every row lands or none does.
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::store::{PgStore, Store};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
/// store.health_check().await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Membership, NewOrganisation, NewUser, Organisation, User};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("Email already exists")]
    DuplicateEmail,

    /// A referenced user or organisation does not exist
    #[error("Referenced user or organisation does not exist")]
    MissingReference,

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation()
                && db_err.constraint().is_some_and(|c| c.contains("email"))
            {
                return StoreError::DuplicateEmail;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::MissingReference;
            }
        }
        StoreError::Database(err)
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Rows written by a successful registration
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub organisation: Organisation,
    pub membership: Membership,
}

/// Repository operations over users, organisations and memberships
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backing store is reachable
    async fn health_check(&self) -> StoreResult<()>;

    /// Exact, case-sensitive email lookup
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Inserts a user; fails with [`StoreError::DuplicateEmail`] on a taken email
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_organisation(&self, id: Uuid) -> StoreResult<Option<Organisation>>;

    /// Organisations the user is a member of, each listed once, ordered by
    /// the user's first membership in it
    async fn organisations_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Organisation>>;

    /// Links a user to an organisation without any access check
    ///
    /// Fails with [`StoreError::MissingReference`] if either id is unknown.
    async fn insert_membership(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<Membership>;

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<bool>;

    /// Creates user, organisation and the linking membership atomically
    async fn register_account(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> StoreResult<Account>;

    /// Creates an organisation and links `user_id` to it atomically
    async fn create_organisation_with_member(
        &self,
        organisation: NewOrganisation,
        user_id: Uuid,
    ) -> StoreResult<(Organisation, Membership)>;
}
