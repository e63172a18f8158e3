/// Membership model and database operations
///
/// A membership links one user to one organisation and is the only thing
/// that grants visibility into an organisation. There are no roles: a user
/// either is a member or is not.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE memberships (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id),
///     organisation_id UUID NOT NULL REFERENCES organisations(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
/// );
/// ```
///
/// The `(user_id, organisation_id)` pair is not unique. Access checks test
/// for existence, so a duplicated row is harmless.
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::models::membership::Membership;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid, org_id: Uuid) -> Result<(), sqlx::Error> {
/// Membership::create(&pool, user_id, org_id).await?;
/// assert!(Membership::exists(&pool, user_id, org_id).await?);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Membership row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,

    pub user_id: Uuid,

    pub organisation_id: Uuid,

    /// Insertion time; orders a user's organisation listing
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Links a user to an organisation
    ///
    /// The ids are not looked up first.
    ///
    /// # Errors
    ///
    /// An unknown user or organisation id surfaces as a foreign-key
    /// violation from the database.
    pub async fn create<'e, E>(
        executor: E,
        user_id: Uuid,
        organisation_id: Uuid,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (user_id, organisation_id)
            VALUES ($1, $2)
            RETURNING id, user_id, organisation_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(organisation_id)
        .fetch_one(executor)
        .await?;

        Ok(membership)
    }

    /// Checks whether at least one membership exists for the pair
    pub async fn exists<'e, E>(
        executor: E,
        user_id: Uuid,
        organisation_id: Uuid,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM memberships
                WHERE user_id = $1 AND organisation_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(organisation_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }
}
