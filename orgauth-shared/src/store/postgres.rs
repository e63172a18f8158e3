/// PostgreSQL-backed store
///
/// Thin adapter from the [`Store`] trait onto the model query functions.
/// Composite writes open a transaction and commit only after every insert
/// succeeded; dropping the transaction on an early `?` rolls it back.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{Account, Store, StoreResult};
use crate::db::pool::health_check;
use crate::models::{Membership, NewOrganisation, NewUser, Organisation, User};

/// Store over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, user).await?)
    }

    async fn find_organisation(&self, id: Uuid) -> StoreResult<Option<Organisation>> {
        Ok(Organisation::find_by_id(&self.pool, id).await?)
    }

    async fn organisations_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Organisation>> {
        Ok(Organisation::list_for_user(&self.pool, user_id).await?)
    }

    async fn insert_membership(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<Membership> {
        Ok(Membership::create(&self.pool, user_id, org_id).await?)
    }

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<bool> {
        Ok(Membership::exists(&self.pool, user_id, org_id).await?)
    }

    async fn register_account(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> StoreResult<Account> {
        let mut tx = self.pool.begin().await?;

        let user = User::create(&mut *tx, user).await?;
        let organisation = Organisation::create(&mut *tx, organisation).await?;
        let membership = Membership::create(&mut *tx, user.id, organisation.id).await?;

        tx.commit().await?;

        debug!(
            user_id = %user.id,
            org_id = %organisation.id,
            "Account rows committed"
        );

        Ok(Account {
            user,
            organisation,
            membership,
        })
    }

    async fn create_organisation_with_member(
        &self,
        organisation: NewOrganisation,
        user_id: Uuid,
    ) -> StoreResult<(Organisation, Membership)> {
        let mut tx = self.pool.begin().await?;

        let organisation = Organisation::create(&mut *tx, organisation).await?;
        let membership = Membership::create(&mut *tx, user_id, organisation.id).await?;

        tx.commit().await?;

        Ok((organisation, membership))
    }
}
