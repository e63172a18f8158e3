/// In-memory store for testing and demos
///
/// Mirrors the PostgreSQL schema's guarantees without a database:
///
/// - email uniqueness is checked on every user insert
/// - memberships must reference an existing user and organisation
/// - composite writes happen under a single write lock, so they are
///   all-or-nothing and invisible to readers until complete
/// - a user's organisations come back once each, in order of first membership
///
/// # Example
///
/// ```
/// use orgauth_shared::models::{NewOrganisation, NewUser};
/// use orgauth_shared::store::{MemoryStore, Store};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let account = store
///     .register_account(
///         NewUser {
///             first_name: "John".to_string(),
///             last_name: "Doe".to_string(),
///             email: "john.doe@example.com".to_string(),
///             password_hash: "$argon2id$...".to_string(),
///             phone: "1234567890".to_string(),
///         },
///         NewOrganisation::default_for("John"),
///     )
///     .await?;
///
/// assert!(store.is_member(account.user.id, account.organisation.id).await?);
/// # Ok(())
/// # }
/// ```

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Account, Store, StoreError, StoreResult};
use crate::models::{Membership, NewOrganisation, NewUser, Organisation, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    organisations: HashMap<Uuid, Organisation>,
    /// Append-only; position is insertion order
    memberships: Vec<Membership>,
}

impl Tables {
    fn insert_user(&mut self, data: NewUser) -> StoreResult<User> {
        if self.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_hash: data.password_hash,
            phone: data.phone,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn insert_organisation(&mut self, data: NewOrganisation) -> Organisation {
        let organisation = Organisation {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
        };
        self.organisations
            .insert(organisation.id, organisation.clone());
        organisation
    }

    fn insert_membership(&mut self, user_id: Uuid, org_id: Uuid) -> StoreResult<Membership> {
        if !self.users.contains_key(&user_id) || !self.organisations.contains_key(&org_id) {
            return Err(StoreError::MissingReference);
        }

        let membership = Membership {
            id: Uuid::new_v4(),
            user_id,
            organisation_id: org_id,
            created_at: Utc::now(),
        };
        self.memberships.push(membership.clone());
        Ok(membership)
    }
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored organisations
    pub async fn organisation_count(&self) -> usize {
        self.tables.read().await.organisations.len()
    }

    /// Number of membership rows for the pair
    pub async fn membership_count(&self, user_id: Uuid, org_id: Uuid) -> usize {
        self.tables
            .read()
            .await
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id && m.organisation_id == org_id)
            .count()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        self.tables.write().await.insert_user(user)
    }

    async fn find_organisation(&self, id: Uuid) -> StoreResult<Option<Organisation>> {
        Ok(self.tables.read().await.organisations.get(&id).cloned())
    }

    async fn organisations_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Organisation>> {
        let tables = self.tables.read().await;
        let mut seen = HashSet::new();
        let organisations = tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id && seen.insert(m.organisation_id))
            .filter_map(|m| tables.organisations.get(&m.organisation_id).cloned())
            .collect();
        Ok(organisations)
    }

    async fn insert_membership(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<Membership> {
        self.tables.write().await.insert_membership(user_id, org_id)
    }

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .any(|m| m.user_id == user_id && m.organisation_id == org_id))
    }

    async fn register_account(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> StoreResult<Account> {
        let mut tables = self.tables.write().await;

        // The only failure point comes first, so nothing needs undoing.
        let user = tables.insert_user(user)?;
        let organisation = tables.insert_organisation(organisation);
        let membership = tables.insert_membership(user.id, organisation.id)?;

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
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference);
        }

        let organisation = tables.insert_organisation(organisation);
        let membership = tables.insert_membership(user_id, organisation.id)?;

        Ok((organisation, membership))
    }
}
