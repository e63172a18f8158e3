/// Organisation model and database operations
///
/// Organisations are the tenancy boundary. They carry no owner column:
/// whoever holds a membership row for an organisation can see it, nobody
/// else can.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organisations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Organisation record
///
/// Serializes to the wire shape `{ orgId, name, description }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organisation {
    /// Unique organisation ID
    #[serde(rename = "orgId")]
    pub id: Uuid,

    /// Display name (never blank)
    pub name: String,

    /// Free-text description
    pub description: Option<String>,
}

/// Input for creating an organisation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganisation {
    pub name: String,
    pub description: Option<String>,
}

impl NewOrganisation {
    /// The organisation every user receives at registration
    ///
    /// Named `"{first_name}'s Organization"`.
    pub fn default_for(first_name: &str) -> Self {
        Self {
            name: format!("{}'s Organization", first_name),
            description: Some(format!("{}'s default organisation", first_name)),
        }
    }
}

impl Organisation {
    /// Inserts a new organisation
    pub async fn create<'e, E>(executor: E, data: NewOrganisation) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let organisation = sqlx::query_as::<_, Organisation>(
            r#"
            INSERT INTO organisations (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .fetch_one(executor)
        .await?;

        Ok(organisation)
    }

    /// Finds an organisation by ID, without any membership check
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let organisation = sqlx::query_as::<_, Organisation>(
            r#"
            SELECT id, name, description
            FROM organisations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(organisation)
    }

    /// Lists every organisation the user holds a membership in
    ///
    /// Each organisation appears once even if the membership was added
    /// twice, positioned by the earliest of those memberships.
    pub async fn list_for_user<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let organisations = sqlx::query_as::<_, Organisation>(
            r#"
            SELECT o.id, o.name, o.description
            FROM organisations o
            JOIN (
                SELECT organisation_id, MIN(created_at) AS first_joined
                FROM memberships
                WHERE user_id = $1
                GROUP BY organisation_id
            ) m ON m.organisation_id = o.id
            ORDER BY m.first_joined ASC, o.id
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(organisations)
    }
}
