/// Database models
///
/// Plain data types plus the SQL that reads and writes them. Every query
/// function is generic over [`sqlx::PgExecutor`], so the same call runs
/// against a pool or inside a transaction.
///
/// # Models
///
/// - `user`: credential records
/// - `organisation`: tenancy boundaries
/// - `membership`: user-organisation links

pub mod membership;
pub mod organisation;
pub mod user;

pub use membership::Membership;
pub use organisation::{NewOrganisation, Organisation};
pub use user::{NewUser, User, UserProfile};
