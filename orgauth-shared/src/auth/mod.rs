/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token issuance and verification
/// - [`middleware`]: Axum middleware that turns a bearer token into an [`middleware::AuthContext`]
/// - [`authorization`]: Organisation membership checks
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::auth::password::{hash_password, verify_password};
/// use orgauth_shared::auth::jwt::{issue_token, verify_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let user_id = Uuid::new_v4();
/// let token = issue_token(user_id, secret)?;
/// assert_eq!(verify_token(&token, secret)?, user_id);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
