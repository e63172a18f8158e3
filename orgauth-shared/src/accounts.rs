/// Registration and login workflows
///
/// Registration creates a user, a default organisation and the membership
/// linking them in one atomic store call, then issues a bearer token. Login
/// checks a password and issues a token. Neither workflow echoes the
/// password or its hash back.
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::accounts::{login, register, LoginInput, RegistrationInput};
/// use orgauth_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let session = register(&store, secret, RegistrationInput {
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
///     email: "john.doe@example.com".to_string(),
///     password: "password123".to_string(),
///     phone: "1234567890".to_string(),
/// })
/// .await?;
///
/// let again = login(&store, secret, LoginInput {
///     email: "john.doe@example.com".to_string(),
///     password: "password123".to_string(),
/// })
/// .await?;
/// assert_eq!(session.user.user_id, again.user.user_id);
/// # Ok(())
/// # }
/// ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::{issue_token, JwtError};
use crate::auth::password::{
    hash_password_blocking, verify_dummy_password, verify_password_blocking, PasswordError,
};
use crate::models::{NewOrganisation, NewUser, UserProfile};
use crate::store::{Store, StoreError};
use crate::validation::{check, not_blank, FieldError};

/// Field order used when reporting registration errors
const REGISTRATION_FIELDS: &[&str] = &["firstName", "lastName", "email", "password", "phone"];

/// Error type for account workflows
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// One or more fields failed validation
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Email is already registered
    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are not distinguished
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AccountError::DuplicateEmail,
            other => AccountError::Store(other),
        }
    }
}

/// Registration request body
///
/// Missing fields deserialize as empty strings so they are reported as
/// field errors instead of failing JSON parsing.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationInput {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank"))]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "not_blank"))]
    pub phone: String,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("phone", &self.phone)
            .finish()
    }
}

/// Login request body
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Token plus public profile, returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}

/// Registers a user with a default organisation and returns a session
///
/// Order of checks:
/// 1. duplicate email (no write)
/// 2. field validation, every violation reported (no write)
/// 3. password hashing
/// 4. user, organisation and membership inserted atomically
/// 5. token issued
///
/// # Errors
///
/// - `DuplicateEmail` if the email is taken, including when a concurrent
///   registration wins the race between steps 1 and 4
/// - `Validation` with all failing fields
pub async fn register(
    store: &dyn Store,
    secret: &str,
    input: RegistrationInput,
) -> Result<Session, AccountError> {
    if store.find_user_by_email(&input.email).await?.is_some() {
        debug!("Registration rejected: email already exists");
        return Err(AccountError::DuplicateEmail);
    }

    check(&input, REGISTRATION_FIELDS).map_err(AccountError::Validation)?;

    let password_hash = hash_password_blocking(input.password).await?;

    let default_org = NewOrganisation::default_for(&input.first_name);
    let account = store
        .register_account(
            NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                phone: input.phone,
            },
            default_org,
        )
        .await?;

    let access_token = issue_token(account.user.id, secret)?;

    info!(
        user_id = %account.user.id,
        org_id = %account.organisation.id,
        "User registered"
    );

    Ok(Session {
        access_token,
        user: UserProfile::from(&account.user),
    })
}

/// Checks credentials and returns a fresh session
///
/// An unknown email still costs one password verification, so timing does
/// not reveal whether the email is registered.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for an unknown email or a wrong password
pub async fn login(
    store: &dyn Store,
    secret: &str,
    input: LoginInput,
) -> Result<Session, AccountError> {
    let Some(user) = store.find_user_by_email(&input.email).await? else {
        verify_dummy_password(input.password).await?;
        debug!("Login failed: unknown email");
        return Err(AccountError::AuthenticationFailed);
    };

    if !verify_password_blocking(input.password, user.password_hash.clone()).await? {
        debug!(user_id = %user.id, "Login failed: wrong password");
        return Err(AccountError::AuthenticationFailed);
    }

    let access_token = issue_token(user.id, secret)?;

    info!(user_id = %user.id, "User logged in");

    Ok(Session {
        access_token,
        user: UserProfile::from(&user),
    })
}

/// Public profile of any user
pub async fn user_profile(store: &dyn Store, user_id: Uuid) -> Result<UserProfile, AccountError> {
    store
        .find_user_by_id(user_id)
        .await?
        .map(|user| UserProfile::from(&user))
        .ok_or(AccountError::UserNotFound)
}
