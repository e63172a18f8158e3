/// JWT token generation and validation module
///
/// Bearer tokens assert a user's identity for one hour without re-sending a
/// password. Tokens are signed with HS256 and carry the user id in a
/// `userId` claim.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 1 hour from issuance, no refresh tokens
/// - **Validation**: Signature, issuer and expiration with zero leeway
/// - **Secret Management**: Secrets must be at least 32 bytes (256 bits)
///
/// Verification trusts the embedded user id as-is; it does not look the user
/// up again.
///
/// # Example
///
/// ```
/// use orgauth_shared::auth::jwt::{issue_token, verify_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let user_id = Uuid::new_v4();
///
/// let token = issue_token(user_id, secret)?;
/// assert_eq!(verify_token(&token, secret)?, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on every token
pub const ISSUER: &str = "orgauth";

/// Access token lifetime in seconds
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Minimum accepted signing secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {}", ISSUER)]
    InvalidIssuer,
}

/// JWT claims structure
///
/// # Claims
///
/// - `userId`: Subject user ID
/// - `iss`: Issuer (always "orgauth")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User ID the token was issued to
    pub user_id: Uuid,

    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring [`ACCESS_TOKEN_TTL_SECS`] from now
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Duration::seconds(ACCESS_TOKEN_TTL_SECS))
    }

    /// Creates claims with custom expiration
    ///
    /// A negative duration yields already-expired claims, which is only
    /// useful in tests.
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the token has expired (`exp <= now`)
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Signs claims into a compact JWT
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a one-hour access token for `user_id`
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::new(user_id), secret)
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Issuer is "orgauth"
/// - Token is not expired, with no clock leeway (`exp <= now` fails)
///
/// # Errors
///
/// - `JwtError::Expired` for expired tokens
/// - `JwtError::InvalidIssuer` for foreign issuers
/// - `JwtError::ValidationError` for bad signatures or malformed tokens
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss"]);
    validation.leeway = 0;
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    // The library only rejects `exp < now`.
    if token_data.claims.is_expired() {
        return Err(JwtError::Expired);
    }

    Ok(token_data.claims)
}

/// Validates a token and returns the embedded user id
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, JwtError> {
    validate_token(token, secret).map(|claims| claims.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.iss, "orgauth");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_wire_names() {
        let claims = Claims::new(Uuid::new_v4());
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
        assert!(json.get("exp").is_some());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET).expect("Should create token");

        assert_eq!(verify_token(&token, SECRET).unwrap(), user_id);

        let claims = validate_token(&token, SECRET).unwrap();
        let time_left = claims.exp - Utc::now().timestamp();
        assert!(time_left > 3500);
        assert!(time_left <= 3600);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-at-least-32-bytes");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_expiring_now_is_rejected() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::zero());
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let mut claims = Claims::new(Uuid::new_v4());
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, SECRET),
            Err(JwtError::InvalidIssuer)
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(verify_token("not.a.jwt", SECRET).is_err());
        assert!(verify_token("", SECRET).is_err());
    }
}
