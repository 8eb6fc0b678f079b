// JWT token creation and verification
// Tokens assert identity only: subject, issue time and expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime in hours
pub const DEFAULT_EXPIRY_HOURS: i64 = 8;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user id)
/// * `iat` - Issued-at time (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: usize,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The shared HMAC secret
/// * `expiry_hours` - Token lifetime
///
/// # Returns
/// * `Ok(String)` - The JWT token
/// * `Err(String)` - If the lifetime is out of range or encoding fails
///
/// # Token Properties
/// - Signed with HS256
/// - Contains user_id in 'sub' claim, never the credential
///
/// # Example
/// ```
/// use keepnote_api::auth::jwt::create_token;
///
/// let token = create_token("alice", "your-secret-key", 8).expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: &str, secret: &str, expiry_hours: i64) -> Result<String, String> {
    let now = Utc::now();
    let expires_at = Duration::try_hours(expiry_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| format!("Token lifetime out of range: {} hours", expiry_hours))?;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a JWT token
///
/// # Returns
/// * `Ok(Claims)` - The decoded claims if token is valid
/// * `Err(String)` - If token is malformed, badly signed or expired
///
/// # Example
/// ```
/// use keepnote_api::auth::jwt::{create_token, verify_token};
///
/// let token = create_token("alice", "your-secret-key", 8).unwrap();
/// let claims = verify_token(&token, "your-secret-key").expect("valid token");
/// assert_eq!(claims.sub, "alice");
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn huge_lifetime_is_an_error() {
        assert!(create_token("alice", TEST_SECRET, 3_000_000_000_000_000).is_err());
        assert!(create_token("alice", TEST_SECRET, i64::MAX).is_err());
        assert!(create_token("alice", TEST_SECRET, MAX_EXPIRY_HOURS).is_ok());
    }

    #[test]
    fn create_and_verify_token() {
        let token = create_token("alice", TEST_SECRET, DEFAULT_EXPIRY_HOURS).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token("alice", TEST_SECRET, DEFAULT_EXPIRY_HOURS).expect("valid token");

        let result = verify_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_token_fails() {
        let result = verify_token("invalid.token.string", TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn expired_token_fails() {
        // well past the default 60 second leeway
        let token = create_token("alice", TEST_SECRET, -2).expect("valid token");
        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn claims_carry_no_credential() {
        let token = create_token("alice", TEST_SECRET, DEFAULT_EXPIRY_HOURS).expect("valid token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(&[]), &validation)
            .expect("decodable payload")
            .claims;

        let object = raw.as_object().expect("claims object");
        assert_eq!(object.len(), 3);
        assert!(object.get("password").is_none());
    }

    #[test]
    fn token_expiry_set() {
        let token = create_token("alice", TEST_SECRET, DEFAULT_EXPIRY_HOURS).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_8_hours = (Utc::now() + Duration::hours(DEFAULT_EXPIRY_HOURS)).timestamp();

        assert!(expiry_time > now);
        assert!(expiry_time <= in_8_hours + 10); // 10 second buffer
        assert!(claims.iat as i64 <= now);
    }
}
