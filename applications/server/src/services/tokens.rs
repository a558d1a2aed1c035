/// Token service - bearer token issuance and verification
use crate::error::{Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use fave_core::{Identity, User, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted token lifetime, one year
pub const MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Issues and verifies HS256 bearer tokens
///
/// Tokens carry the caller's identity, so verification never touches the
/// store. The signing secret is fixed at construction.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub username: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl TokenService {
    /// Lifetimes above `MAX_TOKEN_TTL_MINUTES` are clamped to it
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(secret: &str, token_ttl_minutes: u64) -> Self {
        let minutes = token_ttl_minutes.min(MAX_TOKEN_TTL_MINUTES);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::minutes(minutes as i64),
        }
    }

    /// How long an issued token stays valid
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Issue a token for `user`, valid from now
    pub fn issue_token(&self, user: &User) -> Result<String> {
        self.issue_token_at(user, Utc::now())
    }

    /// Issue a token for `user` as if the current time were `now`
    pub fn issue_token_at(&self, user: &User, now: DateTime<Utc>) -> Result<String> {
        let exp = now + self.token_ttl;
        // Round up so the token lives for at least the full ttl
        let exp_secs = exp.timestamp() + i64::from(exp.timestamp_subsec_nanos() > 0);

        let claims = Claims {
            sub: user.id.as_str().to_string(),
            username: user.username.clone(),
            exp: exp_secs,
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and return the identity it carries
    pub fn resolve_identity(&self, token: &str) -> Result<Identity> {
        self.resolve_identity_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// A token is valid strictly before its `exp` instant.
    pub fn resolve_identity_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity> {
        let claims = self.verify_token(token)?;

        if now.timestamp() >= claims.exp {
            return Err(ServerError::InvalidToken("Token expired".to_string()));
        }

        Ok(Identity {
            id: UserId::new(claims.sub),
            username: claims.username,
        })
    }

    /// Check signature and structure; expiry is checked by the caller
    fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            ServerError::InvalidToken("Invalid token".to_string())
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new("secret", 60)
    }

    #[test]
    fn test_token_creation_and_verification() {
        let tokens = service();
        let user = User::new("alice");

        let token = tokens.issue_token(&user).unwrap();
        let identity = tokens.resolve_identity(&token).unwrap();
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn test_expiry_is_one_ttl_after_issue() {
        let tokens = service();
        let user = User::new("alice");
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let token = tokens.issue_token_at(&user, issued).unwrap();

        let just_before = issued + Duration::minutes(60) - Duration::seconds(1);
        assert!(tokens.resolve_identity_at(&token, just_before).is_ok());

        let at_expiry = issued + Duration::minutes(60);
        assert!(matches!(
            tokens.resolve_identity_at(&token, at_expiry),
            Err(ServerError::InvalidToken(_))
        ));

        let long_after = issued + Duration::days(2);
        assert!(tokens.resolve_identity_at(&token, long_after).is_err());
    }

    #[test]
    fn test_sub_second_issue_keeps_full_ttl() {
        let tokens = service();
        let user = User::new("alice");
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::milliseconds(900);

        let token = tokens.issue_token_at(&user, issued).unwrap();

        let one_hour_on = Utc.with_ymd_and_hms(2025, 1, 1, 13, 0, 0).unwrap();
        assert!(tokens.resolve_identity_at(&token, one_hour_on).is_ok());
        assert!(tokens
            .resolve_identity_at(&token, one_hour_on + Duration::milliseconds(500))
            .is_ok());
        assert!(tokens
            .resolve_identity_at(&token, one_hour_on + Duration::seconds(1))
            .is_err());
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let tokens = TokenService::new("secret", u64::MAX);
        assert_eq!(tokens.token_ttl(), Duration::minutes(60 * 24 * 365));

        let token = tokens.issue_token(&User::new("alice")).unwrap();
        assert!(tokens.resolve_identity(&token).is_ok());
    }

    #[test]
    fn test_token_issued_in_the_past_is_expired_now() {
        let tokens = service();
        let user = User::new("alice");

        let token = tokens
            .issue_token_at(&user, Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(tokens.resolve_identity(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = User::new("alice");
        let token = TokenService::new("other-secret", 60).issue_token(&user).unwrap();

        assert!(matches!(
            service().resolve_identity(&token),
            Err(ServerError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = service();
        assert!(tokens.resolve_identity("not.a.valid.jwt.token").is_err());
        assert!(tokens.resolve_identity("").is_err());
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let tokens = service();
        let token = tokens.issue_token(&User::new("alice")).unwrap();

        // Swap the payload for one claiming a different user
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = tokens.issue_token(&User::new("mallory")).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");

        assert!(tokens.resolve_identity(&tampered).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let printed = format!("{:?}", TokenService::new("hunter2", 60));
        assert!(!printed.contains("hunter2"));
    }
}
