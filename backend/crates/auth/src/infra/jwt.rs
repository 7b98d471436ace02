//! JWT token codec (HS256)
//!
//! Access and refresh tokens are signed with separate secrets, so a token of
//! one kind never verifies as the other. Expiry is checked against the `now`
//! passed in by the caller with zero leeway.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::token::{Claims, TokenError, TokenKind, TokenPair};
use crate::domain::value_object::user_id::UserId;

#[derive(Clone)]
struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl KindKeys {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

/// Issues and verifies access/refresh tokens
#[derive(Clone)]
pub struct TokenCodec {
    access: KindKeys,
    refresh: KindKeys,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is compared against the caller's clock in `decode`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            access: KindKeys::new(&config.access_secret, config.access_ttl),
            refresh: KindKeys::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KindKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.keys(kind).ttl
    }

    /// Sign a token of `kind` for `user_id`, expiring `ttl(kind)` after `now`
    pub fn issue(
        &self,
        kind: TokenKind,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let keys = self.keys(kind);
        let iat = now.timestamp();
        let ttl = i64::try_from(keys.ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            user_id: user_id.get(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            tracing::error!(error = %e, kind = kind.as_str(), "Token signing failed");
            TokenError::Signing
        })
    }

    pub fn issue_pair(&self, user_id: UserId, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, user_id, now)?,
            refresh_token: self.issue(TokenKind::Refresh, user_id, now)?,
        })
    }

    /// Check signature and expiry, returning the full claims
    pub fn decode(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            },
        )?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Check signature and expiry, returning the subject
    pub fn verify(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId, TokenError> {
        self.decode(kind, token, now).map(|claims| claims.subject())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::with_random_secrets())
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = codec();
        let now = Utc::now();
        let user_id = UserId::from_raw(17);

        for kind in [TokenKind::Access, TokenKind::Refresh] {
            let token = codec.issue(kind, user_id, now).unwrap();
            assert_eq!(codec.verify(kind, &token, now), Ok(user_id));
        }
    }

    #[test]
    fn test_claims_carry_lifetime() {
        let codec = codec();
        let now = Utc::now();
        let token = codec
            .issue(TokenKind::Access, UserId::from_raw(1), now)
            .unwrap();
        let claims = codec.decode(TokenKind::Access, &token, now).unwrap();
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_kinds_do_not_cross_verify() {
        let codec = codec();
        let now = Utc::now();
        let refresh = codec
            .issue(TokenKind::Refresh, UserId::from_raw(1), now)
            .unwrap();
        assert_eq!(
            codec.verify(TokenKind::Access, &refresh, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_at_exact_expiry() {
        let codec = codec();
        let now = Utc::now();
        let token = codec
            .issue(TokenKind::Access, UserId::from_raw(1), now)
            .unwrap();

        let just_before = now + TimeDelta::seconds(899);
        assert!(codec.verify(TokenKind::Access, &token, just_before).is_ok());

        let at_expiry = now + TimeDelta::seconds(900);
        assert_eq!(
            codec.verify(TokenKind::Access, &token, at_expiry),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_malformed_token() {
        let codec = codec();
        assert_eq!(
            codec.verify(TokenKind::Access, "not-a-jwt", Utc::now()),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            codec.verify(TokenKind::Access, "", Utc::now()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let codec = codec();
        let now = Utc::now();
        let token = codec
            .issue(TokenKind::Access, UserId::from_raw(1), now)
            .unwrap();
        let other = TokenCodec::new(&AuthConfig::with_random_secrets());
        assert_eq!(
            other.verify(TokenKind::Access, &token, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_same_second_issuance_differs() {
        let codec = codec();
        let now = Utc::now();
        let a = codec.issue_pair(UserId::from_raw(5), now).unwrap();
        let b = codec.issue_pair(UserId::from_raw(5), now).unwrap();
        assert_ne!(a.access_token, b.access_token);
        assert_ne!(a.refresh_token, b.refresh_token);
    }
}
