//! Identity tokens
//!
//! Claims carried by access and refresh tokens. The kind of a token is not
//! written into the claims; it is implied by the secret it was signed with.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::user_id::UserId;

/// Which secret and lifetime a token uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    /// Random per issuance, so two tokens minted in the same second differ
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn subject(&self) -> UserId {
        UserId::from_raw(self.user_id)
    }

    /// Time left before `exp`, `None` once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let secs = self.exp.checked_sub(now.timestamp())?;
        if secs <= 0 {
            return None;
        }
        u64::try_from(secs).ok().map(Duration::from_secs)
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("token signing failed")]
    Signing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims(exp: i64) -> Claims {
        Claims {
            user_id: 1,
            jti: "jti".to_string(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_remaining_before_expiry() {
        let now = Utc.timestamp_opt(1_000, 0).unwrap();
        assert_eq!(claims(1_900).remaining(now), Some(Duration::from_secs(900)));
    }

    #[test]
    fn test_remaining_at_and_after_expiry() {
        let now = Utc.timestamp_opt(1_000, 0).unwrap();
        assert_eq!(claims(1_000).remaining(now), None);
        assert_eq!(claims(10).remaining(now), None);
    }
}
