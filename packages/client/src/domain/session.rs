//! Local session state: bearer token and the signed-in user.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::User;

/// Bearer token issued by the backend
///
/// Tokens are usually JWTs; when the payload carries an `exp` claim the
/// client can tell an expired token apart without a round trip. Opaque tokens
/// are treated as never expiring locally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

#[derive(Deserialize)]
struct ExpClaim {
    exp: Option<i64>,
}

/// Drop a leading `Bearer` scheme (any case) followed by whitespace or nothing
fn strip_bearer(token: &str) -> &str {
    const SCHEME: &str = "bearer";
    match token.get(..SCHEME.len()) {
        Some(head) if head.eq_ignore_ascii_case(SCHEME) => {
            let rest = &token[SCHEME.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                token
            }
        }
        _ => token,
    }
}

impl AccessToken {
    /// Wrap a token, returning `None` for blank input
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token = strip_bearer(token.trim()).trim();
        (!token.is_empty()).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expiry from the JWT `exp` claim, if the token is a readable JWT
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let mut parts = self.0.split('.');
        let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claim: ExpClaim = serde_json::from_slice(&bytes).ok()?;
        DateTime::from_timestamp(claim.exp?, 0)
    }

    /// Whether the token is known to be expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Token plus the user object returned at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: AccessToken,
    pub user: Option<User>,
}

/// Why the user has to sign in again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginReason {
    /// No token stored
    Missing,
    /// Stored token has passed its expiry
    Expired,
    /// The API answered 401
    Rejected,
}

impl fmt::Display for LoginReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Missing => "you are not signed in",
            Self::Expired => "your session has expired",
            Self::Rejected => "the server rejected your session",
        };
        f.write_str(s)
    }
}
