//! Bearer-credential lifetime.
//!
//! The service hands out opaque tokens with no expiry information, so the
//! client records when each token was obtained and stops using it once
//! [`TOKEN_LIFETIME_HOURS`] have passed.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const TOKEN_LIFETIME_HOURS: i64 = 24;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub value: String,
    pub timestamp: i64,
}

impl TokenRecord {
    pub fn new(value: impl Into<String>, obtained_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            timestamp: obtained_at.timestamp_millis(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "value": self.value, "timestamp": self.timestamp }).to_string()
    }

    pub fn obtained_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

impl fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRecord")
            .field("value", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Validates cached credentials against an injected clock. Performs no I/O;
/// callers discard whatever it rejects.
#[derive(Clone)]
pub struct TokenGuard {
    clock: Arc<dyn Clock>,
    lifetime: Duration,
}

impl TokenGuard {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn issue(&self, token: impl Into<String>) -> TokenRecord {
        TokenRecord::new(token, self.clock.now())
    }

    /// A record is valid until its age reaches the lifetime. Records stamped
    /// in the future count as freshly issued.
    pub fn valid(&self, record: &TokenRecord) -> bool {
        let Some(obtained_at) = record.obtained_at() else {
            return false;
        };
        let age = self.clock.now() - obtained_at;
        age < self.lifetime && !record.value.is_empty()
    }

    pub fn valid_raw(&self, raw: &str) -> bool {
        TokenRecord::parse(raw).is_some_and(|record| self.valid(&record))
    }

    pub fn session(&self, raw: &str) -> Option<Session> {
        TokenRecord::parse(raw)
            .filter(|record| self.valid(record))
            .map(|record| Session::new(record.value))
    }
}

impl fmt::Debug for TokenGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGuard")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
