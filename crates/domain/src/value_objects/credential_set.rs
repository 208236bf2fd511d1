//! OAuth2 credential set value object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A refreshable OAuth2 token set for the photo-library provider.
///
/// One set exists per deployment, not per end user. Serialized in the
/// provider's camelCase wire form:
/// `{"accessToken": ..., "refreshToken": ..., "expiryEpochMillis": ...}`.
///
/// A set whose expiry lies in the past is stale and must never authorize a
/// call; the token lifecycle manager is the only writer and guarantees that
/// every persisted set carries a future expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSet {
    access_token: String,
    refresh_token: String,
    expiry_epoch_millis: i64,
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("expiry_epoch_millis", &self.expiry_epoch_millis)
            .finish()
    }
}

impl CredentialSet {
    /// Create a credential set expiring at the given instant
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expiry_epoch_millis: expires_at.timestamp_millis(),
        }
    }

    /// Create a credential set from a raw epoch-milliseconds expiry
    pub fn with_expiry_millis(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expiry_epoch_millis: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expiry_epoch_millis,
        }
    }

    /// The bearer token presented to the provider
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The long-lived token exchanged for a fresh access token
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Expiry of the access token as epoch milliseconds
    #[must_use]
    pub const fn expiry_epoch_millis(&self) -> i64 {
        self.expiry_epoch_millis
    }

    /// Whether the access token is stale at `now`
    ///
    /// Stale means `now >= expiry`; a stale set must be refreshed before use.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expiry_epoch_millis
    }
}
