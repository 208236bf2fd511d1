//! Gateway error taxonomy

use domain::DomainError;
use thiserror::Error;

use crate::retry::Retryable;

/// Errors surfaced by the external integration gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No usable credential: none persisted, refresh exhausted, or the
    /// provider rejected a token the gateway believed was fresh. The caller
    /// must re-run the external authorization handshake, never retry blindly.
    #[error("Authorization required")]
    AuthorizationRequired,

    /// Provider reachable but answered outside 2xx (and outside the
    /// 401-to-reauthorize mapping of the credentialed path)
    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Connection-level failure; absorbed by the retry executor and only
    /// surfaced once the policy is exhausted
    #[error("Transient network error: {0}")]
    TransientNetwork(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientNetwork(_))
    }
}

impl Retryable for GatewayError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}
