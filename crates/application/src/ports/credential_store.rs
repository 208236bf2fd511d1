//! Credential persistence and refresh ports
//!
//! The gateway holds exactly one refreshable OAuth2 credential set per
//! deployment. The store abstracts the persistence medium (file, table,
//! key-value record); the refresh port is the provider's OAuth refresh
//! primitive.

use async_trait::async_trait;
use domain::CredentialSet;
#[cfg(test)]
use mockall::automock;

use crate::error::GatewayError;

/// Port for durable credential persistence
///
/// Implementations must be durable across process restarts, and `save` must
/// be atomic from a concurrent reader's perspective: `load` observes either
/// the previous or the new set in full, never a partial write.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    /// Load the persisted credential set
    ///
    /// Returns `None` when no credential has ever been persisted. Callers
    /// must treat that as "authorization required", not a transient error.
    async fn load(&self) -> Result<Option<CredentialSet>, GatewayError>;

    /// Atomically replace the persisted credential set
    async fn save(&self, credentials: &CredentialSet) -> Result<(), GatewayError>;
}

/// Port for the provider's OAuth2 refresh-token exchange
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRefreshPort: Send + Sync {
    /// Exchange the refresh token of `current` for a fresh credential set
    ///
    /// Implementations carry the previous refresh token forward when the
    /// provider's grant response omits one.
    async fn refresh(&self, current: &CredentialSet) -> Result<CredentialSet, GatewayError>;
}
