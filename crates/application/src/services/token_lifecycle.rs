//! OAuth2 token lifecycle management
//!
//! Guarantees that every credentialed provider call runs with a non-expired
//! credential set: load from the store, refresh on expiry (under the retry
//! executor), persist the refreshed set, then hand it to the caller's
//! operation.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use domain::CredentialSet;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::ports::{CredentialRefreshPort, CredentialStorePort};
use crate::retry::{RetryConfig, retry};

/// Ensures a valid credential is available before each external call
///
/// The store is process-wide shared state; concurrent callers that both
/// observe an expired token are serialized behind an in-flight-refresh
/// guard, so at most one refresh runs at a time and later callers reuse the
/// freshly persisted set instead of spending a second refresh grant.
pub struct TokenLifecycleManager {
    store: Arc<dyn CredentialStorePort>,
    refresher: Arc<dyn CredentialRefreshPort>,
    retry: RetryConfig,
    refresh_guard: Mutex<()>,
}

impl std::fmt::Debug for TokenLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycleManager")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl TokenLifecycleManager {
    /// Create a manager with the default refresh retry policy (3 attempts,
    /// 1000 ms base delay)
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStorePort>,
        refresher: Arc<dyn CredentialRefreshPort>,
    ) -> Self {
        Self {
            store,
            refresher,
            retry: RetryConfig::default(),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Override the retry policy applied to the refresh exchange
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Run `operation` with a guaranteed-valid credential set
    ///
    /// Fails with [`GatewayError::AuthorizationRequired`] when no credential
    /// was ever persisted, or when an expired set cannot be refreshed after
    /// retries; the caller must route the end user through the external
    /// authorization flow rather than surface a generic failure. The result
    /// of `operation` passes through unchanged; a provider 401 arrives here
    /// as `AuthorizationRequired` already (adapters classify by status
    /// code), covering tokens invalidated server-side despite a locally
    /// fresh expiry.
    pub async fn with_valid_credential<F, Fut, T>(&self, operation: F) -> Result<T, GatewayError>
    where
        F: FnOnce(CredentialSet) -> Fut + Send,
        Fut: Future<Output = Result<T, GatewayError>> + Send,
    {
        let credentials = self.valid_credentials().await?;
        operation(credentials).await
    }

    /// Load the current set, refreshing and persisting it first if expired
    async fn valid_credentials(&self) -> Result<CredentialSet, GatewayError> {
        // Serializes the load-check-refresh-persist sequence; not held while
        // the caller's operation runs.
        let _guard = self.refresh_guard.lock().await;

        let Some(current) = self.store.load().await? else {
            warn!("No credential persisted, authorization required");
            return Err(GatewayError::AuthorizationRequired);
        };

        if !current.is_expired(Utc::now()) {
            return Ok(current);
        }

        debug!(
            expiry_epoch_millis = current.expiry_epoch_millis(),
            "Access token expired, refreshing"
        );

        let refreshed = retry(&self.retry, || self.refresher.refresh(&current))
            .await
            .map_err(|e| {
                warn!(error = %e, "Credential refresh failed, re-authorization required");
                GatewayError::AuthorizationRequired
            })?;

        self.store.save(&refreshed).await?;
        info!("Credential refreshed and persisted");

        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockCredentialRefreshPort, MockCredentialStorePort};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fresh_set() -> CredentialSet {
        CredentialSet::new("fresh-access", "refresh-1", Utc::now() + Duration::hours(1))
    }

    fn expired_set() -> CredentialSet {
        CredentialSet::new("stale-access", "refresh-1", Utc::now() - Duration::hours(1))
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 10,
        }
    }

    fn manager(
        store: MockCredentialStorePort,
        refresher: MockCredentialRefreshPort,
    ) -> TokenLifecycleManager {
        TokenLifecycleManager::new(Arc::new(store), Arc::new(refresher))
            .with_retry_config(fast_retry())
    }

    #[tokio::test]
    async fn missing_credential_requires_authorization() {
        let mut store = MockCredentialStorePort::new();
        store.expect_load().times(1).returning(|| Ok(None));
        let refresher = MockCredentialRefreshPort::new();

        let result = manager(store, refresher)
            .with_valid_credential(|_| async { Ok(()) })
            .await;

        assert!(matches!(result, Err(GatewayError::AuthorizationRequired)));
    }

    #[tokio::test]
    async fn fresh_credential_skips_refresh() {
        let mut store = MockCredentialStorePort::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(fresh_set())));
        store.expect_save().times(0);
        let refresher = MockCredentialRefreshPort::new();

        let token = manager(store, refresher)
            .with_valid_credential(|creds| async move { Ok(creds.access_token().to_string()) })
            .await
            .expect("operation runs");

        assert_eq!(token, "fresh-access");
    }

    #[tokio::test]
    async fn expired_credential_triggers_one_refresh_and_persist() {
        let mut store = MockCredentialStorePort::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(expired_set())));
        store
            .expect_save()
            .times(1)
            .withf(|set| set.access_token() == "fresh-access")
            .returning(|_| Ok(()));

        let mut refresher = MockCredentialRefreshPort::new();
        refresher
            .expect_refresh()
            .times(1)
            .withf(|current| current.refresh_token() == "refresh-1")
            .returning(|_| Ok(fresh_set()));

        let token = manager(store, refresher)
            .with_valid_credential(|creds| async move { Ok(creds.access_token().to_string()) })
            .await
            .expect("operation runs with refreshed set");

        assert_eq!(token, "fresh-access");
    }

    #[tokio::test]
    async fn transient_refresh_failures_are_retried_then_mapped() {
        let mut store = MockCredentialStorePort::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(expired_set())));
        store.expect_save().times(0);

        let mut refresher = MockCredentialRefreshPort::new();
        refresher
            .expect_refresh()
            .times(3)
            .returning(|_| Err(GatewayError::TransientNetwork("connection reset".into())));

        let result = manager(store, refresher)
            .with_valid_credential(|_| async { Ok(()) })
            .await;

        assert!(matches!(result, Err(GatewayError::AuthorizationRequired)));
    }

    #[tokio::test]
    async fn non_retryable_refresh_failure_maps_without_retries() {
        let mut store = MockCredentialStorePort::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(expired_set())));

        let mut refresher = MockCredentialRefreshPort::new();
        refresher.expect_refresh().times(1).returning(|_| {
            Err(GatewayError::Upstream {
                status: 400,
                body: "invalid_grant".into(),
            })
        });

        let result = manager(store, refresher)
            .with_valid_credential(|_| async { Ok(()) })
            .await;

        assert!(matches!(result, Err(GatewayError::AuthorizationRequired)));
    }

    #[tokio::test]
    async fn operation_failure_passes_through_unchanged() {
        let mut store = MockCredentialStorePort::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(fresh_set())));
        let refresher = MockCredentialRefreshPort::new();

        let result: Result<(), _> = manager(store, refresher)
            .with_valid_credential(|_| async {
                Err(GatewayError::Upstream {
                    status: 500,
                    body: "boom".into(),
                })
            })
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::Upstream { status: 500, .. })
        ));
    }

    /// Stateful store fake: starts expired, observes saves
    #[derive(Debug)]
    struct SharedStore {
        current: Mutex<Option<CredentialSet>>,
    }

    #[async_trait]
    impl CredentialStorePort for SharedStore {
        async fn load(&self) -> Result<Option<CredentialSet>, GatewayError> {
            Ok(self.current.lock().await.clone())
        }

        async fn save(&self, credentials: &CredentialSet) -> Result<(), GatewayError> {
            *self.current.lock().await = Some(credentials.clone());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct CountingRefresher {
        calls: AtomicU32,
    }

    #[async_trait]
    impl CredentialRefreshPort for CountingRefresher {
        async fn refresh(&self, _current: &CredentialSet) -> Result<CredentialSet, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(fresh_set())
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_a_single_refresh() {
        let store = Arc::new(SharedStore {
            current: Mutex::new(Some(expired_set())),
        });
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicU32::new(0),
        });
        let store_port: Arc<dyn CredentialStorePort> = Arc::clone(&store) as _;
        let refresher_port: Arc<dyn CredentialRefreshPort> = Arc::clone(&refresher) as _;
        let manager = Arc::new(
            TokenLifecycleManager::new(store_port, refresher_port)
                .with_retry_config(fast_retry()),
        );

        let a = Arc::clone(&manager);
        let b = Arc::clone(&manager);
        let (ra, rb) = tokio::join!(
            a.with_valid_credential(|creds| async move { Ok(creds.access_token().to_string()) }),
            b.with_valid_credential(|creds| async move { Ok(creds.access_token().to_string()) }),
        );

        assert_eq!(ra.expect("first caller"), "fresh-access");
        assert_eq!(rb.expect("second caller"), "fresh-access");
        // The guard serializes the sequence; the second caller reloads the
        // persisted fresh set instead of spending another refresh grant.
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }
}
