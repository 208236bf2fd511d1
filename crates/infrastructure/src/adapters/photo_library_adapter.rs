//! Photo-library adapter - Implements `PhotoLibraryPort` and
//! `CredentialRefreshPort` using `integration_photos`

use application::error::GatewayError;
use application::ports::{Album, CredentialRefreshPort, MediaItem, PhotoLibraryPort};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::CredentialSet;
use integration_photos::{
    Album as ProviderAlbum, MediaItem as ProviderItem, PhotosClient, PhotosConfig, PhotosError,
    TokenGrant,
};
use tracing::{debug, instrument};

/// Adapter for the photo-library provider
#[derive(Debug, Clone)]
pub struct PhotoLibraryAdapter {
    client: PhotosClient,
}

impl PhotoLibraryAdapter {
    /// Create an adapter over an existing client
    #[must_use]
    pub const fn new(client: PhotosClient) -> Self {
        Self { client }
    }

    /// Create an adapter from a client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: PhotosConfig) -> Result<Self, GatewayError> {
        let client =
            PhotosClient::new(config).map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map a provider error into the gateway taxonomy
    ///
    /// 401 means the credential is gone regardless of what the lifecycle
    /// manager believed; connection-level failures are the retryable class.
    fn map_error(err: PhotosError) -> GatewayError {
        match err {
            PhotosError::Unauthorized => GatewayError::AuthorizationRequired,
            PhotosError::RequestFailed { status, body } => GatewayError::Upstream { status, body },
            PhotosError::ConnectionFailed(e) => GatewayError::TransientNetwork(e),
            PhotosError::ParseError(e) => GatewayError::Internal(e),
        }
    }

    fn map_album(album: ProviderAlbum) -> Album {
        Album {
            item_count: album.item_count(),
            id: album.id,
            title: album.title.unwrap_or_default(),
            cover_url: album.cover_photo_base_url,
        }
    }

    fn map_item(item: ProviderItem) -> MediaItem {
        let dimensions = item
            .media_metadata
            .as_ref()
            .and_then(integration_photos::MediaMetadata::dimensions);
        MediaItem {
            id: item.id,
            base_url: item.base_url,
            mime_type: item.mime_type,
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
            created_at: item.media_metadata.and_then(|m| m.creation_time),
        }
    }

    /// Build the next credential set from a refresh grant
    ///
    /// The provider may omit the refresh token from the grant; the previous
    /// one stays valid and is carried forward.
    fn grant_into_credentials(
        grant: TokenGrant,
        current: &CredentialSet,
        now: DateTime<Utc>,
    ) -> CredentialSet {
        let refresh_token = grant
            .refresh_token
            .unwrap_or_else(|| current.refresh_token().to_string());
        CredentialSet::new(
            grant.access_token,
            refresh_token,
            now + Duration::seconds(grant.expires_in),
        )
    }
}

#[async_trait]
impl PhotoLibraryPort for PhotoLibraryAdapter {
    #[instrument(skip(self, credentials))]
    async fn list_albums(&self, credentials: &CredentialSet) -> Result<Vec<Album>, GatewayError> {
        let albums = self
            .client
            .list_albums(credentials.access_token())
            .await
            .map_err(Self::map_error)?;

        debug!(count = albums.len(), "Retrieved albums");
        Ok(albums.into_iter().map(Self::map_album).collect())
    }

    #[instrument(skip(self, credentials), fields(album_id = %album_id))]
    async fn search_media_items(
        &self,
        credentials: &CredentialSet,
        album_id: &str,
    ) -> Result<Vec<MediaItem>, GatewayError> {
        let items = self
            .client
            .search_media_items(credentials.access_token(), album_id)
            .await
            .map_err(Self::map_error)?;

        debug!(count = items.len(), "Retrieved media items");
        Ok(items.into_iter().map(Self::map_item).collect())
    }
}

#[async_trait]
impl CredentialRefreshPort for PhotoLibraryAdapter {
    #[instrument(skip(self, current))]
    async fn refresh(&self, current: &CredentialSet) -> Result<CredentialSet, GatewayError> {
        let grant = self
            .client
            .refresh_access_token(current.refresh_token())
            .await
            .map_err(Self::map_error)?;

        Ok(Self::grant_into_credentials(grant, current, Utc::now()))
    }
}
