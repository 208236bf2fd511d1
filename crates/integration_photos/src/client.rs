//! Photo-library HTTP client
//!
//! Reads albums and media items with a Bearer access token and performs the
//! OAuth2 refresh-token exchange. Failures are classified by HTTP status at
//! the point the response is received: 401 is authorization loss, every
//! other non-2xx is a request failure carrying the body for diagnostics.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{Album, AlbumsResponse, MediaItem, SearchRequest, SearchResponse, TokenGrant};

/// Sort order requested for media-item searches: newest captures first
const MEDIA_ORDER: &str = "MediaMetadata.creation_time desc";

/// Photo-library client errors
#[derive(Debug, Error)]
pub enum PhotosError {
    /// The provider rejected the credential (HTTP 401)
    #[error("Unauthorized: access token rejected by provider")]
    Unauthorized,

    /// The provider answered outside 2xx (and not 401)
    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to parse the provider's response
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Photo-library client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OAuth2 token endpoint for the refresh exchange
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// OAuth2 client identifier
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Media-item page size (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_api_base_url() -> String {
    "https://photoslibrary.googleapis.com".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    100
}

impl PhotosConfig {
    /// Create a configuration with default endpoints for the given OAuth2
    /// client credentials
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_url: default_token_url(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// HTTP client for the photo-library provider
#[derive(Debug, Clone)]
pub struct PhotosClient {
    client: Client,
    config: PhotosConfig,
}

impl PhotosClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: PhotosConfig) -> Result<Self, PhotosError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PhotosError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// List the user's albums
    #[instrument(skip(self, access_token))]
    pub async fn list_albums(&self, access_token: &str) -> Result<Vec<Album>, PhotosError> {
        let url = format!("{}/v1/albums", self.config.api_base_url);
        debug!(url = %url, "Listing albums");

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PhotosError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let body: AlbumsResponse = response
            .json()
            .await
            .map_err(|e| PhotosError::ParseError(e.to_string()))?;

        debug!(count = body.albums.len(), "Albums listed");
        Ok(body.albums)
    }

    /// List media items in an album, newest first, one page of
    /// `config.page_size` items
    #[instrument(skip(self, access_token), fields(album_id = %album_id))]
    pub async fn search_media_items(
        &self,
        access_token: &str,
        album_id: &str,
    ) -> Result<Vec<MediaItem>, PhotosError> {
        let url = format!("{}/v1/mediaItems:search", self.config.api_base_url);
        let request = SearchRequest {
            album_id,
            page_size: self.config.page_size,
            order_by: MEDIA_ORDER,
        };
        debug!(url = %url, "Searching media items");

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| PhotosError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PhotosError::ParseError(e.to_string()))?;

        debug!(count = body.media_items.len(), "Media items listed");
        Ok(body.media_items)
    }

    /// Exchange a refresh token for a new access token
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenGrant, PhotosError> {
        debug!(url = %self.config.token_url, "Refreshing access token");

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| PhotosError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| PhotosError::ParseError(e.to_string()))
    }

    /// Classify a provider response by status code
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PhotosError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PhotosError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PhotosError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
