//! Photo-library data models
//!
//! Wire types for the provider's albums, media-item search and OAuth2 token
//! endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An album as returned by the provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Provider-assigned identifier
    pub id: String,
    /// Album title
    #[serde(default)]
    pub title: Option<String>,
    /// Item count, reported as a decimal string
    #[serde(default)]
    pub media_items_count: Option<String>,
    /// Base URL of the cover photo
    #[serde(default)]
    pub cover_photo_base_url: Option<String>,
}

impl Album {
    /// Item count parsed from the provider's string form
    #[must_use]
    pub fn item_count(&self) -> Option<u64> {
        self.media_items_count.as_deref().and_then(|s| s.parse().ok())
    }
}

/// A media item as returned by the provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Provider-assigned identifier
    pub id: String,
    /// Un-sized base media URL; size directives are appended by the caller
    pub base_url: String,
    /// MIME type, e.g. `image/jpeg`
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Capture metadata; absent for some items
    #[serde(default)]
    pub media_metadata: Option<MediaMetadata>,
}

/// Capture metadata for a media item
///
/// The provider reports pixel dimensions as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// Capture time
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    /// Pixel width as a decimal string
    #[serde(default)]
    pub width: Option<String>,
    /// Pixel height as a decimal string
    #[serde(default)]
    pub height: Option<String>,
}

impl MediaMetadata {
    /// Pixel dimensions parsed from the provider's string form
    ///
    /// Returns `None` unless both dimensions are present and parse to
    /// positive integers.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let width: u32 = self.width.as_deref()?.parse().ok()?;
        let height: u32 = self.height.as_deref()?.parse().ok()?;
        (width > 0 && height > 0).then_some((width, height))
    }
}

/// Request body for the media-item search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub album_id: &'a str,
    pub page_size: u32,
    pub order_by: &'a str,
}

/// Response envelope of the albums endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumsResponse {
    #[serde(default)]
    pub albums: Vec<Album>,
}

/// Response envelope of the media-item search endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
}

/// A successful OAuth2 refresh-token grant
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// The new bearer access token
    pub access_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    /// Rotated refresh token; absent when the provider keeps the old one
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// Token type, `Bearer` for this provider
    #[serde(default)]
    pub token_type: Option<String>,
}
