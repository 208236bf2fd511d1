//! Photo library port
//!
//! Defines the interface for the cloud photo-library provider. Both
//! operations require a valid bearer credential supplied by the token
//! lifecycle manager.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::CredentialSet;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// An album in the user's photo library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Provider-assigned album identifier
    pub id: String,
    /// Human-readable album title
    pub title: String,
    /// Number of items in the album, when the provider reports it
    pub item_count: Option<u64>,
    /// Base URL of the album's cover photo
    pub cover_url: Option<String>,
}

/// A single photo or video in an album
///
/// `base_url` is the provider's un-sized media URL; the gateway rewrites it
/// with a size directive before handing it to the display client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider-assigned item identifier
    pub id: String,
    /// Un-sized base media URL
    pub base_url: String,
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: Option<String>,
    /// Pixel width reported by the provider
    pub width: Option<u32>,
    /// Pixel height reported by the provider
    pub height: Option<u32>,
    /// Capture time reported by the provider
    pub created_at: Option<DateTime<Utc>>,
}

/// Port for photo-library read operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PhotoLibraryPort: Send + Sync {
    /// List the user's albums
    async fn list_albums(&self, credentials: &CredentialSet)
    -> Result<Vec<Album>, GatewayError>;

    /// List media items in an album, newest first, one provider page
    /// (100 items) per call
    async fn search_media_items(
        &self,
        credentials: &CredentialSet,
        album_id: &str,
    ) -> Result<Vec<MediaItem>, GatewayError>;
}
