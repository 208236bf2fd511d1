//! Photo-library integration
//!
//! Client for the cloud photo-library REST API. Albums and media items are
//! read with a Bearer access token; the companion OAuth2 endpoint exchanges
//! a refresh token for a new access token when the current one expires.

pub mod client;
mod models;

pub use client::{PhotosClient, PhotosConfig, PhotosError};
pub use models::{Album, MediaItem, MediaMetadata, TokenGrant};
