//! Display viewport and media dimension value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// The display client's screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDimensions` if either dimension is zero,
    /// so downstream ratio arithmetic can never divide by zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Screen width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Screen height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width-to-height ratio
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel dimensions of a media item as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDimensions {
    width: u32,
    height: u32,
}

impl MediaDimensions {
    /// Create media dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Build dimensions from optional provider metadata
    ///
    /// The provider omits width/height for some items; a missing or zero
    /// dimension falls back to the viewport, treating the media as exactly
    /// screen-shaped.
    #[must_use]
    pub fn from_provider_metadata(
        width: Option<u32>,
        height: Option<u32>,
        viewport: Viewport,
    ) -> Self {
        match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Self {
                width: w,
                height: h,
            },
            _ => Self {
                width: viewport.width(),
                height: viewport.height(),
            },
        }
    }

    /// Media width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Media height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width-to-height ratio
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for MediaDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
