//! Adaptive media sizing
//!
//! Computes the pixel box a media item should be rendered into for a given
//! viewport, preserving the media's aspect ratio and covering the screen,
//! then rewrites the provider's base URL with a matching size directive.

use serde::{Deserialize, Serialize};

use crate::value_objects::{MediaDimensions, Viewport};

/// Multiplicative margin applied to computed dimensions so zoom and pan
/// transitions on the display client never reveal unrendered edges.
pub const OVERSCAN_FACTOR: f64 = 1.2;

/// The computed render box for one media item on one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTarget {
    /// Target width in pixels, overscan included
    pub width: u32,
    /// Target height in pixels, overscan included
    pub height: u32,
}

impl RenderTarget {
    /// Compute the render target for a media item on a viewport
    ///
    /// The relatively wider side of the media is left free to overflow the
    /// screen: when the media is wider than the screen the height is pinned
    /// to the screen height and the width follows the media ratio; otherwise
    /// the width is pinned and the height follows. Both dimensions are then
    /// scaled by [`OVERSCAN_FACTOR`] and rounded to the nearest pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_media(viewport: Viewport, media: MediaDimensions) -> Self {
        let screen_ratio = viewport.aspect_ratio();
        let media_ratio = media.aspect_ratio();

        let mut width = f64::from(viewport.width());
        let mut height = f64::from(viewport.height());

        if media_ratio > screen_ratio {
            width = (f64::from(viewport.height()) * media_ratio).round();
        } else {
            height = (f64::from(viewport.width()) / media_ratio).round();
        }

        // Dimensions are bounded by viewport * media ratio, far below u32::MAX
        Self {
            width: (width * OVERSCAN_FACTOR).round() as u32,
            height: (height * OVERSCAN_FACTOR).round() as u32,
        }
    }

    /// Append the provider's size directive to a base media URL
    ///
    /// The `-c` suffix requests server-side cropping to exactly this box.
    #[must_use]
    pub fn sized_url(&self, base_url: &str) -> String {
        format!("{base_url}=w{}-h{}-c", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport(w: u32, h: u32) -> Viewport {
        Viewport::new(w, h).expect("valid viewport")
    }

    fn media(w: u32, h: u32) -> MediaDimensions {
        MediaDimensions::new(w, h).expect("valid media dimensions")
    }

    #[test]
    fn height_bound_media_pins_width() {
        // 4:3 media on a 16:9 screen is relatively taller, so the width is
        // pinned to the screen and the height follows the media ratio.
        let target = RenderTarget::for_media(viewport(1920, 1080), media(4000, 3000));
        assert_eq!(target.width, 2304); // round(1920 * 1.2)
        assert_eq!(target.height, 1728); // round(round(1920 / (4/3)) * 1.2)
    }

    #[test]
    fn width_bound_media_pins_height() {
        // Panorama on a 16:9 screen: height pinned, width follows.
        let target = RenderTarget::for_media(viewport(1920, 1080), media(6000, 2000));
        assert_eq!(target.height, 1296); // round(1080 * 1.2)
        assert_eq!(target.width, 3888); // round(round(1080 * 3.0) * 1.2)
    }

    #[test]
    fn screen_shaped_media_scales_by_overscan_only() {
        let target = RenderTarget::for_media(viewport(1920, 1080), media(1920, 1080));
        assert_eq!(target.width, 2304);
        assert_eq!(target.height, 1296);
    }

    #[test]
    fn computation_is_idempotent() {
        let vp = viewport(1280, 800);
        let dims = media(3500, 2100);
        let first = RenderTarget::for_media(vp, dims);
        let second = RenderTarget::for_media(vp, dims);
        assert_eq!(first, second);
    }

    #[test]
    fn sized_url_appends_crop_directive() {
        let target = RenderTarget {
            width: 2304,
            height: 1728,
        };
        assert_eq!(
            target.sized_url("https://media.example.com/abc123"),
            "https://media.example.com/abc123=w2304-h1728-c"
        );
    }

    proptest! {
        #[test]
        fn output_covers_screen_and_preserves_ratio(
            screen_w in 320_u32..4096,
            screen_h in 240_u32..2400,
            media_w in 100_u32..8000,
            media_h in 100_u32..8000,
        ) {
            let vp = viewport(screen_w, screen_h);
            let target = RenderTarget::for_media(vp, media(media_w, media_h));

            // Both output dimensions cover the corresponding screen dimension.
            prop_assert!(target.width >= screen_w);
            prop_assert!(target.height >= screen_h);

            // Aspect ratio preserved within rounding tolerance: each axis is
            // rounded at most twice (once before and once after overscan), so
            // the height-implied width may drift from the actual width by no
            // more than ~1.2px scaled by the ratio.
            let media_ratio = f64::from(media_w) / f64::from(media_h);
            let implied_width = f64::from(target.height) * media_ratio;
            prop_assert!(
                (implied_width - f64::from(target.width)).abs()
                    <= OVERSCAN_FACTOR * (1.0 + media_ratio),
                "ratio drift: target {}x{} vs media ratio {media_ratio}",
                target.width,
                target.height,
            );
        }
    }
}
