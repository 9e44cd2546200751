//! Shared test utilities for the respimg test suite.
//!
//! Provides the API-shaped fixture images and the URLs tests assert on.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let req = ResolutionRequest::for_image(fixture_image());
//! let sel = select_aspect_ratio(&req, Precedence::NamedFirst);
//! assert_eq!(first_url(&sel), Some(UNCROPPED_400));
//! ```

use crate::aspect::Selection;
use crate::types::ImageDescriptor;

// =========================================================================
// Fixtures
// =========================================================================

const IMAGE_JSON: &str = include_str!("../fixtures/image.json");
const IMAGE_WITH_PREFERRED_JSON: &str = include_str!("../fixtures/image_with_preferred.json");

/// The image's `fallback`, also the first widescreen instance.
pub const WIDESCREEN_600: &str = "https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/widescreen/45eaad-20220505-stanley-turrentine-600.jpg";

/// First instance of the uncropped group (400x300).
pub const UNCROPPED_400: &str = "https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/f65067-20220505-stanley-turrentine-400.jpg";

/// First instance of the first aspect-ratio key ("thumbnail").
pub const THUMBNAIL_FIRST: &str = "https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/thumbnail/3c1f2e-20220505-stanley-turrentine-175.jpg";

/// First instance of the preferred (square) group (400x400).
pub const PREFERRED_400: &str = "https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/square/a11b22-20220505-stanley-turrentine-400.jpg";

/// JPEG source set of the uncropped group.
pub const UNCROPPED_SRCSET: &str = "https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/f65067-20220505-stanley-turrentine-400.jpg 400w,https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/53abde-20220505-stanley-turrentine-600.jpg 600w,https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/8a177d-20220505-stanley-turrentine-1000.jpg 1000w,https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/c591a6-20220505-stanley-turrentine-1400.jpg 1400w,https://img.apmcdn.org/dev/93c76a3c3b11eaba504505deb939109ec8506b60/uncropped/f1ded5-20220505-stanley-turrentine-2000.jpg 2000w";

/// Image as returned by the images API: six aspect ratios (two null), no
/// preferred group.
pub fn fixture_image() -> ImageDescriptor {
    serde_json::from_str(IMAGE_JSON).unwrap()
}

/// Same image with a JPEG-only square `preferredAspectRatio`.
pub fn fixture_image_with_preferred() -> ImageDescriptor {
    serde_json::from_str(IMAGE_WITH_PREFERRED_JSON).unwrap()
}

// =========================================================================
// Selection helpers
// =========================================================================

/// URL of the first instance in the selected group, if any.
pub fn first_url<'a>(selection: &Selection<'a>) -> Option<&'a str> {
    selection
        .group
        .and_then(|group| group.instances.first())
        .map(|instance| instance.url.as_str())
}
