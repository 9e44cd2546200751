//! Centralized URL parsing for image file names and formats.
//!
//! Image URLs from the images API look like
//! `https://img.example.org/dev/<hash>/uncropped/f65067-stanley-400.jpg?v=2#top`.
//! Everything that needs to know "what kind of image is this" goes through
//! [`file_name`] so the query/fragment stripping rules live in one place.
//!
//! ## Matching Rules
//!
//! Format detection is a case-sensitive literal suffix match on the file name:
//! - `photo-400.jpg` → JPEG
//! - `photo-400.jpeg` → JPEG
//! - `photo-400.JPG` → no match (uppercase is not normalized)
//! - `photo-400.webp?w=400` → WebP (query stripped first)

use serde::{Deserialize, Serialize};

/// Extract the file name from an image URL.
///
/// Takes everything after the last `/`, then drops any `?query` and
/// `#fragment`:
/// - `"https://cdn/a/b/photo.jpg"` → `"photo.jpg"`
/// - `"https://cdn/photo.webp?w=400"` → `"photo.webp"`
/// - `"photo.png#frag"` → `"photo.png"`
/// - `"https://cdn/dir/"` → `""`
pub fn file_name(url: &str) -> &str {
    let last = match url.rfind('/') {
        Some(pos) => &url[pos + 1..],
        None => url,
    };
    let last = last.split('?').next().unwrap_or(last);
    last.split('#').next().unwrap_or(last)
}

/// Image formats that can appear in a source set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Webp,
    Png,
    Gif,
}

impl ImageFormat {
    /// File name suffixes recognized for this format.
    fn suffixes(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Webp => &["webp"],
            ImageFormat::Png => &["png"],
            ImageFormat::Gif => &["gif"],
        }
    }

    /// Whether `url` points at a file of this format.
    pub fn matches(self, url: &str) -> bool {
        let name = file_name(url);
        self.suffixes().iter().any(|suffix| name.ends_with(suffix))
    }

    /// Detect the format of a URL, if it is one we know.
    pub fn from_url(url: &str) -> Option<Self> {
        [
            ImageFormat::Jpeg,
            ImageFormat::Webp,
            ImageFormat::Png,
            ImageFormat::Gif,
        ]
        .into_iter()
        .find(|format| format.matches(url))
    }

    /// MIME type for the `type` attribute of a `<source>` element.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
        }
    }
}
