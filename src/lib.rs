//! # respimg
//!
//! Derives the attributes of a responsive image tag from the image metadata
//! an images API returns, and renders them as a standard `<picture>` element
//! or an AMP `<amp-img>`.
//!
//! # Resolution
//!
//! Every attribute has its own fallback chain, so a request can be driven by a
//! full image object, by ad-hoc `fallbackSrc`/`fallbackSrcSet` values, or by a
//! mix of both:
//!
//! ```text
//! src      image.fallback → fallbackSrc → first instance of first aspect ratio
//! srcset   selected aspect-ratio group → image.srcset → fallbackSrcSet
//! alt      alt (even "") → image.short_caption → ""
//! size     first instance of selected group → fallbackWidth/Height → 400x225
//! ```
//!
//! Every function is pure: the same request always yields the same
//! attributes, and non-fatal problems are returned as [`aspect::Diagnostic`]
//! values instead of being logged.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Image descriptor and request records, deserialized from JSON |
//! | [`format`] | URL file-name parsing and image format detection |
//! | [`aspect`] | Aspect-ratio group selection and diagnostics |
//! | [`srcset`] | `"url widthw"` source-set construction |
//! | [`resolve`] | Per-attribute resolvers and the combined attribute record |
//! | [`render`] | `<picture>` and `<amp-img>` markup using Maud |
//! | [`config`] | `respimg.toml` loading and validation |
//! | [`output`] | CLI output formatting |

pub mod aspect;
pub mod config;
pub mod format;
pub mod output;
pub mod render;
pub mod resolve;
pub mod srcset;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
