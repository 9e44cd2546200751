//! Attribute resolution: from a [`ResolutionRequest`] to tag attributes.
//!
//! Each attribute is resolved independently through its own fallback chain.
//! The first available value wins:
//!
//! - **src**: `image.fallback` → `fallback_src` → first instance of the first
//!   aspect ratio → error
//! - **srcset**: selected group filtered by format → `image.src_set` →
//!   `fallback_src_set` → none
//! - **alt**: `alt` (an empty string counts) → `image.short_caption` → `""`
//! - **width/height** (AMP): first instance of the selected group →
//!   `fallback_width`/`fallback_height` → configured defaults
//!
//! The primary `src` is deliberately independent of aspect-ratio selection;
//! only the source sets and AMP dimensions follow the selected group.
//!
//! [`resolve_attributes`] validates the request once, selects the group once,
//! and assembles the flat record a renderer maps onto markup.

use crate::aspect::{Diagnostic, Selection, select_aspect_ratio_with_default};
use crate::config::{AmpConfig, RenderConfig};
use crate::format::ImageFormat;
use crate::srcset::build_srcset;
use crate::types::{ImageDescriptor, ImageInstance, ResolutionRequest};
use serde::Serialize;
use thiserror::Error;

/// Inline style every `<amp-img>` carries so it never overflows its container.
pub const AMP_STYLE: &str = "max-width: 100%";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed image: {0}")]
    MalformedImage(String),
}

const MUST_PROVIDE_ONE: &str =
    "provide either a properly formatted image object or an image src";
const MUST_PROVIDE_ALT: &str = "provide either a properly formatted image object or alt text";
const SRCSET_WITHOUT_SRC: &str = "a fallback srcset cannot be provided without a fallback src";

/// Which component the attributes are for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// `<picture>` with `<source>` elements and an `<img>`.
    #[default]
    Picture,
    /// A single `<amp-img>`.
    Amp,
}

/// Pixel dimensions as attribute strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: String,
    pub height: String,
}

/// Everything a renderer needs, already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAttributes {
    pub variant: Variant,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcset: Option<String>,
    /// WebP candidates for a separate `<source>`; `None` when the image has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webp_srcset: Option<String>,
    /// MIME type of `src`, used for the non-WebP `<source>`.
    pub source_type: &'static str,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// Validation
// ============================================================================

/// Check the request-level preconditions shared by every resolver.
///
/// Also validates the image descriptor when one is present.
pub fn validate_request(request: &ResolutionRequest) -> Result<(), ResolveError> {
    validate_dimension("fallbackWidth", request.fallback_width.as_deref())?;
    validate_dimension("fallbackHeight", request.fallback_height.as_deref())?;
    match &request.image {
        Some(image) => validate_image(image),
        None => {
            if request.fallback_src.is_none() {
                let message = if request.fallback_src_set.is_some() {
                    SRCSET_WITHOUT_SRC
                } else {
                    MUST_PROVIDE_ONE
                };
                return Err(ResolveError::InvalidInput(message.into()));
            }
            if request.alt.is_none() {
                return Err(ResolveError::InvalidInput(MUST_PROVIDE_ALT.into()));
            }
            Ok(())
        }
    }
}

/// A non-empty fallback dimension must be a whole number of pixels.
fn validate_dimension(field: &str, value: Option<&str>) -> Result<(), ResolveError> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) if v.parse::<u32>().is_err() => Err(ResolveError::InvalidInput(format!(
            "{field} must be a whole number of pixels, got '{v}'"
        ))),
        _ => Ok(()),
    }
}

/// Check instance invariants: non-empty URL and non-zero width.
pub fn validate_image(image: &ImageDescriptor) -> Result<(), ResolveError> {
    for instance in image.all_instances() {
        if instance.url.is_empty() {
            return Err(ResolveError::MalformedImage(
                "image instance has an empty url".into(),
            ));
        }
        if instance.width == 0 {
            return Err(ResolveError::MalformedImage(format!(
                "image instance {} has zero width",
                instance.url
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Resolvers
// ============================================================================

/// Resolve the primary `src`.
pub fn resolve_src(request: &ResolutionRequest) -> Result<String, ResolveError> {
    let image = request.image.as_ref();

    if let Some(fallback) = image
        .and_then(|i| i.fallback.as_deref())
        .filter(|s| !s.is_empty())
    {
        return Ok(fallback.to_string());
    }
    if let Some(src) = request.fallback_src.as_deref().filter(|s| !s.is_empty()) {
        return Ok(src.to_string());
    }

    let Some(image) = image else {
        return Err(ResolveError::InvalidInput(MUST_PROVIDE_ONE.into()));
    };
    let (name, group) = image
        .aspect_ratios
        .as_ref()
        .and_then(|ratios| ratios.first())
        .ok_or_else(|| {
            ResolveError::MalformedImage("image has no fallback and no aspect ratios".into())
        })?;
    group
        .and_then(|g| g.instances.first())
        .map(|instance| instance.url.clone())
        .ok_or_else(|| {
            ResolveError::MalformedImage(format!(
                "image has no fallback and aspect ratio '{name}' has no instances"
            ))
        })
}

/// Resolve the source set for the selected group, filtered by `filter`.
pub fn resolve_srcset<F>(
    request: &ResolutionRequest,
    selection: &Selection<'_>,
    filter: F,
) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let Some(image) = request.image.as_ref() else {
        return request.fallback_src_set.clone();
    };
    match selection.group {
        Some(group) => Some(build_srcset(&group.instances, filter)),
        None => image
            .src_set
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| request.fallback_src_set.clone()),
    }
}

/// Resolve alt text. An explicit empty string is kept.
pub fn resolve_alt(request: &ResolutionRequest) -> String {
    request
        .alt
        .clone()
        .or_else(|| {
            request
                .image
                .as_ref()
                .and_then(|image| image.short_caption.clone())
        })
        .unwrap_or_default()
}

/// Instances of the selected group, or none.
pub fn resolve_instances<'a>(selection: &Selection<'a>) -> &'a [ImageInstance] {
    selection
        .group
        .map(|group| group.instances.as_slice())
        .unwrap_or_default()
}

/// Whether the image has any WebP instance.
///
/// Only the preferred group is inspected when the image has one.
pub fn has_webp(image: &ImageDescriptor) -> bool {
    let is_webp = |instance: &ImageInstance| ImageFormat::Webp.matches(&instance.url);
    match &image.preferred_aspect_ratio {
        Some(group) => group.instances.iter().any(is_webp),
        None => image
            .aspect_ratios
            .iter()
            .flat_map(|ratios| ratios.iter())
            .filter_map(|(_, group)| group)
            .flat_map(|group| group.instances.iter())
            .any(is_webp),
    }
}

/// Resolve the pixel width and height an `<amp-img>` requires.
pub fn resolve_dimensions(
    request: &ResolutionRequest,
    selection: &Selection<'_>,
    amp: &AmpConfig,
) -> Dimensions {
    if let Some(first) = resolve_instances(selection).first() {
        return Dimensions {
            width: first.width.to_string(),
            height: first.height.to_string(),
        };
    }
    let given = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    Dimensions {
        width: given(&request.fallback_width).unwrap_or_else(|| amp.default_width.to_string()),
        height: given(&request.fallback_height).unwrap_or_else(|| amp.default_height.to_string()),
    }
}

/// Validate `request` and resolve every attribute for `variant`.
pub fn resolve_attributes(
    request: &ResolutionRequest,
    variant: Variant,
    config: &RenderConfig,
) -> Result<ImageAttributes, ResolveError> {
    validate_request(request)?;

    let src = resolve_src(request)?;
    let selection = select_aspect_ratio_with_default(
        request,
        config.aspect_ratio.precedence,
        &config.aspect_ratio.default,
    );

    let format = ImageFormat::from_url(&src).unwrap_or(config.picture.default_format);
    let srcset = resolve_srcset(request, &selection, |url| format.matches(url));

    let webp_srcset = match (variant, request.image.as_ref(), selection.group) {
        (Variant::Picture, Some(image), Some(group))
            if format != ImageFormat::Webp && has_webp(image) =>
        {
            Some(build_srcset(&group.instances, |url| {
                ImageFormat::Webp.matches(url)
            }))
            .filter(|s| !s.is_empty())
        }
        _ => None,
    };

    let (width, height, layout, style) = match variant {
        Variant::Picture => (None, None, None, None),
        Variant::Amp => {
            let dims = resolve_dimensions(request, &selection, &config.amp);
            (
                Some(dims.width),
                Some(dims.height),
                Some(config.amp.layout.clone()),
                Some(AMP_STYLE),
            )
        }
    };

    Ok(ImageAttributes {
        variant,
        src,
        srcset,
        webp_srcset,
        source_type: format.mime_type(),
        alt: resolve_alt(request),
        sizes: request.sizes.clone(),
        loading: request.loading.clone(),
        class: request.element_class.clone(),
        width,
        height,
        layout,
        style,
        diagnostics: selection.diagnostic.into_iter().collect(),
    })
}

// ============================================================================
// Tests
// ============================================================================
