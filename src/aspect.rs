//! Aspect-ratio group selection.
//!
//! Picks which group of pre-rendered instances feeds the source set and the
//! AMP dimensions. The primary `src` never depends on this choice.
//!
//! ## Precedence
//!
//! With [`Precedence::NamedFirst`] (the default) the first match wins:
//!
//! 1. The group named by `request.aspect_ratio`, if that entry is non-null
//! 2. `image.preferred_aspect_ratio`
//! 3. The group named by `image.preferred_aspect_ratio_slug`
//! 4. The default group (`"uncropped"`), reported with a diagnostic
//! 5. Nothing, reported with a diagnostic
//!
//! [`Precedence::PreferredFirst`] swaps steps 1 and 2.
//!
//! ## Diagnostics
//!
//! Falling through to step 4 or 5 is not an error, but the caller usually
//! wants to know its requested crop was not honored. The selection carries at
//! most one [`Diagnostic`] instead of writing to a global log.

use crate::types::{AspectRatioGroup, ResolutionRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group name used when nothing more specific matches.
pub const DEFAULT_ASPECT_RATIO: &str = "uncropped";

/// Order in which the requested name and the preferred group are consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// The caller's requested name beats the image's preferred group.
    #[default]
    NamedFirst,
    /// The image's preferred group beats the caller's requested name.
    PreferredFirst,
}

/// Which rule produced a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionSource {
    Requested,
    Preferred,
    PreferredSlug,
    Default,
    None,
}

/// A non-fatal problem noticed during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// No group matched; `fell_back_to` names the default group if it existed.
    AspectRatioNotFound {
        requested: Option<String>,
        fell_back_to: Option<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AspectRatioNotFound {
                requested,
                fell_back_to,
            } => {
                match requested {
                    Some(name) => write!(f, "aspect ratio '{name}' not found")?,
                    None => write!(f, "no aspect ratio requested or preferred")?,
                }
                match fell_back_to {
                    Some(name) => write!(f, "; using '{name}'"),
                    None => write!(f, "; using the fallback image"),
                }
            }
        }
    }
}

/// Result of choosing an aspect-ratio group for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub group: Option<&'a AspectRatioGroup>,
    pub source: SelectionSource,
    pub diagnostic: Option<Diagnostic>,
}

impl<'a> Selection<'a> {
    fn found(group: &'a AspectRatioGroup, source: SelectionSource) -> Self {
        Self {
            group: Some(group),
            source,
            diagnostic: None,
        }
    }
}

/// Choose the aspect-ratio group for `request`, falling back to `"uncropped"`.
pub fn select_aspect_ratio(request: &ResolutionRequest, precedence: Precedence) -> Selection<'_> {
    select_aspect_ratio_with_default(request, precedence, DEFAULT_ASPECT_RATIO)
}

/// Choose the aspect-ratio group for `request` with a custom default group name.
pub fn select_aspect_ratio_with_default<'a>(
    request: &'a ResolutionRequest,
    precedence: Precedence,
    default_name: &str,
) -> Selection<'a> {
    let Some(image) = request.image.as_ref() else {
        return Selection {
            group: None,
            source: SelectionSource::None,
            diagnostic: None,
        };
    };
    let ratios = image.aspect_ratios.as_ref();
    let requested_name = request.aspect_ratio.as_deref().filter(|name| !name.is_empty());

    let requested = || {
        requested_name
            .and_then(|name| ratios.and_then(|r| r.get(name)))
            .map(|group| Selection::found(group, SelectionSource::Requested))
    };
    let preferred = || {
        image
            .preferred_aspect_ratio
            .as_ref()
            .map(|group| Selection::found(group, SelectionSource::Preferred))
    };

    let first = match precedence {
        Precedence::NamedFirst => requested().or_else(preferred),
        Precedence::PreferredFirst => preferred().or_else(requested),
    };
    if let Some(selection) = first {
        return selection;
    }

    if requested_name.is_none() {
        let slug_group = image
            .preferred_aspect_ratio_slug
            .as_deref()
            .and_then(|slug| ratios.and_then(|r| r.get(slug)));
        if let Some(group) = slug_group {
            return Selection::found(group, SelectionSource::PreferredSlug);
        }
    }

    let fallback = ratios.and_then(|r| r.get(default_name));
    Selection {
        group: fallback,
        source: if fallback.is_some() {
            SelectionSource::Default
        } else {
            SelectionSource::None
        },
        diagnostic: Some(Diagnostic::AspectRatioNotFound {
            requested: requested_name.map(String::from),
            fell_back_to: fallback.map(|_| default_name.to_string()),
        }),
    }
}
