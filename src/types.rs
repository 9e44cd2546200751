//! Input types shared by every resolver.
//!
//! These mirror the JSON shape returned by the images API, plus the request
//! record a caller builds per render. Field names accept both the camelCase
//! spelling used by callers and the snake_case spelling the API emits
//! (`aspect_ratios`, `short_caption`, `srcset`).

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One rendered variant of an image at a specific pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInstance {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInstance {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// A set of pre-rendered instances sharing a crop ratio (e.g. "widescreen").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatioGroup {
    #[serde(default)]
    pub instances: Vec<ImageInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl AspectRatioGroup {
    pub fn new(instances: Vec<ImageInstance>) -> Self {
        Self {
            instances,
            slug: None,
        }
    }
}

/// Named aspect-ratio groups in document order.
///
/// A name may map to `null`, which is kept so that [`AspectRatios::first`]
/// sees the same first key the JSON had. Keys starting with `__` (GraphQL's
/// `__typename`) are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AspectRatios(Vec<(String, Option<AspectRatioGroup>)>);

impl AspectRatios {
    /// The group stored under `name`. A `null` entry reads as absent.
    pub fn get(&self, name: &str) -> Option<&AspectRatioGroup> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, group)| group.as_ref())
    }

    /// The first entry in document order, whether or not it is null.
    pub fn first(&self) -> Option<(&str, Option<&AspectRatioGroup>)> {
        self.0
            .first()
            .map(|(key, group)| (key.as_str(), group.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&AspectRatioGroup>)> {
        self.0.iter().map(|(key, group)| (key.as_str(), group.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<AspectRatioGroup>)> for AspectRatios {
    fn from_iter<I: IntoIterator<Item = (String, Option<AspectRatioGroup>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for AspectRatios {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AspectRatiosVisitor;

        impl<'de> Visitor<'de> for AspectRatiosVisitor {
            type Value = AspectRatios;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of aspect ratio names to instance groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(name) = map.next_key::<String>()? {
                    if name.starts_with("__") {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let group = map.next_value::<Option<AspectRatioGroup>>()?;
                    entries.push((name, group));
                }
                Ok(AspectRatios(entries))
            }
        }

        deserializer.deserialize_map(AspectRatiosVisitor)
    }
}

impl Serialize for AspectRatios {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, group) in &self.0 {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

/// Image metadata as delivered by the images API.
///
/// `fallback` is required by the API contract but optional here: a missing
/// value is reported by [`crate::resolve::resolve_src`] as a malformed image
/// rather than rejected while parsing. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, alias = "aspect_ratios", skip_serializing_if = "Option::is_none")]
    pub aspect_ratios: Option<AspectRatios>,
    #[serde(
        default,
        alias = "preferred_aspect_ratio",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_aspect_ratio: Option<AspectRatioGroup>,
    /// Name of the group the editor picked; used when no group was requested.
    #[serde(
        default,
        alias = "preferred_aspect_ratio_slug",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_aspect_ratio_slug: Option<String>,
    #[serde(default, alias = "short_caption", skip_serializing_if = "Option::is_none")]
    pub short_caption: Option<String>,
    #[serde(default, alias = "long_caption", skip_serializing_if = "Option::is_none")]
    pub long_caption: Option<String>,
    #[serde(
        default,
        rename = "srcSet",
        alias = "srcset",
        skip_serializing_if = "Option::is_none"
    )]
    pub src_set: Option<String>,
    /// Canonical page URL of the image, unused by resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageDescriptor {
    /// Every instance in every non-null group, preferred group first.
    pub fn all_instances(&self) -> impl Iterator<Item = &ImageInstance> {
        let preferred = self
            .preferred_aspect_ratio
            .iter()
            .flat_map(|group| group.instances.iter());
        let named = self
            .aspect_ratios
            .iter()
            .flat_map(|ratios| ratios.iter())
            .filter_map(|(_, group)| group)
            .flat_map(|group| group.instances.iter());
        preferred.chain(named)
    }
}

/// Caller-supplied options for one render.
///
/// At least one of `image` or `fallback_src` must be present; see
/// [`crate::resolve::validate_request`]. `alt: Some("")` is a deliberate
/// empty override and differs from `alt: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolutionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub element_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_src_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
    /// AMP only: width to use when the image has no instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_width: Option<String>,
    /// AMP only: height to use when the image has no instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_height: Option<String>,
}

impl ResolutionRequest {
    /// A request driven by an image descriptor.
    pub fn for_image(image: ImageDescriptor) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }

    /// A request for an ad-hoc source with explicit alt text.
    pub fn for_src(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            fallback_src: Some(src.into()),
            alt: Some(alt.into()),
            ..Default::default()
        }
    }
}
