//! Source-set string construction.
//!
//! A source set is a comma-separated list of `"<url> <width>w"` candidates.
//! Instances are filtered by URL (normally by [`ImageFormat::matches`]) and
//! emitted in input order. Nothing is sorted or deduplicated.
//!
//! [`ImageFormat::matches`]: crate::format::ImageFormat::matches

use crate::types::ImageInstance;

/// Separator between candidates.
pub const SEPARATOR: &str = ",";

/// Format one source-set candidate.
pub fn candidate(instance: &ImageInstance) -> String {
    format!("{} {}w", instance.url, instance.width)
}

/// Build a source set from the instances whose URL passes `filter`.
///
/// Returns an empty string when nothing matches.
pub fn build_srcset<F>(instances: &[ImageInstance], filter: F) -> String
where
    F: Fn(&str) -> bool,
{
    instances
        .iter()
        .filter(|instance| filter(instance.url.as_str()))
        .map(candidate)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
