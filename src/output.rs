//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Image
//!     Source: https://cdn/.../widescreen/45eaad-600.jpg
//!     Alt: Stanley Turrentine
//!     Aspect ratio: uncropped (default, 5 instances)
//!     WebP: yes
//! Request is valid
//! ```
//!
//! ## Diagnostics
//!
//! ```text
//! warning: aspect ratio 'panorama' not found; using 'uncropped'
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure: no I/O, no side effects.

use crate::aspect::{Diagnostic, Selection, SelectionSource};
use crate::resolve::{self, ImageAttributes};
use crate::types::ResolutionRequest;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human label for where a selection came from.
fn source_label(source: SelectionSource) -> &'static str {
    match source {
        SelectionSource::Requested => "requested",
        SelectionSource::Preferred => "preferred",
        SelectionSource::PreferredSlug => "preferred slug",
        SelectionSource::Default => "default",
        SelectionSource::None => "none",
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Format diagnostics as `warning:` lines.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| format!("warning: {d}"))
        .collect()
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for line in format_diagnostics(diagnostics) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the summary shown by `check`.
///
/// `selection` names the group the request resolved to; `attrs` are the
/// resolved attributes for the standard variant.
pub fn format_check_output(
    request: &ResolutionRequest,
    selection: &Selection<'_>,
    attrs: &ImageAttributes,
) -> Vec<String> {
    let mut lines = Vec::new();
    let ctx = indent(1);

    lines.push(if request.image.is_some() {
        "Image".to_string()
    } else {
        "Fallback source".to_string()
    });
    lines.push(format!("{ctx}Source: {}", attrs.src));
    if attrs.alt.is_empty() {
        lines.push(format!("{ctx}Alt: (empty)"));
    } else {
        lines.push(format!("{ctx}Alt: {}", attrs.alt));
    }

    if let Some(image) = &request.image {
        let instances = resolve::resolve_instances(selection).len();
        let group_name = match selection.source {
            SelectionSource::Requested => request.aspect_ratio.clone(),
            SelectionSource::PreferredSlug => image.preferred_aspect_ratio_slug.clone(),
            SelectionSource::Preferred => selection.group.and_then(|g| g.slug.clone()),
            SelectionSource::Default => diagnostic_fallback(&attrs.diagnostics),
            SelectionSource::None => None,
        };
        match group_name {
            Some(name) => lines.push(format!(
                "{ctx}Aspect ratio: {name} ({}, {instances} instances)",
                source_label(selection.source)
            )),
            None => lines.push(format!(
                "{ctx}Aspect ratio: ({}, {instances} instances)",
                source_label(selection.source)
            )),
        }
        let webp = if resolve::has_webp(image) { "yes" } else { "no" };
        lines.push(format!("{ctx}WebP: {webp}"));
    }

    if let Some(srcset) = &attrs.srcset {
        let candidates = srcset.split(',').filter(|c| !c.trim().is_empty()).count();
        lines.push(format!("{ctx}Srcset: {candidates} candidates"));
    }

    lines
}

fn diagnostic_fallback(diagnostics: &[Diagnostic]) -> Option<String> {
    diagnostics.iter().find_map(|d| match d {
        Diagnostic::AspectRatioNotFound { fell_back_to, .. } => fell_back_to.clone(),
    })
}

/// Print the `check` summary to stdout.
pub fn print_check_output(
    request: &ResolutionRequest,
    selection: &Selection<'_>,
    attrs: &ImageAttributes,
) {
    for line in format_check_output(request, selection, attrs) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::{Precedence, select_aspect_ratio};
    use crate::config::RenderConfig;
    use crate::resolve::{Variant, resolve_attributes};
    use crate::test_helpers::*;

    fn check_lines(request: &ResolutionRequest) -> Vec<String> {
        let attrs = resolve_attributes(request, Variant::Picture, &RenderConfig::default()).unwrap();
        let selection = select_aspect_ratio(request, Precedence::NamedFirst);
        format_check_output(request, &selection, &attrs)
    }

    #[test]
    fn diagnostics_are_warning_lines() {
        let lines = format_diagnostics(&[Diagnostic::AspectRatioNotFound {
            requested: Some("panorama".into()),
            fell_back_to: Some("uncropped".into()),
        }]);
        assert_eq!(
            lines,
            vec!["warning: aspect ratio 'panorama' not found; using 'uncropped'"]
        );
    }

    #[test]
    fn no_diagnostics_no_lines() {
        assert!(format_diagnostics(&[]).is_empty());
    }

    #[test]
    fn check_image_with_default_group() {
        let lines = check_lines(&ResolutionRequest::for_image(fixture_image()));
        assert_eq!(lines[0], "Image");
        assert_eq!(lines[1], format!("    Source: {WIDESCREEN_600}"));
        assert_eq!(lines[2], "    Alt: Stanley Turrentine");
        assert_eq!(lines[3], "    Aspect ratio: uncropped (default, 5 instances)");
        assert_eq!(lines[4], "    WebP: yes");
        assert_eq!(lines[5], "    Srcset: 5 candidates");
    }

    #[test]
    fn check_image_with_requested_group() {
        let req = ResolutionRequest {
            aspect_ratio: Some("widescreen".into()),
            ..ResolutionRequest::for_image(fixture_image())
        };
        let lines = check_lines(&req);
        assert!(lines.contains(&"    Aspect ratio: widescreen (requested, 4 instances)".to_string()));
    }

    #[test]
    fn check_image_with_preferred_group() {
        let lines = check_lines(&ResolutionRequest::for_image(fixture_image_with_preferred()));
        assert!(lines.contains(&"    Aspect ratio: square (preferred, 2 instances)".to_string()));
        assert!(lines.contains(&"    WebP: no".to_string()));
    }

    #[test]
    fn check_fallback_source() {
        let lines = check_lines(&ResolutionRequest::for_src("wolf.jpg", ""));
        assert_eq!(lines, vec!["Fallback source", "    Source: wolf.jpg", "    Alt: (empty)"]);
    }
}
