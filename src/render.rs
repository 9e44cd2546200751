//! HTML rendering for the two image components.
//!
//! ## Standard
//!
//! ```text
//! <picture class="hero">
//!   <source type="image/webp" srcset="a-400.webp 400w,a-800.webp 800w">
//!   <source type="image/jpeg" srcset="a-400.jpg 400w,a-800.jpg 800w">
//!   <img src="a.jpg" alt="..." sizes="..." loading="lazy">
//! </picture>
//! ```
//!
//! The WebP `<source>` is only emitted when the selected group has WebP
//! instances; the typed `<source>` only when there is a srcset at all.
//!
//! ## AMP
//!
//! ```text
//! <amp-img src="a.jpg" srcset="..." alt="..." width="400" height="300"
//!          layout="responsive" style="max-width: 100%"></amp-img>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/), so every attribute value is escaped.

use crate::config::RenderConfig;
use crate::resolve::{self, ImageAttributes, ResolveError, Variant};
use crate::types::ResolutionRequest;
use maud::{Markup, html};

/// Resolved attributes together with their markup.
#[derive(Debug)]
pub struct Rendered {
    pub attributes: ImageAttributes,
    pub markup: Markup,
}

/// Resolve `request` and render it as `variant`.
pub fn render(
    request: &ResolutionRequest,
    variant: Variant,
    config: &RenderConfig,
) -> Result<Rendered, ResolveError> {
    let attributes = resolve::resolve_attributes(request, variant, config)?;
    let markup = match variant {
        Variant::Picture => render_picture(&attributes),
        Variant::Amp => render_amp_img(&attributes),
    };
    Ok(Rendered { attributes, markup })
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Renders a `<picture>` element.
pub fn render_picture(attrs: &ImageAttributes) -> Markup {
    let srcset = attrs.srcset.as_deref().and_then(non_empty);
    html! {
        picture class=[non_empty(&attrs.class)] {
            @if let Some(webp) = &attrs.webp_srcset {
                source type="image/webp" srcset=(webp);
            }
            @if let Some(srcset) = srcset {
                source type=(attrs.source_type) srcset=(srcset);
            }
            img src=(attrs.src)
                alt=(attrs.alt)
                sizes=[attrs.sizes.as_deref()]
                loading=[attrs.loading.as_deref()];
        }
    }
}

/// Renders an `<amp-img>` element.
pub fn render_amp_img(attrs: &ImageAttributes) -> Markup {
    html! {
        amp-img src=(attrs.src)
            srcset=[attrs.srcset.as_deref().and_then(non_empty)]
            alt=(attrs.alt)
            sizes=[attrs.sizes.as_deref()]
            class=[non_empty(&attrs.class)]
            width=[attrs.width.as_deref()]
            height=[attrs.height.as_deref()]
            layout=[attrs.layout.as_deref()]
            style=[attrs.style] {}
    }
}
