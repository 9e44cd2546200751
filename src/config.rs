//! Render configuration module.
//!
//! Handles loading and validating `respimg.toml`. Every field carries a serde
//! default, so the user file only sets the keys it wants to change and
//! everything else keeps its stock value.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [aspect_ratio]
//! precedence = "named-first"  # or "preferred-first"
//! default = "uncropped"       # group used when nothing more specific matches
//!
//! [amp]
//! default_width = 400         # used when there are no instances and no
//! default_height = 225        # fallbackWidth/fallbackHeight
//! layout = "responsive"       # <amp-img layout=...>
//!
//! [picture]
//! default_format = "jpeg"     # srcset filter when src has no known extension
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [aspect_ratio]
//! precedence = "preferred-first"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::aspect::{DEFAULT_ASPECT_RATIO, Precedence};
use crate::format::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "respimg.toml";

/// Layouts accepted by `<amp-img>`.
const AMP_LAYOUTS: &[&str] = &[
    "responsive",
    "intrinsic",
    "fixed",
    "fixed-height",
    "fill",
    "flex-item",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Render configuration loaded from `respimg.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Aspect-ratio group selection.
    pub aspect_ratio: AspectRatioConfig,
    /// `<amp-img>` settings.
    pub amp: AmpConfig,
    /// `<picture>` settings.
    pub picture: PictureConfig,
}

impl RenderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aspect_ratio.default.trim().is_empty() {
            return Err(ConfigError::Validation(
                "aspect_ratio.default must not be empty".into(),
            ));
        }
        if self.amp.default_width == 0 || self.amp.default_height == 0 {
            return Err(ConfigError::Validation(
                "amp.default_width and amp.default_height must be non-zero".into(),
            ));
        }
        if !AMP_LAYOUTS.contains(&self.amp.layout.as_str()) {
            return Err(ConfigError::Validation(format!(
                "amp.layout must be one of {}",
                AMP_LAYOUTS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Aspect-ratio selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AspectRatioConfig {
    /// Whether the requested name or the image's preferred group wins.
    pub precedence: Precedence,
    /// Group name used when nothing more specific matches.
    pub default: String,
}

impl Default for AspectRatioConfig {
    fn default() -> Self {
        Self {
            precedence: Precedence::default(),
            default: DEFAULT_ASPECT_RATIO.to_string(),
        }
    }
}

/// `<amp-img>` settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmpConfig {
    /// Width when there are no instances and no `fallbackWidth`.
    pub default_width: u32,
    /// Height when there are no instances and no `fallbackHeight`.
    pub default_height: u32,
    /// Value of the `layout` attribute.
    pub layout: String,
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self {
            default_width: 400,
            default_height: 225,
            layout: "responsive".to_string(),
        }
    }
}

/// `<picture>` settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PictureConfig {
    /// Format used to filter the non-WebP srcset when `src` has no known extension.
    pub default_format: ImageFormat,
}

impl Default for PictureConfig {
    fn default() -> Self {
        Self {
            default_format: ImageFormat::Jpeg,
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Load config from `respimg.toml` in the given directory.
///
/// A missing file yields the stock defaults. Unknown keys are rejected and the
/// result is validated either way.
pub fn load_config(dir: &Path) -> Result<RenderConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str::<RenderConfig>(&content)?
    } else {
        RenderConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `respimg.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# respimg configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Aspect-ratio selection
# ---------------------------------------------------------------------------
[aspect_ratio]
# Which wins when a request names an aspect ratio AND the image carries a
# preferredAspectRatio:
#   "named-first"     -> the requested name, if the image has that group
#   "preferred-first" -> the image's preferred group
precedence = "named-first"

# Group used when neither the requested name nor a preferred group matches.
# Falling back to it prints a warning.
default = "uncropped"

# ---------------------------------------------------------------------------
# AMP (<amp-img>)
# ---------------------------------------------------------------------------
[amp]
# AMP requires width and height. These apply when the image has no instances
# and the request gives no fallbackWidth/fallbackHeight (16:9 by default).
default_width = 400
default_height = 225

# layout attribute: responsive, intrinsic, fixed, fixed-height, fill, flex-item
layout = "responsive"

# ---------------------------------------------------------------------------
# Standard (<picture>)
# ---------------------------------------------------------------------------
[picture]
# Format whose instances go into the non-WebP <source> when the src URL has
# no recognizable extension: jpeg, png, gif, webp
default_format = "jpeg"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = RenderConfig::default();
        assert_eq!(config.aspect_ratio.precedence, Precedence::NamedFirst);
        assert_eq!(config.aspect_ratio.default, "uncropped");
        assert_eq!(config.amp.default_width, 400);
        assert_eq!(config.amp.default_height, 225);
        assert_eq!(config.amp.layout, "responsive");
        assert_eq!(config.picture.default_format, ImageFormat::Jpeg);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[aspect_ratio]
precedence = "preferred-first"
"##;
        let config: RenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.aspect_ratio.precedence, Precedence::PreferredFirst);
        // Defaults preserved
        assert_eq!(config.aspect_ratio.default, "uncropped");
        assert_eq!(config.amp.default_width, 400);
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r##"
[amp]
default_widht = 500
"##;
        assert!(toml::from_str::<RenderConfig>(toml).is_err());
    }

    #[test]
    fn unknown_precedence_rejected() {
        let toml = r##"
[aspect_ratio]
precedence = "whatever"
"##;
        assert!(toml::from_str::<RenderConfig>(toml).is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: RenderConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = RenderConfig::default();
        assert_eq!(config.aspect_ratio.precedence, defaults.aspect_ratio.precedence);
        assert_eq!(config.aspect_ratio.default, defaults.aspect_ratio.default);
        assert_eq!(config.amp.default_width, defaults.amp.default_width);
        assert_eq!(config.amp.default_height, defaults.amp.default_height);
        assert_eq!(config.amp.layout, defaults.amp.layout);
        assert_eq!(config.picture.default_format, defaults.picture.default_format);
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_defaults() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let mut config = RenderConfig::default();
        config.amp.default_height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_default_group() {
        let mut config = RenderConfig::default();
        config.aspect_ratio.default = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_layout() {
        let mut config = RenderConfig::default();
        config.amp.layout = "stretchy".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("amp.layout"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.amp.default_width, 400);
        assert_eq!(config.aspect_ratio.default, "uncropped");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
[aspect_ratio]
default = "widescreen"

[amp]
default_width = 640
default_height = 360
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.aspect_ratio.default, "widescreen");
        assert_eq!(config.amp.default_width, 640);
        assert_eq!(config.amp.default_height, 360);
        // Unspecified values should be defaults
        assert_eq!(config.amp.layout, "responsive");
        assert_eq!(config.aspect_ratio.precedence, Precedence::NamedFirst);
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not [valid toml").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_keeps_defaults_for_sibling_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[amp]\ndefault_width = 800\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.amp.default_width, 800);
        assert_eq!(config.amp.default_height, 225);
        assert_eq!(config.amp.layout, "responsive");
        assert_eq!(config.picture.default_format, ImageFormat::Jpeg);
    }

    #[test]
    fn load_config_validates_file_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[amp]\ndefault_width = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[picture]\nformat = \"png\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}
