//! Watermark configuration module.
//!
//! Handles loading and validating `exifstamp.toml`. The config file is
//! optional: when it is absent, the stock defaults below are used and an
//! informational notice is printed by the caller. Config files are sparse —
//! override just the values you want:
//!
//! ```toml
//! # Only raise the skip threshold
//! width_threshold = 2400
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! width_threshold = 1800    # Images narrower than this are skipped
//!
//! [font]
//! brand_font_path = "fonts/MiSans-Bold.ttf"
//! model_font_path = "fonts/MiSans-Medium.ttf"
//! lens_font_path = "fonts/MiSans-Regular.ttf"
//! normal_size = 100         # Brand and model lines
//! small_size = 50           # Lens and exposure lines
//!
//! [image]
//! box_height = 150          # Info band height below the photo
//! border_width = 10         # White border on all sides
//! nikon_logo_path = "img/Nikon.png"
//! canon_logo_path = "img/Canon.png"
//!
//! [image.logo_size]
//! width = 364               # Nikon logo target size (stretched exactly)
//! height = 200
//!
//! [image.canon_logo_size]
//! width = 182               # Canon logos are shorter; band shrinks to match
//! height = 100
//!
//! [processing]
//! max_jobs = 4              # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Watermark configuration loaded from `exifstamp.toml`.
///
/// All fields have stock defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
///
/// The config is constructed once per run and passed explicitly to every
/// component — it is never ambient state, and nothing mutates it after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkConfig {
    /// Font paths and the two text size tiers.
    pub font: FontConfig,
    /// Info band, border, and logo geometry.
    pub image: ImageConfig,
    /// Images narrower than this are skipped unless `--force` is given.
    pub width_threshold: u32,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            image: ImageConfig::default(),
            width_threshold: 1800,
            processing: ProcessingConfig::default(),
        }
    }
}

impl WatermarkConfig {
    /// Validate config values. Every numeric field must be positive —
    /// a zero border, box height, or font size produces degenerate layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives: [(&str, u32); 9] = [
            ("font.normal_size", self.font.normal_size),
            ("font.small_size", self.font.small_size),
            ("image.box_height", self.image.box_height),
            ("image.border_width", self.image.border_width),
            ("image.logo_size.width", self.image.logo_size.width),
            ("image.logo_size.height", self.image.logo_size.height),
            ("image.canon_logo_size.width", self.image.canon_logo_size.width),
            (
                "image.canon_logo_size.height",
                self.image.canon_logo_size.height,
            ),
            ("width_threshold", self.width_threshold),
        ];
        for (name, value) in positives {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

/// Font paths for the three text roles, plus the two size tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Font for the brand (make) line.
    pub brand_font_path: String,
    /// Font for the camera model line.
    pub model_font_path: String,
    /// Font for the lens and exposure lines.
    pub lens_font_path: String,
    /// Pixel size for the brand and model lines.
    pub normal_size: u32,
    /// Pixel size for the lens and exposure lines.
    pub small_size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            brand_font_path: "fonts/MiSans-Bold.ttf".to_string(),
            model_font_path: "fonts/MiSans-Medium.ttf".to_string(),
            lens_font_path: "fonts/MiSans-Regular.ttf".to_string(),
            normal_size: 100,
            small_size: 50,
        }
    }
}

/// Info band, border, and logo geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Height of the info band below the photo (Canon images use a shorter
    /// band derived from `canon_logo_size.height`).
    pub box_height: u32,
    /// White border width on all four sides.
    pub border_width: u32,
    /// Target size for the Nikon logo. Stretched exactly — aspect ratio is
    /// not preserved.
    pub logo_size: LogoSize,
    /// Target size for the Canon logo.
    pub canon_logo_size: LogoSize,
    /// Path to the Nikon logo asset.
    pub nikon_logo_path: String,
    /// Path to the Canon logo asset.
    pub canon_logo_path: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            box_height: 150,
            border_width: 10,
            logo_size: LogoSize {
                width: 364,
                height: 200,
            },
            canon_logo_size: LogoSize {
                width: 182,
                height: 100,
            },
            nikon_logo_path: "img/Nikon.png".to_string(),
            canon_logo_path: "img/Canon.png".to_string(),
        }
    }
}

/// Exact pixel size a logo asset is stretched to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogoSize {
    pub width: u32,
    pub height: u32,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_jobs: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_jobs(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_jobs.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from the given file path.
///
/// A missing file is not an error: the stock defaults are returned and the
/// caller decides whether to surface a notice. A file that exists but fails
/// to parse or validate is an error — silently ignoring a typo'd config
/// would watermark a whole batch with the wrong geometry.
pub fn load_config(path: &Path) -> Result<WatermarkConfig, ConfigError> {
    if !path.exists() {
        return Ok(WatermarkConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: WatermarkConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `exifstamp.toml` with all keys documented.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# exifstamp Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each key only needs to be present when you want to override it.
# Unknown keys will cause an error.

# Images narrower than this many pixels are skipped (pass --force to
# watermark them anyway).
width_threshold = 1800

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[font]
# Font files for the three text roles. A missing file falls back to the
# embedded DejaVu Sans.
brand_font_path = "fonts/MiSans-Bold.ttf"
model_font_path = "fonts/MiSans-Medium.ttf"
lens_font_path = "fonts/MiSans-Regular.ttf"

# Pixel size for the brand and model lines.
normal_size = 100

# Pixel size for the lens and exposure lines.
small_size = 50

# ---------------------------------------------------------------------------
# Band, border, and logos
# ---------------------------------------------------------------------------
[image]
# Height of the info band below the photo. Canon images use a shorter band
# derived from canon_logo_size.height instead.
box_height = 150

# White border width on all four sides.
border_width = 10

# Brand logo assets. Only Nikon and Canon images get a logo.
nikon_logo_path = "img/Nikon.png"
canon_logo_path = "img/Canon.png"

# Logos are stretched to exactly this size (aspect ratio not preserved).
[image.logo_size]
width = 364
height = 200

[image.canon_logo_size]
width = 182
height = 100

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_jobs = 4
"##
}
