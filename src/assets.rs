//! Font and logo asset loading.
//!
//! Assets are loaded once per run and shared read-only across workers.
//! Fonts fall back to the embedded DejaVu Sans when a configured path does
//! not exist, so the binary works out of the box without a fonts directory.
//! Logos are optional: a missing or undecodable logo file downgrades to
//! rendering the band without a logo rather than failing the run.

use crate::config::{FontConfig, ImageConfig};
use crate::layout::Brand;
use crate::text;
use ab_glyph::FontVec;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data in {0}")]
    InvalidFont(String),
}

/// The three font roles used on the info band.
pub struct FontSet {
    /// Brand (make) line.
    pub brand: FontVec,
    /// Camera model line.
    pub model: FontVec,
    /// Lens and exposure lines.
    pub lens: FontVec,
}

impl FontSet {
    pub fn load(config: &FontConfig) -> Result<Self, AssetError> {
        Ok(Self {
            brand: load_font(&config.brand_font_path)?,
            model: load_font(&config.model_font_path)?,
            lens: load_font(&config.lens_font_path)?,
        })
    }

    /// All three roles from the embedded face.
    pub fn embedded() -> Result<Self, AssetError> {
        Ok(Self {
            brand: embedded_font()?,
            model: embedded_font()?,
            lens: embedded_font()?,
        })
    }
}

fn embedded_font() -> Result<FontVec, AssetError> {
    FontVec::try_from_vec(text::EMBEDDED_FONT.to_vec())
        .map_err(|_| AssetError::InvalidFont("embedded DejaVu Sans".to_string()))
}

fn load_font(path: &str) -> Result<FontVec, AssetError> {
    if !Path::new(path).exists() {
        println!("INFO: font {path} not found, using embedded DejaVu Sans");
        return embedded_font();
    }
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|_| AssetError::InvalidFont(path.to_string()))
}

/// Brand logo images, decoded once and stretched per-image by the
/// compositor.
#[derive(Default)]
pub struct LogoSet {
    nikon: Option<RgbaImage>,
    canon: Option<RgbaImage>,
}

impl LogoSet {
    pub fn load(config: &ImageConfig) -> Self {
        Self {
            nikon: load_logo(&config.nikon_logo_path, "Nikon"),
            canon: load_logo(&config.canon_logo_path, "Canon"),
        }
    }

    /// Build a set from already-decoded images.
    pub fn from_images(nikon: Option<RgbaImage>, canon: Option<RgbaImage>) -> Self {
        Self { nikon, canon }
    }

    pub fn for_brand(&self, brand: Brand) -> Option<&RgbaImage> {
        match brand {
            Brand::Nikon => self.nikon.as_ref(),
            Brand::Canon => self.canon.as_ref(),
            Brand::Other => None,
        }
    }
}

fn load_logo(path: &str, label: &str) -> Option<RgbaImage> {
    if !Path::new(path).exists() {
        println!("INFO: {label} logo {path} not found; {label} images will render without a logo");
        return None;
    }
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            eprintln!("WARN: failed to decode {label} logo {path}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn missing_font_paths_fall_back_to_embedded() {
        let config = FontConfig {
            brand_font_path: "/nonexistent/a.ttf".to_string(),
            model_font_path: "/nonexistent/b.ttf".to_string(),
            lens_font_path: "/nonexistent/c.ttf".to_string(),
            ..FontConfig::default()
        };
        let fonts = FontSet::load(&config).unwrap();
        // The fallback face must be usable for measurement
        let (w, h) = text::measure(&fonts.brand, 24, "Nikon");
        assert!(w > 0 && h > 0);
    }

    #[test]
    fn invalid_font_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bogus.ttf");
        std::fs::write(&path, b"not a font at all").unwrap();
        let result = load_font(path.to_str().unwrap());
        assert!(matches!(result, Err(AssetError::InvalidFont(_))));
    }

    #[test]
    fn logo_set_loads_existing_png() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Nikon.png");
        let logo = RgbaImage::from_pixel(30, 20, Rgba([255, 220, 0, 255]));
        logo.save(&path).unwrap();

        let config = ImageConfig {
            nikon_logo_path: path.to_string_lossy().to_string(),
            canon_logo_path: "/nonexistent/Canon.png".to_string(),
            ..ImageConfig::default()
        };
        let logos = LogoSet::load(&config);

        let nikon = logos.for_brand(Brand::Nikon).unwrap();
        assert_eq!(nikon.dimensions(), (30, 20));
        assert!(logos.for_brand(Brand::Canon).is_none());
        assert!(logos.for_brand(Brand::Other).is_none());
    }

    #[test]
    fn undecodable_logo_downgrades_to_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Canon.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let logo = load_logo(path.to_str().unwrap(), "Canon");
        assert!(logo.is_none());
    }

    #[test]
    fn from_images_maps_brands() {
        let nikon = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let logos = LogoSet::from_images(Some(nikon), None);
        assert!(logos.for_brand(Brand::Nikon).is_some());
        assert!(logos.for_brand(Brand::Canon).is_none());
    }
}
