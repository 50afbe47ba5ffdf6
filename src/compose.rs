//! Canvas composition.
//!
//! Takes a decoded source image plus the [`CanvasPlan`] and draws the final
//! output: white canvas, border stroke, the pasted photo, the four text
//! lines, and the brand logo. The result is encoded to PNG in memory so a
//! failed image never leaves a truncated file on disk — the caller writes
//! the finished bytes in a single `fs::write`.
//!
//! Composition is a pure function of its inputs: no timestamps, no
//! randomness, so the same input always produces byte-identical output.

use crate::assets::FontSet;
use crate::config::FontConfig;
use crate::layout::CanvasPlan;
use crate::resolve::DisplayFields;
use crate::text;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{imageops, ExtendedColorType, GenericImage, ImageEncoder, Rgba, RgbaImage};
use std::path::Path;
use thiserror::Error;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {0}")]
    Decode(String),
    #[error("composition failed: {0}")]
    Failed(String),
}

/// Decode a source photo into RGBA.
pub fn load_source(path: &Path) -> Result<RgbaImage, ComposeError> {
    let img = image::open(path)
        .map_err(|e| ComposeError::Decode(format!("{}: {}", path.display(), e)))?;
    Ok(img.to_rgba8())
}

/// Compose the bordered canvas for one image.
///
/// `logo` is the brand logo asset (native size) when the plan calls for
/// one; it is stretched to the plan's exact logo rect, aspect ratio not
/// preserved, and composited through its own alpha channel.
pub fn compose(
    source: &RgbaImage,
    plan: &CanvasPlan,
    fields: &DisplayFields,
    fonts: &FontSet,
    logo: Option<&RgbaImage>,
    font_config: &FontConfig,
) -> Result<RgbaImage, ComposeError> {
    let mut canvas = RgbaImage::from_pixel(plan.canvas_width, plan.canvas_height, WHITE);

    draw_border(&mut canvas, plan.border_width, WHITE);

    // Identity placement: source pixels land exactly, no resampling and no
    // blending against the canvas.
    let offset = plan.border_width;
    canvas
        .copy_from(source, offset, offset)
        .map_err(|e| ComposeError::Failed(format!("paste: {e}")))?;

    let normal = font_config.normal_size;
    let small = font_config.small_size;

    text::draw(
        &mut canvas,
        &fonts.brand,
        normal,
        TEXT_COLOR,
        plan.brand_anchor.x,
        plan.brand_anchor.y,
        &fields.make,
    );
    text::draw(
        &mut canvas,
        &fonts.model,
        normal,
        TEXT_COLOR,
        plan.model_anchor.x,
        plan.model_anchor.y,
        &fields.model,
    );
    text::draw_right(
        &mut canvas,
        &fonts.lens,
        small,
        TEXT_COLOR,
        plan.exposure_anchor.x,
        plan.exposure_anchor.y,
        &fields.exposure_line(),
    );
    text::draw_right(
        &mut canvas,
        &fonts.lens,
        small,
        TEXT_COLOR,
        plan.lens_anchor.x,
        plan.lens_anchor.y,
        &fields.lens,
    );

    if let (Some(rect), Some(logo)) = (plan.logo_rect, logo) {
        let stretched = imageops::resize(logo, rect.width, rect.height, FilterType::Lanczos3);
        // Alpha-composited, so logo transparency shows the white band through
        imageops::overlay(&mut canvas, &stretched, rect.x as i64, rect.y as i64);
    }

    Ok(canvas)
}

/// Encode the canvas losslessly to PNG, preserving the alpha channel.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ComposeError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ComposeError::Failed(format!("PNG encode: {e}")))?;
    Ok(buf)
}

/// Stroke the border outline.
///
/// The stroke is inset one pixel from the canvas edge to avoid
/// anti-aliasing gaps when the output is displayed scaled.
fn draw_border(canvas: &mut RgbaImage, width: u32, color: Rgba<u8>) {
    let (w, h) = canvas.dimensions();
    for ring in 0..width {
        let off = 1 + ring as i64;
        let (x0, y0) = (off, off);
        let (x1, y1) = (w as i64 - 1 - off, h as i64 - 1 - off);
        if x0 > x1 || y0 > y1 {
            break;
        }
        for x in x0..=x1 {
            canvas.put_pixel(x as u32, y0 as u32, color);
            canvas.put_pixel(x as u32, y1 as u32, color);
        }
        for y in y0..=y1 {
            canvas.put_pixel(x0 as u32, y as u32, color);
            canvas.put_pixel(x1 as u32, y as u32, color);
        }
    }
}
