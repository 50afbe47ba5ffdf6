//! Glyph measurement and rendering.
//!
//! Thin layer over `ab_glyph`: measure a line of text, or rasterize it onto
//! an RGBA canvas at a top-left or right-pinned anchor. Rendering is
//! deterministic — same font, size, and text always produce the same pixels,
//! which is what makes byte-identical reruns possible.
//!
//! Anchors are top coordinates, not baselines: `y` is where the ascender
//! line sits, matching how the layout planner stacks the band lines.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Embedded fallback face, used when a configured font path is absent.
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Measure a single line of text at the given pixel size.
///
/// Returns `(width, height)`: advance width including kerning, and the
/// full line height (ascent + descent).
pub fn measure(font: &FontVec, size: u32, text: &str) -> (u32, u32) {
    let scale = PxScale::from(size as f32);
    let scaled = font.as_scaled(scale);

    let mut width = 0.0f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    (width.ceil() as u32, scaled.height().ceil() as u32)
}

/// Draw a line of text with its top-left corner at `(x, y)`.
pub fn draw(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: u32,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    text: &str,
) {
    let scale = PxScale::from(size as f32);
    let scaled = font.as_scaled(scale);

    let baseline_y = y as f32 + scaled.ascent();
    let mut cursor_x = x as f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;

    let (canvas_w, canvas_h) = canvas.dimensions();

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let gx = px as i32 + bounds.min.x as i32;
                let gy = py as i32 + bounds.min.y as i32;
                if gx >= 0 && gy >= 0 && (gx as u32) < canvas_w && (gy as u32) < canvas_h {
                    let existing = *canvas.get_pixel(gx as u32, gy as u32);
                    canvas.put_pixel(gx as u32, gy as u32, blend(existing, color, coverage));
                }
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
}

/// Draw a line of text with its right edge pinned to `right_x`.
///
/// The text grows leftward from the anchor, so long lens names never
/// overflow the right border.
pub fn draw_right(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: u32,
    color: Rgba<u8>,
    right_x: i32,
    y: i32,
    text: &str,
) {
    let (width, _) = measure(font, size, text);
    draw(canvas, font, size, color, right_x - width as i32, y, text);
}

/// Blend `color` over `existing` weighted by glyph coverage.
fn blend(existing: Rgba<u8>, color: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 {
        (a as f32 + (b as f32 - a as f32) * coverage).round() as u8
    };
    Rgba([
        mix(existing[0], color[0]),
        mix(existing[1], color[1]),
        mix(existing[2], color[2]),
        mix(existing[3], color[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn test_font() -> FontVec {
        FontVec::try_from_vec(EMBEDDED_FONT.to_vec()).unwrap()
    }

    #[test]
    fn measure_grows_with_text_length() {
        let font = test_font();
        let (w1, _) = measure(&font, 24, "A");
        let (w2, _) = measure(&font, 24, "AAAA");
        assert!(w2 > w1);
    }

    #[test]
    fn measure_grows_with_size() {
        let font = test_font();
        let (w1, h1) = measure(&font, 12, "Hello");
        let (w2, h2) = measure(&font, 24, "Hello");
        let (w3, h3) = measure(&font, 48, "Hello");
        assert!(w2 > w1 && h2 > h1);
        assert!(w3 > w2 && h3 > h2);
    }

    #[test]
    fn measure_empty_text_has_zero_width() {
        let font = test_font();
        let (w, h) = measure(&font, 24, "");
        assert_eq!(w, 0);
        assert!(h > 0);
    }

    #[test]
    fn draw_produces_dark_pixels() {
        let font = test_font();
        let mut canvas = RgbaImage::from_pixel(200, 60, WHITE);
        draw(&mut canvas, &font, 32, BLACK, 10, 10, "EXIF");

        let dark = canvas.pixels().filter(|p| p[0] < 128).count();
        assert!(dark > 0, "rendered text should darken some pixels");
    }

    #[test]
    fn draw_is_deterministic() {
        let font = test_font();
        let mut a = RgbaImage::from_pixel(200, 60, WHITE);
        let mut b = RgbaImage::from_pixel(200, 60, WHITE);
        draw(&mut a, &font, 32, BLACK, 10, 10, "NIKON");
        draw(&mut b, &font, 32, BLACK, 10, 10, "NIKON");
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn draw_right_matches_left_draw_at_offset() {
        let font = test_font();
        let text = "1/200";
        let (width, _) = measure(&font, 24, text);

        let mut right_anchored = RgbaImage::from_pixel(300, 60, WHITE);
        draw_right(&mut right_anchored, &font, 24, BLACK, 250, 10, text);

        let mut left_drawn = RgbaImage::from_pixel(300, 60, WHITE);
        draw(&mut left_drawn, &font, 24, BLACK, 250 - width as i32, 10, text);

        assert_eq!(right_anchored.as_raw(), left_drawn.as_raw());
    }

    #[test]
    fn draw_clips_at_canvas_edges() {
        let font = test_font();
        let mut canvas = RgbaImage::from_pixel(40, 20, WHITE);
        // Anchors far outside the canvas must not panic
        draw(&mut canvas, &font, 32, BLACK, -100, -100, "clipped");
        draw(&mut canvas, &font, 32, BLACK, 1000, 1000, "clipped");
    }

    #[test]
    fn blend_full_coverage_replaces_pixel() {
        assert_eq!(blend(WHITE, BLACK, 1.0), BLACK);
        assert_eq!(blend(WHITE, BLACK, 0.0), WHITE);
    }
}
