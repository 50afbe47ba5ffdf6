//! Canvas and element geometry.
//!
//! Given the source dimensions, the camera make, and the config, this module
//! computes everything the compositor draws: canvas size, text anchors, and
//! the logo rectangle. All positions are fixed pixel offsets tied to the
//! band layout — there is no relative or responsive placement, and the plan
//! for a given input is always identical, so reruns are byte-reproducible.
//!
//! The offsets below are the one consistent constant set for this layout;
//! they are deliberately plain constants rather than config so golden-image
//! comparisons stay stable.

use crate::config::WatermarkConfig;

/// Distance of the left-aligned text column from the canvas left edge, and
/// of the right-anchored column from the canvas right edge.
pub const TEXT_MARGIN: i32 = 315;

/// Vertical padding between stacked band elements.
pub const BAND_PADDING: u32 = 10;

/// How far the exposure triad sits above the model line top.
pub const EXPOSURE_RAISE: i32 = 35;

/// How far the lens line sits below the model line top.
pub const LENS_DROP: i32 = 30;

/// Logo distance from the canvas left edge.
pub const LOGO_MARGIN: i32 = 10;

/// Extra band height over the Canon logo, replacing `box_height` for Canon.
pub const CANON_BAND_PADDING: u32 = 10;

/// Camera manufacturer family, derived from the EXIF make string.
///
/// Drives logo selection, logo size, and the band height variant. Anything
/// that is not Nikon or Canon renders without a logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Nikon,
    Canon,
    Other,
}

impl Brand {
    /// Case-insensitive substring match; Nikon wins over Canon if a make
    /// string somehow contains both.
    pub fn classify(make: &str) -> Self {
        let upper = make.to_uppercase();
        if upper.contains("NIKON") {
            Brand::Nikon
        } else if upper.contains("CANON") {
            Brand::Canon
        } else {
            Brand::Other
        }
    }
}

/// A named position on the canvas. For right-anchored text the `x` is the
/// pinned right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

/// Placement and exact target size for a brand logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The complete geometry for one image's composition.
///
/// Computed once per image, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub border_width: u32,
    pub box_height: u32,
    pub brand: Brand,
    /// Brand line, left-aligned.
    pub brand_anchor: Anchor,
    /// Model line, left-aligned.
    pub model_anchor: Anchor,
    /// Exposure triad, right-anchored.
    pub exposure_anchor: Anchor,
    /// Lens line, right-anchored.
    pub lens_anchor: Anchor,
    /// Present only for Nikon/Canon.
    pub logo_rect: Option<LogoRect>,
}

/// Outcome of planning: either a full plan or a deliberate skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    Plan(CanvasPlan),
    /// The image is narrower than the configured threshold and watermarking
    /// was not forced. A policy gate, not an error.
    Skip { width: u32, threshold: u32 },
}

/// Compute the canvas plan for one image.
///
/// `model_text_height` is the measured line height of the model string at
/// the normal font size; the logo bottom is aligned to the model line with
/// it. `force` bypasses the width threshold gate.
pub fn plan(
    image_width: u32,
    image_height: u32,
    make: &str,
    model_text_height: u32,
    force: bool,
    config: &WatermarkConfig,
) -> LayoutOutcome {
    if !force && image_width < config.width_threshold {
        return LayoutOutcome::Skip {
            width: image_width,
            threshold: config.width_threshold,
        };
    }

    let brand = Brand::classify(make);
    let border = config.image.border_width;

    // The band must contain the largest asset drawn in it; Canon logos are
    // shorter, so the band shrinks to the logo height plus padding.
    let box_height = match brand {
        Brand::Canon => config.image.canon_logo_size.height + CANON_BAND_PADDING,
        _ => config.image.box_height,
    };

    let canvas_width = image_width + 2 * border;
    let canvas_height = image_height + box_height + 2 * border;

    let brand_top = (image_height + border + BAND_PADDING) as i32;
    let model_top = brand_top + (config.font.normal_size + BAND_PADDING) as i32;
    let right_x = canvas_width as i32 - TEXT_MARGIN;

    let logo_size = match brand {
        Brand::Nikon => Some(config.image.logo_size),
        Brand::Canon => Some(config.image.canon_logo_size),
        Brand::Other => None,
    };
    let logo_rect = logo_size.map(|size| LogoRect {
        x: LOGO_MARGIN,
        y: model_top - model_text_height as i32,
        width: size.width,
        height: size.height,
    });

    LayoutOutcome::Plan(CanvasPlan {
        canvas_width,
        canvas_height,
        border_width: border,
        box_height,
        brand,
        brand_anchor: Anchor {
            x: TEXT_MARGIN,
            y: brand_top,
        },
        model_anchor: Anchor {
            x: TEXT_MARGIN,
            y: model_top,
        },
        exposure_anchor: Anchor {
            x: right_x,
            y: model_top - EXPOSURE_RAISE,
        },
        lens_anchor: Anchor {
            x: right_x,
            y: model_top + LENS_DROP,
        },
        logo_rect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatermarkConfig;

    fn config() -> WatermarkConfig {
        WatermarkConfig::default()
    }

    fn expect_plan(outcome: LayoutOutcome) -> CanvasPlan {
        match outcome {
            LayoutOutcome::Plan(plan) => plan,
            LayoutOutcome::Skip { .. } => panic!("expected a plan, got a skip"),
        }
    }

    // =========================================================================
    // Brand classification
    // =========================================================================

    #[test]
    fn classify_is_case_insensitive_substring() {
        assert_eq!(Brand::classify("NIKON CORPORATION"), Brand::Nikon);
        assert_eq!(Brand::classify("nikon"), Brand::Nikon);
        assert_eq!(Brand::classify("Nikon Z9"), Brand::Nikon);
        assert_eq!(Brand::classify("Canon"), Brand::Canon);
        assert_eq!(Brand::classify("CANON INC."), Brand::Canon);
        assert_eq!(Brand::classify("SONY"), Brand::Other);
        assert_eq!(Brand::classify("N/A"), Brand::Other);
        assert_eq!(Brand::classify(""), Brand::Other);
    }

    // =========================================================================
    // Skip gate
    // =========================================================================

    #[test]
    fn narrow_image_skips() {
        let outcome = plan(1000, 800, "SONY", 100, false, &config());
        assert_eq!(
            outcome,
            LayoutOutcome::Skip {
                width: 1000,
                threshold: 1800
            }
        );
    }

    #[test]
    fn force_overrides_skip() {
        let outcome = plan(1000, 800, "SONY", 100, true, &config());
        let plan = expect_plan(outcome);
        assert_eq!(plan.canvas_width, 1020);
    }

    #[test]
    fn width_at_threshold_is_not_skipped() {
        let outcome = plan(1800, 1200, "SONY", 100, false, &config());
        assert!(matches!(outcome, LayoutOutcome::Plan(_)));
    }

    // =========================================================================
    // Canvas size invariant
    // =========================================================================

    #[test]
    fn canvas_size_adds_border_and_band() {
        let plan = expect_plan(plan(4000, 3000, "SONY", 100, false, &config()));
        // (W + 2*border, H + box_height + 2*border)
        assert_eq!(plan.canvas_width, 4000 + 20);
        assert_eq!(plan.canvas_height, 3000 + 150 + 20);
        assert_eq!(plan.box_height, 150);
    }

    #[test]
    fn canon_band_derives_from_logo_height() {
        let plan = expect_plan(plan(4000, 3000, "CANON", 100, false, &config()));
        // canon_logo_size.height (100) + padding (10)
        assert_eq!(plan.box_height, 110);
        assert_eq!(plan.canvas_width, 4020);
        assert_eq!(plan.canvas_height, 3000 + 110 + 20);
    }

    #[test]
    fn nikon_keeps_default_band_height() {
        let plan = expect_plan(plan(4000, 3000, "NIKON CORPORATION", 100, false, &config()));
        assert_eq!(plan.box_height, 150);
    }

    // =========================================================================
    // Anchors
    // =========================================================================

    #[test]
    fn text_anchors_follow_band_layout() {
        let plan = expect_plan(plan(4000, 3000, "NIKON", 100, false, &config()));
        let brand_top = 3000 + 10 + 10; // image + border + padding
        let model_top = brand_top + 100 + 10; // + normal_size + padding

        assert_eq!(plan.brand_anchor, Anchor { x: 315, y: brand_top });
        assert_eq!(plan.model_anchor, Anchor { x: 315, y: model_top });
        assert_eq!(
            plan.exposure_anchor,
            Anchor {
                x: 4020 - 315,
                y: model_top - EXPOSURE_RAISE
            }
        );
        assert_eq!(
            plan.lens_anchor,
            Anchor {
                x: 4020 - 315,
                y: model_top + LENS_DROP
            }
        );
    }

    #[test]
    fn right_anchor_is_pinned_to_canvas_width() {
        let plan = expect_plan(plan(2000, 1500, "SONY", 100, false, &config()));
        assert_eq!(plan.exposure_anchor.x, plan.canvas_width as i32 - 315);
        assert_eq!(plan.lens_anchor.x, plan.canvas_width as i32 - 315);
    }

    // =========================================================================
    // Logo rect
    // =========================================================================

    #[test]
    fn nikon_logo_uses_configured_size() {
        let plan = expect_plan(plan(4000, 3000, "NIKON CORPORATION", 117, false, &config()));
        let rect = plan.logo_rect.unwrap();
        assert_eq!(rect.width, 364);
        assert_eq!(rect.height, 200);
        assert_eq!(rect.x, LOGO_MARGIN);
        // Logo bottom aligned near the model line via its measured height
        assert_eq!(rect.y, plan.model_anchor.y - 117);
    }

    #[test]
    fn canon_logo_uses_canon_size() {
        let plan = expect_plan(plan(4000, 3000, "Canon", 117, false, &config()));
        let rect = plan.logo_rect.unwrap();
        assert_eq!(rect.width, 182);
        assert_eq!(rect.height, 100);
    }

    #[test]
    fn other_brand_has_no_logo() {
        let plan = expect_plan(plan(4000, 3000, "SONY", 117, false, &config()));
        assert!(plan.logo_rect.is_none());
        assert_eq!(plan.brand, Brand::Other);
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    #[test]
    fn plan_is_deterministic() {
        let a = plan(4000, 3000, "Canon", 117, false, &config());
        let b = plan(4000, 3000, "Canon", 117, false, &config());
        assert_eq!(a, b);
    }
}
