//! Target geometry selection for the output panel.
//!
//! Given post-crop source dimensions, chooses an output size whose width
//! falls in the configured band (preferring the bezel-safe width) at the
//! strict panel height, and decides how to get there: a direct distorting
//! scale when the stretch/squeeze stays small, or an aspect-preserving scale
//! followed by a centered crop when it does not.

use crate::config::CoreConfig;

/// Distortion factors within this distance of 1.0 count as undistorted.
const DISTORTION_EPSILON: f64 = 0.005;

/// How the source is brought to the target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePlan {
    /// Scale directly to the target, accepting the aspect distortion, and
    /// reset the sample aspect ratio.
    Distort,
    /// Scale preserving aspect so the frame covers the target, then crop the
    /// overshoot centered.
    ScaleCrop {
        scale_w: u32,
        scale_h: u32,
        crop_x: u32,
        crop_y: u32,
    },
}

/// Chosen output geometry for one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetGeometry {
    /// Output width, always within the configured band
    pub width: u32,
    /// Output height, always the strict panel height
    pub height: u32,
    /// Chosen width divided by the distortion-free width implied by the
    /// source aspect ratio at the target height (>1 stretch, <1 squeeze)
    pub distortion: f64,
    /// Whether the output visibly stretches or squeezes the content
    pub distorted: bool,
    /// Whether the required distortion exceeds the stretch/squeeze tolerance.
    /// The geometry is still usable; the tolerance is a soft preference.
    pub over_tolerance: bool,
    /// How to reach the target dimensions
    pub plan: ScalePlan,
}

/// Selects the output geometry for a source of the given post-crop size.
///
/// The width the source would need at the target height to keep its aspect
/// ratio is clamped into `[width_min, width_max]`, snapping to
/// `width_preferred` when within `width_preference_strength` pixels. The
/// resulting distortion factor is flagged but never aborts: even a source far
/// outside tolerance gets a usable `(width, height)` pair.
#[must_use]
pub fn select_geometry(width: u32, height: u32, config: &CoreConfig) -> TargetGeometry {
    let aspect = f64::from(width) / f64::from(height);
    let natural_width = (aspect * f64::from(config.target_height)).round() as u32;

    let target_w = if natural_width <= config.width_min {
        config.width_min
    } else if natural_width >= config.width_max {
        config.width_max
    } else if natural_width.abs_diff(config.width_preferred) <= config.width_preference_strength {
        config.width_preferred
    } else {
        natural_width
    };
    let target_h = config.target_height;

    let distortion = f64::from(target_w) / f64::from(natural_width);
    let over_tolerance = distortion < config.min_squeeze || distortion > config.max_stretch;

    // Needed factor regardless of direction: 1.067 for a squeeze to 0.938.
    let needed_factor = distortion.max(1.0 / distortion);

    let plan = if !over_tolerance && needed_factor <= config.preferred_max_distortion {
        ScalePlan::Distort
    } else {
        scale_crop_plan(aspect, target_w, target_h)
    };

    let distorted = matches!(plan, ScalePlan::Distort)
        && (distortion - 1.0).abs() > DISTORTION_EPSILON;

    TargetGeometry {
        width: target_w,
        height: target_h,
        distortion,
        distorted,
        over_tolerance,
        plan,
    }
}

/// Aspect-preserving cover scale plus centered crop to exactly the target.
fn scale_crop_plan(aspect: f64, target_w: u32, target_h: u32) -> ScalePlan {
    let target_aspect = f64::from(target_w) / f64::from(target_h);

    let (scale_w, scale_h) = if aspect < target_aspect {
        // Source is narrower: fill the width, overshoot vertically.
        let scale_h = (f64::from(target_w) / aspect).round() as u32;
        (target_w, scale_h.max(target_h))
    } else {
        // Source is wider: fill the height, overshoot horizontally.
        let scale_w = (f64::from(target_h) * aspect).round() as u32;
        (scale_w.max(target_w), target_h)
    };

    ScalePlan::ScaleCrop {
        scale_w,
        scale_h,
        crop_x: (scale_w - target_w) / 2,
        crop_y: (scale_h - target_h) / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CoreConfig {
        CoreConfig::default()
    }

    #[test]
    fn test_natural_width_in_band_is_kept() {
        // 1.65 aspect at 480 -> natural width 792, inside [770, 800] and not
        // within snap distance of 780.
        let geometry = select_geometry(1650, 1000, &config());
        assert_eq!(geometry.width, 792);
        assert_eq!(geometry.height, 480);
        assert!(!geometry.distorted);
        assert!(!geometry.over_tolerance);
        assert_eq!(geometry.plan, ScalePlan::Distort);
    }

    #[test]
    fn test_natural_width_snaps_to_preferred() {
        // 1.6333 aspect -> natural width 784, within 5 px of 780.
        let geometry = select_geometry(1633, 1000, &config());
        assert_eq!(geometry.width, 780);
        assert_eq!(geometry.height, 480);
    }

    #[test]
    fn test_wide_source_clamps_to_max_width() {
        // 1920x1080 -> natural width 853, above the band.
        let geometry = select_geometry(1920, 1080, &config());
        assert_eq!(geometry.width, 800);
        assert_eq!(geometry.height, 480);
        assert!((geometry.distortion - 800.0 / 853.0).abs() < 1e-6);
        assert!(geometry.distorted);
        assert!(!geometry.over_tolerance);
        assert_eq!(geometry.plan, ScalePlan::Distort);
    }

    #[test]
    fn test_narrow_source_over_tolerance_still_emits_geometry() {
        // 640x480 -> natural width 640, needs 770/640 ~ 1.203 stretch, past
        // the 1.15 tolerance. Must still produce (770, 480), flagged.
        let geometry = select_geometry(640, 480, &config());
        assert_eq!(geometry.width, 770);
        assert_eq!(geometry.height, 480);
        assert!(geometry.over_tolerance);
        assert!((geometry.distortion - 770.0 / 640.0).abs() < 1e-6);

        // Falls back to cover-scale plus centered crop.
        match geometry.plan {
            ScalePlan::ScaleCrop {
                scale_w,
                scale_h,
                crop_x,
                crop_y,
            } => {
                assert_eq!(scale_w, 770);
                assert_eq!(scale_h, 578);
                assert_eq!(crop_x, 0);
                assert_eq!(crop_y, 49);
            }
            ScalePlan::Distort => panic!("expected scale+crop plan"),
        }
    }

    #[test]
    fn test_ultrawide_source_uses_scale_crop() {
        // 21:9 -> natural width 1138, squeeze to 800 would be 0.703, far
        // outside tolerance; cover-scale fills the height and crops width.
        let geometry = select_geometry(2560, 1080, &config());
        assert_eq!(geometry.width, 800);
        assert_eq!(geometry.height, 480);
        assert!(geometry.over_tolerance);
        match geometry.plan {
            ScalePlan::ScaleCrop {
                scale_w,
                scale_h,
                crop_x,
                crop_y,
            } => {
                assert_eq!(scale_h, 480);
                assert!(scale_w >= 800);
                assert_eq!(crop_y, 0);
                assert_eq!(crop_x, (scale_w - 800) / 2);
            }
            ScalePlan::Distort => panic!("expected scale+crop plan"),
        }
    }

    #[test]
    fn test_band_width_property_across_common_aspects() {
        // For aspects from 4:3 to 21:9 the selector must stay in the band at
        // the strict height.
        let sources = [
            (640u32, 480u32),
            (1280, 720),
            (1440, 1080),
            (1920, 1080),
            (1998, 1080),
            (2560, 1080),
        ];
        let config = config();
        for (w, h) in sources {
            let geometry = select_geometry(w, h, &config);
            assert!(
                (770..=800).contains(&geometry.width),
                "width {} out of band for {}x{}",
                geometry.width,
                w,
                h
            );
            assert_eq!(geometry.height, 480);
        }
    }

    #[test]
    fn test_exact_target_aspect_needs_no_distortion() {
        // 1600x960 is exactly 800:480.
        let geometry = select_geometry(1600, 960, &config());
        assert_eq!(geometry.width, 800);
        assert!((geometry.distortion - 1.0).abs() < 1e-9);
        assert!(!geometry.distorted);
        assert_eq!(geometry.plan, ScalePlan::Distort);
    }
}
