//! Pure calculation functions for resize geometry.
//!
//! All functions here are pure and testable without any pixels or canvases.

use super::params::{DrawRect, Size, SizePolicy};

/// Resolve a policy to its target box.
///
/// # Examples
/// ```
/// # use simple_resize::imaging::{Size, SizePolicy, resolve_target_size};
/// assert_eq!(resolve_target_size(&SizePolicy::Fit(50.0, 80.0)), Size::new(50.0, 80.0));
/// ```
pub fn resolve_target_size(policy: &SizePolicy) -> Size {
    match *policy {
        SizePolicy::Fill(w, h) | SizePolicy::Fit(w, h) | SizePolicy::Match(w, h) => Size::new(w, h),
        SizePolicy::FillSize(size) => size,
    }
}

/// Scale factor applied uniformly to the source.
///
/// - Fill / FillSize: `max(aspect_w, aspect_h)` (cover)
/// - Fit: `min(aspect_w, aspect_h)` (contain)
/// - Match: `target.width / target.height`, independent of the source
///
/// # Arguments
/// * `policy` - Size policy for this resize
/// * `source` - Source size in logical units
pub fn calculate_scale_factor(policy: &SizePolicy, source: Size) -> f32 {
    let target = resolve_target_size(policy);
    let aspect_w = target.width / source.width;
    let aspect_h = target.height / source.height;

    match policy {
        SizePolicy::Fill(..) | SizePolicy::FillSize(_) => aspect_w.max(aspect_h),
        SizePolicy::Fit(..) => aspect_w.min(aspect_h),
        // Aspect-ratio override: ignores the source entirely.
        SizePolicy::Match(..) => target.width / target.height,
    }
}

/// Rectangle the scaled source occupies, centred in the target box.
///
/// Negative origins mean the source overflows the box on that axis and is
/// cropped.
///
/// # Examples
/// ```
/// # use simple_resize::imaging::{Size, SizePolicy, calculate_draw_rect};
/// // 100x100 filled into 50x100: scale 1.0, 25 cropped from each side
/// let rect = calculate_draw_rect(&SizePolicy::Fill(50.0, 100.0), Size::new(100.0, 100.0));
/// assert_eq!((rect.x, rect.y, rect.width, rect.height), (-25.0, 0.0, 100.0, 100.0));
/// ```
pub fn calculate_draw_rect(policy: &SizePolicy, source: Size) -> DrawRect {
    let target = resolve_target_size(policy);
    let k = calculate_scale_factor(policy, source);

    let width = source.width * k;
    let height = source.height * k;

    DrawRect {
        x: (target.width - width) / 2.0,
        y: (target.height - height) / 2.0,
        width,
        height,
    }
}

/// Physical pixel size of a canvas with the given logical size and density.
///
/// Fractional pixel counts round up so the whole logical box is covered.
pub fn calculate_canvas_pixels(target: Size, display_scale: f32) -> (u32, u32) {
    let px = |logical: f32| (logical * display_scale).ceil().max(0.0) as u32;
    (px(target.width), px(target.height))
}

/// Clamp a corner radius to what fits in the box (half the shorter side).
pub fn clamp_corner_radius(radius: f32, target: Size) -> f32 {
    radius.min(target.width.min(target.height) / 2.0).max(0.0)
}
