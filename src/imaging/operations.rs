//! High-level resize operations.
//!
//! These functions combine calculations with backend execution. They take a
//! request, compute a [`RenderPlan`], and call the backend. Everything here is
//! synchronous; [`Resizer`](crate::resizer::Resizer) moves it off-thread.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_canvas_pixels, calculate_draw_rect, resolve_target_size};
use super::params::{Filter, RenderPlan, ResizeRequest, Size};
use super::raster::RasterImage;

/// Result type for resize operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Plan a resize without executing it.
///
/// Rejects empty or non-finite source and target sizes, and display scales
/// that are not strictly positive.
pub fn plan_resize(
    source: Size,
    request: &ResizeRequest,
    display_scale: f32,
    filter: Filter,
) -> Result<RenderPlan> {
    if !source.is_drawable() {
        return Err(BackendError::InvalidSize(format!(
            "source {}x{} is not drawable",
            source.width, source.height
        )));
    }
    let target = resolve_target_size(&request.policy);
    if !target.is_drawable() {
        return Err(BackendError::InvalidSize(format!(
            "{} target {}x{} is not drawable",
            request.policy.name(),
            target.width,
            target.height
        )));
    }
    if !(display_scale.is_finite() && display_scale > 0.0) {
        return Err(BackendError::InvalidSize(format!(
            "display scale {} must be positive",
            display_scale
        )));
    }

    let (canvas_width, canvas_height) = calculate_canvas_pixels(target, display_scale);

    Ok(RenderPlan {
        target,
        canvas_width,
        canvas_height,
        display_scale,
        rect: calculate_draw_rect(&request.policy, source),
        corner_radius: request.corner_radius,
        filter,
    })
}

/// Resize `source` synchronously on the calling thread.
pub fn resize(
    backend: &impl ImageBackend,
    source: &RasterImage,
    request: &ResizeRequest,
    display_scale: f32,
    filter: Filter,
) -> Result<RasterImage> {
    let plan = plan_resize(source.size(), request, display_scale, filter)?;
    log::debug!(
        "{} {}x{} -> {}x{}px (rect {:.1},{:.1} {:.1}x{:.1}, radius {})",
        request.policy.name(),
        source.size().width,
        source.size().height,
        plan.canvas_width,
        plan.canvas_height,
        plan.rect.x,
        plan.rect.y,
        plan.rect.width,
        plan.rect.height,
        plan.corner_radius.value()
    );
    backend.render(source, &plan)
}
