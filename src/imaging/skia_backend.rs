//! `tiny-skia` rendering backend.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Canvas | `tiny_skia::Pixmap::new` (transparent, premultiplied RGBA8) |
//! | Rounded clip | `tiny_skia::Mask::fill_path` with a cubic rounded-rect path |
//! | Scaled draw | `Pixmap::draw_pixmap` with a scale + translate `Transform` |
//! | Extraction | demultiply back into an `image::RgbaImage` |
//!
//! All drawing happens in physical pixels: the logical plan is multiplied by
//! the display scale once, when the transform and clip path are built.

use super::backend::{BackendError, ImageBackend};
use super::calculations::clamp_corner_radius;
use super::params::{Filter, RenderPlan};
use super::raster::RasterImage;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, IntSize, Mask, Path, PathBuilder, Pixmap, PixmapPaint,
    Transform,
};

/// Cubic Bézier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Production backend drawing on a `tiny-skia` pixmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaBackend;

impl SkiaBackend {
    pub fn new() -> Self {
        Self
    }
}

fn quality_for(filter: Filter) -> FilterQuality {
    match filter {
        Filter::Nearest => FilterQuality::Nearest,
        Filter::Bilinear => FilterQuality::Bilinear,
        Filter::Bicubic => FilterQuality::Bicubic,
    }
}

/// Copy straight-alpha RGBA into a premultiplied pixmap.
fn to_pixmap(source: &RgbaImage) -> Result<Pixmap, BackendError> {
    let size = IntSize::from_wh(source.width(), source.height()).ok_or_else(|| {
        BackendError::InvalidSize(format!(
            "source is {}x{} pixels",
            source.width(),
            source.height()
        ))
    })?;

    let mut data = Vec::with_capacity(source.as_raw().len());
    for px in source.pixels() {
        let [r, g, b, a] = px.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| BackendError::ProcessingFailed("source pixmap length mismatch".into()))
}

/// Demultiply a canvas back into straight-alpha RGBA.
fn from_pixmap(canvas: &Pixmap) -> Result<RgbaImage, BackendError> {
    let mut data = Vec::with_capacity(canvas.data().len());
    for px in canvas.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(canvas.width(), canvas.height(), data)
        .ok_or_else(|| BackendError::ProcessingFailed("canvas buffer length mismatch".into()))
}

/// Closed rounded-rectangle path with the origin at (0, 0).
fn rounded_rect_path(width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius;
    let k = r * KAPPA;
    let mut pb = PathBuilder::new();

    pb.move_to(r, 0.0);
    pb.line_to(width - r, 0.0);
    pb.cubic_to(width - r + k, 0.0, width, r - k, width, r);
    pb.line_to(width, height - r);
    pb.cubic_to(width, height - r + k, width - r + k, height, width - r, height);
    pb.line_to(r, height);
    pb.cubic_to(r - k, height, 0.0, height - r + k, 0.0, height - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();

    pb.finish()
}

fn build_clip_mask(plan: &RenderPlan) -> Result<Option<Mask>, BackendError> {
    if !plan.corner_radius.clips() {
        return Ok(None);
    }

    let scale = plan.display_scale;
    let radius = clamp_corner_radius(plan.corner_radius.value(), plan.target) * scale;
    let path = rounded_rect_path(plan.target.width * scale, plan.target.height * scale, radius)
        .ok_or_else(|| BackendError::InvalidSize("degenerate clip path".into()))?;

    let mut mask = Mask::new(plan.canvas_width, plan.canvas_height)
        .ok_or_else(|| BackendError::InvalidSize("clip mask has zero size".into()))?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Ok(Some(mask))
}

impl ImageBackend for SkiaBackend {
    fn render(&self, source: &RasterImage, plan: &RenderPlan) -> Result<RasterImage, BackendError> {
        let mut canvas = Pixmap::new(plan.canvas_width, plan.canvas_height).ok_or_else(|| {
            BackendError::InvalidSize(format!(
                "canvas is {}x{} pixels",
                plan.canvas_width, plan.canvas_height
            ))
        })?;
        let src = to_pixmap(source.pixels())?;
        let mask = build_clip_mask(plan)?;

        let scale = plan.display_scale;
        let sx = plan.rect.width * scale / src.width() as f32;
        let sy = plan.rect.height * scale / src.height() as f32;
        let tx = plan.rect.x * scale;
        let ty = plan.rect.y * scale;

        // Unit scale on the pixel grid: sample exactly, whatever the filter.
        let exact = sx == 1.0 && sy == 1.0 && tx.fract() == 0.0 && ty.fract() == 0.0;
        let paint = PixmapPaint {
            quality: if exact {
                FilterQuality::Nearest
            } else {
                quality_for(plan.filter)
            },
            ..PixmapPaint::default()
        };

        canvas.draw_pixmap(
            0,
            0,
            src.as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, tx, ty),
            mask.as_ref(),
        );

        Ok(RasterImage::new(from_pixmap(&canvas)?, scale))
    }
}
