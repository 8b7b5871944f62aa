//! Image resizing — geometry, canvas and pixels.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image::ImageReader`, `ImageBuffer::save` |
//! | **Canvas** | `tiny_skia::Pixmap` (transparent) |
//! | **Rounded clip** | `tiny_skia::Mask` from a rounded-rect path |
//! | **Scaled draw** | `Pixmap::draw_pixmap` (nearest / bilinear / bicubic) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for resize geometry (unit testable)
//! - **Parameters**: Data structures describing a resize
//! - **Raster**: [`RasterImage`], the immutable pixel buffer
//! - **Backend**: [`ImageBackend`] trait + [`SkiaBackend`]
//! - **Operations**: Planning and synchronous execution

pub mod backend;
mod calculations;
pub mod operations;
mod params;
mod raster;
pub mod skia_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{
    calculate_canvas_pixels, calculate_draw_rect, calculate_scale_factor, resolve_target_size,
};
pub use operations::{plan_resize, resize};
pub use params::{CornerRadius, DrawRect, Filter, RenderPlan, ResizeRequest, Size, SizePolicy};
pub use raster::RasterImage;
pub use skia_backend::SkiaBackend;
