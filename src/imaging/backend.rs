//! Rendering backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the canvas seam: given a source raster and a
//! fully resolved [`RenderPlan`], produce the output raster. Everything above
//! it (planning, scheduling, delivery) is backend-agnostic.
//!
//! The production implementation is
//! [`SkiaBackend`](super::skia_backend::SkiaBackend), drawing on a
//! `tiny-skia` pixmap.

use super::params::RenderPlan;
use super::raster::RasterImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid size: {0}")]
    InvalidSize(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for rendering backends.
///
/// Implementations must be `Send + Sync` so one backend can serve every
/// worker of the resize pool.
pub trait ImageBackend: Send + Sync {
    /// Draw `source` onto a fresh canvas as described by `plan`.
    fn render(&self, source: &RasterImage, plan: &RenderPlan) -> Result<RasterImage, BackendError>;
}

impl<T: ImageBackend + ?Sized> ImageBackend for std::sync::Arc<T> {
    fn render(&self, source: &RasterImage, plan: &RenderPlan) -> Result<RasterImage, BackendError> {
        (**self).render(source, plan)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::Mutex;

    /// Mock backend that records plans and returns a blank canvas of the
    /// planned pixel size.
    /// Uses Mutex (not RefCell) so it is Sync and works from pool workers.
    #[derive(Default)]
    pub struct MockBackend {
        pub plans: Mutex<Vec<RenderPlan>>,
        pub fail: bool,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn get_plans(&self) -> Vec<RenderPlan> {
            self.plans.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn render(
            &self,
            _source: &RasterImage,
            plan: &RenderPlan,
        ) -> Result<RasterImage, BackendError> {
            self.plans.lock().unwrap().push(*plan);
            if self.fail {
                return Err(BackendError::ProcessingFailed("mock failure".to_string()));
            }
            Ok(RasterImage::new(
                RgbaImage::new(plan.canvas_width, plan.canvas_height),
                plan.display_scale,
            ))
        }
    }

    #[test]
    fn mock_records_plan() {
        use crate::imaging::params::{CornerRadius, DrawRect, Filter, Size};

        let backend = MockBackend::new();
        let plan = RenderPlan {
            target: Size::new(10.0, 20.0),
            canvas_width: 20,
            canvas_height: 40,
            display_scale: 2.0,
            rect: DrawRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 20.0,
            },
            corner_radius: CornerRadius::NONE,
            filter: Filter::Nearest,
        };
        let source = RasterImage::from(RgbaImage::new(1, 1));

        let out = backend.render(&source, &plan).unwrap();
        assert_eq!((out.pixel_width(), out.pixel_height()), (20, 40));
        assert_eq!(backend.get_plans(), vec![plan]);
    }
}
