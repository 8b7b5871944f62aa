//! # Simple Resize
//!
//! Asynchronous image resizing with fill, fit and match policies and optional
//! rounded-corner clipping.
//!
//! ```no_run
//! use simple_resize::config::ResizeConfig;
//! use simple_resize::imaging::{RasterImage, SizePolicy};
//! use simple_resize::resizer::Resizer;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let resizer = Resizer::new(&ResizeConfig::default())?;
//! let photo = Arc::new(RasterImage::open("photo.jpg".as_ref())?);
//! if let Some(thumb) = resizer.resize(&photo, SizePolicy::Fill(400.0, 500.0), 24.0).await {
//!     thumb.save("thumb.png".as_ref())?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture: Plan, Render, Deliver
//!
//! ```text
//! 1. Plan     policy + source size   →  RenderPlan   (pure geometry)
//! 2. Render   RenderPlan + pixels    →  RasterImage  (tiny-skia canvas)
//! 3. Deliver  worker thread          →  callback / future / one-shot stream
//! ```
//!
//! Planning is pure so the geometry is unit tested without pixels; rendering
//! sits behind the [`imaging::ImageBackend`] trait so scheduling can be tested
//! with a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Size policies, geometry, raster type, rendering backends |
//! | [`resizer`] | Background pool, weak source capture, async surfaces |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Weak Sources
//!
//! A scheduled resize holds its source through a `Weak`. If the caller drops
//! the image before a worker picks the job up, the job delivers `None`
//! instead of keeping a large buffer alive for a result nobody wants.
//!
//! ## No Error Channel
//!
//! The asynchronous surfaces deliver `Option<RasterImage>`. Invalid sizes and
//! backend failures are logged and degrade to `None`, the same as a released
//! source. Callers that want the error use [`imaging::resize`] directly.
//!
//! ## Match Scaling
//!
//! `SizePolicy::Match(w, h)` scales the source uniformly by `w / h`. The
//! source size does not enter the factor, so the content is generally not
//! stretched to the box; the canvas itself is always `w x h`.

pub mod config;
pub mod imaging;
pub mod output;
pub mod resizer;
