//! Parameter types for resize operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the caller-facing [`Resizer`](crate::resizer::Resizer),
//! the pure [`calculations`](super::calculations), and the
//! [`backend`](super::backend) that does the actual pixel work.
//!
//! ## Types
//!
//! - [`Size`] — Logical width/height pair.
//! - [`SizePolicy`] — How the source maps onto the target box (fill, fit, match).
//! - [`CornerRadius`] — Rounded-corner clip radius; zero disables clipping.
//! - [`Filter`] — Resampling quality for the scaled draw.
//! - [`ResizeRequest`] — Policy + radius for one resize.
//! - [`RenderPlan`] — Fully resolved, backend-facing description of one render.

use serde::{Deserialize, Serialize};

/// Width and height in logical (device-independent) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Target-size policy for a resize.
///
/// Every variant carries the target box; they differ in how the source is
/// scaled into it:
///
/// - `Fill` / `FillSize`: cover the box, cropping overflow, aspect preserved.
/// - `Fit`: contain inside the box, aspect preserved, transparent bands.
/// - `Match`: scale by the target's own `width / height` ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePolicy {
    Fill(f32, f32),
    FillSize(Size),
    Fit(f32, f32),
    Match(f32, f32),
}

impl SizePolicy {
    /// Short lowercase name, used in logs and CLI reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fill(..) => "fill",
            Self::FillSize(_) => "fill-size",
            Self::Fit(..) => "fit",
            Self::Match(..) => "match",
        }
    }
}

/// Corner radius for rounded clipping, in logical units.
///
/// Negative and non-finite values normalise to zero, which means no clip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadius(f32);

impl CornerRadius {
    pub const NONE: Self = Self(0.0);

    pub fn new(radius: f32) -> Self {
        if radius.is_finite() && radius > 0.0 {
            Self(radius)
        } else {
            Self::NONE
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn clips(self) -> bool {
        self.0 > 0.0
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::new(radius)
    }
}

impl From<f64> for CornerRadius {
    fn from(radius: f64) -> Self {
        Self::new(radius as f32)
    }
}

/// Resampling quality used when drawing the scaled source onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
}

/// One resize: how to size the output and whether to round its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    pub policy: SizePolicy,
    pub corner_radius: CornerRadius,
}

impl ResizeRequest {
    pub fn new(policy: SizePolicy) -> Self {
        Self {
            policy,
            corner_radius: CornerRadius::NONE,
        }
    }

    pub fn with_corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = radius.into();
        self
    }
}

/// Axis-aligned rectangle in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a backend needs to produce one output image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    /// Output size in logical units.
    pub target: Size,
    /// Output size in physical pixels (`ceil(target * display_scale)`).
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub display_scale: f32,
    /// Where the source lands, in logical units relative to the canvas origin.
    pub rect: DrawRect,
    pub corner_radius: CornerRadius,
    pub filter: Filter,
}
