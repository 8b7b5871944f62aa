//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! photo.jpg → thumb.png
//!     Source: 4032x3024px @1x (4032x3024)
//!     Mode: fill 400x500, corner radius 24
//!     Output: 800x1000px @2x (400x500)
//!     Time: 183 ms
//! ```
//!
//! A failed resize replaces the `Output:` line with `Output: none`.
//!
//! # Architecture
//!
//! [`format_resize_report`] is pure (returns `Vec<String>`) for testability;
//! [`print_resize_report`] writes to stdout. `--json` output serializes the
//! same [`ResizeReport`] with `serde_json`.

use crate::imaging::{RasterImage, Size, SizePolicy, resolve_target_size};
use serde::Serialize;
use std::path::PathBuf;

/// Pixel and logical dimensions of one raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterSummary {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub scale: f32,
    pub logical: Size,
}

impl From<&RasterImage> for RasterSummary {
    fn from(image: &RasterImage) -> Self {
        Self {
            pixel_width: image.pixel_width(),
            pixel_height: image.pixel_height(),
            scale: image.scale(),
            logical: image.size(),
        }
    }
}

/// What one CLI resize did.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub policy: SizePolicy,
    pub corner_radius: f32,
    pub source: RasterSummary,
    /// `None` when no image was produced.
    pub result: Option<RasterSummary>,
    pub elapsed_ms: u128,
}

/// Format a number without a trailing `.0` when it is integral.
fn format_units(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

fn summary_line(label: &str, summary: &RasterSummary) -> String {
    format!(
        "    {}: {}x{}px @{}x ({}x{})",
        label,
        summary.pixel_width,
        summary.pixel_height,
        format_units(summary.scale),
        format_units(summary.logical.width),
        format_units(summary.logical.height)
    )
}

pub fn format_resize_report(report: &ResizeReport) -> Vec<String> {
    let target = resolve_target_size(&report.policy);
    let mut lines = vec![format!(
        "{} \u{2192} {}",
        report.input.display(),
        report.output.display()
    )];

    lines.push(summary_line("Source", &report.source));

    let mut mode = format!(
        "    Mode: {} {}x{}",
        report.policy.name(),
        format_units(target.width),
        format_units(target.height)
    );
    if report.corner_radius > 0.0 {
        mode.push_str(&format!(", corner radius {}", format_units(report.corner_radius)));
    }
    lines.push(mode);

    match &report.result {
        Some(result) => lines.push(summary_line("Output", result)),
        None => lines.push("    Output: none".to_string()),
    }
    lines.push(format!("    Time: {} ms", report.elapsed_ms));

    lines
}

/// Print a resize report to stdout.
pub fn print_resize_report(report: &ResizeReport) {
    for line in format_resize_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
