//! Immutable RGBA raster with a pixel-density scale.
//!
//! A [`RasterImage`] stores straight-alpha RGBA8 pixels plus the density
//! (`scale`) they were produced at. Geometry is computed in logical units,
//! `pixel size / scale`, so a 200x200-pixel image at scale 2.0 behaves as a
//! 100x100 source.

use super::backend::BackendError;
use super::params::Size;
use image::{DynamicImage, ImageReader, RgbaImage};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
    scale: f32,
}

impl RasterImage {
    /// Wrap an RGBA buffer at the given density.
    ///
    /// Non-positive or non-finite scales fall back to 1.0.
    pub fn new(pixels: RgbaImage, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { pixels, scale }
    }

    /// Decode an image file at scale 1.0.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let decoded = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self::from(decoded))
    }

    /// Encode to disk, format inferred from the extension.
    pub fn save(&self, path: &Path) -> Result<(), BackendError> {
        self.pixels.save(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        })
    }

    /// Width in physical pixels.
    pub fn pixel_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in physical pixels.
    pub fn pixel_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size in logical units.
    pub fn size(&self) -> Size {
        Size::new(
            self.pixels.width() as f32 / self.scale,
            self.pixels.height() as f32 / self.scale,
        )
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8(), 1.0)
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn logical_size_divides_by_scale() {
        let img = RasterImage::new(RgbaImage::new(200, 100), 2.0);
        assert_eq!(img.size(), Size::new(100.0, 50.0));
        assert_eq!(img.pixel_width(), 200);
        assert_eq!(img.pixel_height(), 100);
    }

    #[test]
    fn invalid_scale_falls_back_to_one() {
        assert_eq!(RasterImage::new(RgbaImage::new(4, 4), 0.0).scale(), 1.0);
        assert_eq!(RasterImage::new(RgbaImage::new(4, 4), f32::NAN).scale(), 1.0);
    }

    #[test]
    fn png_save_and_open_preserves_pixels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let pixels = RgbaImage::from_fn(8, 4, |x, y| Rgba([x as u8 * 30, y as u8 * 60, 7, 200]));
        RasterImage::from(pixels.clone()).save(&path).unwrap();

        let loaded = RasterImage::open(&path).unwrap();
        assert_eq!(loaded.pixels(), &pixels);
        assert_eq!(loaded.scale(), 1.0);
    }

    #[test]
    fn open_nonexistent_file_errors() {
        let result = RasterImage::open(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
