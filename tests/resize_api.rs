//! End-to-end checks through the public API: file in, resize on the pool,
//! file out.
//!
//! Run with: cargo test --test resize_api

use image::{Rgba, RgbaImage};
use simple_resize::config::ResizeConfig;
use simple_resize::imaging::{self, Filter, RasterImage, ResizeRequest, SizePolicy, SkiaBackend};
use simple_resize::resizer::Resizer;
use std::sync::Arc;

const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);

fn write_source(dir: &std::path::Path, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join("source.png");
    RgbaImage::from_pixel(width, height, GREEN).save(&path).unwrap();
    path
}

#[tokio::test]
async fn rounded_thumbnail_round_trips_through_png() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source_path = write_source(tmp.path(), 160, 120);

    let resizer = Resizer::new(&ResizeConfig::default()).unwrap();
    let source = Arc::new(RasterImage::open(&source_path).unwrap());
    let thumb = resizer
        .resize(&source, SizePolicy::Fill(60.0, 60.0), 12.0)
        .await
        .expect("resize produced an image");

    let out_path = tmp.path().join("thumb.png");
    thumb.save(&out_path).unwrap();
    let reloaded = RasterImage::open(&out_path).unwrap();

    assert_eq!((reloaded.pixel_width(), reloaded.pixel_height()), (60, 60));
    assert_eq!(reloaded.pixels().get_pixel(0, 0).0[3], 0);
    assert!(reloaded.pixels().get_pixel(30, 30).0[3] >= 250);
}

#[tokio::test]
async fn high_density_output_keeps_logical_size() {
    let config = ResizeConfig {
        display_scale: 2.0,
        ..ResizeConfig::default()
    };
    let resizer = Resizer::new(&config).unwrap();
    let source = Arc::new(RasterImage::from(RgbaImage::from_pixel(90, 30, GREEN)));

    let out = resizer
        .resize(&source, SizePolicy::Fit(45.0, 45.0), 0.0)
        .await
        .unwrap();

    assert_eq!((out.pixel_width(), out.pixel_height()), (90, 90));
    assert_eq!(out.scale(), 2.0);
    // 90x30 fitted into 45x45 → 45x15 band centred at y = 15 (pixels 30..60)
    assert_eq!(out.pixels().get_pixel(45, 10).0[3], 0);
    assert_eq!(out.pixels().get_pixel(45, 45).0[3], 255);
    assert_eq!(out.pixels().get_pixel(45, 80).0[3], 0);
}

#[test]
fn async_and_sync_paths_agree() {
    let source = Arc::new(RasterImage::from(RgbaImage::from_fn(40, 20, |x, y| {
        Rgba([(x * 6) as u8, (y * 12) as u8, 90, 255])
    })));
    let policy = SizePolicy::Match(30.0, 15.0);

    let direct = imaging::resize(
        &SkiaBackend::new(),
        &source,
        &ResizeRequest::new(policy).with_corner_radius(4.0),
        1.0,
        Filter::Bicubic,
    )
    .unwrap();
    let pooled = Resizer::new(&ResizeConfig::default())
        .unwrap()
        .resize(&source, policy, 4.0)
        .wait()
        .unwrap();

    assert_eq!(direct, pooled);
}

#[test]
fn many_concurrent_resizes_complete() {
    let resizer = Resizer::new(&ResizeConfig::default()).unwrap();
    let source = Arc::new(RasterImage::from(RgbaImage::from_pixel(64, 64, GREEN)));

    let pending: Vec<_> = (1..=16)
        .map(|side| resizer.resize(&source, SizePolicy::Fill(side as f32, 8.0), 0.0))
        .collect();

    for (i, p) in pending.into_iter().enumerate() {
        let out = p.wait().unwrap();
        assert_eq!(out.pixel_width(), i as u32 + 1);
        assert_eq!(out.pixel_height(), 8);
    }
}
