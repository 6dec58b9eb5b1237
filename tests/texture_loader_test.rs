mod common;

use common::test_utils::{RecordingGpu, init_logs, temp_asset_dir};
use lumen_scene::resources::texture::load_texture;
use lumen_scene::{LoadError, PixelFormat, TextureHandle};

fn save_png(dir: &std::path::Path, name: &str, image: image::DynamicImage) {
    image.save(dir.join(name)).expect("failed to write fixture png");
}

#[test]
fn single_channel_image_maps_to_r8() {
    init_logs();
    let dir = temp_asset_dir("gray");
    save_png(
        &dir,
        "gray.png",
        image::DynamicImage::ImageLuma8(image::GrayImage::new(4, 2)),
    );

    let mut gpu = RecordingGpu::default();
    let handle = load_texture(&mut gpu, &dir.to_string_lossy(), "gray.png").unwrap();

    assert_eq!(handle, TextureHandle(0));
    assert_eq!(gpu.uploads.len(), 1);
    assert_eq!(gpu.uploads[0].format, PixelFormat::R8);
    assert_eq!((gpu.uploads[0].width, gpu.uploads[0].height), (4, 2));
}

#[test]
fn three_channel_image_maps_to_rgb() {
    init_logs();
    let dir = temp_asset_dir("rgb");
    save_png(
        &dir,
        "rgb.png",
        image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2)),
    );

    let mut gpu = RecordingGpu::default();
    load_texture(&mut gpu, &dir.to_string_lossy(), "rgb.png").unwrap();
    assert_eq!(gpu.uploads[0].format, PixelFormat::Rgb8);
}

#[test]
fn four_channel_image_maps_to_rgba() {
    init_logs();
    let dir = temp_asset_dir("rgba");
    save_png(
        &dir,
        "rgba.png",
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(2, 2)),
    );

    let mut gpu = RecordingGpu::default();
    load_texture(&mut gpu, &dir.to_string_lossy(), "rgba.png").unwrap();
    assert_eq!(gpu.uploads[0].format, PixelFormat::Rgba8);
}

#[test]
fn two_channel_image_is_rejected() {
    init_logs();
    let dir = temp_asset_dir("luma-alpha");
    save_png(
        &dir,
        "la.png",
        image::DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(2, 2)),
    );

    let mut gpu = RecordingGpu::default();
    let err = load_texture(&mut gpu, &dir.to_string_lossy(), "la.png").unwrap_err();
    assert!(matches!(err, LoadError::AssetDecode { .. }));
    assert!(gpu.uploads.is_empty());
}

#[test]
fn unreadable_file_reports_the_attempted_path() {
    init_logs();
    let dir = temp_asset_dir("absent");
    let mut gpu = RecordingGpu::default();
    let err = load_texture(&mut gpu, &dir.to_string_lossy(), "nope.png").unwrap_err();

    match err {
        LoadError::AssetDecode { path, .. } => {
            assert!(path.ends_with("nope.png"), "unexpected path {path:?}");
        }
        other => panic!("expected AssetDecode, got {other:?}"),
    }
    assert!(gpu.uploads.is_empty());
}
