use std::path::{Path, PathBuf};

use hybrid_image::{ColorMode, Error, HybridConfig, HybridImageBuilder, Image};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "hybrid_image_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();

        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn write_gray(path: &Path, width: u32, height: u32, value: u8) {
    image::GrayImage::from_pixel(width, height, image::Luma([value]))
        .save(path)
        .unwrap();
}

fn write_rgb(path: &Path, width: u32, height: u32, pixel: [u8; 3]) {
    image::RgbImage::from_pixel(width, height, image::Rgb(pixel))
        .save(path)
        .unwrap();
}

fn grayscale_builder() -> HybridImageBuilder {
    HybridImageBuilder::new(HybridConfig {
        color_mode: ColorMode::Grayscale,
        ..Default::default()
    })
}

#[test]
fn test_constant_images_subtract() {
    let dir = TempDir::new("constant");
    write_gray(&dir.join("low.png"), 4, 4, 200);
    write_gray(&dir.join("high.png"), 4, 4, 50);

    let hybrid = grayscale_builder()
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();

    assert_eq!(hybrid, Image::filled(4, 4, 1, 150).unwrap());
}

#[test]
fn test_negative_difference_wraps_around() {
    let dir = TempDir::new("wrap");
    write_gray(&dir.join("low.png"), 4, 4, 10);
    write_gray(&dir.join("high.png"), 4, 4, 20);

    let hybrid = grayscale_builder()
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();

    assert_eq!(hybrid.shape(), (4, 4, 1));
    assert!(hybrid.as_raw().iter().all(|&v| v == 246));
}

#[test]
fn test_color_mode_expands_grayscale_files() {
    let dir = TempDir::new("color");
    write_gray(&dir.join("low.png"), 3, 2, 90);
    write_gray(&dir.join("high.png"), 3, 2, 30);

    let hybrid = HybridImageBuilder::default()
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();

    assert_eq!(hybrid, Image::filled(2, 3, 3, 60).unwrap());
}

#[test]
fn test_output_is_written_and_matches_result() {
    let dir = TempDir::new("output");
    write_rgb(&dir.join("low.png"), 5, 4, [200, 100, 50]);
    write_rgb(&dir.join("high.png"), 5, 4, [20, 40, 60]);
    let output = dir.join("hybrid.png");

    let builder = HybridImageBuilder::default();
    let unsaved = builder
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();
    assert!(!output.exists());

    let saved = builder
        .build(
            dir.join("high.png"),
            dir.join("low.png"),
            Some(output.as_path()),
        )
        .unwrap();

    assert_eq!(unsaved, saved);
    assert_eq!(saved.get(0, 0, 0), Some(180));
    assert_eq!(saved.get(0, 0, 1), Some(60));
    assert_eq!(saved.get(0, 0, 2), Some(246));

    let reloaded = image::open(&output).unwrap().into_rgb8();
    assert_eq!(reloaded.dimensions(), (5, 4));
    assert_eq!(reloaded.into_raw(), saved.into_raw());
}

#[test]
fn test_repeated_builds_are_byte_identical() {
    let dir = TempDir::new("determinism");
    let gradient = image::RgbImage::from_fn(16, 12, |x, y| {
        image::Rgb([(x * 15) as u8, (y * 20) as u8, ((x + y) * 7) as u8])
    });
    let checker = image::RgbImage::from_fn(16, 12, |x, y| {
        let v = if (x + y) % 2 == 0 { 255 } else { 0 };
        image::Rgb([v, v, v])
    });
    gradient.save(dir.join("low.png")).unwrap();
    checker.save(dir.join("high.png")).unwrap();

    let builder = HybridImageBuilder::default();
    let first = builder
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();
    let second = builder
        .build(dir.join("high.png"), dir.join("low.png"), None)
        .unwrap();

    assert_eq!(first.shape(), (12, 16, 3));
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TempDir::new("missing");
    write_gray(&dir.join("low.png"), 4, 4, 10);
    let output = dir.join("hybrid.png");

    let result = HybridImageBuilder::default().build(
        dir.join("nope.png"),
        dir.join("low.png"),
        Some(output.as_path()),
    );
    assert!(matches!(result, Err(Error::Decode { .. })));

    let result = HybridImageBuilder::default().build(
        dir.join("low.png"),
        dir.join("nope.png"),
        Some(output.as_path()),
    );
    assert!(matches!(result, Err(Error::Decode { .. })));

    assert!(!output.exists());
}

#[test]
fn test_corrupt_input_is_a_decode_error() {
    let dir = TempDir::new("corrupt");
    std::fs::write(dir.join("broken.png"), b"not an image").unwrap();
    write_gray(&dir.join("low.png"), 4, 4, 10);

    let result =
        HybridImageBuilder::default().build(dir.join("broken.png"), dir.join("low.png"), None);

    match result {
        Err(Error::Decode { path, .. }) => assert_eq!(path, dir.join("broken.png")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_different_sizes_are_rejected() {
    let dir = TempDir::new("shape");
    write_gray(&dir.join("low.png"), 4, 4, 10);
    write_gray(&dir.join("high.png"), 8, 4, 10);

    let result =
        HybridImageBuilder::default().build(dir.join("high.png"), dir.join("low.png"), None);

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_unwritable_output_is_an_encode_error() {
    let dir = TempDir::new("encode");
    let low = Image::filled(4, 4, 3, 100).unwrap();
    let high = Image::filled(4, 4, 3, 50).unwrap();

    let missing_dir = dir.join("missing").join("hybrid.png");
    let result = HybridImageBuilder::default().build(
        high.clone(),
        low.clone(),
        Some(missing_dir.as_path()),
    );
    assert!(matches!(result, Err(Error::Encode { .. })));

    let unknown_format = dir.join("hybrid.unknown");
    let result = HybridImageBuilder::default().build(high, low, Some(unknown_format.as_path()));
    assert!(matches!(result, Err(Error::Encode { .. })));
    assert!(!unknown_format.exists());
}

#[test]
fn test_paths_and_decoded_images_mix() {
    let dir = TempDir::new("mixed");
    write_rgb(&dir.join("low.png"), 4, 4, [120, 120, 120]);

    let hybrid = HybridImageBuilder::default()
        .build(Image::filled(4, 4, 3, 20).unwrap(), dir.join("low.png"), None)
        .unwrap();

    assert_eq!(hybrid, Image::filled(4, 4, 3, 100).unwrap());
}
