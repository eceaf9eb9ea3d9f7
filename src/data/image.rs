use image::DynamicImage;

use crate::config::ColorMode;
use crate::error::{Error, Shape};

/// Dense 8-bit raster stored row-major as height x width x channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Image {
    pub fn new(height: usize, width: usize, channels: usize, data: Vec<u8>) -> Result<Self, Error> {
        if !(1..=4).contains(&channels) {
            return Err(Error::InvalidImage(format!(
                "Unsupported channel count: {channels}"
            )));
        }

        let expected = sample_count(height, width, channels)?;
        if data.len() != expected {
            return Err(Error::InvalidImage(format!(
                "Expected {expected} samples for a {height}x{width}x{channels} image, got {}",
                data.len()
            )));
        }

        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    pub fn filled(height: usize, width: usize, channels: usize, value: u8) -> Result<Self, Error> {
        let count = sample_count(height, width, channels)?;

        Self::new(height, width, channels, vec![value; count])
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> Shape {
        (self.height, self.width, self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, y: usize, x: usize, channel: usize) -> Option<u8> {
        if y >= self.height || x >= self.width || channel >= self.channels {
            return None;
        }

        self.data.get(self.index(y, x, channel)).copied()
    }

    pub(crate) fn index(&self, y: usize, x: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Applies `op` to each pair of samples at the same position. Both images
    /// must have the same shape.
    pub fn zip_map(&self, other: &Image, op: impl Fn(u8, u8) -> u8) -> Result<Image, Error> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                low: self.shape(),
                high: other.shape(),
            });
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();

        Image::new(self.height, self.width, self.channels, data)
    }

    pub fn from_dynamic(source: DynamicImage, color_mode: ColorMode) -> Result<Self, Error> {
        let (width, height) = (source.width() as usize, source.height() as usize);

        let (channels, data) = match color_mode {
            ColorMode::Color => (3, source.into_rgb8().into_raw()),
            ColorMode::Grayscale => (1, source.into_luma8().into_raw()),
            ColorMode::Unchanged => match source {
                DynamicImage::ImageLuma8(buffer) => (1, buffer.into_raw()),
                DynamicImage::ImageLumaA8(buffer) => (2, buffer.into_raw()),
                DynamicImage::ImageRgb8(buffer) => (3, buffer.into_raw()),
                DynamicImage::ImageRgba8(buffer) => (4, buffer.into_raw()),
                other if other.color().has_alpha() => (4, other.into_rgba8().into_raw()),
                other if other.color().channel_count() <= 2 => (1, other.into_luma8().into_raw()),
                other => (3, other.into_rgb8().into_raw()),
            },
        };

        Image::new(height, width, channels, data)
    }

    pub fn to_dynamic(&self) -> Result<DynamicImage, Error> {
        let (width, height) = (self.width as u32, self.height as u32);
        let data = self.data.clone();
        let size_error = || Error::InvalidImage(String::from("Image buffer size mismatch"));

        Ok(match self.channels {
            1 => DynamicImage::ImageLuma8(
                image::GrayImage::from_raw(width, height, data).ok_or_else(size_error)?,
            ),
            2 => DynamicImage::ImageLumaA8(
                image::GrayAlphaImage::from_raw(width, height, data).ok_or_else(size_error)?,
            ),
            3 => DynamicImage::ImageRgb8(
                image::RgbImage::from_raw(width, height, data).ok_or_else(size_error)?,
            ),
            4 => DynamicImage::ImageRgba8(
                image::RgbaImage::from_raw(width, height, data).ok_or_else(size_error)?,
            ),
            channels => {
                return Err(Error::InvalidImage(format!(
                    "Unsupported channel count: {channels}"
                )))
            }
        })
    }

    /// Expands the samples to four channels for display.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        let mut rgba = Vec::with_capacity(self.height * self.width * 4);

        for pixel in self.data.chunks_exact(self.channels) {
            match pixel {
                [v] => rgba.extend_from_slice(&[*v, *v, *v, 255]),
                [v, a] => rgba.extend_from_slice(&[*v, *v, *v, *a]),
                [r, g, b] => rgba.extend_from_slice(&[*r, *g, *b, 255]),
                [r, g, b, a] => rgba.extend_from_slice(&[*r, *g, *b, *a]),
                _ => unreachable!(),
            }
        }

        image::RgbaImage::from_raw(self.width as u32, self.height as u32, rgba)
            .unwrap_or_default()
    }
}

fn sample_count(height: usize, width: usize, channels: usize) -> Result<usize, Error> {
    height
        .checked_mul(width)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            Error::InvalidImage(format!(
                "A {height}x{width}x{channels} image does not fit in memory"
            ))
        })
}
