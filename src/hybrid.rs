use std::path::Path;

use crate::config::{Arithmetic, HybridConfig, Recipe};
use crate::data::image::Image;
use crate::error::Error;
use crate::filter::{gaussian_blur, BorderMode, KernelSize};
use crate::resource::image::file::{FileSystemImageLoader, FileSystemImageWriter};
use crate::resource::image::{ImageLoader, ImageSource, ImageWriter};

/// Blends the smoothed content of one image with the detail of another.
pub struct HybridImageBuilder<L = FileSystemImageLoader, W = FileSystemImageWriter> {
    config: HybridConfig,
    loader: L,
    writer: W,
}

impl Default for HybridImageBuilder {
    fn default() -> Self {
        Self::new(HybridConfig::default())
    }
}

impl HybridImageBuilder {
    pub fn new(config: HybridConfig) -> Self {
        let loader = FileSystemImageLoader {
            color_mode: config.color_mode,
        };

        Self {
            config,
            loader,
            writer: FileSystemImageWriter,
        }
    }
}

impl<L: ImageLoader, W: ImageWriter> HybridImageBuilder<L, W> {
    pub fn with_loader<T: ImageLoader>(self, loader: T) -> HybridImageBuilder<T, W> {
        HybridImageBuilder {
            config: self.config,
            loader,
            writer: self.writer,
        }
    }

    pub fn with_writer<T: ImageWriter>(self, writer: T) -> HybridImageBuilder<L, T> {
        HybridImageBuilder {
            config: self.config,
            loader: self.loader,
            writer,
        }
    }

    pub fn low_kernel_size(mut self, size: usize) -> Self {
        self.config.low_kernel_size = size;
        self
    }

    pub fn high_kernel_size(mut self, size: usize) -> Self {
        self.config.high_kernel_size = size;
        self
    }

    pub fn border(mut self, border: BorderMode) -> Self {
        self.config.border = border;
        self
    }

    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.config.recipe = recipe;
        self
    }

    pub fn arithmetic(mut self, arithmetic: Arithmetic) -> Self {
        self.config.arithmetic = arithmetic;
        self
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Produces the hybrid image and, when `output` is given, also writes it
    /// there in the format implied by its extension.
    pub fn build(
        &self,
        high: impl Into<ImageSource>,
        low: impl Into<ImageSource>,
        output: Option<&Path>,
    ) -> Result<Image, Error> {
        self.config.validate()?;

        let low = low.into().resolve(&self.loader)?;
        let high = high.into().resolve(&self.loader)?;

        if low.shape() != high.shape() {
            return Err(Error::ShapeMismatch {
                low: low.shape(),
                high: high.shape(),
            });
        }

        log::info!(
            "Building hybrid image {:?} with {:?} recipe",
            low.shape(),
            self.config.recipe
        );

        let hybrid = self.combine(&low, &high)?;

        if let Some(output) = output {
            self.writer.save(output, &hybrid)?;
        }

        Ok(hybrid)
    }

    fn combine(&self, low: &Image, high: &Image) -> Result<Image, Error> {
        let HybridConfig {
            low_kernel_size,
            high_kernel_size,
            sigma,
            border,
            recipe,
            arithmetic,
            ..
        } = self.config;

        let low_pass = gaussian_blur(low, KernelSize::square(low_kernel_size), sigma, border)?;
        let high_blur = gaussian_blur(high, KernelSize::square(high_kernel_size), sigma, border)?;

        match recipe {
            Recipe::Literal => low_pass.zip_map(&high_blur, |a, b| arithmetic.sub(a, b)),
            Recipe::Classic => {
                let data = low_pass
                    .as_raw()
                    .iter()
                    .zip(high.as_raw())
                    .zip(high_blur.as_raw())
                    .map(|((&base, &sharp), &smooth)| {
                        let detail = sharp as i32 - smooth as i32;
                        arithmetic.reduce(base as i32 + detail)
                    })
                    .collect();

                Image::new(low.height(), low.width(), low.channels(), data)
            }
        }
    }
}
