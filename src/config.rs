use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::filter::BorderMode;

/// How the two blurred images are combined.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipe {
    /// `blur(low, low_kernel) - blur(high, high_kernel)`
    #[default]
    Literal,
    /// `blur(low, low_kernel) + (high - blur(high, high_kernel))`
    Classic,
}

/// Numeric behaviour of the per-sample combine step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arithmetic {
    /// Modulo 256.
    #[default]
    Wrapping,
    /// Clamped to `0..=255`.
    Saturating,
}

impl Arithmetic {
    /// Brings a widened intermediate value back into `u8`.
    pub fn reduce(self, value: i32) -> u8 {
        match self {
            Arithmetic::Wrapping => value.rem_euclid(256) as u8,
            Arithmetic::Saturating => value.clamp(0, 255) as u8,
        }
    }

    pub fn sub(self, a: u8, b: u8) -> u8 {
        match self {
            Arithmetic::Wrapping => a.wrapping_sub(b),
            Arithmetic::Saturating => a.saturating_sub(b),
        }
    }
}

/// Channel layout requested from the decoder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Three channels; alpha dropped, gray expanded.
    #[default]
    Color,
    Grayscale,
    /// Keeps the channel count of the source.
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    pub low_kernel_size: usize,
    pub high_kernel_size: usize,
    /// Gaussian standard deviation; zero or less derives it from the kernel size.
    pub sigma: f32,
    pub border: BorderMode,
    pub recipe: Recipe,
    pub arithmetic: Arithmetic,
    pub color_mode: ColorMode,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            low_kernel_size: 7,
            high_kernel_size: 13,
            sigma: 0.0,
            border: BorderMode::default(),
            recipe: Recipe::default(),
            arithmetic: Arithmetic::default(),
            color_mode: ColorMode::default(),
        }
    }
}

impl HybridConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: HybridConfig =
            serde_json::from_str(json).map_err(|error| Error::Config(error.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("{}: {error}", path.display())))?;

        log::debug!("Loading configuration from {}", path.display());

        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (name, size) in [
            ("low_kernel_size", self.low_kernel_size),
            ("high_kernel_size", self.high_kernel_size),
        ] {
            if size == 0 || size % 2 == 0 {
                return Err(Error::InvalidKernel(format!(
                    "{name} must be a positive odd number, got {size}"
                )));
            }
        }

        if !self.sigma.is_finite() {
            return Err(Error::Config(format!(
                "sigma must be finite, got {}",
                self.sigma
            )));
        }

        Ok(())
    }
}
