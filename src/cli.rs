use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use hybrid_image::args::Args;
use hybrid_image::{Arithmetic, BorderMode, ColorMode, HybridConfig, Recipe};

/// Builds a hybrid image from the smoothed content of one image and the detail of another
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image whose fine detail should dominate up close
    #[arg(default_value = "image_high.jpg")]
    pub high: PathBuf,

    /// Image whose smoothed content should dominate from a distance
    #[arg(default_value = "image_low.jpg")]
    pub low: PathBuf,

    /// Where to write the result; the format follows the extension
    #[arg(short, long, default_value = "image_hybrid.png")]
    pub output: PathBuf,

    /// Do not write the result to disk
    #[arg(long)]
    pub no_output: bool,

    /// Do not open the preview window
    #[arg(long)]
    pub no_preview: bool,

    /// JSON file with default settings; flags given here take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gaussian kernel size applied to the low-frequency image (odd)
    #[arg(long)]
    pub low_kernel: Option<usize>,

    /// Gaussian kernel size applied to the high-frequency image (odd)
    #[arg(long)]
    pub high_kernel: Option<usize>,

    /// Gaussian standard deviation; 0 derives it from the kernel size
    #[arg(long)]
    pub sigma: Option<f32>,

    /// How the two blurred images are combined
    #[arg(long, value_enum)]
    pub recipe: Option<CliRecipe>,

    /// Behaviour when the combined value leaves 0..=255
    #[arg(long, value_enum)]
    pub arithmetic: Option<CliArithmetic>,

    /// Sampling policy outside the image border
    #[arg(long, value_enum)]
    pub border: Option<CliBorder>,

    /// Fill value used with `--border constant`
    #[arg(long, default_value_t = 0)]
    pub border_value: u8,

    /// Channel layout requested from the decoder
    #[arg(long, value_enum)]
    pub color_mode: Option<CliColorMode>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliRecipe {
    Literal,
    Classic,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliArithmetic {
    Wrapping,
    Saturating,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliBorder {
    Reflect101,
    Reflect,
    Replicate,
    Constant,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliColorMode {
    Color,
    Grayscale,
    Unchanged,
}

impl From<CliRecipe> for Recipe {
    fn from(value: CliRecipe) -> Self {
        match value {
            CliRecipe::Literal => Recipe::Literal,
            CliRecipe::Classic => Recipe::Classic,
        }
    }
}

impl From<CliArithmetic> for Arithmetic {
    fn from(value: CliArithmetic) -> Self {
        match value {
            CliArithmetic::Wrapping => Arithmetic::Wrapping,
            CliArithmetic::Saturating => Arithmetic::Saturating,
        }
    }
}

impl From<CliColorMode> for ColorMode {
    fn from(value: CliColorMode) -> Self {
        match value {
            CliColorMode::Color => ColorMode::Color,
            CliColorMode::Grayscale => ColorMode::Grayscale,
            CliColorMode::Unchanged => ColorMode::Unchanged,
        }
    }
}

impl CliBorder {
    fn into_border_mode(self, value: u8) -> BorderMode {
        match self {
            CliBorder::Reflect101 => BorderMode::Reflect101,
            CliBorder::Reflect => BorderMode::Reflect,
            CliBorder::Replicate => BorderMode::Replicate,
            CliBorder::Constant => BorderMode::Constant(value),
        }
    }
}

impl Cli {
    pub fn into_args(self) -> Result<Args> {
        let mut config = match &self.config {
            Some(path) => HybridConfig::from_file(path)?,
            None => HybridConfig::default(),
        };

        if let Some(size) = self.low_kernel {
            config.low_kernel_size = size;
        }
        if let Some(size) = self.high_kernel {
            config.high_kernel_size = size;
        }
        if let Some(sigma) = self.sigma {
            config.sigma = sigma;
        }
        if let Some(recipe) = self.recipe {
            config.recipe = recipe.into();
        }
        if let Some(arithmetic) = self.arithmetic {
            config.arithmetic = arithmetic.into();
        }
        if let Some(border) = self.border {
            config.border = border.into_border_mode(self.border_value);
        }
        if let Some(color_mode) = self.color_mode {
            config.color_mode = color_mode.into();
        }

        config.validate()?;

        Ok(Args {
            high: self.high,
            low: self.low,
            output: (!self.no_output).then_some(self.output),
            preview: !self.no_preview,
            config,
        })
    }
}
