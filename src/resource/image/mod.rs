use std::path::{Path, PathBuf};

use crate::data::image::Image;
use crate::error::Error;

pub mod file;

/// Either an encoded image on disk or one that has already been decoded.
#[derive(Clone, Debug)]
pub enum ImageSource {
    Path(PathBuf),
    Decoded(Image),
}

impl ImageSource {
    pub fn resolve(self, loader: &impl ImageLoader) -> Result<Image, Error> {
        match self {
            ImageSource::Path(path) => loader.load(&path),
            ImageSource::Decoded(image) => Ok(image),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        ImageSource::Path(PathBuf::from(value))
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        ImageSource::Path(PathBuf::from(value))
    }
}

impl From<&Path> for ImageSource {
    fn from(value: &Path) -> Self {
        ImageSource::Path(value.to_path_buf())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(value: PathBuf) -> Self {
        ImageSource::Path(value)
    }
}

impl From<Image> for ImageSource {
    fn from(value: Image) -> Self {
        ImageSource::Decoded(value)
    }
}

pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<Image, Error>;
}

pub trait ImageWriter {
    fn save(&self, path: &Path, image: &Image) -> Result<(), Error>;
}
