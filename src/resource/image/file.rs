use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ColorMode;
use crate::data::image::Image;
use crate::error::Error;
use crate::resource::image::{ImageLoader, ImageWriter};

#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystemImageLoader {
    pub color_mode: ColorMode,
}

impl ImageLoader for FileSystemImageLoader {
    fn load(&self, path: &Path) -> Result<Image, Error> {
        let decoded = image::ImageReader::open(path)
            .map_err(|error| Error::decode(path, error))?
            .with_guessed_format()
            .map_err(|error| Error::decode(path, error))?
            .decode()
            .map_err(|error| Error::decode(path, error))?;

        let image = Image::from_dynamic(decoded, self.color_mode)?;

        log::debug!(
            "Decoded {} as {:?} ({:?})",
            path.display(),
            image.shape(),
            self.color_mode
        );

        Ok(image)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystemImageWriter;

impl ImageWriter for FileSystemImageWriter {
    fn save(&self, path: &Path, image: &Image) -> Result<(), Error> {
        let format = image::ImageFormat::from_path(path).map_err(|error| Error::encode(path, error))?;

        if !format.writing_enabled() {
            return Err(Error::encode(
                path,
                format!("Writing {format:?} images is not supported"),
            ));
        }

        let dynamic = image.to_dynamic()?;

        let file = std::fs::File::create(path).map_err(|error| Error::encode(path, error))?;
        let mut writer = BufWriter::new(file);

        dynamic
            .write_to(&mut writer, format)
            .map_err(|error| Error::encode(path, error))?;
        writer.flush().map_err(|error| Error::encode(path, error))?;

        log::info!("Wrote {} ({format:?})", path.display());

        Ok(())
    }
}
