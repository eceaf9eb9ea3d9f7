use std::path::PathBuf;

/// Height, width and channel count of an [`crate::Image`].
pub type Shape = (usize, usize, usize);

#[derive(Debug)]
pub enum Error {
    Decode { path: PathBuf, message: String },
    Encode { path: PathBuf, message: String },
    ShapeMismatch { low: Shape, high: Shape },
    InvalidImage(String),
    InvalidKernel(String),
    Config(String),
}

impl Error {
    pub fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decode { path, message } => {
                write!(f, "Failed to decode image {}: {message}", path.display())
            }
            Error::Encode { path, message } => {
                write!(f, "Failed to encode image {}: {message}", path.display())
            }
            Error::ShapeMismatch { low, high } => write!(
                f,
                "The given images differ in shape: low-frequency image is {}x{}x{}, high-frequency image is {}x{}x{}",
                low.0, low.1, low.2, high.0, high.1, high.2
            ),
            Error::InvalidImage(message) => write!(f, "Invalid image: {message}"),
            Error::InvalidKernel(message) => write!(f, "Invalid kernel: {message}"),
            Error::Config(message) => write!(f, "Invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}
