use std::path::PathBuf;

use crate::config::HybridConfig;

pub struct Args {
    pub high: PathBuf,
    pub low: PathBuf,
    pub output: Option<PathBuf>,
    pub preview: bool,
    pub config: HybridConfig,
}
