//! Hybrid images: the smoothed content of one picture combined with the
//! detail of another, so that what you see depends on viewing distance.

use anyhow::Result;

use crate::app::App;
use crate::args::Args;

mod app;
pub mod args;
pub mod config;
mod data;
pub mod error;
pub mod filter;
pub mod hybrid;
mod render;
pub mod resource;
mod view;

pub use crate::config::{Arithmetic, ColorMode, HybridConfig, Recipe};
pub use crate::data::image::Image;
pub use crate::error::Error;
pub use crate::filter::{BorderMode, KernelSize};
pub use crate::hybrid::HybridImageBuilder;
pub use crate::resource::image::ImageSource;

pub fn run(args: Args) -> Result<()> {
    env_logger::init();

    let builder = HybridImageBuilder::new(args.config);
    let hybrid = builder.build(args.high, args.low, args.output.as_deref())?;

    if args.preview {
        preview(hybrid)?;
    }

    Ok(())
}

/// Opens a window showing `image` and blocks until a key is pressed or the
/// window is closed.
pub fn preview(image: Image) -> Result<()> {
    let event_loop = App::create_event_loop()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);

    let mut app = App::new(&event_loop, image);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
