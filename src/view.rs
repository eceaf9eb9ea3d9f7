use anyhow::Result;

use crate::data::image::Image;
use crate::render::RenderSystem;

pub struct ViewSystem {
    pub window: std::sync::Arc<winit::window::Window>,
    pub render_system: RenderSystem,
}

impl ViewSystem {
    pub async fn from_window(window: winit::window::Window, image: &Image) -> Result<Self> {
        let window = std::sync::Arc::new(window);

        let render_system = RenderSystem::from_window(window.clone(), image).await?;

        Ok(Self {
            window,
            render_system,
        })
    }

    pub fn update_view(&mut self) -> Result<()> {
        self.render_system.render()
    }
}
