use anyhow::Result;

use crate::data::image::Image;
use crate::render::preview::PreviewRenderer;
use crate::render::state::RenderSystemState;
use crate::render::texture::ImageTexture;

mod preview;
mod shader;
mod state;
mod texture;

pub struct RenderSystem {
    state: RenderSystemState,
    preview_renderer: PreviewRenderer,
}

impl RenderSystem {
    pub async fn from_window(
        window: std::sync::Arc<winit::window::Window>,
        image: &Image,
    ) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        let texture =
            ImageTexture::from_image(image, "PREVIEW_IMAGE", &state.device, &state.queue)?;

        let preview_renderer = PreviewRenderer::from_texture(
            &state.device,
            state.queue.clone(),
            state.surface_config.format,
            &state.tera,
            texture,
        )?;

        preview_renderer.set_view_dimensions((
            state.surface_config.width,
            state.surface_config.height,
        ));

        Ok(Self {
            state,
            preview_renderer,
        })
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.state.view_dimensions);
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        if view_dimensions.width == 0 || view_dimensions.height == 0 {
            return;
        }

        self.state.set_view_dimensions(view_dimensions);
        self.preview_renderer
            .set_view_dimensions((view_dimensions.width, view_dimensions.height));
    }

    pub fn render(&mut self) -> Result<()> {
        let output = self.state.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.preview_renderer.render_preview(&mut render_pass);
        }

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
