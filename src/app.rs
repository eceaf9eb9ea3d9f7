use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::data::image::Image;
use crate::view::ViewSystem;

const WINDOW_TITLE: &str = "Hybrid Image";
const MAX_INITIAL_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 960);

/// Shows a single image until a key is pressed or the window is closed.
pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    image: Image,
    view_system: Option<ViewSystem>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(event_loop: &EventLoop<UserEvent>, image: Image) -> Self {
        App {
            event_loop_proxy: event_loop.create_proxy(),
            image,
            view_system: None,
            error: None,
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    /// The error that closed the window early, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window, winit::error::OsError> {
        let size = initial_window_size(self.image.width() as u32, self.image.height() as u32);

        event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(size),
        )
    }

    async fn initialize_view_system(
        event_loop_proxy: EventLoopProxy<UserEvent>,
        window: Window,
        image: &Image,
    ) {
        let event = match ViewSystem::from_window(window, image).await {
            Ok(view_system) => UserEvent::ViewSystemReady(view_system),
            Err(error) => UserEvent::ViewSystemFailed(error),
        };

        if event_loop_proxy.send_event(event).is_err() {
            log::warn!("Event loop closed before the preview was ready");
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view_system.is_some() {
            return;
        }

        log::info!("Opening preview window");

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(error) => return self.fail(event_loop, error.into()),
        };

        let event_loop_proxy = self.event_loop_proxy.clone();
        pollster::block_on(App::initialize_view_system(
            event_loop_proxy,
            window,
            &self.image,
        ));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                view_system.render_system.set_view_dimensions(new_size);
                view_system.window.request_redraw();
            }
            WindowEvent::RedrawRequested => match view_system.update_view() {
                Ok(_) => {}
                Err(error) => {
                    if let Some(error) = error.downcast_ref::<wgpu::SurfaceError>() {
                        match error {
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                view_system.render_system.sync_view_dimensions();
                                view_system.window.request_redraw();
                            }
                            wgpu::SurfaceError::OutOfMemory => {
                                log::error!("OutOfMemory");
                                event_loop.exit();
                            }
                            wgpu::SurfaceError::Timeout => {
                                log::warn!("Surface timeout");
                            }
                        }
                    } else {
                        self.fail(event_loop, error);
                    }
                }
            },
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::ViewSystemReady(view_system) => {
                log::info!("View system created");

                view_system.window.request_redraw();
                self.view_system = Some(view_system);
            }
            UserEvent::ViewSystemFailed(error) => self.fail(event_loop, error),
        }
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
    ViewSystemFailed(anyhow::Error),
}

/// Window size that shows the image at 1:1 when it fits, otherwise scaled down
/// to fit within [`MAX_INITIAL_WINDOW_SIZE`].
fn initial_window_size(width: u32, height: u32) -> PhysicalSize<u32> {
    let (width, height) = (width.max(1), height.max(1));

    let scale = f64::min(
        MAX_INITIAL_WINDOW_SIZE.width as f64 / width as f64,
        MAX_INITIAL_WINDOW_SIZE.height as f64 / height as f64,
    )
    .min(1.0);

    PhysicalSize::new(
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_open_at_native_size() {
        assert_eq!(initial_window_size(320, 240), PhysicalSize::new(320, 240));
    }

    #[test]
    fn large_images_are_scaled_to_fit() {
        assert_eq!(initial_window_size(2560, 960), PhysicalSize::new(1280, 480));
        assert_eq!(initial_window_size(1000, 1920), PhysicalSize::new(500, 960));
    }
}
