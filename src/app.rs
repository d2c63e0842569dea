//! Window lifecycle and the per-frame render step.
//!
//! [`run`] drives a winit event loop in poll mode. The app starts
//! [`App::Pending`] with its configuration, becomes [`App::Running`] once
//! the window and GPU resources exist, and records one render pass per
//! frame: clear to the background color, draw the reference square, then
//! draw one transformed square per held arrow key.

use std::sync::Arc;

use glam::Mat4;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::color::Color;
use crate::gpu::{GpuContext, GpuError};
use crate::input::Input;
use crate::mesh::Mesh;
use crate::square_pass::{DrawCall, SquarePass};
use crate::transform::Transformation;

/// Side length of the square in normalized device coordinates.
const SQUARE_SIDE: f32 = 0.4;

/// Errors that end the application with a nonzero exit status.
#[derive(Debug)]
pub enum AppError {
    /// The window could not be created.
    Window(winit::error::OsError),
    /// GPU setup failed.
    Gpu(GpuError),
    /// The event loop could not be created or run.
    EventLoop(winit::error::EventLoopError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Window(e) => write!(f, "failed to create window: {}", e),
            AppError::Gpu(e) => write!(f, "{}", e),
            AppError::EventLoop(e) => write!(f, "event loop error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Window(e) => Some(e),
            AppError::Gpu(e) => Some(e),
            AppError::EventLoop(e) => Some(e),
        }
    }
}

impl From<GpuError> for AppError {
    fn from(e: GpuError) -> Self {
        AppError::Gpu(e)
    }
}

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "affine2d".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Runs the demo until the window closes or Escape is pressed.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::EventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::Pending { config };
    event_loop.run_app(&mut app).map_err(AppError::EventLoop)?;

    if let App::Failed(error) = app {
        return Err(error);
    }
    Ok(())
}

enum App {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        mesh: Mesh,
        pass: SquarePass,
        input: Input,
    },
    Failed(AppError),
}

impl App {
    fn init(event_loop: &ActiveEventLoop, config: AppConfig) -> Result<App, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(AppError::Window)?,
        );

        let gpu = GpuContext::new(window.clone())?;
        let mesh = Mesh::square(&gpu, SQUARE_SIDE);
        let pass = SquarePass::new(&gpu);

        Ok(App::Running {
            window,
            gpu,
            mesh,
            pass,
            input: Input::new(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let App::Pending { config } = self else {
            return;
        };
        let config = std::mem::take(config);

        match App::init(event_loop, config) {
            Ok(running) => *self = running,
            Err(error) => {
                log::error!("initialization failed: {error}");
                *self = App::Failed(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let App::Running {
            window,
            gpu,
            mesh,
            pass,
            input,
        } = self
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if input.key_down(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                let draws = frame_draws(input);

                let output = match gpu.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.resize(gpu.width(), gpu.height());
                        window.request_redraw();
                        return;
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        window.request_redraw();
                        return;
                    }
                    Err(error) => {
                        log::error!("failed to acquire frame: {error}");
                        event_loop.exit();
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Frame Encoder"),
                    });

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Square Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(Color::BACKGROUND.into()),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    pass.render(gpu, &mut render_pass, mesh, &draws);
                }

                gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Builds the frame's draw list: the reference square (identity, black)
/// first, then one transformed square per held action key in the fixed
/// check order.
///
/// Each key is checked independently, so holding several keys draws
/// several transformed squares in the same frame, later ones on top.
fn frame_draws(input: &Input) -> Vec<DrawCall> {
    let mut draws = vec![DrawCall {
        transform: Mat4::IDENTITY,
        color: Color::BLACK,
    }];

    for op in Transformation::ALL {
        if input.key_down(op.key()) {
            draws.push(DrawCall {
                transform: op.matrix(),
                color: op.color(),
            });
        }
    }

    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    #[test]
    fn idle_frame_draws_only_the_reference_square() {
        let input = Input::new();
        let draws = frame_draws(&input);

        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].transform, Mat4::IDENTITY);
        assert_eq!(draws[0].color, Color::BLACK);
    }

    #[test]
    fn held_key_adds_its_transformed_square() {
        let mut input = Input::new();
        input.key_event(KeyCode::ArrowRight, ElementState::Pressed);

        let draws = frame_draws(&input);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[1].transform, Transformation::Translate.matrix());
        assert_eq!(draws[1].color, Color::BLUE);
    }

    #[test]
    fn several_held_keys_draw_several_squares_in_check_order() {
        let mut input = Input::new();
        input.key_event(KeyCode::ArrowUp, ElementState::Pressed);
        input.key_event(KeyCode::ArrowDown, ElementState::Pressed);

        let draws = frame_draws(&input);
        assert_eq!(draws.len(), 3);
        // Rotate (ArrowDown) is checked before Shear (ArrowUp).
        assert_eq!(draws[1].color, Color::RED);
        assert_eq!(draws[2].color, Color::PURPLE);
    }

    #[test]
    fn all_keys_held_fills_the_draw_capacity() {
        let mut input = Input::new();
        for op in Transformation::ALL {
            input.key_event(op.key(), ElementState::Pressed);
        }

        let draws = frame_draws(&input);
        assert_eq!(draws.len(), crate::square_pass::MAX_DRAWS);
    }

    #[test]
    fn released_key_stops_drawing() {
        let mut input = Input::new();
        input.key_event(KeyCode::ArrowLeft, ElementState::Pressed);
        input.key_event(KeyCode::ArrowLeft, ElementState::Released);

        assert_eq!(frame_draws(&input).len(), 1);
    }
}
