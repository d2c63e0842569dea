//! GPU context setup and surface management.
//!
//! [`GpuContext`] owns the wgpu surface, device, queue, and surface
//! configuration for the demo window. Construction performs the usual
//! instance → surface → adapter → device chain; any failure along it is
//! reported as a [`GpuError`] so the caller can exit cleanly instead of
//! panicking mid-initialization.

use std::sync::Arc;
use winit::window::Window;

/// Errors that can occur while bringing up the GPU.
#[derive(Debug)]
pub enum GpuError {
    /// The window surface could not be created.
    CreateSurface(wgpu::CreateSurfaceError),
    /// No suitable GPU adapter was found.
    RequestAdapter(wgpu::RequestAdapterError),
    /// The logical device could not be created.
    RequestDevice(wgpu::RequestDeviceError),
}

impl std::fmt::Display for GpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuError::CreateSurface(e) => write!(f, "failed to create surface: {}", e),
            GpuError::RequestAdapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            GpuError::RequestDevice(e) => write!(f, "failed to create device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::CreateSurface(e) => Some(e),
            GpuError::RequestAdapter(e) => Some(e),
            GpuError::RequestDevice(e) => Some(e),
        }
    }
}

/// Core GPU context holding wgpu resources.
///
/// Created once at startup and passed by reference everywhere rendering
/// happens. Fields are public for direct wgpu access.
pub struct GpuContext {
    /// The surface presenting rendered frames to the window.
    pub surface: wgpu::Surface<'static>,
    /// The logical GPU device for creating resources and pipelines.
    pub device: wgpu::Device,
    /// The command queue for submitting work to the GPU.
    pub queue: wgpu::Queue,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Creates a GPU context for the given window.
    ///
    /// Configures the surface with an sRGB format and Fifo (vsync) present
    /// mode. When the adapter offers `POLYGON_MODE_LINE`, the feature is
    /// requested so the squares can be drawn as outlines.
    ///
    /// Device errors raised after setup (such as shader validation
    /// failures) are routed to the logger rather than aborting the process.
    pub fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(GpuError::CreateSurface)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(GpuError::RequestAdapter)?;

        // Optional; the pipeline falls back to filled triangles without it.
        let required_features = adapter.features() & wgpu::Features::POLYGON_MODE_LINE;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Demo Device"),
            required_features,
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .map_err(GpuError::RequestDevice)?;

        device.on_uncaptured_error(std::sync::Arc::new(|error| {
            log::error!("wgpu error: {error}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigures the surface for new framebuffer dimensions.
    ///
    /// Zero-sized dimensions (window minimize) are ignored to avoid wgpu
    /// validation errors. Vertex data is never touched by a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Returns the current surface width in pixels.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Returns the current surface height in pixels.
    pub fn height(&self) -> u32 {
        self.config.height
    }
}
