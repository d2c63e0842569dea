//! The render pass that draws flat-colored, transformed squares.
//!
//! [`SquarePass`] owns the pipeline and a single uniform buffer carved into
//! aligned per-draw slots. Each queued [`DrawCall`] writes its transform and
//! color into its own slot, then draws the square geometry with the matching
//! dynamic bind-group offset. Separate slots keep every draw's uniforms
//! intact within one queue submission, so several transformed squares can
//! share a frame.

use glam::Mat4;

use crate::color::Color;
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex};

/// One square to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    /// Homogeneous transform applied to the square's vertices.
    pub transform: Mat4,
    /// Flat fill (or outline) color.
    pub color: Color,
}

/// Upper bound on draws per frame: the reference square plus one per
/// transformation.
pub const MAX_DRAWS: usize = 5;

/// Per-draw uniforms, one aligned slot each in the shared buffer.
///
/// Matches `SquareUniforms` in `shaders/square.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SquareUniforms {
    transform: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Renders transformed, flat-colored copies of a square mesh.
pub struct SquarePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniform_stride: u64,
}

impl SquarePass {
    /// Creates the pipeline and per-draw uniform storage.
    ///
    /// Shader and pipeline construction run inside a validation error
    /// scope: a failure is logged and the pass is returned anyway, leaving
    /// the app running with a possibly-unusable pipeline (later draw
    /// errors also go to the logger, not a panic).
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        // Each draw needs its own slot at the device's uniform offset
        // alignment.
        let min_alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = (std::mem::size_of::<SquareUniforms>() as u64).max(min_alignment);

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Square Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/square.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Square Uniforms"),
            size: uniform_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Square Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SquareUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Square Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<SquareUniforms>() as u64),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Square Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Outline the squares when the device allows it, filled triangles
        // otherwise.
        let polygon_mode = if device.features().contains(wgpu::Features::POLYGON_MODE_LINE) {
            wgpu::PolygonMode::Line
        } else {
            wgpu::PolygonMode::Fill
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Square Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                polygon_mode,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            log::error!("square pipeline failed to build: {error}");
        }

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            uniform_stride,
        }
    }

    /// Draws each queued square with its own transform and color.
    ///
    /// Draws beyond [`MAX_DRAWS`] are dropped with a warning; the frame
    /// loop never queues that many.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        mesh: &Mesh,
        draws: &[DrawCall],
    ) {
        if draws.is_empty() {
            return;
        }

        if draws.len() > MAX_DRAWS {
            log::warn!("dropping {} draws beyond capacity", draws.len() - MAX_DRAWS);
        }
        let draws = &draws[..draws.len().min(MAX_DRAWS)];

        for (i, draw) in draws.iter().enumerate() {
            let uniforms = SquareUniforms {
                transform: draw.transform.to_cols_array_2d(),
                color: draw.color.to_array(),
            };
            gpu.queue.write_buffer(
                &self.uniform_buffer,
                i as u64 * self.uniform_stride,
                bytemuck::cast_slice(&[uniforms]),
            );
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for i in 0..draws.len() {
            let offset = (i as u64 * self.uniform_stride) as u32;
            render_pass.set_bind_group(0, &self.bind_group, &[offset]);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
