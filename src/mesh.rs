//! Square geometry and its GPU-resident buffers.
//!
//! The demo renders exactly one piece of geometry: a square centered at the
//! origin, described as four shared corner vertices and six indices forming
//! two triangles. [`square_geometry`] builds the CPU-side data and [`Mesh`]
//! uploads it into immutable vertex/index buffers.

use crate::gpu::GpuContext;

/// A position-only vertex in normalized device coordinates.
///
/// `#[repr(C)]` plus the bytemuck derives give the struct a predictable
/// 12-byte layout for direct GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout for this vertex type: a single
    /// `Float32x3` position attribute at shader location 0.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };

    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

/// Corner order: top-right, bottom-right, bottom-left, top-left.
/// The two triangles share the top-right/top-left diagonal.
const SQUARE_INDICES: [u32; 6] = [
    0, 1, 3, // upper triangle
    1, 2, 3, // lower triangle
];

/// Builds a square of the given side length centered at the origin, in the
/// z = 0 plane.
pub fn square_geometry(side: f32) -> ([Vertex; 4], [u32; 6]) {
    let half = side * 0.5;
    let vertices = [
        Vertex::new([half, half, 0.0]),
        Vertex::new([half, -half, 0.0]),
        Vertex::new([-half, -half, 0.0]),
        Vertex::new([-half, half, 0.0]),
    ];
    (vertices, SQUARE_INDICES)
}

/// GPU-resident geometry with vertex and index buffers.
///
/// Both buffers are immutable after creation and live for the process
/// lifetime.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Uploads raw vertex and index data into GPU buffers.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Square Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Square Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Creates a square of the given side length centered at the origin.
    pub fn square(gpu: &GpuContext, side: f32) -> Self {
        let (vertices, indices) = square_geometry(side);
        Self::new(gpu, &vertices, &indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_corners() {
        let (vertices, _) = square_geometry(0.4);

        assert_eq!(vertices[0].position, [0.2, 0.2, 0.0]);
        assert_eq!(vertices[1].position, [0.2, -0.2, 0.0]);
        assert_eq!(vertices[2].position, [-0.2, -0.2, 0.0]);
        assert_eq!(vertices[3].position, [-0.2, 0.2, 0.0]);
    }

    #[test]
    fn square_indices_cover_all_corners() {
        let (vertices, indices) = square_geometry(0.4);

        assert_eq!(indices.len(), 6);
        for corner in 0..vertices.len() as u32 {
            assert!(indices.contains(&corner));
        }
        // Two triangles sharing the diagonal corners 1 and 3.
        assert_eq!(&indices[..3], &[0, 1, 3]);
        assert_eq!(&indices[3..], &[1, 2, 3]);
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(Vertex::LAYOUT.array_stride, 12);
    }
}
