//! GPU-compatible data types for the line pipeline
//!
//! These types match the layouts in `line.wgsl`.

use bytemuck::{Pod, Zeroable};
use riemann_math::mat4::{self, Mat4};

/// A line endpoint with color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    /// RGBA color, linear space
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Vertex buffer layout: position at location 0, color at location 1
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Per-frame uniforms
/// Layout: 64 bytes (must match line.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineUniforms {
    /// Projection * view
    pub view_proj: Mat4,
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
        }
    }
}
