//! Riemann Sphere Rendering Library
//!
//! This crate provides the wgpu-based line renderer for the plot scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`orbit_camera::OrbitCamera`] - Perspective camera orbiting a target
//! - [`pipeline::LinePipeline`] - Depth-tested, multisampled line rendering
//! - [`renderable::RenderableLines`] - Converts scene segments to GPU vertices

pub mod context;
pub mod orbit_camera;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use riemann_core::{Color, PlotScene, SceneLayers, Segment};
pub use riemann_math::Vec3;

pub use renderable::RenderableLines;
