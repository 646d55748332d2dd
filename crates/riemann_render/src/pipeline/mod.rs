//! Rendering pipeline components
//!
//! Everything in the scene is a line segment, so a single line-list
//! pipeline draws it all.

pub mod types;
pub mod line_pipeline;

pub use types::{LineVertex, LineUniforms};
pub use line_pipeline::{LinePipeline, normalize_sample_count, DEPTH_FORMAT};
