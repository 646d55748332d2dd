//! Core types for the Riemann sphere viewer
//!
//! This crate turns expression text into line segments:
//! - [`sampling::graph`] - Discretize a function over a symmetric domain
//! - [`polyline::split_polyline`] - Split samples into drawable runs
//! - [`projection`] - Plane curve, projection rays, and sphere trace
//! - [`PlotScene`] - Sphere, axes, and every drawn function

mod error;
mod segment;
pub mod sampling;
pub mod polyline;
pub mod projection;
pub mod shapes;
mod plot;
mod scene;

pub use error::PlotError;
pub use segment::{Color, Segment};
pub use sampling::{graph, Sample, SampleDomain};
pub use polyline::split_polyline;
pub use plot::{Plot, PlotKey};
pub use scene::{PlotScene, SceneLayers, SceneSettings};

// Re-export for convenience
pub use riemann_math::Vec3;
pub use riemann_expr::{CompiledFunction, ExprError};
