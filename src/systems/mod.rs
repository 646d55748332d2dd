//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod plotting;
mod render;
mod window;

pub use plotting::PlottingSystem;
pub use render::{RenderError, RenderSystem};
pub use window::{format_title, WindowError, WindowSystem};
