//! Riemann sphere viewer
//!
//! Plots user-entered expressions on the plane and projects every sample
//! onto the Riemann sphere.

pub mod config;
pub mod input;
pub mod systems;
