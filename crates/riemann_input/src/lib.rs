//! Orbit Input Handling
//!
//! This crate turns mouse and keyboard input into orbit camera motion:
//! rotate around a target, pan the target, and dolly in and out.

mod orbit_controller;

pub use orbit_controller::{OrbitController, OrbitControl};
