//! Orbit controller for mouse/keyboard camera input
//!
//! Controls:
//! - Left drag: Rotate around the target
//! - Right or middle drag: Pan the target
//! - Mouse wheel: Dolly in/out
//! - Arrow keys: Rotate
//! - PageUp/PageDown: Dolly in/out
//!
//! Printable keys are left alone so they can be typed into expressions.

use std::f32::consts::TAU;

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Orbit controller for handling input
pub struct OrbitController {
    // Keyboard state
    rotate_left: bool,
    rotate_right: bool,
    rotate_up: bool,
    rotate_down: bool,
    zoom_in: bool,
    zoom_out: bool,

    // Mouse state
    rotating: bool,
    panning: bool,
    last_cursor: Option<(f64, f64)>,
    pending_rotate: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: f32,

    // Damping state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Arrow-key rotation in radians per second
    pub key_rotate_speed: f32,
    /// Exponential damping half-life in seconds
    pub damping_half_life: f32,
    pub damping_enabled: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            rotate_left: false,
            rotate_right: false,
            rotate_up: false,
            rotate_down: false,
            zoom_in: false,
            zoom_out: false,

            rotating: false,
            panning: false,
            last_cursor: None,
            pending_rotate: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            key_rotate_speed: 1.5,
            damping_half_life: 0.05,
            damping_enabled: false,
        }
    }

    /// Process keyboard input; returns true if the key was consumed
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::ArrowLeft => { self.rotate_left = pressed; true }
            KeyCode::ArrowRight => { self.rotate_right = pressed; true }
            KeyCode::ArrowUp => { self.rotate_up = pressed; true }
            KeyCode::ArrowDown => { self.rotate_down = pressed; true }
            KeyCode::PageUp => { self.zoom_in = pressed; true }
            KeyCode::PageDown => { self.zoom_out = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.panning = pressed,
            _ => {}
        }
    }

    /// Process an absolute cursor position in physical pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_cursor {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            if self.rotating {
                self.pending_rotate.0 += dx;
                self.pending_rotate.1 += dy;
            }
            if self.panning {
                self.pending_pan.0 += dx;
                self.pending_pan.1 += dy;
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Forget the cursor position (cursor left the window)
    pub fn process_cursor_left(&mut self) {
        self.last_cursor = None;
        self.rotating = false;
        self.panning = false;
    }

    /// Process wheel input in lines; positive scrolls toward the target
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_zoom += lines;
    }

    /// Apply accumulated input to the camera
    ///
    /// `viewport_height` is in physical pixels; a drag across the full
    /// height rotates by one full turn, as three.js OrbitControls does.
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);

        // Mouse drag rotation plus held arrow keys
        let key_yaw = (self.rotate_right as i32 - self.rotate_left as i32) as f32;
        let key_pitch = (self.rotate_up as i32 - self.rotate_down as i32) as f32;

        let yaw_input = -TAU * self.pending_rotate.0 / height * self.rotate_speed
            + key_yaw * self.key_rotate_speed * dt;
        let pitch_input = TAU * self.pending_rotate.1 / height * self.rotate_speed
            + key_pitch * self.key_rotate_speed * dt;

        let (yaw, pitch) = if self.damping_enabled && dt > 0.0 {
            // new = old * factor + input * (1 - factor), factor = 2^(-dt / half_life)
            let factor = 2.0f32.powf(-dt / self.damping_half_life);
            self.smooth_yaw = self.smooth_yaw * factor + yaw_input * (1.0 - factor);
            self.smooth_pitch = self.smooth_pitch * factor + pitch_input * (1.0 - factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (yaw_input, pitch_input)
        };

        if yaw != 0.0 || pitch != 0.0 {
            camera.rotate(yaw, pitch);
        }

        if self.pending_pan != (0.0, 0.0) {
            camera.pan(
                self.pending_pan.0 * self.pan_speed,
                self.pending_pan.1 * self.pan_speed,
                height,
            );
        }

        // Wheel lines plus held zoom keys (two lines per second)
        let key_zoom = (self.zoom_in as i32 - self.zoom_out as i32) as f32 * 2.0 * dt;
        let zoom = (self.pending_zoom + key_zoom) * self.zoom_speed;
        if zoom != 0.0 {
            camera.dolly(0.95f32.powf(zoom));
        }

        // Reset pending input
        self.pending_rotate = (0.0, 0.0);
        self.pending_pan = (0.0, 0.0);
        self.pending_zoom = 0.0;
    }

    /// Toggle damping on/off
    pub fn toggle_damping(&mut self) -> bool {
        self.damping_enabled = !self.damping_enabled;
        // Reset damping state when toggling
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.damping_enabled
    }

    /// Builder: set drag rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set pan speed
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set arrow-key rotation speed (radians per second)
    pub fn with_key_rotate_speed(mut self, speed: f32) -> Self {
        self.key_rotate_speed = speed;
        self
    }

    /// Builder: set damping half-life (lower = more responsive)
    pub fn with_damping_half_life(mut self, half_life: f32) -> Self {
        self.damping_half_life = half_life;
        self
    }

    /// Builder: enable or disable damping
    pub fn with_damping(mut self, enabled: bool) -> Self {
        self.damping_enabled = enabled;
        self
    }
}

/// Trait for orbit camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    /// Orbit around the target by yaw (about world up) and pitch
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Move the target by a screen-space drag in pixels
    fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32);
    /// Scale the distance to the target (< 1 moves closer)
    fn dolly(&mut self, scale: f32);
}
