//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like ActivateSlot, Exit, etc.
//! Orbit keys (arrows, PageUp/PageDown) are NOT mapped here - they go directly to
//! OrbitController. Printable text is NOT mapped either - it is typed into the
//! selected slot.

use std::time::{Duration, Instant};

use riemann_core::SceneLayers;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, ModifiersState};

/// Actions triggered by special input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Reset camera to starting position (Ctrl+R)
    ResetCamera,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
    /// Toggle orbit damping (Ctrl+D)
    ToggleDamping,
    /// Select the next slot (Tab)
    NextSlot,
    /// Select the previous slot (Shift+Tab)
    PrevSlot,
    /// Plot the selected slot (Enter)
    ActivateSelected,
    /// Plot slot `n`, zero-based (F1..F9)
    ActivateSlot(usize),
    /// Delete the last character of the selected slot (Backspace)
    DeleteChar,
    /// Empty every slot and the scene (Delete, or double-click)
    ClearAll,
    /// Show or hide a scene layer (Ctrl+1..5)
    ToggleLayer(SceneLayers),
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for keys that should be typed or passed to the controller
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        modifiers: ModifiersState,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        if modifiers.control_key() {
            return match key {
                KeyCode::KeyR => Some(InputAction::ResetCamera),
                KeyCode::KeyD => Some(InputAction::ToggleDamping),
                KeyCode::Digit1 => Some(InputAction::ToggleLayer(SceneLayers::SPHERE)),
                KeyCode::Digit2 => Some(InputAction::ToggleLayer(SceneLayers::AXES)),
                KeyCode::Digit3 => Some(InputAction::ToggleLayer(SceneLayers::CURVES)),
                KeyCode::Digit4 => Some(InputAction::ToggleLayer(SceneLayers::RAYS)),
                KeyCode::Digit5 => Some(InputAction::ToggleLayer(SceneLayers::TRACES)),
                _ => None,
            };
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::F11 => Some(InputAction::ToggleFullscreen),
            KeyCode::Tab if modifiers.shift_key() => Some(InputAction::PrevSlot),
            KeyCode::Tab => Some(InputAction::NextSlot),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(InputAction::ActivateSelected),
            KeyCode::Backspace => Some(InputAction::DeleteChar),
            KeyCode::Delete => Some(InputAction::ClearAll),
            _ => Self::function_key_slot(key).map(InputAction::ActivateSlot),
        }
    }

    /// F1..F9 to a zero-based slot index
    fn function_key_slot(key: KeyCode) -> Option<usize> {
        const KEYS: [KeyCode; 9] = [
            KeyCode::F1,
            KeyCode::F2,
            KeyCode::F3,
            KeyCode::F4,
            KeyCode::F5,
            KeyCode::F6,
            KeyCode::F7,
            KeyCode::F8,
            KeyCode::F9,
        ];
        KEYS.iter().position(|&k| k == key)
    }
}

/// Detects double-clicks from a stream of press times
pub struct ClickTracker {
    threshold: Duration,
    last_press: Option<Instant>,
}

impl ClickTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_press: None,
        }
    }

    /// Record a press; returns true when it completes a double-click
    ///
    /// A third quick press starts a new pair instead of firing again.
    pub fn register(&mut self, now: Instant) -> bool {
        match self.last_press {
            Some(last) if now.saturating_duration_since(last) <= self.threshold => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}
