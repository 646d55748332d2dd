//! Input handling module
//!
//! Provides input mapping from raw events to semantic actions, and the
//! editable expression slots that typed text goes into.

mod function_editor;
mod input_mapper;

pub use function_editor::{FunctionSlot, FunctionSlots, SlotActivation};
pub use input_mapper::{ClickTracker, InputAction, InputMapper};
