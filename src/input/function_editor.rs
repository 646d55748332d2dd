//! Editable expression slots
//!
//! Each slot holds the text of one expression and the color it is drawn in.
//! One slot is selected at a time and receives typed text.

use riemann_core::Color;

use crate::config::FunctionsConfig;

/// One expression field
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSlot {
    pub text: String,
    pub color: Color,
}

/// What to plot when a slot is activated
#[derive(Debug, Clone, PartialEq)]
pub struct SlotActivation {
    pub index: usize,
    pub source: String,
    pub color: Color,
}

impl SlotActivation {
    /// The first slot replaces every plot; the others overlay
    pub fn replaces_scene(&self) -> bool {
        self.index == 0
    }
}

/// The set of expression fields
pub struct FunctionSlots {
    slots: Vec<FunctionSlot>,
    selected: usize,
}

impl FunctionSlots {
    /// Build the slots described by the functions config
    pub fn from_config(config: &FunctionsConfig) -> Self {
        let slots = (0..config.slot_count())
            .map(|i| FunctionSlot {
                text: config.initial_text(i).to_string(),
                color: config.color(i),
            })
            .collect();
        Self { slots, selected: 0 }
    }

    /// Number of slots (at least one)
    #[inline]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&FunctionSlot> {
        self.slots.get(index)
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slot(&self) -> &FunctionSlot {
        &self.slots[self.selected]
    }

    /// Select slot `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.slots.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.slots.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.slots.len() - 1) % self.slots.len();
    }

    /// Append typed text to the selected slot, dropping control characters
    pub fn insert_str(&mut self, text: &str) -> bool {
        let slot = &mut self.slots[self.selected];
        let before = slot.text.len();
        slot.text.extend(text.chars().filter(|c| !c.is_control()));
        slot.text.len() != before
    }

    /// Delete the last character of the selected slot
    pub fn backspace(&mut self) -> bool {
        self.slots[self.selected].text.pop().is_some()
    }

    /// Empty every slot
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.text.clear();
        }
    }

    /// Snapshot of slot `index` for plotting
    pub fn activation(&self, index: usize) -> Option<SlotActivation> {
        self.slot(index).map(|slot| SlotActivation {
            index,
            source: slot.text.clone(),
            color: slot.color,
        })
    }

    /// Short status for the window title, e.g. `[1/3] 1 / x`
    pub fn status(&self) -> String {
        format!(
            "[{}/{}] {}",
            self.selected + 1,
            self.count(),
            self.selected_slot().text
        )
    }
}
