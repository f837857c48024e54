//! One action's bindable slots
//!
//! An `InputBox` owns the display state for a single action: up to
//! keys-per-action slots, each independently rebindable. The box applies
//! decisions made by the container (bind, revert, mark unbound); it
//! never validates keys itself.

use crate::core::types::{chord_label, ActionMapping, Key, Modifier};
use crate::rebind::container::ActionConfig;

/// Per-slot rebind lifecycle state.
///
/// `Listening` is a latched state awaiting the next key event, not a
/// blocking wait.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SlotState {
    /// Not interacting
    #[default]
    Idle,
    /// Waiting for the player to press a key
    Listening,
}

/// A key plus chord modifiers bound in one slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotBinding {
    /// The bound physical key
    pub key: Key,
    /// Chord modifiers, sorted
    pub modifiers: Vec<Modifier>,
}

impl SlotBinding {
    /// Creates a binding with normalized modifiers.
    pub fn new(key: Key, mut modifiers: Vec<Modifier>) -> Self {
        crate::core::types::normalize_modifiers(&mut modifiers);
        Self { key, modifiers }
    }

    /// Label shown for this binding, e.g. "Shift + Space Bar".
    pub fn label(&self) -> String {
        chord_label(&self.modifiers, &self.key)
    }

    /// Converts to a store entry for the given action.
    pub fn to_mapping(&self, action: &str) -> ActionMapping {
        ActionMapping::new(action, self.modifiers.clone(), self.key.clone())
    }
}

/// One bindable slot: optional binding, lifecycle state, display label.
#[derive(Clone, Debug)]
pub struct InputSlot {
    binding: Option<SlotBinding>,
    state: SlotState,
    label: String,
}

impl InputSlot {
    /// The current binding, if any.
    pub fn binding(&self) -> Option<&SlotBinding> {
        self.binding.as_ref()
    }

    /// The bound key, if any.
    pub fn bound_key(&self) -> Option<&Key> {
        self.binding.as_ref().map(|b| &b.key)
    }

    /// The slot's lifecycle state.
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// The label a view should display for this slot.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True if no key is bound.
    pub fn is_unbound(&self) -> bool {
        self.binding.is_none()
    }
}

/// Binding slot controller for a single action.
///
/// Built by the container from the mapping store's current entries for
/// the action; mutated only through the container's rebind protocol.
#[derive(Clone, Debug)]
pub struct InputBox {
    action: String,
    display_name: String,
    paired_action: Option<String>,
    empty_key_text: String,
    press_key_text: String,
    slots: Vec<InputSlot>,
}

impl InputBox {
    /// Builds a box and seeds its slots from existing mappings.
    ///
    /// Seeding iterates the mappings from the end (the most recently
    /// registered entry lands in slot 0) and takes at most
    /// `keys_per_action` of them; remaining slots start unbound. Entries
    /// beyond `keys_per_action` are not represented at all.
    pub(crate) fn build(
        config: &ActionConfig,
        keys_per_action: usize,
        empty_key_text: &str,
        press_key_text: &str,
        mappings: &[ActionMapping],
    ) -> Self {
        let mut input_box = Self {
            action: config.name.clone(),
            display_name: config
                .display_name
                .clone()
                .unwrap_or_else(|| config.name.clone()),
            paired_action: config.paired_action.clone(),
            empty_key_text: empty_key_text.to_string(),
            press_key_text: press_key_text.to_string(),
            slots: Vec::with_capacity(keys_per_action),
        };
        input_box.seed(keys_per_action, mappings);
        input_box
    }

    /// (Re)creates the slot list from the given mappings.
    fn seed(&mut self, keys_per_action: usize, mappings: &[ActionMapping]) {
        self.slots.clear();

        for mapping in mappings.iter().rev().take(keys_per_action) {
            let binding = SlotBinding::new(mapping.key.clone(), mapping.modifiers.clone());
            let label = binding.label();
            self.slots.push(InputSlot {
                binding: Some(binding),
                state: SlotState::Idle,
                label,
            });
        }

        while self.slots.len() < keys_per_action {
            self.slots.push(InputSlot {
                binding: None,
                state: SlotState::Idle,
                label: self.empty_key_text.clone(),
            });
        }
    }

    /// Re-runs seeding against a fresh mapping list.
    ///
    /// Used by reset-to-defaults; an empty list is legal here and leaves
    /// every slot unbound.
    pub(crate) fn rebuild_from(&mut self, mappings: &[ActionMapping]) {
        let keys_per_action = self.slots.len();
        self.seed(keys_per_action, mappings);
    }

    /// The action this box manages.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Human-readable action name for the row header.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The opposite action of a positive/negative pair, if configured.
    pub fn paired_action(&self) -> Option<&str> {
        self.paired_action.as_deref()
    }

    /// All slots in column order.
    pub fn slots(&self) -> &[InputSlot] {
        &self.slots
    }

    /// A single slot by index.
    pub fn slot(&self, index: usize) -> Option<&InputSlot> {
        self.slots.get(index)
    }

    /// Index of the slot currently listening, if any.
    pub fn listening_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.state == SlotState::Listening)
    }

    /// Puts a slot into the listening state and shows the press prompt.
    ///
    /// The underlying binding is untouched until the container commits.
    pub(crate) fn begin_listening(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.state = SlotState::Listening;
            s.label = self.press_key_text.clone();
        }
    }

    /// Reverts a slot's display to its previous binding (or the unbound
    /// placeholder) and leaves the listening state.
    pub(crate) fn cancel(&mut self, slot: usize) {
        let empty = self.empty_key_text.clone();
        if let Some(s) = self.slots.get_mut(slot) {
            s.state = SlotState::Idle;
            s.label = match &s.binding {
                Some(binding) => binding.label(),
                None => empty,
            };
        }
    }

    /// Binds a slot and returns the previous binding.
    pub(crate) fn apply_binding(
        &mut self,
        slot: usize,
        binding: SlotBinding,
    ) -> Option<SlotBinding> {
        let s = self.slots.get_mut(slot)?;
        s.state = SlotState::Idle;
        s.label = binding.label();
        s.binding.replace(binding)
    }

    /// Clears a slot's binding and returns the previous one.
    pub(crate) fn mark_unbound(&mut self, slot: usize) -> Option<SlotBinding> {
        let empty = self.empty_key_text.clone();
        let s = self.slots.get_mut(slot)?;
        s.state = SlotState::Idle;
        s.label = empty;
        s.binding.take()
    }
}
