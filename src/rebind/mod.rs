// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rebind protocol: input boxes, container, swap resolution
//!
//! This module holds the controller layer of the rebinding screen:
//!
//! - [`InputBox`]: one action's bindable slots and their display state
//! - [`InputContainer`]: aggregates all boxes, validates candidate keys,
//!   detects cross-action collisions and drives the swap/cancel protocol
//!
//! The container knows nothing about widgets; hosts observe state
//! transitions through [`RebindObserver`] and answer swap prompts
//! through [`SwapConfirmer`]. All collaborators are injected at
//! construction.

use thiserror::Error;

use crate::core::types::Key;
use crate::core::validator::RevertReason;
use crate::store::StoreError;

pub mod container;
pub mod input_box;

pub use container::{ActionConfig, ContainerConfig, InputContainer, KeyVerdict, NavDirection};
pub use input_box::{InputBox, InputSlot, SlotBinding, SlotState};

#[cfg(test)]
mod tests;

/// Fatal and setup errors of the rebind protocol.
///
/// Validation failures a player can trigger (blacklisted key, collision,
/// ...) are not errors: they surface as [`RevertReason`] through
/// [`RebindOutcome::Cancelled`] and the observer. This enum covers
/// misconfiguration and programming errors.
#[derive(Debug, Error)]
pub enum RebindError {
    /// The action has no mappings in the store at setup time.
    #[error("no mappings found for action '{0}'")]
    NoActionFound(String),

    /// Input box index outside the container.
    #[error("input box index {0} out of range")]
    BoxIndexOutOfRange(usize),

    /// Slot index outside the box's configured keys-per-action.
    #[error("slot index {slot} out of range for action '{action}'")]
    SlotIndexOutOfRange { action: String, slot: usize },

    /// A key event arrived while no slot was listening.
    #[error("no slot is currently listening for a key")]
    NotListening,

    /// The mapping store failed to persist.
    ///
    /// The in-memory bindings already reflect the committed change when
    /// this is returned (best-effort persistence).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a processed key press while listening.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RebindOutcome {
    /// The slot was bound to the pressed key.
    Bound {
        /// Action that received the key
        action: String,
        /// Slot index within the action
        slot: usize,
    },

    /// A confirmed swap exchanged keys between two actions.
    Swapped {
        /// Action whose slot was being rebound
        action: String,
        /// Action that previously held the pressed key
        other_action: String,
    },

    /// The rebind was reverted; the reason was reported to the observer.
    Cancelled(RevertReason),
}

/// Everything a swap prompt needs to describe the conflict.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputCollisionData {
    /// Action whose slot is being rebound
    pub current_action: String,

    /// Action already using the pressed key
    pub colliding_action: String,

    /// The key the player pressed
    pub pressed_key: Key,

    /// Key currently bound in the slot being rebound, if any
    pub current_key: Option<Key>,

    /// Key bound in the colliding slot (equals the pressed key)
    pub colliding_key: Key,
}

/// Answers "swap these two bindings?" on behalf of the player.
///
/// Called synchronously from the rebind protocol when a pressed key is
/// legal but already in use by another action.
pub trait SwapConfirmer {
    /// True to perform the exchange, false to cancel the rebind.
    fn confirm_swap(&self, collision: &InputCollisionData) -> bool;
}

/// Confirmer that declines every swap.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSwap;

impl SwapConfirmer for NoSwap {
    fn confirm_swap(&self, _collision: &InputCollisionData) -> bool {
        false
    }
}

/// Observer hooks fired on rebind state transitions.
///
/// All methods default to no-ops so hosts implement only what they need.
/// No return values are expected.
pub trait RebindObserver {
    /// A new input box was added during container setup.
    fn on_add_input_box(&mut self, _action: &str) {}

    /// A key was successfully rebound (`old_key` is `None` when the slot
    /// was previously unbound).
    fn on_key_rebinded(&mut self, _action: &str, _old_key: Option<&Key>, _new_key: &Key) {}

    /// A rebind was reverted, with the specific reason and pressed key.
    fn on_rebind_cancelled(&mut self, _reason: RevertReason, _pressed_key: &Key) {}
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl RebindObserver for NullObserver {}
