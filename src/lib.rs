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

//! Input Rebinding Manager
//!
//! A rebinding engine for action-based input: remap a named action (e.g.
//! "Jump") to a new physical key, detect when that key is already bound
//! to another action and resolve the conflict by swapping, cancelling or
//! rejecting under per-column device restrictions.
//!
//! # Features
//!
//! - **Collision Detection:** Ordered scan across every action's slots,
//!   plus a HashMap-based key-usage index for diagnostics
//! - **Swap Protocol:** A contested key can be exchanged between two
//!   actions so both stay bound
//! - **Device Restrictions:** Keyboard / mouse / gamepad / VR-family
//!   rules per binding column
//! - **Whitelist & Blacklist:** Global key filter; a non-empty whitelist
//!   overrides the blacklist
//! - **Atomic Persistence:** Timestamped backups and safe file writes
//!   with rollback support
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, restriction policy, validation,
//!   key-usage index, config parsing)
//! - **`store`:** Mapping persistence (file-backed store, transactions,
//!   backups, defaults provider)
//! - **`rebind`:** The rebind protocol (input boxes, container,
//!   swap/cancel resolution, observers)
//!
//! All engine decisions run synchronously on the caller's thread;
//! "listening" for a key is a latched state, not a blocking wait.
//!
//! # Examples
//!
//! ## Checking a mapping config for conflicts
//!
//! ```no_run
//! use rebind_manager::store::FileMappingStore;
//!
//! let store = FileMappingStore::open("/tmp/inputmap.conf".into())?;
//! for conflict in store.usage_index().find_conflicts() {
//!     println!("{} is bound {} times", conflict.key, conflict.mappings.len());
//! }
//! # Ok::<(), rebind_manager::store::StoreError>(())
//! ```
//!
//! ## Driving a rebind
//!
//! ```no_run
//! use rebind_manager::core::types::Key;
//! use rebind_manager::rebind::{ActionConfig, ContainerConfig, InputContainer};
//! use rebind_manager::store::{FileMappingStore, StaticDefaults};
//!
//! let store = FileMappingStore::open("/tmp/inputmap.conf".into())?;
//! let mut container = InputContainer::new(
//!     ContainerConfig::default(),
//!     Box::new(store),
//!     Box::new(StaticDefaults::default()),
//! );
//! container.setup(&[ActionConfig::new("Jump"), ActionConfig::new("Crouch")]);
//!
//! container.begin_rebind(0, 0)?;
//! let outcome = container.handle_key_press(Key::new("F"), Vec::new())?;
//! println!("{outcome:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod rebind;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::{ActionMapping, InputRestriction, Key, KeyCategory, Modifier, RevertReason};
pub use crate::rebind::{InputContainer, RebindOutcome};
