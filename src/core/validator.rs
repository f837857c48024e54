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

//! Candidate-key validation
//!
//! This module implements the allow/deny filter applied to every key a
//! player presses while rebinding, and the reason taxonomy reported when
//! a rebind is reverted.
//!
//! # Precedence
//! A non-empty whitelist overrides the blacklist entirely: only
//! whitelisted keys are acceptable, and the blacklist is not consulted.
//! With an empty whitelist, any key outside the blacklist is acceptable.
//! Filter failures take precedence over restriction mismatches, which
//! take precedence over collision detection: a key that is disallowed
//! is never offered for a swap. Do not reorder these checks; the order
//! decides which reason is reported for a key failing several of them.

use thiserror::Error;

use crate::core::types::Key;

/// Why a rebind attempt was reverted
#[derive(Clone, Copy, Debug, Error, Eq, Hash, PartialEq)]
pub enum RevertReason {
    /// A whitelist is configured and the key is not on it
    #[error("key is not in the whitelist")]
    NotWhitelisted,

    /// The key is on the blacklist
    #[error("key is blacklisted")]
    BlacklistedKey,

    /// The key's device category does not match the column restriction
    #[error("key does not respect the column's input restriction")]
    RestrictionMismatch,

    /// Another action already uses this key and the swap was not taken
    #[error("key is already bound to another action")]
    UsedByAnotherAction,
}

/// Global allow/deny filter for candidate keys
///
/// # Example
/// ```
/// use rebind_manager::core::validator::KeyFilter;
/// use rebind_manager::core::types::Key;
///
/// let filter = KeyFilter::default();
/// assert!(filter.check(&Key::new("SpaceBar")).is_ok());
/// assert!(filter.check(&Key::new("Escape")).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct KeyFilter {
    /// If non-empty, only these keys are acceptable (blacklist ignored)
    pub whitelist: Vec<Key>,

    /// Keys the player may not bind. Only used if the whitelist is empty
    pub blacklist: Vec<Key>,
}

impl KeyFilter {
    /// Creates a filter with the given whitelist and blacklist.
    pub fn new(whitelist: Vec<Key>, blacklist: Vec<Key>) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }

    /// Checks a candidate key against the filter.
    ///
    /// Returns the specific [`RevertReason`] on rejection. Whitelist
    /// takes precedence: a key on both lists passes when whitelisted.
    pub fn check(&self, key: &Key) -> Result<(), RevertReason> {
        if !self.whitelist.is_empty() {
            return if self.whitelist.contains(key) {
                Ok(())
            } else {
                Err(RevertReason::NotWhitelisted)
            };
        }

        if self.blacklist.contains(key) {
            return Err(RevertReason::BlacklistedKey);
        }

        Ok(())
    }
}

impl Default for KeyFilter {
    /// Empty whitelist; blacklist holds Escape and the platform command
    /// keys, which menus need for their own navigation.
    fn default() -> Self {
        Self {
            whitelist: Vec::new(),
            blacklist: vec![
                Key::new("Escape"),
                Key::new("LeftCommand"),
                Key::new("RightCommand"),
            ],
        }
    }
}
