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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for input rebinding, including:
//! - Type definitions for keys, modifiers and action mappings
//! - The device-category restriction policy (keyboard/mouse/gamepad/VR)
//! - Candidate-key validation (whitelist/blacklist precedence)
//! - Key-usage indexing with HashMap-based O(1) lookup
//! - Mapping config parsing
//!
//! All business logic is isolated from UI and I/O concerns to enable
//! comprehensive unit testing without a real input device.

pub mod collision;
pub mod parser;
pub mod restriction;
pub mod types;
pub mod validator;

pub use collision::{KeyConflict, KeyUsageIndex};
pub use restriction::{respects_restriction, HmdDetector, InputRestriction, NoHmd};
pub use types::*;
pub use validator::{KeyFilter, RevertReason};

#[cfg(test)]
mod tests;
