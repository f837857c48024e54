//! Key-usage indexing and conflict listing
//!
//! This module implements O(1) key-usage lookup using HashMap-based
//! indexing. The mapping store rebuilds this index after every committed
//! change (its "runtime tables"); the CLI uses it to report keys bound
//! to more than one action.
//!
//! # Performance
//! - Add mapping: O(1) average case
//! - Look up a key's users: O(1) average case
//! - List all conflicts: O(n) where n = number of distinct keys
//!
//! Note the index answers "which actions use this key". The ordered
//! collision scan the rebind protocol needs runs over the container's
//! input boxes instead, because the report must name the lowest
//! (action, slot) pair and a HashMap has no iteration order.

use std::collections::HashMap;

use crate::core::types::{ActionMapping, Key};

/// Tracks which actions use each physical key.
///
/// Uses a HashMap where keys are physical `Key`s and values are all
/// mappings bound to that key. A conflict exists when any vector has
/// length > 1.
#[derive(Debug, Default)]
pub struct KeyUsageIndex {
    /// Maps a physical key to every mapping using it.
    usages: HashMap<Key, Vec<ActionMapping>>,
}

/// A physical key bound to two or more actions.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyConflict {
    /// The contested key
    pub key: Key,

    /// All mappings using this key (always 2 or more)
    pub mappings: Vec<ActionMapping>,
}

impl KeyUsageIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            usages: HashMap::new(),
        }
    }

    /// Builds an index from a slice of mappings.
    pub fn from_mappings(mappings: &[ActionMapping]) -> Self {
        let mut index = Self::new();
        for mapping in mappings {
            index.add_mapping(mapping.clone());
        }
        index
    }

    /// Adds a mapping to the index.
    pub fn add_mapping(&mut self, mapping: ActionMapping) {
        self.usages
            .entry(mapping.key.clone())
            .or_default()
            .push(mapping);
    }

    /// Returns every mapping bound to the given key.
    pub fn mappings_for_key(&self, key: &Key) -> &[ActionMapping] {
        self.usages.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if two or more mappings share this key.
    pub fn has_conflict(&self, key: &Key) -> bool {
        self.usages
            .get(key)
            .map(|mappings| mappings.len() > 1)
            .unwrap_or(false)
    }

    /// Lists every key bound to two or more actions.
    pub fn find_conflicts(&self) -> Vec<KeyConflict> {
        self.usages
            .iter()
            .filter(|(_, mappings)| mappings.len() > 1)
            .map(|(key, mappings)| KeyConflict {
                key: key.clone(),
                mappings: mappings.clone(),
            })
            .collect()
    }

    /// Returns the total number of mappings tracked.
    pub fn total_mappings(&self) -> usize {
        self.usages.values().map(|v| v.len()).sum()
    }
}
