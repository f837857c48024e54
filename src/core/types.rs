//! src/core/types.rs
//!
//! Core type definitions for input rebinding
//!
//! This module defines the fundamental types used throughout the application:
//! - `KeyCategory`: Physical device category of a key (keyboard, mouse, gamepad)
//! - `Key`: An opaque physical input identifier with a display name
//! - `Modifier`: Chord modifier keys (Shift, Alt, Ctrl, Cmd)
//! - `ActionMapping`: One action-to-key assignment in the mapping store
//!
//! All types implement serialization for config persistence and are designed
//! with normalization in mind (sorted modifiers, category derived once).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::restriction::VR_VENDOR_TOKENS;

/// Physical device category of a key
///
/// Derived from the key identifier when the `Key` is constructed.
/// VR controller buttons report as `Gamepad` (they surface as
/// gamepad-family keys on every supported platform) and are told apart
/// by name inspection in the restriction policy.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum KeyCategory {
    /// Regular keyboard key
    Keyboard,
    /// Mouse button or axis
    Mouse,
    /// Gamepad button or axis, including VR controller keys
    Gamepad,
}

/// Mouse button and axis identifiers
///
/// Any key whose identifier matches one of these is classified as `Mouse`.
const MOUSE_KEY_NAMES: &[&str] = &[
    "LeftMouseButton",
    "RightMouseButton",
    "MiddleMouseButton",
    "ThumbMouseButton",
    "ThumbMouseButton2",
    "MouseScrollUp",
    "MouseScrollDown",
    "MouseWheelAxis",
    "MouseX",
    "MouseY",
];

/// An opaque identifier for a physical input
///
/// Represents a keyboard key, mouse button, gamepad button/axis or VR
/// controller button. The category is derived from the identifier once at
/// construction; `Key` is an immutable value type afterwards.
///
/// # Example
/// ```
/// use rebind_manager::core::types::{Key, KeyCategory};
///
/// let key = Key::new("Gamepad_FaceButton_Bottom");
/// assert_eq!(key.category(), KeyCategory::Gamepad);
/// assert_eq!(key.display_name(), "Face Button Bottom");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Key {
    /// Identifier name (e.g., "SpaceBar", "LeftMouseButton", "Gamepad_FaceButton_Bottom")
    name: String,

    /// Device category, derived from the identifier
    category: KeyCategory,
}

impl Key {
    /// Creates a new Key, classifying it by its identifier.
    ///
    /// Classification rules:
    /// - Known mouse button/axis names → `Mouse`
    /// - `Gamepad_` prefix or a VR vendor token in the name → `Gamepad`
    /// - Everything else → `Keyboard`
    pub fn new(name: &str) -> Self {
        let category = if MOUSE_KEY_NAMES.contains(&name) {
            KeyCategory::Mouse
        } else if name.starts_with("Gamepad") || VR_VENDOR_TOKENS.iter().any(|t| name.contains(t))
        {
            KeyCategory::Gamepad
        } else {
            KeyCategory::Keyboard
        };

        Self {
            name: name.to_string(),
            category,
        }
    }

    /// Returns the key's identifier name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key's device category.
    pub fn category(&self) -> KeyCategory {
        self.category
    }

    /// True if this key is a mouse button or axis.
    pub fn is_mouse_button(&self) -> bool {
        self.category == KeyCategory::Mouse
    }

    /// True if this key is a gamepad key (VR controller keys included).
    pub fn is_gamepad_key(&self) -> bool {
        self.category == KeyCategory::Gamepad
    }

    /// Returns a human-readable name for display in binding slots.
    ///
    /// The `Gamepad_` prefix is stripped, underscores become spaces and
    /// camel-case word boundaries are split: "SpaceBar" → "Space Bar",
    /// "Gamepad_FaceButton_Bottom" → "Face Button Bottom".
    pub fn display_name(&self) -> String {
        let stripped = self.name.strip_prefix("Gamepad_").unwrap_or(&self.name);
        humanize(stripped)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Splits an identifier into space-separated words
///
/// Underscores are word breaks, as is every lowercase-to-uppercase
/// transition. Consecutive capitals stay together ("UI" is one word).
fn humanize(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch == '_' {
            if !result.ends_with(' ') {
                result.push(' ');
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !result.ends_with(' ') {
            result.push(' ');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        result.push(ch);
    }

    result.trim().to_string()
}

/// Chord modifier keys
///
/// Declaration order is the display order used for binding labels:
/// "Shift + Alt + Ctrl + Cmd + \<key\>".
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Shift key
    Shift,
    /// Alt key
    Alt,
    /// Control key
    Ctrl,
    /// Command key (macOS)
    Cmd,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Shift => write!(f, "Shift"),
            Modifier::Alt => write!(f, "Alt"),
            Modifier::Ctrl => write!(f, "Ctrl"),
            Modifier::Cmd => write!(f, "Cmd"),
        }
    }
}

/// Sorts and deduplicates a modifier list in place.
///
/// Sort order equals declaration order, so two chords with the same
/// modifiers compare equal regardless of how they were written.
pub fn normalize_modifiers(modifiers: &mut Vec<Modifier>) {
    modifiers.sort();
    modifiers.dedup();
}

/// One action-to-key assignment in the mapping store
///
/// Represents a complete mapping entry: the action it belongs to, the
/// chord modifiers and the physical key. The mapping store keeps entries
/// in registration order per action.
///
/// # Example
/// ```
/// use rebind_manager::core::types::{ActionMapping, Key, Modifier};
///
/// let mapping = ActionMapping::new("Jump", vec![Modifier::Shift], Key::new("SpaceBar"));
/// // Renders as: input = Jump, Shift, SpaceBar
/// assert_eq!(mapping.to_string(), "input = Jump, Shift, SpaceBar");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActionMapping {
    /// The action this mapping belongs to (e.g., "Jump")
    pub action: String,

    /// Chord modifiers, sorted and deduplicated
    pub modifiers: Vec<Modifier>,

    /// The physical key
    pub key: Key,
}

impl ActionMapping {
    /// Creates a new mapping with normalized modifiers.
    pub fn new(action: &str, mut modifiers: Vec<Modifier>, key: Key) -> Self {
        normalize_modifiers(&mut modifiers);

        Self {
            action: action.to_string(),
            modifiers,
            key,
        }
    }

    /// Returns the chord label shown in a binding slot.
    ///
    /// Format: "Shift + Ctrl + Space Bar" (modifiers in display order,
    /// then the key's display name).
    pub fn chord_label(&self) -> String {
        chord_label(&self.modifiers, &self.key)
    }
}

/// Builds a binding-slot label from modifiers and a key.
pub fn chord_label(modifiers: &[Modifier], key: &Key) -> String {
    let mut label = String::new();
    for modifier in modifiers {
        label.push_str(&format!("{} + ", modifier));
    }
    label.push_str(&key.display_name());
    label
}

impl fmt::Display for ActionMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = self
            .modifiers
            .iter()
            .map(|m| format!("{}", m))
            .collect::<Vec<_>>()
            .join("+");
        write!(f, "input = {}, {}, {}", self.action, mods, self.key.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_key_classification() {
        let key = Key::new("SpaceBar");
        assert_eq!(key.category(), KeyCategory::Keyboard);
        assert!(!key.is_mouse_button());
        assert!(!key.is_gamepad_key());
    }

    #[test]
    fn test_mouse_key_classification() {
        let key = Key::new("LeftMouseButton");
        assert_eq!(key.category(), KeyCategory::Mouse);
        assert!(key.is_mouse_button());
        assert!(!key.is_gamepad_key());
    }

    #[test]
    fn test_gamepad_key_classification() {
        let key = Key::new("Gamepad_FaceButton_Bottom");
        assert_eq!(key.category(), KeyCategory::Gamepad);
        assert!(key.is_gamepad_key());
    }

    #[test]
    fn test_vr_key_reports_as_gamepad() {
        // VR controller keys surface as gamepad-family keys
        let key = Key::new("OculusTouch_Right_Trigger");
        assert_eq!(key.category(), KeyCategory::Gamepad);
    }

    #[test]
    fn test_display_name_splits_words() {
        assert_eq!(Key::new("SpaceBar").display_name(), "Space Bar");
        assert_eq!(
            Key::new("LeftMouseButton").display_name(),
            "Left Mouse Button"
        );
        assert_eq!(
            Key::new("Gamepad_FaceButton_Bottom").display_name(),
            "Face Button Bottom"
        );
    }

    #[test]
    fn test_modifier_normalization() {
        // Duplicates removed, order fixed to declaration order
        let a = ActionMapping::new(
            "Jump",
            vec![Modifier::Ctrl, Modifier::Shift, Modifier::Ctrl],
            Key::new("K"),
        );
        let b = ActionMapping::new("Jump", vec![Modifier::Shift, Modifier::Ctrl], Key::new("K"));

        assert_eq!(a, b);
        assert_eq!(a.modifiers, vec![Modifier::Shift, Modifier::Ctrl]);
    }

    #[test]
    fn test_chord_label() {
        let mapping = ActionMapping::new(
            "Jump",
            vec![Modifier::Ctrl, Modifier::Shift],
            Key::new("SpaceBar"),
        );
        assert_eq!(mapping.chord_label(), "Shift + Ctrl + Space Bar");
    }

    #[test]
    fn test_mapping_display_renders_config_line() {
        let mapping = ActionMapping::new("Crouch", vec![], Key::new("LeftControl"));
        assert_eq!(mapping.to_string(), "input = Crouch, , LeftControl");
    }
}
