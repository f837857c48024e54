//! Device-category restriction policy
//!
//! A rebinding screen can restrict each of its columns to a device
//! category: a "Gamepad" column only accepts gamepad keys, a "Mouse"
//! column only mouse buttons, and so on. This module implements the
//! classification rules as pure functions so they can be tested without
//! any platform dependency.
//!
//! VR needs special handling on both sides:
//! - VR controller keys report as gamepad-family keys, so the `Gamepad`
//!   restriction must exclude them explicitly.
//! - The `Vr` restriction only accepts keys belonging to the currently
//!   detected head-mounted-device family, supplied by an injected
//!   [`HmdDetector`].

use serde::{Deserialize, Serialize};

use crate::core::types::Key;

/// Vendor tokens identifying VR controller keys by name.
pub const VR_VENDOR_TOKENS: &[&str] = &["Oculus", "Vive", "MixedReality", "Valve", "PSMove"];

/// Maps a detected HMD family to the key-name token its controllers use.
///
/// Unrecognized families accept no keys under the `Vr` restriction.
const HMD_KEY_CATEGORIES: &[(&str, &str)] = &[("OculusHMD", "Oculus"), ("Morpheus", "PSMove")];

/// Device-category restriction for a binding column
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum InputRestriction {
    /// Any key is acceptable
    #[default]
    None,
    /// Keyboard keys only (no mouse buttons, no gamepad keys)
    Keyboard,
    /// Mouse buttons only
    Mouse,
    /// Keyboard keys and mouse buttons (anything but gamepad keys)
    KeyboardMouse,
    /// Gamepad keys only, VR controller keys excluded
    Gamepad,
    /// Keys of the currently detected HMD family only
    Vr,
}

/// True if the key belongs to a VR controller.
///
/// Matches the key's identifier against the fixed vendor token list.
pub fn is_vr_key(key: &Key) -> bool {
    VR_VENDOR_TOKENS.iter().any(|t| key.name().contains(t))
}

/// Checks a key against a restriction.
///
/// Pure function of its arguments; `hmd_family` is the detected
/// head-mounted-device family name (e.g., "OculusHMD") and is only
/// consulted for [`InputRestriction::Vr`].
///
/// # Example
/// ```
/// use rebind_manager::core::restriction::{respects_restriction, InputRestriction};
/// use rebind_manager::core::types::Key;
///
/// let pad = Key::new("Gamepad_FaceButton_Bottom");
/// assert!(respects_restriction(&pad, InputRestriction::Gamepad, None));
/// assert!(!respects_restriction(&pad, InputRestriction::Keyboard, None));
/// ```
pub fn respects_restriction(
    key: &Key,
    restriction: InputRestriction,
    hmd_family: Option<&str>,
) -> bool {
    match restriction {
        InputRestriction::None => true,
        InputRestriction::Keyboard => !key.is_mouse_button() && !key.is_gamepad_key(),
        InputRestriction::Mouse => key.is_mouse_button(),
        InputRestriction::KeyboardMouse => !key.is_gamepad_key(),
        InputRestriction::Gamepad => key.is_gamepad_key() && !is_vr_key(key),
        InputRestriction::Vr => {
            let Some(family) = hmd_family else {
                return false;
            };

            HMD_KEY_CATEGORIES
                .iter()
                .find(|(hmd, _)| *hmd == family)
                .map(|(_, token)| key.name().contains(token))
                .unwrap_or(false)
        }
    }
}

/// Reports the current head-mounted-device family, if any.
///
/// Injected into the container at construction so the restriction policy
/// stays a pure function and tests never need a real headset.
pub trait HmdDetector {
    /// The detected HMD family name (e.g., "OculusHMD"), or `None` when
    /// no device is present.
    fn current_family(&self) -> Option<String>;
}

/// Detector for platforms without any VR support.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHmd;

impl HmdDetector for NoHmd {
    fn current_family(&self) -> Option<String> {
        None
    }
}
