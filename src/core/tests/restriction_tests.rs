use crate::core::restriction::{is_vr_key, respects_restriction, InputRestriction};
use crate::core::types::Key;

#[test]
fn test_none_accepts_everything() {
    for name in ["SpaceBar", "LeftMouseButton", "Gamepad_FaceButton_Bottom"] {
        assert!(respects_restriction(
            &Key::new(name),
            InputRestriction::None,
            None
        ));
    }
}

#[test]
fn test_keyboard_rejects_mouse_and_gamepad() {
    assert!(respects_restriction(
        &Key::new("SpaceBar"),
        InputRestriction::Keyboard,
        None
    ));
    assert!(!respects_restriction(
        &Key::new("LeftMouseButton"),
        InputRestriction::Keyboard,
        None
    ));
    assert!(!respects_restriction(
        &Key::new("Gamepad_FaceButton_Bottom"),
        InputRestriction::Keyboard,
        None
    ));
}

#[test]
fn test_mouse_accepts_only_mouse_buttons() {
    assert!(respects_restriction(
        &Key::new("RightMouseButton"),
        InputRestriction::Mouse,
        None
    ));
    assert!(!respects_restriction(
        &Key::new("SpaceBar"),
        InputRestriction::Mouse,
        None
    ));
}

#[test]
fn test_keyboard_mouse_rejects_only_gamepad() {
    assert!(respects_restriction(
        &Key::new("SpaceBar"),
        InputRestriction::KeyboardMouse,
        None
    ));
    assert!(respects_restriction(
        &Key::new("MouseScrollUp"),
        InputRestriction::KeyboardMouse,
        None
    ));
    assert!(!respects_restriction(
        &Key::new("Gamepad_LeftTrigger"),
        InputRestriction::KeyboardMouse,
        None
    ));
}

#[test]
fn test_gamepad_excludes_vr_flagged_keys() {
    // A plain gamepad key passes
    assert!(respects_restriction(
        &Key::new("Gamepad_FaceButton_Bottom"),
        InputRestriction::Gamepad,
        None
    ));

    // VR controller keys report as gamepad keys but must be excluded
    let vr = Key::new("OculusTouch_Left_Grip");
    assert!(vr.is_gamepad_key());
    assert!(!respects_restriction(&vr, InputRestriction::Gamepad, None));
}

#[test]
fn test_vr_requires_detected_device() {
    let key = Key::new("OculusTouch_Left_Grip");
    assert!(!respects_restriction(&key, InputRestriction::Vr, None));
}

#[test]
fn test_vr_matches_family_category() {
    let oculus = Key::new("OculusTouch_Left_Grip");
    let psmove = Key::new("PSMove_Right_Trigger");

    assert!(respects_restriction(
        &oculus,
        InputRestriction::Vr,
        Some("OculusHMD")
    ));
    assert!(!respects_restriction(
        &psmove,
        InputRestriction::Vr,
        Some("OculusHMD")
    ));

    assert!(respects_restriction(
        &psmove,
        InputRestriction::Vr,
        Some("Morpheus")
    ));
    assert!(!respects_restriction(
        &oculus,
        InputRestriction::Vr,
        Some("Morpheus")
    ));
}

#[test]
fn test_vr_unrecognized_family_rejects() {
    let key = Key::new("OculusTouch_Left_Grip");
    assert!(!respects_restriction(
        &key,
        InputRestriction::Vr,
        Some("SomeFutureHMD")
    ));
}

#[test]
fn test_is_vr_key_vendor_tokens() {
    for name in [
        "OculusTouch_Left_Grip",
        "Vive_Right_Trackpad",
        "MixedReality_Left_Menu",
        "Valve_Index_Right_A",
        "PSMove_Right_Trigger",
    ] {
        assert!(is_vr_key(&Key::new(name)), "{name} should be a VR key");
    }

    assert!(!is_vr_key(&Key::new("Gamepad_FaceButton_Bottom")));
    assert!(!is_vr_key(&Key::new("SpaceBar")));
}
