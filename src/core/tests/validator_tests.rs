use crate::core::types::Key;
use crate::core::validator::{KeyFilter, RevertReason};

#[test]
fn test_default_blacklist_blocks_menu_keys() {
    let filter = KeyFilter::default();

    for name in ["Escape", "LeftCommand", "RightCommand"] {
        assert_eq!(
            filter.check(&Key::new(name)),
            Err(RevertReason::BlacklistedKey)
        );
    }

    assert!(filter.check(&Key::new("SpaceBar")).is_ok());
}

#[test]
fn test_whitelist_rejects_everything_else() {
    let filter = KeyFilter::new(vec![Key::new("W"), Key::new("A")], Vec::new());

    assert!(filter.check(&Key::new("W")).is_ok());
    assert_eq!(
        filter.check(&Key::new("SpaceBar")),
        Err(RevertReason::NotWhitelisted)
    );
}

#[test]
fn test_whitelist_overrides_blacklist() {
    // A key on both lists passes: the blacklist is not consulted
    // while a whitelist is configured.
    let filter = KeyFilter::new(vec![Key::new("Escape")], vec![Key::new("Escape")]);
    assert!(filter.check(&Key::new("Escape")).is_ok());

    // And a blacklisted-only key reports NotWhitelisted, not BlacklistedKey
    let filter = KeyFilter::new(vec![Key::new("W")], vec![Key::new("Escape")]);
    assert_eq!(
        filter.check(&Key::new("Escape")),
        Err(RevertReason::NotWhitelisted)
    );
}

#[test]
fn test_empty_filter_accepts_all() {
    let filter = KeyFilter::new(Vec::new(), Vec::new());
    assert!(filter.check(&Key::new("Escape")).is_ok());
    assert!(filter.check(&Key::new("Gamepad_Special_Left")).is_ok());
}
