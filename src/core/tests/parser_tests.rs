use crate::core::parser::{
    collect_variables, parse_input_line, parse_mapping_file, render_mapping_file,
};
use crate::core::types::{KeyCategory, Modifier};

#[test]
fn test_parse_simple_line() {
    let (_, mapping) = parse_input_line("input = Jump, , SpaceBar").expect("should parse");

    assert_eq!(mapping.action, "Jump");
    assert!(mapping.modifiers.is_empty());
    assert_eq!(mapping.key.name(), "SpaceBar");
}

#[test]
fn test_parse_line_with_modifiers() {
    let (_, mapping) = parse_input_line("input = Walk, Shift+Ctrl, W").expect("should parse");

    assert_eq!(mapping.action, "Walk");
    assert_eq!(mapping.modifiers, vec![Modifier::Shift, Modifier::Ctrl]);
    assert_eq!(mapping.key.name(), "W");
}

#[test]
fn test_parse_line_classifies_key() {
    let (_, mapping) =
        parse_input_line("input = Fire, , LeftMouseButton").expect("should parse");
    assert_eq!(mapping.key.category(), KeyCategory::Mouse);

    let (_, mapping) =
        parse_input_line("input = Jump, , Gamepad_FaceButton_Bottom").expect("should parse");
    assert_eq!(mapping.key.category(), KeyCategory::Gamepad);
}

#[test]
fn test_parse_file_skips_comments_and_blanks() {
    let content = "\
# movement bindings

input = Jump, , SpaceBar
# fire
input = Fire, , LeftMouseButton
";

    let mappings = parse_mapping_file(content).expect("should parse");
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0].action, "Jump");
    assert_eq!(mappings[1].action, "Fire");
}

#[test]
fn test_variable_substitution() {
    let content = "\
$jumpKey = SpaceBar
$mods = Shift

input = Jump, $mods, $jumpKey
";

    let variables = collect_variables(content);
    assert_eq!(variables.get("jumpKey").map(String::as_str), Some("SpaceBar"));

    let mappings = parse_mapping_file(content).expect("should parse");
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].key.name(), "SpaceBar");
    assert_eq!(mappings[0].modifiers, vec![Modifier::Shift]);
}

#[test]
fn test_malformed_line_reports_line_number() {
    let content = "input = Jump, , SpaceBar\ninput = Broken\n";

    let err = parse_mapping_file(content).expect_err("should fail");
    assert!(err.to_string().contains("line 2"), "got: {err}");
}

#[test]
fn test_file_order_is_registration_order() {
    let content = "\
input = Jump, , SpaceBar
input = Jump, , Gamepad_FaceButton_Bottom
input = Jump, Shift, J
";

    let mappings = parse_mapping_file(content).expect("should parse");
    let keys: Vec<&str> = mappings.iter().map(|m| m.key.name()).collect();
    assert_eq!(keys, vec!["SpaceBar", "Gamepad_FaceButton_Bottom", "J"]);
}

#[test]
fn test_render_round_trip() {
    let content = "\
input = Jump, , SpaceBar
input = Walk, Shift+Ctrl, W
input = Fire, , LeftMouseButton
";

    let mappings = parse_mapping_file(content).expect("should parse");
    let rendered = render_mapping_file(&mappings);
    let reparsed = parse_mapping_file(&rendered).expect("render should stay parseable");

    assert_eq!(mappings, reparsed);
}
