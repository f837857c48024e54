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

//! src/core/parser.rs
//!
//! Input-mapping config file parser
//!
//! This module parses mapping config files into [`ActionMapping`]s.
//! It handles:
//! - `input = Action, Modifiers, Key` mapping lines
//! - Variable substitution ($sprintKey)
//! - Comments and whitespace
//! - Line numbers for error reporting
//!
//! # Architecture
//! The parser uses nom combinators for composable, type-safe parsing.
//! It performs two-pass parsing:
//! 1. First pass: Collect variable definitions
//! 2. Second pass: Parse mapping lines with variable substitution

use nom::{
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, space0},
    sequence::preceded,
    IResult, Parser,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::types::{ActionMapping, Key, Modifier};

/// Parse errors with line number context
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("IO error reading mapping config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Parse a complete mapping config file
///
/// # Arguments
/// * `content` - The full config file content as a string
///
/// # Returns
/// A vector of parsed mappings in file (registration) order, or a
/// ParseError naming the offending line.
///
/// # Example
/// ```
/// use rebind_manager::core::parser::parse_mapping_file;
///
/// let content = "$jumpKey = SpaceBar\ninput = Jump, , $jumpKey\n";
/// let mappings = parse_mapping_file(content)?;
/// assert_eq!(mappings.len(), 1);
/// assert_eq!(mappings[0].key.name(), "SpaceBar");
/// # Ok::<(), rebind_manager::core::parser::ParseError>(())
/// ```
pub fn parse_mapping_file(content: &str) -> Result<Vec<ActionMapping>, ParseError> {
    // First pass: Collect variable definitions
    let variables = collect_variables(content);

    // Second pass: Parse mapping lines with variable substitution
    let mut mappings = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        // Skip empty lines, comments and variable definitions
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') || line_trimmed.starts_with('$')
        {
            continue;
        }

        // Only process mapping lines
        if !line_trimmed.starts_with("input") {
            continue;
        }

        // Substitute variables before parsing
        let substituted = substitute_variables(line_trimmed, &variables);

        match parse_input_line(&substituted) {
            Ok((_, mapping)) => mappings.push(mapping),
            Err(e) => {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    message: format!("{:?}", e),
                });
            }
        }
    }

    Ok(mappings)
}

/// Collect variable definitions from the config
///
/// Mapping configs can name keys once and reuse them:
/// ```text
/// $sprintKey = LeftShift
/// input = Sprint, , $sprintKey
/// ```
///
/// Returns a HashMap mapping variable names to their values
pub fn collect_variables(content: &str) -> HashMap<String, String> {
    let mut variables = HashMap::new();

    for line in content.lines() {
        let line_trimmed = line.trim();

        // Variable definition format: $name = value
        if line_trimmed.starts_with('$') {
            if let Some(equals_pos) = line_trimmed.find('=') {
                let var_name = line_trimmed[1..equals_pos].trim().to_string();
                let var_value = line_trimmed[equals_pos + 1..].trim().to_string();
                variables.insert(var_name, var_value);
            }
        }
    }

    variables
}

/// Substitute variables in a line
///
/// Replaces $varName with its value from the variables HashMap
pub fn substitute_variables(line: &str, variables: &HashMap<String, String>) -> String {
    let mut result = line.to_string();

    for (var_name, var_value) in variables {
        let pattern = format!("${}", var_name);
        result = result.replace(&pattern, var_value);
    }

    result
}

/// Parse a single mapping line
///
/// Format: input = ACTION, MODIFIERS, KEY
/// Examples:
/// - `input = Jump, , SpaceBar` (no modifiers)
/// - `input = Walk, Shift+Ctrl, W`
///
/// Returns an ActionMapping or a nom error
pub fn parse_input_line(input: &str) -> IResult<&str, ActionMapping> {
    let (input, _) = (tag("input"), space0, char('='), space0).parse(input)?;

    let (input, action) = take_until(",")(input)?;
    let action = action.trim();

    let (input, _) = (char(','), space0).parse(input)?;
    let (input, modifier_str) = take_until(",")(input)?;
    let modifiers = parse_modifiers(modifier_str.trim());

    let (input, key_name) = preceded(
        (char(','), space0),
        take_while1(|c: char| c != '\n' && c != '#'),
    )
    .parse(input)?;

    Ok((
        input,
        ActionMapping::new(action, modifiers, Key::new(key_name.trim())),
    ))
}

/// Parse modifiers from a string
///
/// Handles formats:
/// - "Shift" → [Shift]
/// - "Shift+Ctrl" → [Shift, Ctrl]
/// - "Shift Ctrl" → [Shift, Ctrl]
/// - "" → []
///
/// Unknown tokens are skipped.
pub fn parse_modifiers(input: &str) -> Vec<Modifier> {
    let parts: Vec<&str> = if input.contains('+') {
        input.split('+').collect()
    } else {
        input.split_whitespace().collect()
    };

    let mut modifiers = Vec::new();
    for part in parts {
        let modifier = match part.trim().to_uppercase().as_str() {
            "SHIFT" => Modifier::Shift,
            "ALT" => Modifier::Alt,
            "CTRL" | "CONTROL" => Modifier::Ctrl,
            "CMD" | "COMMAND" => Modifier::Cmd,
            _ => continue,
        };
        modifiers.push(modifier);
    }

    modifiers
}

/// Renders mappings back into the config file format.
///
/// One `input =` line per mapping, in store (registration) order.
/// Variables are resolved at parse time and not reintroduced.
pub fn render_mapping_file(mappings: &[ActionMapping]) -> String {
    let mut out = String::from("# Input mappings\n");
    for mapping in mappings {
        out.push_str(&mapping.to_string());
        out.push('\n');
    }
    out
}
