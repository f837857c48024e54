//! CLI entry point for rebind-manager
//!
//! Provides a command-line interface for listing action bindings,
//! checking a mapping config for key conflicts and restoring defaults.

use clap::{Parser, Subcommand};
use colored::*;
use rebind_manager::core::parser::parse_mapping_file;
use rebind_manager::rebind::{ActionConfig, ContainerConfig, InputContainer};
use rebind_manager::store::{FileMappingStore, StaticDefaults};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rebind-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all action bindings
    List {
        /// Path to the mapping config file
        #[arg(short, long, default_value = "~/.config/rebind/inputmap.conf")]
        config: PathBuf,
    },

    /// Check for keys bound to more than one action
    Check {
        /// Path to the mapping config file
        #[arg(short, long, default_value = "~/.config/rebind/inputmap.conf")]
        config: PathBuf,
    },

    /// Restore every action to the defaults file
    Reset {
        /// Path to the mapping config file
        #[arg(short, long, default_value = "~/.config/rebind/inputmap.conf")]
        config: PathBuf,

        /// Path to the defaults file (same format as the config)
        #[arg(short, long)]
        defaults: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { config } => list_bindings(&config)?,
        Commands::Check { config } => check_conflicts(&config)?,
        Commands::Reset { config, defaults } => reset_bindings(&config, &defaults)?,
    }

    Ok(())
}

/// Expand tilde in a path argument
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// List every action with its bound keys
fn list_bindings(config_path: &Path) -> anyhow::Result<()> {
    let path = expand_path(config_path)?;
    let store = FileMappingStore::open(path.clone())?;

    println!("{} Mapping config: {}", "→".cyan(), path.display());
    println!(
        "{} Found {} mappings\n",
        "✓".green(),
        store.mappings().len()
    );

    for action in action_names(&store) {
        let chords: Vec<String> = store
            .mappings()
            .iter()
            .filter(|m| m.action == action)
            .map(|m| m.chord_label())
            .collect();
        println!("  {:<20} {}", action.bold(), chords.join(", "));
    }

    Ok(())
}

/// Report keys bound to more than one action
fn check_conflicts(config_path: &Path) -> anyhow::Result<()> {
    let path = expand_path(config_path)?;
    let store = FileMappingStore::open(path.clone())?;

    println!("{} Mapping config: {}", "→".cyan(), path.display());

    let mut conflicts = store.usage_index().find_conflicts();
    conflicts.sort_by(|a, b| a.key.name().cmp(b.key.name()));

    if conflicts.is_empty() {
        println!("{} No key conflicts found", "✓".green());
        return Ok(());
    }

    for conflict in &conflicts {
        let actions: Vec<String> = conflict
            .mappings
            .iter()
            .map(|m| m.action.clone())
            .collect();
        println!(
            "{} {} is bound to: {}",
            "✗".red(),
            conflict.key.to_string().bold(),
            actions.join(", ")
        );
    }

    anyhow::bail!("{} conflicting key(s) detected", conflicts.len());
}

/// Replace current bindings with the defaults file, per action
fn reset_bindings(config_path: &Path, defaults_path: &Path) -> anyhow::Result<()> {
    let path = expand_path(config_path)?;
    let defaults_path = expand_path(defaults_path)?;

    let defaults_content = fs::read_to_string(&defaults_path)?;
    let default_mappings = parse_mapping_file(&defaults_content)?;

    let store = FileMappingStore::open(path.clone())?;
    let actions: Vec<ActionConfig> = action_names(&store)
        .into_iter()
        .map(|name| ActionConfig::new(&name))
        .collect();

    // Slots sized to the widest action so no default is dropped
    let keys_per_action = actions
        .iter()
        .map(|a| {
            let current = store.mappings().iter().filter(|m| m.action == a.name).count();
            let defaults = default_mappings
                .iter()
                .filter(|m| m.action == a.name)
                .count();
            current.max(defaults)
        })
        .max()
        .unwrap_or(1)
        .max(1);

    let config = ContainerConfig {
        keys_per_action,
        ..ContainerConfig::default()
    };

    let mut container = InputContainer::new(
        config,
        Box::new(store),
        Box::new(StaticDefaults::new(default_mappings)),
    );
    container.setup(&actions);
    container.reset_key_mappings()?;

    println!("{} Restored defaults from {}", "✓".green(), defaults_path.display());
    for input_box in container.input_boxes() {
        let labels: Vec<String> = input_box
            .slots()
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        println!("  {:<20} {}", input_box.action().bold(), labels.join(", "));
    }

    Ok(())
}

/// Action names in first-seen order
fn action_names(store: &FileMappingStore) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for mapping in store.mappings() {
        if !names.contains(&mapping.action) {
            names.push(mapping.action.clone());
        }
    }
    names
}
