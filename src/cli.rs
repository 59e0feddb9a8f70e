//! Command-line interface for managing the keybinds file
//!
//! Supports:
//! - Listing keybinds (plain or JSON)
//! - Listing the action table with default settings
//! - Resetting the file to the built-in defaults
//! - Checking for bindings that can never fire
//! - Printing where config, keybinds and logs live

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::config_paths;
use crate::keybind::{ActionKind, KeybindRegistry, SettingsMap};

/// Manage level editor keybinds
#[derive(Parser, Debug)]
#[command(name = "levelbind", version, about = "Manage level editor keybinds")]
pub struct CliArgs {
    /// Keybinds file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// More console logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// List keybinds in priority order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List every action with its index and default settings
    Actions,
    /// Overwrite the keybinds file with the defaults
    Reset,
    /// Report keybinds that can never fire or are shadowed
    Check,
    /// Print the config, keybinds and log locations
    Paths,
}

impl CliArgs {
    /// Subcommand to run; `list` when none was given
    pub fn command(&self) -> CliCommand {
        self.command
            .clone()
            .unwrap_or(CliCommand::List { json: false })
    }

    /// Keybinds file: `--file`, else the config's choice
    pub fn keybinds_path(&self, config: &EngineConfig) -> Option<PathBuf> {
        self.file.clone().or_else(|| config.keybinds_path())
    }
}

/// One keybind as printed by `list --json`
#[derive(Debug, Serialize)]
pub struct ListEntry<'a> {
    pub index: usize,
    pub id: &'a str,
    pub action: i32,
    pub name: String,
    pub keys: String,
    pub settings: &'a SettingsMap,
}

/// Plain listing, one keybind per line
pub fn render_list(registry: &KeybindRegistry) -> String {
    let mut out = String::new();
    for (index, keybind) in registry.iter().enumerate() {
        let _ = write!(
            out,
            "{:>3}  {:<28} {}",
            index,
            keybind.action_name(),
            keybind.display_string()
        );
        let settings: Vec<String> = keybind
            .settings
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        if !settings.is_empty() {
            let _ = write!(out, "  [{}]", settings.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn render_list_json(registry: &KeybindRegistry) -> Result<String, serde_json::Error> {
    let entries: Vec<ListEntry<'_>> = registry
        .iter()
        .enumerate()
        .map(|(index, keybind)| ListEntry {
            index,
            id: &keybind.id,
            action: keybind.action,
            name: keybind.action_name(),
            keys: keybind.display_string(),
            settings: &keybind.settings,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// The action table with default settings
pub fn render_actions() -> String {
    let mut out = String::new();
    for kind in ActionKind::ALL {
        let _ = write!(out, "{:>3}  {}", kind.index(), kind.name());
        let schema: Vec<String> = kind
            .schema()
            .iter()
            .map(|spec| format!("{}={}", spec.name, spec.default))
            .collect();
        if !schema.is_empty() {
            let _ = write!(out, "  [{}]", schema.join(", "));
        }
        out.push('\n');
    }
    out
}

/// File locations in effect, one per line
pub fn render_paths(config: &EngineConfig, keybinds: Option<&Path>) -> String {
    fn show(path: Option<&Path>) -> String {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unavailable)".to_string())
    }

    let mut out = String::new();
    let _ = writeln!(out, "config dir: {}", show(config_paths::config_dir().as_deref()));
    let _ = writeln!(out, "config:     {}", show(config_paths::config_file().as_deref()));
    let _ = writeln!(out, "keybinds:   {}", show(keybinds));
    if config.keybinds_file.is_some() {
        let _ = writeln!(out, "            (overridden in config.yaml)");
    }
    let _ = writeln!(out, "log:        {}", show(config_paths::latest_log_file().as_deref()));
    out
}

/// Diagnostics report; empty registries and clean ones say so
pub fn render_check(registry: &KeybindRegistry) -> String {
    let diagnostics = registry.diagnostics();
    if diagnostics.is_empty() {
        return format!("{} keybinds, no problems found\n", registry.len());
    }

    let mut out = String::new();
    for diagnostic in &diagnostics {
        let _ = writeln!(out, "{}", diagnostic);
    }
    let _ = writeln!(
        out,
        "{} keybinds, {} problem(s)",
        registry.len(),
        diagnostics.len()
    );
    out
}
