//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/levelbind/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tuning for drag sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Time window within which an existing keyframe counts as "nearest"
    pub nearest_epsilon: f32,
    /// Grid the world sample snaps to while the precision modifier is held
    pub position_quantum: f32,
    /// Rotation increment in degrees while the precision modifier is held
    pub rotation_snap_degrees: f32,
    /// Minimum pointer deviation before the first-direction heuristic locks
    pub axis_lock_threshold: f32,
    /// Scale distance multiplier while the uniform modifier is held
    pub uniform_scale_multiplier: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            nearest_epsilon: 0.1,
            position_quantum: 1.0,
            rotation_snap_degrees: 15.0,
            axis_lock_threshold: 0.1,
            uniform_scale_multiplier: 2.0,
        }
    }
}

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Keybinds file to use instead of `<config dir>/keybinds.yaml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keybinds_file: Option<PathBuf>,

    /// Warn when a new keybind repeats an existing key combination
    #[serde(default = "default_true")]
    pub warn_duplicate_predicates: bool,

    #[serde(default)]
    pub drag: DragConfig,
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keybinds_file: None,
            warn_duplicate_predicates: true,
            drag: DragConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Keybinds file in effect: the override, else the default location
    pub fn keybinds_path(&self) -> Option<PathBuf> {
        self.keybinds_file
            .clone()
            .or_else(crate::config_paths::keybinds_file)
    }
}
