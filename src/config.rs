//! Render configuration
//!
//! Loads the render settings from a RON file, with fallback to defaults.
//! Mode names are checked against the render-mode catalog before any
//! rendering starts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::BatchOptions;
use crate::rendermode::registry;

/// Largest supported block edge in pixels
pub const MAX_BLOCK_PX: u32 = 64;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("no render modes configured")]
    NoModes,
    #[error("render mode '{0}' is listed more than once")]
    DuplicateMode(String),
    #[error("unknown render mode '{name}' (available: {})", .available.join(", "))]
    UnknownMode {
        name: String,
        available: Vec<&'static str>,
    },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Demo world settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain seed
    pub seed: u32,
    /// Chunks along x
    pub chunks_x: i32,
    /// Chunks along z
    pub chunks_z: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            chunks_x: 4,
            chunks_z: 4,
        }
    }
}

/// Everything a render run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render mode names, rendered in this order
    pub rendermodes: Vec<String>,
    /// Root directory for rendered tiles
    pub output_dir: PathBuf,
    /// Pixels along one block edge
    pub block_px: u32,
    /// Number of tile worker threads
    pub workers: usize,
    /// Optional sprite sheet replacing the generated block textures
    pub texture_sheet: Option<PathBuf>,
    /// Demo world
    pub world: WorldConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rendermodes: vec!["normal".to_string()],
            output_dir: PathBuf::from("tiles"),
            block_px: 4,
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            texture_sheet: None,
            world: WorldConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Default config location in the user's config directory
    pub fn default_path() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("org", "blockmap", "Blockmap") {
            proj_dirs.config_dir().join("render.ron")
        } else {
            // Fallback to current directory
            PathBuf::from("./render.ron")
        }
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ron::from_str(&content)?)
    }

    /// Load a config file, falling back to defaults if it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Write this config as pretty RON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check settings before rendering. Mode names use the same exact,
    /// case-sensitive matching as resolution.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rendermodes.is_empty() {
            return Err(ConfigError::NoModes);
        }

        for (i, name) in self.rendermodes.iter().enumerate() {
            if registry::describe(name).is_none() {
                return Err(ConfigError::UnknownMode {
                    name: name.clone(),
                    available: registry::list_names(),
                });
            }
            if self.rendermodes[..i].contains(name) {
                return Err(ConfigError::DuplicateMode(name.clone()));
            }
        }

        if self.block_px == 0 || self.block_px > MAX_BLOCK_PX {
            return Err(ConfigError::InvalidValue {
                field: "block_px",
                reason: format!("must be between 1 and {}, got {}", MAX_BLOCK_PX, self.block_px),
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.world.chunks_x <= 0 || self.world.chunks_z <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "world",
                reason: format!(
                    "needs at least one chunk, got {}x{}",
                    self.world.chunks_x, self.world.chunks_z
                ),
            });
        }

        Ok(())
    }

    /// Batch settings for this configuration
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            modes: self.rendermodes.clone(),
            output_dir: self.output_dir.clone(),
            workers: self.workers,
        }
    }
}
