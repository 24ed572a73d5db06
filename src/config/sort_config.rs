//! Sort Configuration - input glob, bucket thresholds and output paths as TOML
//!
//! Each struct implements `Default` with the values of the original script,
//! so a run with no config file behaves exactly like it.

use super::defaults;
use crate::types::{Bucket, RoomRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a sort run.
///
/// Load with `SortConfig::load()` which searches:
/// 1. `$SCENE_SORT_CONFIG` env var
/// 2. `./scene_sort.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Where scene files are discovered
    #[serde(default)]
    pub input: InputConfig,

    /// Room-count thresholds and output files
    #[serde(default)]
    pub buckets: BucketsConfig,

    /// What to do with unreadable or malformed scenes
    #[serde(default)]
    pub errors: ErrorConfig,
}

impl SortConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SCENE_SORT_CONFIG` environment variable
    /// 2. `./scene_sort.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded sort config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./scene_sort.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded sort config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Sort config saved");
        Ok(())
    }

    /// Validate thresholds and paths for internal consistency.
    ///
    /// Rules:
    /// - Each bucket range must have `min_rooms <= max_rooms`
    /// - Bucket ranges must not overlap
    /// - Output paths must differ
    /// - Root and pattern must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for bucket in Bucket::ALL {
            let b = self.buckets.get(bucket);
            if b.min_rooms > b.max_rooms {
                errors.push(format!(
                    "buckets.{bucket}: min_rooms ({}) must be <= max_rooms ({})",
                    b.min_rooms, b.max_rooms
                ));
            }
            if b.output.as_os_str().is_empty() {
                errors.push(format!("buckets.{bucket}.output must not be empty"));
            }
        }

        let (small, large) = (self.buckets.small.range(), self.buckets.large.range());
        if small.overlaps(&large) {
            errors.push(format!(
                "buckets.small {small} overlaps buckets.large {large}; a scene must land in at most one bucket"
            ));
        }

        if self.buckets.small.output == self.buckets.large.output {
            errors.push(format!(
                "buckets.small.output and buckets.large.output are both '{}'",
                self.buckets.small.output.display()
            ));
        }

        if self.input.root.as_os_str().is_empty() {
            errors.push("input.root must not be empty".to_string());
        }
        if self.input.pattern.trim().is_empty() {
            errors.push("input.pattern must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Config Error
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding one subdirectory level of scene files
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob evaluated relative to `root`
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            pattern: default_pattern(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(defaults::SCENE_ROOT)
}

fn default_pattern() -> String {
    defaults::SCENE_PATTERN.to_string()
}

// ============================================================================
// Buckets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketsConfig {
    #[serde(default = "BucketConfig::small")]
    pub small: BucketConfig,

    #[serde(default = "BucketConfig::large")]
    pub large: BucketConfig,
}

impl Default for BucketsConfig {
    fn default() -> Self {
        Self {
            small: BucketConfig::small(),
            large: BucketConfig::large(),
        }
    }
}

impl BucketsConfig {
    pub const fn get(&self, bucket: Bucket) -> &BucketConfig {
        match bucket {
            Bucket::Small => &self.small,
            Bucket::Large => &self.large,
        }
    }
}

/// Inclusive room-count range and the file its names are written to.
///
/// An omitted table falls back to the built-in bucket; a table that is
/// present must set all three keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub min_rooms: usize,
    pub max_rooms: usize,
    pub output: PathBuf,
}

impl BucketConfig {
    pub fn small() -> Self {
        Self {
            min_rooms: defaults::SMALL_MIN_ROOMS,
            max_rooms: defaults::SMALL_MAX_ROOMS,
            output: PathBuf::from(defaults::SMALL_OUTPUT),
        }
    }

    pub fn large() -> Self {
        Self {
            min_rooms: defaults::LARGE_MIN_ROOMS,
            max_rooms: defaults::LARGE_MAX_ROOMS,
            output: PathBuf::from(defaults::LARGE_OUTPUT),
        }
    }

    pub const fn range(&self) -> RoomRange {
        RoomRange::new(self.min_rooms, self.max_rooms)
    }
}

// ============================================================================
// Error Policy
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the run on the first unreadable, malformed or duplicate scene
    #[default]
    FailFast,
    /// Log a warning, count the file as skipped and keep going
    SkipInvalid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorConfig {
    #[serde(default)]
    pub policy: ErrorPolicy,
}
