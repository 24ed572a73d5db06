//! Built-in defaults.
//!
//! These reproduce the behaviour of the original one-off sort script, so a
//! run with no config file and no flags produces the same two lists.

// ============================================================================
// Input
// ============================================================================

/// Scene root directory, relative to the working directory.
pub const SCENE_ROOT: &str = "procthor-scene-json";

/// Glob below the root: one directory level, then the scene files.
pub const SCENE_PATTERN: &str = "*/*";

/// Suffix stripped from basenames to derive scene names.
pub const SCENE_SUFFIX: &str = ".json";

// ============================================================================
// Buckets
// ============================================================================

pub const SMALL_MIN_ROOMS: usize = 1;
pub const SMALL_MAX_ROOMS: usize = 3;
pub const SMALL_OUTPUT: &str = "small_houses.txt";

pub const LARGE_MIN_ROOMS: usize = 7;
pub const LARGE_MAX_ROOMS: usize = 10;
pub const LARGE_OUTPUT: &str = "large_houses.txt";

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "SCENE_SORT_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "scene_sort.toml";
