//! Scene JSON parser
//!
//! Reads one scene file and reduces it to a `SceneRecord`: the derived scene
//! name and the number of entries in its `rooms` array.

use crate::config::defaults::SCENE_SUFFIX;
use crate::types::{SceneDocument, SceneRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// Per-file scene errors
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scene JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scene {} has no 'rooms' field", .0.display())]
    MissingRooms(PathBuf),

    #[error("Cannot derive a scene name from {}", .0.display())]
    InvalidName(PathBuf),
}

impl SceneError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
            Self::MissingRooms(path) | Self::InvalidName(path) => path,
        }
    }
}

/// Derive a scene name from its file path.
///
/// The basename is cut at the first `.json` (`house_12.json` → `house_12`,
/// `house_12.json.bak` → `house_12`); basenames without `.json` lose their
/// last extension instead. Names containing a line break are rejected, since
/// each name must occupy exactly one line of a bucket file.
pub fn scene_name(path: &Path) -> Result<String, SceneError> {
    let invalid = || SceneError::InvalidName(path.to_path_buf());

    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let name = match file_name.find(SCENE_SUFFIX) {
        Some(idx) => &file_name[..idx],
        None => Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name),
    };

    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(invalid());
    }
    Ok(name.to_string())
}

/// Decode scene JSON already in memory.
pub fn parse_scene(bytes: &[u8], path: &Path) -> Result<SceneRecord, SceneError> {
    let doc: SceneDocument = serde_json::from_slice(bytes).map_err(|source| SceneError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let rooms = doc
        .rooms
        .ok_or_else(|| SceneError::MissingRooms(path.to_path_buf()))?;

    Ok(SceneRecord {
        name: scene_name(path)?,
        room_count: rooms.len(),
        path: path.to_path_buf(),
    })
}

/// Read and decode a scene file.
pub fn load_scene(path: &Path) -> Result<SceneRecord, SceneError> {
    let bytes = std::fs::read(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record = parse_scene(&bytes, path)?;
    trace!(name = %record.name, rooms = record.room_count, "Parsed scene");
    Ok(record)
}
