//! Scene acquisition
//!
//! Finds scene files on disk and parses them into `SceneRecord`s.

pub mod scanner;
pub mod scene_parser;

pub use scanner::{discover, ScanError};
pub use scene_parser::{load_scene, parse_scene, scene_name, SceneError};
