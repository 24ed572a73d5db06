//! Sort pipeline
//!
//! scanner → scene parser → classifier, with the error policy applied to
//! every per-file failure.

pub mod classifier;
pub mod processor;

pub use classifier::Classifier;
pub use processor::SortPipeline;

use crate::acquisition::{ScanError, SceneError};
use crate::types::RoomRange;
use std::path::PathBuf;
use thiserror::Error;

/// Sort run errors
#[derive(Debug, Error)]
pub enum SortError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Duplicate scene name '{name}': {} and {}", .first.display(), .second.display())]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Room ranges overlap: small {small}, large {large}")]
    OverlappingRanges { small: RoomRange, large: RoomRange },
}
