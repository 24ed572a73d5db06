//! scene-sort: ProcTHOR scene partitioning
//!
//! Sorts a tree of scene JSON files into a "small houses" list and a
//! "large houses" list by the number of rooms in each scene.
//!
//! ## Architecture
//!
//! - **Acquisition**: glob discovery (`<root>/*/*`) and scene JSON parsing
//! - **Pipeline**: room-count classifier driven by a sequential sort loop
//! - **Storage**: newline-delimited bucket files and a JSON run summary
//! - **Config**: TOML thresholds, paths and error policy

pub mod acquisition;
pub mod config;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use config::{ConfigError, ErrorPolicy, SortConfig};

pub use types::{Bucket, Partition, RoomRange, SceneRecord};

pub use acquisition::{ScanError, SceneError};

pub use pipeline::{Classifier, SortError, SortPipeline};

pub use storage::SortSummary;
