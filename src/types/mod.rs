//! Shared data structures for scene sorting
//!
//! - `SceneDocument`: the JSON shape read from disk
//! - `SceneRecord`: a parsed scene (name + room count)
//! - `RoomRange` / `Bucket`: classification rule and its outcome
//! - `Partition`: accumulated small/large name lists

mod scene;

pub use scene::*;
