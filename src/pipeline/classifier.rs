//! Room-count classifier
//!
//! Maps a scene's room count onto at most one bucket. The two ranges are
//! checked for overlap at construction, so `classify` can test them in any
//! order.

use super::SortError;
use crate::config::SortConfig;
use crate::types::{Bucket, Partition, RoomRange, SceneRecord};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    small: RoomRange,
    large: RoomRange,
}

impl Classifier {
    pub fn new(small: RoomRange, large: RoomRange) -> Result<Self, SortError> {
        if small.overlaps(&large) {
            return Err(SortError::OverlappingRanges { small, large });
        }
        Ok(Self { small, large })
    }

    pub fn from_config(config: &SortConfig) -> Result<Self, SortError> {
        Self::new(config.buckets.small.range(), config.buckets.large.range())
    }

    pub const fn range(&self, bucket: Bucket) -> RoomRange {
        match bucket {
            Bucket::Small => self.small,
            Bucket::Large => self.large,
        }
    }

    pub const fn classify(&self, room_count: usize) -> Option<Bucket> {
        if self.small.contains(room_count) {
            Some(Bucket::Small)
        } else if self.large.contains(room_count) {
            Some(Bucket::Large)
        } else {
            None
        }
    }

    /// Append the record's name to its bucket, or count it as dropped.
    pub fn assign(&self, record: SceneRecord, partition: &mut Partition) -> Option<Bucket> {
        partition.scanned += 1;
        let bucket = self.classify(record.room_count);
        trace!(name = %record.name, rooms = record.room_count, bucket = ?bucket, "Classified scene");
        match bucket {
            Some(b) => partition.push(b, record.name),
            None => partition.dropped += 1,
        }
        bucket
    }
}

impl Default for Classifier {
    fn default() -> Self {
        let config = SortConfig::default();
        Self {
            small: config.buckets.small.range(),
            large: config.buckets.large.range(),
        }
    }
}
