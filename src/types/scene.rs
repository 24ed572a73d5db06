//! Scene records, room-count ranges and output buckets

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Scene Document
// ============================================================================

/// On-disk scene JSON, reduced to the one field the sorter reads.
///
/// Room entries are deserialized as `IgnoredAny` so large house documents are
/// walked without materializing their contents. `rooms` is optional at the
/// serde level so a missing field can be reported as its own error instead of
/// a generic "missing field" parse failure.
///
/// Only a JSON object is accepted; serde's derived struct impl would also read
/// a top-level array positionally.
#[derive(Debug)]
pub struct SceneDocument {
    pub rooms: Option<Vec<IgnoredAny>>,
}

impl<'de> Deserialize<'de> for SceneDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SceneDocumentVisitor)
    }
}

struct SceneDocumentVisitor;

impl<'de> Visitor<'de> for SceneDocumentVisitor {
    type Value = SceneDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scene JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SceneDocument, A::Error> {
        let mut rooms: Option<Vec<IgnoredAny>> = None;
        let mut seen_rooms = false;
        while let Some(key) = map.next_key::<String>()? {
            if key == "rooms" {
                if seen_rooms {
                    return Err(de::Error::duplicate_field("rooms"));
                }
                seen_rooms = true;
                rooms = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(SceneDocument { rooms })
    }
}

// ============================================================================
// Scene Record
// ============================================================================

/// One classified scene: its derived name and room count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord {
    /// Basename with the `.json` suffix removed
    pub name: String,
    /// Length of the `rooms` array
    pub room_count: usize,
    /// Source file
    pub path: PathBuf,
}

// ============================================================================
// Room Range
// ============================================================================

/// Inclusive room-count range `[min_rooms, max_rooms]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRange {
    pub min_rooms: usize,
    pub max_rooms: usize,
}

impl RoomRange {
    pub const fn new(min_rooms: usize, max_rooms: usize) -> Self {
        Self { min_rooms, max_rooms }
    }

    pub const fn contains(&self, room_count: usize) -> bool {
        room_count >= self.min_rooms && room_count <= self.max_rooms
    }

    /// True when `min_rooms > max_rooms`, i.e. the range matches nothing.
    pub const fn is_empty(&self) -> bool {
        self.min_rooms > self.max_rooms
    }

    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_rooms <= other.max_rooms
            && other.min_rooms <= self.max_rooms
    }
}

impl fmt::Display for RoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min_rooms, self.max_rooms)
    }
}

// ============================================================================
// Bucket
// ============================================================================

/// Output classification for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Small,
    Large,
}

impl Bucket {
    pub const ALL: [Self; 2] = [Self::Small, Self::Large];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Partition
// ============================================================================

/// Result of a sort run: both name lists in discovery order plus counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub small: Vec<String>,
    pub large: Vec<String>,
    /// Files that parsed successfully
    pub scanned: usize,
    /// Parsed scenes outside both ranges
    pub dropped: usize,
    /// Files skipped under the skip-invalid policy
    pub skipped: usize,
}

impl Partition {
    pub fn push(&mut self, bucket: Bucket, name: String) {
        match bucket {
            Bucket::Small => self.small.push(name),
            Bucket::Large => self.large.push(name),
        }
    }

    pub fn names(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Small => &self.small,
            Bucket::Large => &self.large,
        }
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.names(bucket).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let r = RoomRange::new(7, 10);
        assert!(!r.contains(6));
        assert!(r.contains(7));
        assert!(r.contains(10));
        assert!(!r.contains(11));
    }

    #[test]
    fn test_range_overlap() {
        let small = RoomRange::new(1, 3);
        assert!(!small.overlaps(&RoomRange::new(7, 10)));
        assert!(!small.overlaps(&RoomRange::new(4, 6)));
        assert!(small.overlaps(&RoomRange::new(3, 5)));
        assert!(RoomRange::new(2, 2).overlaps(&RoomRange::new(1, 3)));
        // An empty range overlaps nothing
        assert!(!RoomRange::new(5, 2).overlaps(&RoomRange::new(1, 10)));
    }

    #[test]
    fn test_document_reads_room_count_only() {
        let doc: SceneDocument = serde_json::from_str(
            r#"{"rooms": [{"id": "room|1", "floorPolygon": []}, {"id": "room|2"}], "walls": [1, 2, 3]}"#,
        )
        .expect("parse");
        assert_eq!(doc.rooms.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_document_without_rooms() {
        let doc: SceneDocument = serde_json::from_str(r#"{"doors": []}"#).expect("parse");
        assert!(doc.rooms.is_none());
    }

    #[test]
    fn test_document_rejects_top_level_array() {
        let err = serde_json::from_str::<SceneDocument>(r#"[[{}, {}]]"#).unwrap_err();
        assert!(err.to_string().contains("scene JSON object"), "{err}");
    }

    #[test]
    fn test_partition_push_and_count() {
        let mut p = Partition::default();
        p.push(Bucket::Small, "a".to_string());
        p.push(Bucket::Large, "b".to_string());
        p.push(Bucket::Small, "c".to_string());
        assert_eq!(p.names(Bucket::Small), ["a", "c"]);
        assert_eq!(p.count(Bucket::Large), 1);
    }
}
