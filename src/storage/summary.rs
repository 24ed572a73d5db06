//! JSON run summary
//!
//! Machine-readable record of a sort run: thresholds, outputs and counts.

use crate::config::SortConfig;
use crate::types::{Bucket, Partition, RoomRange};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub range: RoomRange,
    pub output: PathBuf,
    pub scenes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortSummary {
    pub root: PathBuf,
    pub pattern: String,
    pub scanned: usize,
    pub dropped: usize,
    pub skipped: usize,
    pub buckets: Vec<BucketSummary>,
}

impl SortSummary {
    pub fn new(config: &SortConfig, partition: &Partition) -> Self {
        let buckets = Bucket::ALL
            .into_iter()
            .map(|bucket| {
                let b = config.buckets.get(bucket);
                BucketSummary {
                    bucket,
                    range: b.range(),
                    output: b.output.clone(),
                    scenes: partition.count(bucket),
                }
            })
            .collect();

        Self {
            root: config.input.root.clone(),
            pattern: config.input.pattern.clone(),
            scanned: partition.scanned,
            dropped: partition.dropped,
            skipped: partition.skipped,
            buckets,
        }
    }

    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON serialize error: {e}"))
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_shape() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("summary.json");
        let partition = Partition {
            small: vec!["a".into(), "b".into()],
            large: vec!["c".into()],
            scanned: 6,
            dropped: 3,
            skipped: 0,
        };
        SortSummary::new(&SortConfig::default(), &partition)
            .write_json(&path)
            .expect("write");

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(v["scanned"], 6);
        assert_eq!(v["dropped"], 3);
        assert_eq!(v["buckets"][0]["bucket"], "small");
        assert_eq!(v["buckets"][0]["scenes"], 2);
        assert_eq!(v["buckets"][1]["range"]["min_rooms"], 7);
        assert_eq!(v["buckets"][1]["output"], "large_houses.txt");
    }
}
