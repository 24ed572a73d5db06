//! Sequential sort loop
//!
//! Loads each discovered scene, rejects duplicates, classifies the rest and
//! accumulates the result in a `Partition`. Everything runs on the calling
//! thread with plain blocking I/O.

use super::{Classifier, SortError};
use crate::acquisition::{discover, load_scene};
use crate::config::{ErrorPolicy, SortConfig};
use crate::types::Partition;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Files between progress line refreshes.
const PROGRESS_EVERY: usize = 100;

pub struct SortPipeline {
    config: SortConfig,
    classifier: Classifier,
    progress: bool,
}

impl SortPipeline {
    pub fn new(config: SortConfig) -> Result<Self, SortError> {
        let classifier = Classifier::from_config(&config)?;
        Ok(Self {
            config,
            classifier,
            progress: false,
        })
    }

    /// Show a `\r`-rewritten progress counter on stderr.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub const fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Discover scenes under the configured root and classify them all.
    pub fn run(&self) -> Result<Partition, SortError> {
        let paths = discover(&self.config.input.root, &self.config.input.pattern)?;
        self.classify_paths(&paths)
    }

    /// Classify an explicit list of scene files, in order.
    pub fn classify_paths(&self, paths: &[PathBuf]) -> Result<Partition, SortError> {
        let mut progress = Progress::new(self.progress, paths.len());
        let result = self.classify_all(paths, &mut progress);
        progress.finish();

        let partition = result?;
        info!(
            scanned = partition.scanned,
            small = partition.small.len(),
            large = partition.large.len(),
            dropped = partition.dropped,
            skipped = partition.skipped,
            "Sort complete"
        );
        Ok(partition)
    }

    fn classify_all(
        &self,
        paths: &[PathBuf],
        progress: &mut Progress,
    ) -> Result<Partition, SortError> {
        let mut partition = Partition::default();
        let mut seen: HashMap<String, PathBuf> = HashMap::with_capacity(paths.len());

        for path in paths {
            match load_scene(path) {
                Ok(record) => {
                    if let Some(first) = seen.get(&record.name) {
                        let err = SortError::DuplicateName {
                            name: record.name,
                            first: first.clone(),
                            second: record.path,
                        };
                        self.reject(err, &mut partition)?;
                    } else {
                        seen.insert(record.name.clone(), record.path.clone());
                        self.classifier.assign(record, &mut partition);
                    }
                }
                Err(e) => self.reject(e.into(), &mut partition)?,
            }
            progress.tick();
        }

        Ok(partition)
    }

    /// Apply the error policy to a per-file failure.
    fn reject(&self, err: SortError, partition: &mut Partition) -> Result<(), SortError> {
        match self.config.errors.policy {
            ErrorPolicy::FailFast => Err(err),
            ErrorPolicy::SkipInvalid => {
                warn!(error = %err, "Skipping scene");
                partition.skipped += 1;
                Ok(())
            }
        }
    }
}

/// Single-line progress counter on stderr.
struct Progress {
    enabled: bool,
    done: usize,
    total: usize,
}

impl Progress {
    const fn new(enabled: bool, total: usize) -> Self {
        Self {
            enabled: enabled && total > 0,
            done: 0,
            total,
        }
    }

    fn tick(&mut self) {
        self.done += 1;
        if self.enabled && (self.done % PROGRESS_EVERY == 0 || self.done == self.total) {
            eprint!("\r  Classified {}/{} scenes", self.done, self.total);
        }
    }

    fn finish(&self) {
        if self.enabled && self.done > 0 {
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::SceneError;
    use std::path::Path;

    fn write_scene(root: &Path, rel: &str, rooms: usize) -> PathBuf {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        let rooms: Vec<String> = (0..rooms).map(|i| format!(r#"{{"id": "room|{i}"}}"#)).collect();
        std::fs::write(&path, format!(r#"{{"rooms": [{}]}}"#, rooms.join(","))).expect("write");
        path
    }

    fn pipeline(root: &Path, policy: ErrorPolicy) -> SortPipeline {
        let mut config = SortConfig::default();
        config.input.root = root.to_path_buf();
        config.errors.policy = policy;
        SortPipeline::new(config).expect("pipeline")
    }

    #[test]
    fn test_run_discovers_and_classifies() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/house_a.json", 2);
        write_scene(tmp.path(), "train/house_b.json", 8);
        write_scene(tmp.path(), "val/house_c.json", 5);

        let p = pipeline(tmp.path(), ErrorPolicy::FailFast).run().expect("run");
        assert_eq!(p.small, ["house_a"]);
        assert_eq!(p.large, ["house_b"]);
        assert_eq!(p.dropped, 1);
        assert_eq!(p.scanned, 3);
    }

    #[test]
    fn test_fail_fast_on_missing_rooms() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/house_a.json", 2);
        let bad = tmp.path().join("train/house_b.json");
        std::fs::write(&bad, r#"{"walls": []}"#).expect("write");

        let err = pipeline(tmp.path(), ErrorPolicy::FailFast).run().unwrap_err();
        assert!(matches!(err, SortError::Scene(_)));
        assert!(err.to_string().contains("house_b.json"));
    }

    #[test]
    fn test_skip_invalid_continues() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/house_a.json", 2);
        std::fs::write(tmp.path().join("train/house_b.json"), "not json").expect("write");
        write_scene(tmp.path(), "train/house_c.json", 9);

        let p = pipeline(tmp.path(), ErrorPolicy::SkipInvalid).run().expect("run");
        assert_eq!(p.small, ["house_a"]);
        assert_eq!(p.large, ["house_c"]);
        assert_eq!(p.skipped, 1);
        assert_eq!(p.scanned, 2);
    }

    #[test]
    fn test_name_with_line_break_follows_policy() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/a\nb.json", 1);
        write_scene(tmp.path(), "train/house_c.json", 2);

        let err = pipeline(tmp.path(), ErrorPolicy::FailFast).run().unwrap_err();
        assert!(matches!(err, SortError::Scene(SceneError::InvalidName(_))));

        let p = pipeline(tmp.path(), ErrorPolicy::SkipInvalid).run().expect("run");
        assert_eq!(p.small, ["house_c"]);
        assert_eq!(p.skipped, 1);
    }

    #[test]
    fn test_duplicate_name_fails_fast() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/house_1.json", 2);
        write_scene(tmp.path(), "val/house_1.json", 8);

        match pipeline(tmp.path(), ErrorPolicy::FailFast).run() {
            Err(SortError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "house_1");
                assert!(first.ends_with("train/house_1.json"));
                assert!(second.ends_with("val/house_1.json"));
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name_skipped_keeps_first() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_scene(tmp.path(), "train/house_1.json", 2);
        write_scene(tmp.path(), "val/house_1.json", 8);

        let p = pipeline(tmp.path(), ErrorPolicy::SkipInvalid).run().expect("run");
        assert_eq!(p.small, ["house_1"]);
        assert!(p.large.is_empty());
        assert_eq!(p.skipped, 1);
    }

    #[test]
    fn test_classify_paths_preserves_given_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let z = write_scene(tmp.path(), "a/z.json", 1);
        let y = write_scene(tmp.path(), "a/y.json", 2);
        let x = write_scene(tmp.path(), "a/x.json", 3);

        let p = pipeline(tmp.path(), ErrorPolicy::FailFast)
            .classify_paths(&[z, y, x])
            .expect("classify");
        assert_eq!(p.small, ["z", "y", "x"]);
    }

    #[test]
    fn test_overlapping_config_rejected() {
        let mut config = SortConfig::default();
        config.buckets.small.max_rooms = 8;
        assert!(matches!(
            SortPipeline::new(config),
            Err(SortError::OverlappingRanges { .. })
        ));
    }
}
