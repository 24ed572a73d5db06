//! Plain-text bucket files: one scene name per line, no header

use crate::config::SortConfig;
use crate::types::{Bucket, Partition};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Write `names` to `path`, one per line, replacing any existing file.
///
/// Every entry, including the last, ends with `\n`. An empty list produces an
/// empty file.
pub fn write_bucket<S: AsRef<str>>(path: &Path, names: &[S]) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for name in names {
        writer.write_all(name.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Read a bucket file back into its names. Blank lines are ignored.
pub fn read_bucket(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            names.push(line);
        }
    }
    Ok(names)
}

/// Write both buckets of `partition` to the outputs named in `config`.
///
/// Each bucket is first written to a `.tmp` sibling of its output. The
/// outputs are only replaced once both staged files are complete, so a failed
/// write leaves the previous bucket files as they were.
pub fn write_partition(config: &SortConfig, partition: &Partition) -> io::Result<()> {
    let mut staged: Vec<(PathBuf, &Path, Bucket)> = Vec::with_capacity(Bucket::ALL.len());

    for bucket in Bucket::ALL {
        let path = config.buckets.get(bucket).output.as_path();
        let tmp = staging_path(path);
        if let Err(e) = write_bucket(&tmp, partition.names(bucket)) {
            discard_staged(staged.iter().map(|(t, _, _)| t.as_path()).chain([tmp.as_path()]));
            return Err(io::Error::new(
                e.kind(),
                format!("failed to write {}: {e}", path.display()),
            ));
        }
        staged.push((tmp, path, bucket));
    }

    for (tmp, path, bucket) in &staged {
        std::fs::rename(tmp, path).map_err(|e| {
            io::Error::new(e.kind(), format!("failed to replace {}: {e}", path.display()))
        })?;
        info!(
            bucket = %bucket,
            path = %path.display(),
            scenes = partition.count(*bucket),
            "Wrote bucket file"
        );
    }
    Ok(())
}

/// `small_houses.txt` → `small_houses.txt.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

fn discard_staged<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove staged bucket file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_name_per_line_with_trailing_newline() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("small_houses.txt");
        write_bucket(&path, &["house_1", "house_22"]).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "house_1\nhouse_22\n");
    }

    #[test]
    fn test_empty_bucket_is_empty_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("large_houses.txt");
        write_bucket::<&str>(&path, &[]).expect("write");
        assert_eq!(std::fs::read(&path).expect("read").len(), 0);
        assert!(read_bucket(&path).expect("read back").is_empty());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("small_houses.txt");
        std::fs::write(&path, "stale_a\nstale_b\nstale_c\n").expect("seed");
        write_bucket(&path, &["fresh"]).expect("write");
        assert_eq!(read_bucket(&path).expect("read"), vec!["fresh"]);
    }

    #[test]
    fn test_write_partition_uses_configured_paths() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = SortConfig::default();
        config.buckets.small.output = tmp.path().join("s.txt");
        config.buckets.large.output = tmp.path().join("l.txt");

        let partition = Partition {
            small: vec!["a".into(), "b".into()],
            large: vec!["c".into()],
            ..Default::default()
        };
        write_partition(&config, &partition).expect("write");

        assert_eq!(read_bucket(&tmp.path().join("s.txt")).expect("read"), ["a", "b"]);
        assert_eq!(read_bucket(&tmp.path().join("l.txt")).expect("read"), ["c"]);
    }

    #[test]
    fn test_write_into_missing_dir_reports_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = SortConfig::default();
        config.buckets.small.output = tmp.path().join("missing/s.txt");
        config.buckets.large.output = tmp.path().join("l.txt");
        let err = write_partition(&config, &Partition::default()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_failed_large_write_keeps_previous_outputs() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let small = tmp.path().join("small_houses.txt");
        std::fs::write(&small, "previous\n").expect("seed");

        let mut config = SortConfig::default();
        config.buckets.small.output.clone_from(&small);
        config.buckets.large.output = tmp.path().join("missing/large_houses.txt");

        let partition = Partition {
            small: vec!["fresh".into()],
            ..Default::default()
        };
        let err = write_partition(&config, &partition).unwrap_err();
        assert!(err.to_string().contains("large_houses.txt"));

        assert_eq!(read_bucket(&small).expect("read"), ["previous"]);
        assert!(!staging_path(&small).exists());
    }

    #[test]
    fn test_no_staging_files_left_after_success() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = SortConfig::default();
        config.buckets.small.output = tmp.path().join("s.txt");
        config.buckets.large.output = tmp.path().join("l.txt");
        write_partition(&config, &Partition::default()).expect("write");

        let mut entries: Vec<String> = std::fs::read_dir(tmp.path())
            .expect("list")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(entries, ["l.txt", "s.txt"]);
    }
}
