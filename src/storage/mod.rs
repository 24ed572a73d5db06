//! Output storage
//!
//! Bucket files (the two name lists) and the optional JSON run summary.

pub mod bucket_file;
pub mod summary;

pub use bucket_file::{read_bucket, write_bucket, write_partition};
pub use summary::{BucketSummary, SortSummary};
