//! scene-sort - ProcTHOR scene partitioner
//!
//! Walks `procthor-scene-json/*/*`, counts the rooms in every scene and
//! writes the names of 1-3 room scenes to `small_houses.txt` and of 7-10 room
//! scenes to `large_houses.txt`. The two counts are printed to stdout, small
//! first.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: ./procthor-scene-json/*/* -> ./small_houses.txt, ./large_houses.txt
//! scene-sort
//!
//! # Different tree, keep going past broken files
//! scene-sort --root /data/procthor --skip-invalid
//!
//! # Counts only
//! scene-sort --dry-run --quiet
//! ```
//!
//! # Environment Variables
//!
//! - `SCENE_SORT_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use scene_sort::config::SortConfig;
use scene_sort::storage::{write_partition, SortSummary};
use scene_sort::{ErrorPolicy, SortPipeline};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "scene-sort")]
#[command(about = "Partition scene JSON files into small and large house lists by room count")]
#[command(version)]
struct CliArgs {
    /// TOML config file. Without it, $SCENE_SORT_CONFIG, then ./scene_sort.toml,
    /// then built-in defaults are used.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scene root directory (default: procthor-scene-json)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Glob below the root (default: */*)
    #[arg(long, value_name = "GLOB")]
    pattern: Option<String>,

    /// Output file for small scenes (default: small_houses.txt)
    #[arg(long, value_name = "FILE")]
    small_out: Option<PathBuf>,

    /// Output file for large scenes (default: large_houses.txt)
    #[arg(long, value_name = "FILE")]
    large_out: Option<PathBuf>,

    /// Skip unreadable, malformed or duplicate scenes with a warning
    /// instead of aborting the run
    #[arg(long)]
    skip_invalid: bool,

    /// Classify and print counts without writing the bucket files
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run summary to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Hide the progress line
    #[arg(short, long)]
    quiet: bool,
}

impl CliArgs {
    /// Resolve the config file and layer CLI overrides on top of it.
    fn resolve_config(&self) -> Result<SortConfig> {
        let mut config = match &self.config {
            Some(path) => SortConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SortConfig::load(),
        };

        if let Some(root) = &self.root {
            config.input.root.clone_from(root);
        }
        if let Some(pattern) = &self.pattern {
            config.input.pattern.clone_from(pattern);
        }
        if let Some(out) = &self.small_out {
            config.buckets.small.output.clone_from(out);
        }
        if let Some(out) = &self.large_out {
            config.buckets.large.output.clone_from(out);
        }
        if self.skip_invalid {
            config.errors.policy = ErrorPolicy::SkipInvalid;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the two counts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!(
        root = %config.input.root.display(),
        pattern = %config.input.pattern,
        small = %config.buckets.small.range(),
        large = %config.buckets.large.range(),
        policy = ?config.errors.policy,
        "Sorting scenes"
    );

    let pipeline = SortPipeline::new(config)?.with_progress(!args.quiet);
    let partition = pipeline.run().context("Scene sort failed")?;

    println!("{}", partition.small.len());
    println!("{}", partition.large.len());

    if args.dry_run {
        info!("Dry run: bucket files not written");
    } else {
        write_partition(pipeline.config(), &partition).context("Failed to write bucket files")?;
    }

    if let Some(path) = &args.summary {
        SortSummary::new(pipeline.config(), &partition)
            .write_json(path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        info!(path = %path.display(), "Wrote run summary");
    }

    Ok(())
}
