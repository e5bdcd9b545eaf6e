//! Batch Driver
//!
//! Walks a directory of volume files and produces one combined error
//! report, in volume order.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::report::Report;
use crate::rules::RuleCatalog;
use crate::validation::Validator;

/// Totals accumulated over one checker run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Volumes checked
    pub volumes: u32,
    /// Files skipped because of naming or encoding problems
    pub skipped: u32,
    /// Text lines examined
    pub lines: u64,
}

/// Derive the volume number and short name from a file path
///
/// The volume number comes from the leading digits of the file stem
/// ("104-2" gives 104), the short name is the whole stem.
pub fn volume_identity(path: &Path) -> Option<(u32, String)> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    let volume = digits.parse().ok()?;
    Some((volume, stem.to_string()))
}

/// Check every volume file in the configured input directory
pub fn run(config: &Config) -> Result<RunSummary> {
    let mut catalog =
        RuleCatalog::with_embedded_rules().context("failed to load built-in rules")?;
    for dir in &config.rules_dirs {
        let loaded = catalog.load_directory(dir)?;
        if loaded > 0 {
            log::info!("loaded {loaded} rules from {}", dir.display());
        }
    }

    let out = File::create(&config.output)
        .with_context(|| format!("failed to create report file {}", config.output.display()))?;
    let mut report = Report::new(BufWriter::new(out));

    let validator = Validator::new(&catalog, config.options);
    let mut summary = RunSummary::default();

    for path in volume_paths(&config.input_dir)? {
        let Some((volume, short_name)) = volume_identity(&path) else {
            log::warn!("wrong file format: {}", path.display());
            summary.skipped += 1;
            continue;
        };
        // a volume that cannot be decoded should not abort the batch
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::error!("cannot read {}: {err}", path.display());
                summary.skipped += 1;
                continue;
            }
        };
        let stats = validator
            .validate_volume(&content, volume, &short_name, &mut report)
            .with_context(|| format!("failed to write report for {short_name}"))?;
        log::debug!(
            "checked {short_name}: {} lines, {} pages",
            stats.lines,
            stats.pages
        );
        summary.volumes += 1;
        summary.lines += u64::from(stats.lines);
    }

    report.finish().context("failed to flush report")?;
    Ok(summary)
}

/// Collect the volume files under `dir` in name order
fn volume_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read input directory {}", dir.display()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();
    Ok(paths)
}
