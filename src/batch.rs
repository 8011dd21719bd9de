//! Batch processing of a directory of documents.
//!
//! Every input produces `<stem>.json` in the output directory. Files are
//! independent: each gets its own analysis state, and a failure on one file
//! is recorded in the [`BatchReport`] without stopping the others. When two
//! inputs share a stem (`doc.pdf` and a `doc.json` span dump), the first in
//! sorted order is written and the other is reported as a conflict.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::OutlineAnalyzer;
use crate::error::{Error, Result};
use crate::model::Outline;
use crate::render::{to_json, JsonFormat};
use crate::source::{JsonSpanSource, LopdfSource, SpanSource};

/// Options for batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Process files on the rayon thread pool
    pub parallel: bool,
    /// Also pick up `*.json` span dumps
    pub include_json_dumps: bool,
    /// Output JSON format
    pub format: JsonFormat,
    /// Replace existing output files
    pub overwrite: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            include_json_dumps: false,
            format: JsonFormat::Pretty,
            overwrite: true,
        }
    }
}

impl BatchOptions {
    /// Create default batch options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process files one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Include `*.json` span dumps as inputs.
    pub fn with_json_dumps(mut self, include: bool) -> Self {
        self.include_json_dumps = include;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether existing outputs are replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct BatchFailure {
    /// Input path
    pub path: PathBuf,
    /// What went wrong
    pub error: Error,
}

/// Summary of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written
    pub written: Vec<PathBuf>,
    /// Inputs skipped because their output already existed
    pub skipped: Vec<PathBuf>,
    /// Inputs that failed
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of inputs seen.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failures.len()
    }

    /// Check if every input was written or skipped.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Written(PathBuf),
    Skipped,
    Failed(Error),
}

/// List the inputs of a directory: `*.pdf` files, plus `*.json` span dumps
/// when enabled, sorted by path.
pub fn collect_inputs(dir: &Path, include_json_dumps: bool) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let wanted = match extension(&path).as_deref() {
            Some("pdf") => true,
            Some("json") => include_json_dumps,
            _ => false,
        };
        if wanted {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Output path for an input: `<output_dir>/<stem>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.json", stem))
}

/// Extract the outline of one input file. `*.json` inputs are read as span
/// dumps, anything else as PDF.
pub fn process_file(path: &Path, analyzer: &OutlineAnalyzer) -> Result<Outline> {
    let doc = if extension(path).as_deref() == Some("json") {
        JsonSpanSource::open(path)?.document()?
    } else {
        LopdfSource::open(path)?.document()?
    };
    Ok(analyzer.analyze(&doc))
}

/// Process every input of `input_dir` into `output_dir`.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    analyzer: &OutlineAnalyzer,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let inputs = collect_inputs(input_dir, options.include_json_dumps)?;
    process_files(&inputs, output_dir, analyzer, options, |_| {})
}

/// Process the given inputs into `output_dir`, calling `on_done` after each
/// file (from worker threads when running in parallel).
pub fn process_files<F>(
    inputs: &[PathBuf],
    output_dir: &Path,
    analyzer: &OutlineAnalyzer,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    F: Fn(&Path) + Sync,
{
    fs::create_dir_all(output_dir)?;

    let owners = claim_outputs(inputs, output_dir);

    let run = |(input, owner): (&PathBuf, &Option<PathBuf>)| {
        let outcome = match owner {
            Some(claimed_by) => Outcome::Failed(Error::OutputConflict {
                output: output_path(input, output_dir),
                claimed_by: claimed_by.clone(),
            }),
            None => process_one(input, output_dir, analyzer, options),
        };
        on_done(input);
        outcome
    };

    let outcomes: Vec<Outcome> = if options.parallel {
        inputs.par_iter().zip(owners.par_iter()).map(run).collect()
    } else {
        inputs.iter().zip(owners.iter()).map(run).collect()
    };

    let mut report = BatchReport::default();
    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Outcome::Written(path) => report.written.push(path),
            Outcome::Skipped => report.skipped.push(input.clone()),
            Outcome::Failed(error) => {
                log::warn!("Failed to process {}: {}", input.display(), error);
                report.failures.push(BatchFailure {
                    path: input.clone(),
                    error,
                });
            }
        }
    }

    log::info!(
        "Batch complete: {} written, {} skipped, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failures.len()
    );

    Ok(report)
}

/// For each input, the earlier input already writing to the same output
/// path, if any. The first input in order keeps the output.
fn claim_outputs(inputs: &[PathBuf], output_dir: &Path) -> Vec<Option<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let output = output_path(input, output_dir);
            if let Some(owner) = claimed.get(&output) {
                return Some(PathBuf::clone(owner));
            }
            claimed.insert(output, input);
            None
        })
        .collect()
}

fn process_one(
    input: &Path,
    output_dir: &Path,
    analyzer: &OutlineAnalyzer,
    options: &BatchOptions,
) -> Outcome {
    let output = output_path(input, output_dir);
    if !options.overwrite && output.exists() {
        log::debug!("Skipping {}: output exists", input.display());
        return Outcome::Skipped;
    }

    let written = process_file(input, analyzer)
        .and_then(|outline| to_json(&outline, options.format))
        .and_then(|json| fs::write(&output, json).map_err(Error::from));

    match written {
        Ok(()) => {
            log::debug!("{} -> {}", input.display(), output.display());
            Outcome::Written(output)
        }
        Err(error) => Outcome::Failed(error),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
