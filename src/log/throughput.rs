//! Parsing and aggregation for per-worker throughput logs
//! (`worker_<id>_<mode>.csv`).

use crate::Result;
use crate::log::series::WorkerSeries;
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

/// Run-level throughput aggregate over all workers of one condition.
///
/// Workers log monotonically increasing cumulative counters, so the total is
/// the sum of final counts, not of per-sample deltas. The duration is the
/// longest single worker's span, a conservative denominator when workers
/// start and stop at slightly different times.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunAggregate {
    pub total_iterations: u64,
    pub duration_s: f64,
}

impl RunAggregate {
    /// Iterations per second; 0.0 when no worker produced a span.
    pub fn throughput(&self) -> f64 {
        if self.duration_s != 0.0 {
            self.total_iterations as f64 / self.duration_s
        } else {
            0.0
        }
    }
}

/// Read one worker's log as a (relative_time, cumulative_count) series.
///
/// Same shape rules as the latency reader: blank and `#` lines skipped,
/// missing or empty file yields an empty series, malformed line is a hard
/// error. Lines are `time,iteration_count` with an integer count.
pub fn read_worker_file(path: &Path) -> Result<WorkerSeries> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WorkerSeries::empty()),
        Err(e) => return Err(e).with_context(|| format!("read worker log {}", path.display())),
    };

    let mut samples = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 2 {
            bail!(
                "worker log parse error at {}:{}: expected 2 comma-separated fields, got {}",
                path.display(),
                lno,
                fields.len()
            );
        }

        let time_s: f64 = fields[0].trim().parse().with_context(|| {
            format!(
                "worker log parse error at {}:{}: bad time value {:?}",
                path.display(),
                lno,
                fields[0].trim()
            )
        })?;
        let iterations: u64 = fields[1].trim().parse().with_context(|| {
            format!(
                "worker log parse error at {}:{}: bad iteration count {:?}",
                path.display(),
                lno,
                fields[1].trim()
            )
        })?;
        samples.push((time_s, iterations));
    }

    Ok(WorkerSeries::from_samples(samples))
}

/// Aggregate every worker log of one condition found under `dir`.
///
/// Files are matched by name against `worker_<id>_<mode>.csv` and visited in
/// lexicographic order. A worker with an empty series is skipped; a directory
/// that is missing or cannot be listed counts as having no workers.
pub fn aggregate_workers(dir: &Path, mode: &str) -> Result<RunAggregate> {
    let pattern = Regex::new(&format!(r"^worker_.*_{}\.csv$", regex::escape(mode)))?;

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(RunAggregate::default()),
    };

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read worker directory {}", dir.display()))?;
        if let Some(name) = entry.file_name().to_str() {
            if pattern.is_match(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    let mut agg = RunAggregate::default();
    for name in &names {
        let series = read_worker_file(&dir.join(name))?;
        let Some(&last_count) = series.last_value() else {
            continue;
        };
        agg.total_iterations += last_count;
        agg.duration_s = agg.duration_s.max(series.span_s());
    }
    Ok(agg)
}
