//! Parsing for the latency probe logs (`latency_ep<n>_<mode>.csv`).

use crate::Result;
use crate::log::series::LatencySeries;
use anyhow::{Context, bail};
use std::fs;
use std::io;
use std::path::Path;

/// One probe sample: `time,expected,actual,delay`.
///
/// `time_s` is an absolute timestamp in seconds; the remaining fields are in
/// microseconds. Only `time_s` and `delay_us` feed the comparison today;
/// `expected_us` and `actual_us` are parsed and carried for future
/// diagnostics but are otherwise intentionally unused.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyRecord {
    pub time_s: f64,
    pub expected_us: f64,
    pub actual_us: f64,
    pub delay_us: f64,
}

/// Parse a latency log into its records.
///
/// Blank lines and lines starting with `#` are skipped. A missing file and a
/// file with no data lines both yield an empty vec (a run may legitimately
/// produce no samples); a malformed line is a hard error.
pub fn parse_latency_records(path: &Path) -> Result<Vec<LatencyRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("read latency log {}", path.display())),
    };

    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            bail!(
                "latency log parse error at {}:{}: expected 4 comma-separated fields, got {}",
                path.display(),
                lno,
                fields.len()
            );
        }

        records.push(LatencyRecord {
            time_s: parse_field(fields[0], "time", path, lno)?,
            expected_us: parse_field(fields[1], "expected", path, lno)?,
            actual_us: parse_field(fields[2], "actual", path, lno)?,
            delay_us: parse_field(fields[3], "delay", path, lno)?,
        });
    }

    Ok(records)
}

/// Read a latency log as a (relative_time, delay) series.
pub fn read_latency_file(path: &Path) -> Result<LatencySeries> {
    let records = parse_latency_records(path)?;
    Ok(LatencySeries::from_samples(
        records.into_iter().map(|r| (r.time_s, r.delay_us)),
    ))
}

fn parse_field(field: &str, name: &str, path: &Path, lno: usize) -> Result<f64> {
    let field = field.trim();
    field.parse::<f64>().with_context(|| {
        format!(
            "latency log parse error at {}:{}: bad {} value {:?}",
            path.display(),
            lno,
            name,
            field
        )
    })
}
