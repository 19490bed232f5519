//! Parsing for pidstat-style process monitor logs.

use crate::Result;
use crate::filter::ProcessFilter;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::Path;

/// Extract `%CPU` samples for workload processes from a pidstat-style log.
///
/// The value column is located dynamically: lines are scanned until a header
/// containing the literal `%CPU` token fixes the column index (the position
/// shifts across pidstat versions and option sets). After that, a line
/// contributes a sample when it has enough tokens, its last token matches
/// `filter`, and the column parses as a number. Repeated headers, footers and
/// summary rows all fail one of those checks and are skipped.
///
/// A missing file is reported on stderr and yields no samples.
pub fn read_pidstat_file(path: &Path, filter: &ProcessFilter) -> Result<Vec<f64>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            eprintln!("WARN: missing pidstat log: {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("read pidstat log {}", path.display())),
    };

    let mut cpu_col: Option<usize> = None;
    let mut values = Vec::new();

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let Some(col) = cpu_col else {
            cpu_col = tokens.iter().position(|t| *t == "%CPU");
            continue;
        };

        if tokens.len() <= col {
            continue;
        }
        let Some(&command) = tokens.last() else {
            continue;
        };
        if !filter.matches(command) {
            continue;
        }
        if let Ok(value) = tokens[col].parse::<f64>() {
            values.push(value);
        }
    }

    Ok(values)
}
