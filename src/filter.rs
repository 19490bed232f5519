//! Workload process predicate used when filtering pidstat rows.

use crate::Result;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Substrings identifying workload processes in a pidstat command column.
///
/// A row qualifies when its command token contains any of the substrings.
/// pidstat truncates command names to 15 characters, which is why the default
/// worker fragment is the truncated "throughput_work".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessFilter {
    pub substrings: Vec<String>,
}

impl Default for ProcessFilter {
    fn default() -> Self {
        Self {
            substrings: vec!["throughput_work".to_string(), "latency_probe".to_string()],
        }
    }
}

impl ProcessFilter {
    /// Load a filter override from a JSON file: `{"substrings": ["..."]}`.
    ///
    /// An empty substring list is rejected; it would match nothing and report
    /// zero CPU for every condition.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read process filter {}", path.display()))?;
        let filter: ProcessFilter = serde_json::from_str(&text)
            .with_context(|| format!("parse process filter {}", path.display()))?;
        if filter.substrings.is_empty() {
            bail!("process filter {} contained no substrings", path.display());
        }
        Ok(filter)
    }

    /// True when `command` names a workload process.
    pub fn matches(&self, command: &str) -> bool {
        self.substrings.iter().any(|s| command.contains(s.as_str()))
    }
}
