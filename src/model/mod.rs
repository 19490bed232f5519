//! Comparison model: read every log for both runs and derive the report
//! figures (latency stats, throughput, CPU averages, improvement percentages).

use crate::Result;
use crate::filter::ProcessFilter;
use crate::log::{LatencySeries, aggregate_workers, read_latency_file, read_pidstat_file};
use crate::stats::{LatencyStats, mean, percentile_stats};
use std::path::Path;

/// Where one experimental condition keeps its logs: the subdirectory under
/// the results root and the mode label embedded in its file names.
struct ConditionLayout {
    dir: &'static str,
    mode: &'static str,
}

const BASELINE: ConditionLayout = ConditionLayout {
    dir: "baseline",
    mode: "baseline",
};

const WITH_RL: ConditionLayout = ConditionLayout {
    dir: "with_rl",
    mode: "rl",
};

/// Everything measured for one condition.
#[derive(Debug, Clone)]
pub struct ConditionMetrics {
    pub latency_ep1: LatencySeries,
    pub latency_ep2: LatencySeries,
    pub stats_ep1: Option<LatencyStats>,
    pub stats_ep2: Option<LatencyStats>,
    pub throughput_ep1: f64,
    pub throughput_ep2: f64,
    pub cpu_avg: f64,
}

/// Both conditions side by side, plus the epoch-2 improvement figures.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub baseline: ConditionMetrics,
    pub with_rl: ConditionMetrics,
    pub latency_improvement_pct: f64,
    pub throughput_improvement_pct: f64,
}

/// Read all logs for both conditions under `results_dir` and compute the
/// comparison. Missing latency/worker/pidstat files read as empty data;
/// malformed records abort.
pub fn build_comparison(results_dir: &Path, filter: &ProcessFilter) -> Result<ComparisonResult> {
    let baseline = read_condition(results_dir, &BASELINE, filter)?;
    let with_rl = read_condition(results_dir, &WITH_RL, filter)?;

    // Improvement is defined on epoch-2 medians only, and only when both
    // medians exist and are non-zero.
    let latency_improvement_pct = match (&baseline.stats_ep2, &with_rl.stats_ep2) {
        (Some(b), Some(r)) if b.median != 0.0 && r.median != 0.0 => {
            (b.median - r.median) / b.median * 100.0
        }
        _ => 0.0,
    };

    let throughput_improvement_pct = if baseline.throughput_ep2 != 0.0 {
        (with_rl.throughput_ep2 - baseline.throughput_ep2) / baseline.throughput_ep2 * 100.0
    } else {
        0.0
    };

    Ok(ComparisonResult {
        baseline,
        with_rl,
        latency_improvement_pct,
        throughput_improvement_pct,
    })
}

fn read_condition(
    results_dir: &Path,
    layout: &ConditionLayout,
    filter: &ProcessFilter,
) -> Result<ConditionMetrics> {
    let dir = results_dir.join(layout.dir);

    let latency_ep1 = read_latency_file(&dir.join(format!("latency_ep1_{}.csv", layout.mode)))?;
    let latency_ep2 = read_latency_file(&dir.join(format!("latency_ep2_{}.csv", layout.mode)))?;
    let stats_ep1 = percentile_stats(&latency_ep1.values);
    let stats_ep2 = percentile_stats(&latency_ep2.values);

    // Worker logs are not epoch-scoped: both epochs aggregate the same file
    // set, so a condition's EP1 and EP2 throughput come out identical.
    let run_ep1 = aggregate_workers(&dir, layout.mode)?;
    let run_ep2 = aggregate_workers(&dir, layout.mode)?;

    let cpu = read_pidstat_file(&dir.join(format!("pidstat_{}.log", layout.mode)), filter)?;

    Ok(ConditionMetrics {
        latency_ep1,
        latency_ep2,
        stats_ep1,
        stats_ep2,
        throughput_ep1: run_ep1.throughput(),
        throughput_ep2: run_ep2.throughput(),
        cpu_avg: mean(&cpu),
    })
}

impl ComparisonResult {
    /// The printable report, one figure set per line. Absent latency stats
    /// render as n/a rather than zero.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Latency (µs): median, p90, p95\n");
        out.push_str(&format!(
            "Baseline:  EP1={} | EP2={}\n",
            fmt_stats(&self.baseline.stats_ep1),
            fmt_stats(&self.baseline.stats_ep2),
        ));
        out.push_str(&format!(
            "With RL:   EP1={} | EP2={}\n",
            fmt_stats(&self.with_rl.stats_ep1),
            fmt_stats(&self.with_rl.stats_ep2),
        ));
        out.push('\n');
        out.push_str(&format!(
            "Throughput (iter/s): Baseline EP2={:.2}, RL EP2={:.2}\n",
            self.baseline.throughput_ep2, self.with_rl.throughput_ep2,
        ));
        out.push_str(&format!(
            "CPU avg usage: Baseline={:.2}%, With RL={:.2}%\n",
            self.baseline.cpu_avg, self.with_rl.cpu_avg,
        ));
        out.push_str(&format!(
            "Latency improvement (EP2): {:.2}%  |  Throughput improvement (EP2): {:.2}%\n",
            self.latency_improvement_pct, self.throughput_improvement_pct,
        ));
        out
    }
}

fn fmt_stats(stats: &Option<LatencyStats>) -> String {
    match stats {
        Some(s) => format!("({:.2}, {:.2}, {:.2})", s.median, s.p90, s.p95),
        None => "(n/a, n/a, n/a)".to_string(),
    }
}
