//! Distributional summaries over measurement samples.

/// Latency distribution summary, in the unit of the input samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub median: f64,
    pub p90: f64,
    pub p95: f64,
}

/// Median, p90 and p95 of `samples`; `None` when there are no samples.
///
/// The no-data case stays distinct from zero so an absent measurement never
/// reads as zero latency downstream.
pub fn percentile_stats(samples: &[f64]) -> Option<LatencyStats> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(LatencyStats {
        median: percentile(&sorted, 50.0),
        p90: percentile(&sorted, 90.0),
        p95: percentile(&sorted, 95.0),
    })
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Percentile over a sorted, non-empty slice, linearly interpolating between
/// the two closest ranks.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_input_has_no_stats() {
        assert_eq!(percentile_stats(&[]), None);
    }

    #[test]
    fn interpolates_between_ranks() {
        let stats = percentile_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(close(stats.median, 3.0));
        assert!(close(stats.p90, 4.6));
        assert!(close(stats.p95, 4.8));
    }

    #[test]
    fn input_order_does_not_matter() {
        let shuffled = percentile_stats(&[4.0, 1.0, 5.0, 3.0, 2.0]).unwrap();
        let sorted = percentile_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let stats = percentile_stats(&[7.25]).unwrap();
        assert_eq!(
            stats,
            LatencyStats {
                median: 7.25,
                p90: 7.25,
                p95: 7.25,
            }
        );
    }

    #[test]
    fn two_samples_interpolate() {
        let stats = percentile_stats(&[10.0, 20.0]).unwrap();
        assert!(close(stats.median, 15.0));
        assert!(close(stats.p90, 19.0));
        assert!(close(stats.p95, 19.5));
    }

    #[test]
    fn mean_guards_empty_input() {
        assert_eq!(mean(&[]), 0.0);
        assert!(close(mean(&[2.0, 4.0, 9.0]), 5.0));
    }
}
