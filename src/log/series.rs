//! Time series shared by the latency and throughput readers.
//!
//! Timestamps in the logs are absolute (seconds since an arbitrary clock
//! origin); a series stores them rebased so the first sample is at 0.0 and the
//! rest are relative elapsed time.

/// Ordered samples as parallel time/value vectors of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<V> {
    pub times: Vec<f64>,
    pub values: Vec<V>,
}

/// Latency series: value is the measured delay in microseconds.
pub type LatencySeries = TimeSeries<f64>;

/// Per-worker throughput series: value is the cumulative iteration count.
pub type WorkerSeries = TimeSeries<u64>;

impl<V> TimeSeries<V> {
    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a series from (absolute_time, value) samples, rebasing times so
    /// the first sample lands at 0.0. Input ordering is preserved.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (f64, V)>,
    {
        let mut times = Vec::new();
        let mut values = Vec::new();
        for (t, v) in samples {
            times.push(t);
            values.push(v);
        }
        if let Some(&first) = times.first() {
            for t in &mut times {
                *t -= first;
            }
        }
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Elapsed seconds between the first and last sample; 0.0 when empty.
    pub fn span_s(&self) -> f64 {
        match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    pub fn last_value(&self) -> Option<&V> {
        self.values.last()
    }
}

impl<V> Default for TimeSeries<V> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rebases_first_timestamp_to_zero() {
        let s = TimeSeries::from_samples(vec![(100.5, 1.0), (101.0, 2.0), (102.25, 3.0)]);
        assert_eq!(s.times, vec![0.0, 0.5, 1.75]);
        assert_eq!(s.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn preserves_input_ordering() {
        // Out-of-order timestamps stay where the log put them.
        let s = TimeSeries::from_samples(vec![(10.0, 1u64), (9.0, 2), (12.0, 3)]);
        assert_eq!(s.times, vec![0.0, -1.0, 2.0]);
        assert_eq!(s.values, vec![1, 2, 3]);
    }

    #[test]
    fn empty_series_has_zero_span() {
        let s: TimeSeries<f64> = TimeSeries::empty();
        assert!(s.is_empty());
        assert_eq!(s.span_s(), 0.0);
        assert_eq!(s.last_value(), None);
    }

    #[test]
    fn span_covers_first_to_last() {
        let s = TimeSeries::from_samples(vec![(5.0, 0u64), (8.0, 10), (17.0, 20)]);
        assert_eq!(s.span_s(), 12.0);
        assert_eq!(s.last_value(), Some(&20));
    }
}
