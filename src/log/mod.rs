//! Readers for the measurement logs a run leaves behind: per-sample latency
//! records, per-worker throughput counters and pidstat CPU samples.

pub mod latency;
pub mod pidstat;
pub mod series;
pub mod throughput;

pub use latency::read_latency_file;
pub use pidstat::read_pidstat_file;
pub use series::{LatencySeries, TimeSeries, WorkerSeries};
pub use throughput::{RunAggregate, aggregate_workers, read_worker_file};
