//! Compare two performance runs, a baseline and a with-reinforcement-learning
//! condition, from the measurement logs they left behind.
//!
//! The pipeline is a single pass: parse latency, worker throughput and pidstat
//! logs for both conditions, compute distributional statistics and improvement
//! percentages, then render a four-panel comparison chart next to the inputs.

pub mod filter;
pub mod log;
pub mod model;
pub mod render;
pub mod stats;

pub type Result<T> = anyhow::Result<T>;
