//! Rendering: turn a [`ComparisonResult`](crate::model::ComparisonResult)
//! into the persisted comparison chart.

pub mod chart;

pub use chart::render_chart;
