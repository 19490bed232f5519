//! Four-panel comparison chart: latency trends for both conditions on top,
//! throughput and CPU bar comparisons below.

use crate::Result;
use crate::log::LatencySeries;
use crate::model::ComparisonResult;
use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

/// Chart file name, fixed so re-runs overwrite the same artifact.
pub const CHART_FILE_NAME: &str = "rl_vs_baseline_learning.png";

const CHART_SIZE: (u32, u32) = (1400, 800);

/// Render the comparison chart into `results_dir` and return the path of the
/// written file.
pub fn render_chart(result: &ComparisonResult, results_dir: &Path) -> Result<PathBuf> {
    let out_path = results_dir.join(CHART_FILE_NAME);
    draw_panels(result, &out_path)?;
    Ok(out_path)
}

fn draw_panels(result: &ComparisonResult, out_path: &Path) -> Result<()> {
    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "RL Learning Impact: Latency ↓  Throughput ↑  CPU Utilization ↓",
        ("sans-serif", 24),
    )?;

    let areas = root.split_evenly((2, 2));

    // Latency trends (top row).
    {
        let mut chart = ChartBuilder::on(&areas[0])
            .caption("Baseline Latency Trend", ("sans-serif", 20))
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(
                0f64..time_axis_max(&result.baseline.latency_ep1, &result.baseline.latency_ep2),
                0f64..delay_axis_max(&result.baseline.latency_ep1, &result.baseline.latency_ep2),
            )?;

        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Delay (µs)")
            .draw()?;

        let ep1 = RED.mix(0.6);
        let ep2 = RGBColor(255, 165, 0).mix(0.6);
        chart
            .draw_series(LineSeries::new(series_points(&result.baseline.latency_ep1), ep1))?
            .label("Baseline EP1")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ep1));
        chart
            .draw_series(LineSeries::new(series_points(&result.baseline.latency_ep2), ep2))?
            .label("Baseline EP2")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ep2));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    {
        let mut chart = ChartBuilder::on(&areas[1])
            .caption(
                "With RL Latency Trend (learning improvement)",
                ("sans-serif", 20),
            )
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(
                0f64..time_axis_max(&result.with_rl.latency_ep1, &result.with_rl.latency_ep2),
                0f64..delay_axis_max(&result.with_rl.latency_ep1, &result.with_rl.latency_ep2),
            )?;

        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Delay (µs)")
            .draw()?;

        let ep1 = BLUE.mix(0.6);
        let ep2 = GREEN.mix(0.6);
        chart
            .draw_series(LineSeries::new(series_points(&result.with_rl.latency_ep1), ep1))?
            .label("RL EP1")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ep1));
        chart
            .draw_series(LineSeries::new(series_points(&result.with_rl.latency_ep2), ep2))?
            .label("RL EP2")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ep2));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    // Throughput bars per epoch (bottom-left), annotated with the two
    // improvement figures.
    {
        let baseline = [
            result.baseline.throughput_ep1,
            result.baseline.throughput_ep2,
        ];
        let with_rl = [result.with_rl.throughput_ep1, result.with_rl.throughput_ep2];
        let max_y = baseline
            .iter()
            .chain(with_rl.iter())
            .cloned()
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;

        let mut chart = ChartBuilder::on(&areas[2])
            .caption("Throughput Comparison", ("sans-serif", 20))
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..1.5f64, 0f64..max_y)?;

        chart
            .configure_mesh()
            .x_labels(5)
            .x_label_formatter(&epoch_tick_label)
            .y_desc("Throughput (iter/s)")
            .draw()?;

        chart
            .draw_series(baseline.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x - 0.3, 0.0), (x, v)], RED.filled())
            }))?
            .label("Baseline")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.filled()));
        chart
            .draw_series(with_rl.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x, 0.0), (x + 0.3, v)], GREEN.filled())
            }))?
            .label("With RL")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], GREEN.filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        let annotation = format!(
            "Latency ↓ {:.1}% | Throughput ↑ {:.1}%",
            result.latency_improvement_pct, result.throughput_improvement_pct,
        );
        let annotation_y = baseline[1].max(with_rl[1]) * 0.9;
        let style = TextStyle::from(("sans-serif", 14).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(std::iter::once(Text::new(
            annotation,
            (0.5, annotation_y),
            style,
        )))?;
    }

    // Average CPU usage per condition (bottom-right).
    {
        let cpu = [result.baseline.cpu_avg, result.with_rl.cpu_avg];
        let max_y = cpu.iter().cloned().fold(0.0_f64, f64::max).max(1.0) * 1.1;

        let mut chart = ChartBuilder::on(&areas[3])
            .caption("Avg CPU Usage", ("sans-serif", 20))
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..1.5f64, 0f64..max_y)?;

        chart
            .configure_mesh()
            .x_labels(5)
            .x_label_formatter(&condition_tick_label)
            .y_desc("CPU %")
            .draw()?;

        chart.draw_series([
            Rectangle::new([(-0.3, 0.0), (0.3, cpu[0])], RED.filled()),
            Rectangle::new([(0.7, 0.0), (1.3, cpu[1])], GREEN.filled()),
        ])?;
    }

    root.present()
        .with_context(|| format!("failed to write chart to {}", out_path.display()))?;
    Ok(())
}

fn series_points(series: &LatencySeries) -> impl Iterator<Item = (f64, f64)> + '_ {
    series
        .times
        .iter()
        .zip(series.values.iter())
        .map(|(t, v)| (*t, *v))
}

/// Shared x axis bound for a panel's two series, with a floor so an empty
/// panel still gets a valid axis.
fn time_axis_max(ep1: &LatencySeries, ep2: &LatencySeries) -> f64 {
    ep1.span_s().max(ep2.span_s()).max(1.0)
}

fn delay_axis_max(ep1: &LatencySeries, ep2: &LatencySeries) -> f64 {
    ep1.values
        .iter()
        .chain(ep2.values.iter())
        .cloned()
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1
}

fn epoch_tick_label(x: &f64) -> String {
    if (x - 0.0).abs() < 0.01 {
        "EP1".to_string()
    } else if (x - 1.0).abs() < 0.01 {
        "EP2".to_string()
    } else {
        String::new()
    }
}

fn condition_tick_label(x: &f64) -> String {
    if (x - 0.0).abs() < 0.01 {
        "Baseline".to_string()
    } else if (x - 1.0).abs() < 0.01 {
        "With RL".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConditionMetrics;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn condition(base_delay: f64, throughput: f64, cpu: f64) -> ConditionMetrics {
        ConditionMetrics {
            latency_ep1: LatencySeries::from_samples(vec![
                (100.0, base_delay + 20.0),
                (101.0, base_delay + 30.0),
                (102.0, base_delay + 10.0),
            ]),
            latency_ep2: LatencySeries::from_samples(vec![
                (200.0, base_delay),
                (201.0, base_delay + 8.0),
                (202.0, base_delay - 4.0),
            ]),
            stats_ep1: None,
            stats_ep2: None,
            throughput_ep1: throughput,
            throughput_ep2: throughput,
            cpu_avg: cpu,
        }
    }

    #[test]
    fn writes_chart_file_and_returns_its_path() {
        let dir = tempdir().unwrap();
        let result = ComparisonResult {
            baseline: condition(100.0, 20.0, 25.0),
            with_rl: condition(80.0, 25.0, 15.0),
            latency_improvement_pct: 20.0,
            throughput_improvement_pct: 25.0,
        };

        let path = render_chart(&result, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(CHART_FILE_NAME));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn empty_series_still_produce_valid_axes() {
        let empty = LatencySeries::empty();
        assert_eq!(time_axis_max(&empty, &empty), 1.0);
        assert!((delay_axis_max(&empty, &empty) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn bar_tick_labels_name_the_categories() {
        assert_eq!(epoch_tick_label(&0.0), "EP1");
        assert_eq!(epoch_tick_label(&1.0), "EP2");
        assert_eq!(epoch_tick_label(&0.5), "");
        assert_eq!(condition_tick_label(&0.0), "Baseline");
        assert_eq!(condition_tick_label(&1.0), "With RL");
        assert_eq!(condition_tick_label(&-0.4), "");
    }
}
