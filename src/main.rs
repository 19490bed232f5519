use clap::Parser;
use rl_compare::Result;
use rl_compare::filter::ProcessFilter;
use rl_compare::model::build_comparison;
use rl_compare::render::render_chart;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rl-compare")]
#[command(about = "Compare baseline and RL-assisted performance runs", long_about = None)]
struct Cli {
    /// Results directory holding the baseline/ and with_rl/ subdirectories.
    results_dir: PathBuf,

    /// JSON file listing the process-name substrings that count as workload
    /// processes in the pidstat logs.
    #[arg(long)]
    process_filter: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.process_filter {
        Some(path) => ProcessFilter::from_file(path)?,
        None => ProcessFilter::default(),
    };

    // 1) Read the logs for both conditions and compute the comparison.
    let result = build_comparison(&cli.results_dir, &filter)?;

    // 2) Print the summary.
    print!("{}", result.summary_text());

    // 3) Render and persist the chart.
    let out_path = render_chart(&result, &cli.results_dir)?;
    println!("Wrote {}", out_path.display());

    Ok(())
}
