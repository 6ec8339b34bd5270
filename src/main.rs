//! Cyclescope - Quarterly GDP Cycle Analysis
//!
//! Batch pipeline: load the quarterly table, HP-detrend both log series,
//! compute cycle statistics and render charts.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cyclescope::charts::{ChartPlotter, LineSpec, SERIES_A_COLOR, SERIES_B_COLOR};
use cyclescope::data::DataLoader;
use cyclescope::filter::{HpFilter, LAMBDA_QUARTERLY};
use cyclescope::report::{AnalysisSummary, SeriesSummary};
use cyclescope::stats::StatsCalculator;

#[derive(Parser)]
#[command(name = "cyclescope")]
#[command(about = "Quarterly GDP cycle analysis via the Hodrick-Prescott filter")]
struct Cli {
    /// Semicolon-delimited input file: [period "YYYY-Qn", series A, series B]
    input: PathBuf,

    /// HP smoothing weight (1600 quarterly, 129600 monthly, 6.25 annual)
    #[arg(long, default_value_t = LAMBDA_QUARTERLY)]
    lambda: f64,

    /// Rolling correlation window in quarters
    #[arg(long, default_value_t = 5)]
    window: usize,

    /// Decimal separator used by the numeric columns
    #[arg(long, default_value_t = ',')]
    decimal_separator: char,

    /// Directory for rendered chart images
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Emit the summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Display name for the first series
    #[arg(long, default_value = "Japan")]
    series_a_name: String,

    /// Display name for the second series
    #[arg(long, default_value = "South Africa")]
    series_b_name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let input = cli.input.to_string_lossy();
    let table = DataLoader::new(b';', cli.decimal_separator)
        .load(&input)
        .with_context(|| format!("loading {input}"))?;
    info!(
        rows = table.len(),
        first = %table.rows[0].period,
        last = %table.rows[table.len() - 1].period,
        "loaded quarterly table"
    );

    let filter = HpFilter::new(cli.lambda)?;
    let decomp_a = filter.decompose_log(&table.series_a())?;
    let decomp_b = filter.decompose_log(&table.series_b())?;

    let correlation = StatsCalculator::pearson(&decomp_a.cycle, &decomp_b.cycle)?;
    let rolling =
        StatsCalculator::rolling_correlation(&decomp_a.cycle, &decomp_b.cycle, cli.window)?;

    let summary = AnalysisSummary {
        lambda: cli.lambda,
        observations: table.len(),
        first_period: table.rows[0].period.clone(),
        last_period: table.rows[table.len() - 1].period.clone(),
        series: vec![
            SeriesSummary {
                name: cli.series_a_name.clone(),
                volatility: StatsCalculator::volatility(&decomp_a.cycle)?,
                lag1_autocorrelation: StatsCalculator::lag1_autocorrelation(&decomp_a.cycle)?,
            },
            SeriesSummary {
                name: cli.series_b_name.clone(),
                volatility: StatsCalculator::volatility(&decomp_b.cycle)?,
                lag1_autocorrelation: StatsCalculator::lag1_autocorrelation(&decomp_b.cycle)?,
            },
        ],
        contemporaneous_correlation: correlation,
        rolling_window: cli.window,
        rolling_correlation: rolling,
    };

    if cli.json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{summary}");
    }

    if !cli.no_charts {
        let labels = table.labels();
        let plotter = ChartPlotter::new(&cli.out_dir)?;

        plotter.trend_chart(
            "trend_a",
            &format!("{}: log GDP and HP trend", cli.series_a_name),
            &labels,
            &decomp_a.observed,
            &decomp_a.trend,
        )?;
        plotter.trend_chart(
            "trend_b",
            &format!("{}: log GDP and HP trend", cli.series_b_name),
            &labels,
            &decomp_b.observed,
            &decomp_b.trend,
        )?;
        plotter.cycle_chart(
            "Cyclical components (deviation from HP trend)",
            &labels,
            &[
                LineSpec {
                    name: &cli.series_a_name,
                    values: &decomp_a.cycle,
                    color: SERIES_A_COLOR,
                },
                LineSpec {
                    name: &cli.series_b_name,
                    values: &decomp_b.cycle,
                    color: SERIES_B_COLOR,
                },
            ],
        )?;
        plotter.rolling_correlation_chart(
            &format!("Rolling cycle correlation ({}-quarter window)", cli.window),
            &labels,
            cli.window,
            &summary.rolling_correlation,
        )?;
    }

    Ok(())
}
