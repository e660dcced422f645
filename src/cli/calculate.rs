//! CLI entry-point for a single ROAS calculation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    chart::RoasChart,
    cli::{OutputFormat, ZArgs},
    config::Settings,
    estimate,
    inputs::CampaignInputs,
};

/// Args for the `calculate` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Product price.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub price: f64,
    /// Cost per click (CPC).
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub cpc: f64,
    /// Number of clicks.
    #[arg(long, default_value_t = 100)]
    pub clicks: u64,
    /// Number of conversions.
    #[arg(long, default_value_t = 10)]
    pub conversions: u64,
    /// Confidence interval percentage.
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(50..=99))]
    pub confidence: u8,
    /// Output format for the results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Where to write the SVG chart (defaults to OUTPUTS_DIR/roas_chart.svg).
    #[arg(long, conflicts_with = "no_chart")]
    pub chart: Option<PathBuf>,
    /// Skip writing the chart.
    #[arg(long)]
    pub no_chart: bool,
    #[command(flatten)]
    pub z: ZArgs,
}

impl Args {
    pub fn inputs(&self) -> CampaignInputs {
        CampaignInputs {
            product_price: self.price,
            cpc: self.cpc,
            clicks: self.clicks,
            conversions: self.conversions,
            confidence_level: f64::from(self.confidence) / 100.0,
        }
    }
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let inputs = args.inputs();
    let source = args.z.resolve(&settings.z_source)?;
    let report = estimate::evaluate(&inputs, &source)?;

    match args.format {
        OutputFormat::Text => {
            println!("{}", report.roas_line());
            println!("{}", report.interval_line());
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("serialising report")?
            );
        }
    }

    if args.no_chart {
        return Ok(());
    }
    if !report.is_chartable() {
        warn!(roas = report.roas, "roas is not finite; skipping chart");
        return Ok(());
    }
    let path = args
        .chart
        .unwrap_or_else(|| settings.join_output("roas_chart.svg"));
    RoasChart::new(report.roas, report.interval.lower, report.interval.upper)?
        .write_to(&path)
        .with_context(|| format!("writing chart to {}", path.display()))?;
    info!(path = %path.display(), "chart ready");
    Ok(())
}
