//! Command-line interface wiring for roas-calculator.

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::{
    config::Settings,
    estimate::normal::{ZSource, DEFAULT_SAMPLES},
};

pub mod batch;
pub mod calculate;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "ROAS and confidence interval calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Calculate(args) => calculate::run(args, settings),
            Commands::Batch(args) => batch::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute ROAS, its confidence interval and an error-bar chart.
    Calculate(calculate::Args),
    /// Evaluate every campaign in a CSV file.
    Batch(batch::Args),
}

/// Rendering of calculation results on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two human-readable lines.
    Text,
    /// Full report as JSON.
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ZSourceKind {
    /// Deterministic inverse normal CDF.
    Exact,
    /// Empirical percentile of random standard normal draws.
    Sampled,
}

/// Overrides for the z multiplier source.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ZArgs {
    /// Where the z multiplier comes from (defaults to Z_SOURCE).
    #[arg(long, value_enum)]
    pub z_source: Option<ZSourceKind>,
    /// Number of draws for the sampled source.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Seed making the sampled source reproducible.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ZArgs {
    /// Merge CLI overrides onto the configured source.
    ///
    /// `--samples` and `--seed` only apply to the sampled source.
    pub fn resolve(&self, configured: &ZSource) -> Result<ZSource> {
        let (configured_samples, configured_seed) = match configured {
            ZSource::Exact => (DEFAULT_SAMPLES, None),
            ZSource::Sampled { samples, seed } => (*samples, *seed),
        };
        let kind = self.z_source.unwrap_or(match configured {
            ZSource::Exact => ZSourceKind::Exact,
            ZSource::Sampled { .. } => ZSourceKind::Sampled,
        });
        match kind {
            ZSourceKind::Exact => {
                if self.samples.is_some() || self.seed.is_some() {
                    bail!("--samples and --seed require the sampled z source");
                }
                Ok(ZSource::Exact)
            }
            ZSourceKind::Sampled => Ok(ZSource::Sampled {
                samples: self.samples.unwrap_or(configured_samples),
                seed: self.seed.or(configured_seed),
            }),
        }
    }
}
