//! CLI entry-point for evaluating a CSV of campaigns.

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    cli::ZArgs,
    config::Settings,
    estimate::{self, normal::ZSource, z_upper},
    error::RoasError,
    inputs::CampaignInputs,
};

/// Args for the `batch` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// CSV with product_price,cpc,clicks,conversions[,confidence_level] columns.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination CSV (defaults to OUTPUTS_DIR/roas_batch.csv).
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub z: ZArgs,
}

#[derive(Debug, Deserialize)]
struct CampaignRow {
    product_price: f64,
    cpc: f64,
    clicks: u64,
    conversions: u64,
    confidence_level: Option<f64>,
}

impl From<CampaignRow> for CampaignInputs {
    fn from(row: CampaignRow) -> Self {
        CampaignInputs {
            product_price: row.product_price,
            cpc: row.cpc,
            clicks: row.clicks,
            conversions: row.conversions,
            confidence_level: row
                .confidence_level
                .unwrap_or(CampaignInputs::default().confidence_level),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultRow {
    row: usize,
    roas: Option<f64>,
    ci_lower: Option<f64>,
    ci_upper: Option<f64>,
    confidence_level: Option<f64>,
    error: Option<String>,
}

impl ResultRow {
    fn failed(row: usize, confidence_level: Option<f64>, error: String) -> Self {
        Self {
            row,
            roas: None,
            ci_lower: None,
            ci_upper: None,
            confidence_level,
            error: Some(error),
        }
    }
}

/// Resolves each distinct confidence level once so sampled rows share a multiplier.
struct ZCache<'a> {
    source: &'a ZSource,
    resolved: HashMap<u64, f64>,
}

impl<'a> ZCache<'a> {
    fn new(source: &'a ZSource) -> Self {
        Self {
            source,
            resolved: HashMap::new(),
        }
    }

    fn get(&mut self, confidence_level: f64) -> Result<f64, RoasError> {
        let key = confidence_level.to_bits();
        if let Some(z) = self.resolved.get(&key) {
            return Ok(*z);
        }
        let z = z_upper(confidence_level, self.source)?;
        self.resolved.insert(key, z);
        Ok(z)
    }
}

fn evaluate_row(row: usize, inputs: &CampaignInputs, cache: &mut ZCache<'_>) -> ResultRow {
    let outcome = inputs
        .validate()
        .map_err(RoasError::from)
        .and_then(|_| cache.get(inputs.confidence_level))
        .and_then(|z| estimate::evaluate_with_z(inputs, z));
    match outcome {
        Ok(report) => ResultRow {
            row,
            roas: Some(report.roas),
            ci_lower: Some(report.interval.lower),
            ci_upper: Some(report.interval.upper),
            confidence_level: Some(inputs.confidence_level),
            error: None,
        },
        Err(err) => ResultRow::failed(row, Some(inputs.confidence_level), err.to_string()),
    }
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let source = args.z.resolve(&settings.z_source)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut cache = ZCache::new(&source);
    let mut results = Vec::new();
    for (idx, record) in reader.deserialize::<CampaignRow>().enumerate() {
        let row = idx + 1;
        match record {
            Ok(raw) => results.push(evaluate_row(row, &raw.into(), &mut cache)),
            Err(err) => {
                warn!(row, %err, "unreadable campaign row");
                results.push(ResultRow::failed(row, None, err.to_string()));
            }
        }
    }

    let out_path = args
        .output
        .unwrap_or_else(|| settings.join_output("roas_batch.csv"));
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = Writer::from_path(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    for result in &results {
        writer.serialize(result)?;
    }
    writer.flush()?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(path = %out_path.display(), rows = results.len(), failed, "wrote batch report");
    println!("{}", out_path.display());
    Ok(())
}
