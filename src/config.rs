//! Runtime configuration utilities for roas-calculator.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::estimate::normal::{ZSource, DEFAULT_SAMPLES};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for charts and batch reports.
    pub outputs_dir: PathBuf,
    /// Default source of the z multiplier.
    pub z_source: ZSource,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let samples = match env::var("Z_SAMPLES") {
            Ok(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("parsing Z_SAMPLES={raw}"))?,
            Err(_) => DEFAULT_SAMPLES,
        };
        let seed = match env::var("Z_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("parsing Z_SEED={raw}"))?,
            ),
            Err(_) => None,
        };
        let z_source = match env::var("Z_SOURCE")
            .unwrap_or_else(|_| "exact".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "exact" => ZSource::Exact,
            "sampled" => ZSource::Sampled { samples, seed },
            other => bail!("unknown Z_SOURCE {other:?}; expected exact or sampled"),
        };

        Ok(Self {
            outputs_dir,
            z_source,
        })
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
