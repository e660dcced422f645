//! ROAS estimation layer: point estimate, z multiplier and interval.

pub mod interval;
pub mod normal;
pub mod roas;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{error::RoasError, inputs::CampaignInputs};

pub use interval::{roas_ci, roas_ci_with_z, RoasInterval};
pub use normal::{inverse_cdf, z_upper, ZSource};
pub use roas::roas;

/// Outcome of one validated calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoasReport {
    pub inputs: CampaignInputs,
    pub conversion_rate: f64,
    pub roas: f64,
    pub z: f64,
    pub interval: RoasInterval,
}

impl RoasReport {
    pub fn roas_line(&self) -> String {
        format!("ROAS: {:.2}", self.roas)
    }

    pub fn interval_line(&self) -> String {
        format!(
            "{:.0}% Confidence Interval for ROAS: [{:.2}, {:.2}]",
            self.inputs.confidence_level * 100.0,
            self.interval.lower,
            self.interval.upper
        )
    }

    /// Whether the point estimate can be charted.
    pub fn is_chartable(&self) -> bool {
        self.roas.is_finite()
    }
}

/// Validate inputs, then compute ROAS and its interval.
///
/// Invalid inputs return before the interval estimator runs.
#[instrument(skip(inputs), fields(clicks = inputs.clicks, conversions = inputs.conversions))]
pub fn evaluate(inputs: &CampaignInputs, source: &ZSource) -> Result<RoasReport, RoasError> {
    inputs.validate()?;
    let z = z_upper(inputs.confidence_level, source)?;
    evaluate_with_z(inputs, z)
}

/// Like [`evaluate`] but reuses a multiplier resolved by the caller.
///
/// `z` must correspond to `inputs.confidence_level`.
pub fn evaluate_with_z(inputs: &CampaignInputs, z: f64) -> Result<RoasReport, RoasError> {
    inputs.validate()?;
    let point = roas(inputs.conversions, inputs.product_price, inputs.clicks, inputs.cpc);
    let interval = roas_ci_with_z(
        inputs.conversions,
        inputs.clicks,
        inputs.product_price,
        inputs.cpc,
        z,
    )?;
    debug!(roas = point, lower = interval.lower, upper = interval.upper, "computed roas");
    Ok(RoasReport {
        inputs: inputs.clone(),
        conversion_rate: inputs.conversion_rate(),
        roas: point,
        z,
        interval,
    })
}
