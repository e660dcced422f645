//! Wald confidence interval on the conversion rate, scaled into ROAS.

use serde::Serialize;

use crate::error::EstimateError;

use super::normal::{z_upper, ZSource};

/// Lower and upper ROAS bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoasInterval {
    pub lower: f64,
    pub upper: f64,
}

impl RoasInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Compute the ROAS interval at `confidence_level` using the given z source.
pub fn roas_ci(
    conversions: u64,
    clicks: u64,
    price: f64,
    cpc: f64,
    confidence_level: f64,
    source: &ZSource,
) -> Result<RoasInterval, EstimateError> {
    check_counts(conversions, clicks, cpc)?;
    let z = z_upper(confidence_level, source)?;
    roas_ci_with_z(conversions, clicks, price, cpc, z)
}

/// Compute the ROAS interval for an already resolved multiplier `z`.
pub fn roas_ci_with_z(
    conversions: u64,
    clicks: u64,
    price: f64,
    cpc: f64,
    z: f64,
) -> Result<RoasInterval, EstimateError> {
    check_counts(conversions, clicks, cpc)?;
    let n = clicks as f64;
    let rate = conversions as f64 / n;
    let standard_error = (rate * (1.0 - rate) / n).sqrt();
    let margin = z * standard_error;

    let lower_rate = (rate - margin).max(0.0);
    let upper_rate = (rate + margin).min(1.0);

    Ok(RoasInterval {
        lower: lower_rate * price / cpc,
        upper: upper_rate * price / cpc,
    })
}

fn check_counts(conversions: u64, clicks: u64, cpc: f64) -> Result<(), EstimateError> {
    if clicks == 0 {
        return Err(EstimateError::ZeroClicks);
    }
    if cpc == 0.0 {
        return Err(EstimateError::ZeroCpc);
    }
    if conversions > clicks {
        return Err(EstimateError::ConversionsExceedClicks {
            conversions,
            clicks,
        });
    }
    Ok(())
}
