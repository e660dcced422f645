//! Campaign inputs and the range checks applied before any estimation.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// The five numeric values supplied for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInputs {
    pub product_price: f64,
    /// Cost per click.
    pub cpc: f64,
    pub clicks: u64,
    pub conversions: u64,
    /// Two-sided confidence level in (0, 1), e.g. 0.95.
    pub confidence_level: f64,
}

impl Default for CampaignInputs {
    fn default() -> Self {
        Self {
            product_price: 100.0,
            cpc: 1.0,
            clicks: 100,
            conversions: 10,
            confidence_level: 0.95,
        }
    }
}

impl CampaignInputs {
    /// Reject inputs the estimator cannot handle.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.product_price.is_finite() && self.cpc.is_finite())
            || self.product_price < 0.0
            || self.cpc < 0.0
        {
            return Err(InputError::NegativeAmount);
        }
        if self.clicks == 0 || self.cpc == 0.0 {
            return Err(InputError::ZeroClicksOrCpc);
        }
        if self.conversions > self.clicks {
            return Err(InputError::ConversionsExceedClicks);
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(InputError::ConfidenceOutOfRange);
        }
        Ok(())
    }

    pub fn conversion_rate(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.conversions as f64 / self.clicks as f64
    }
}
