//! Error types shared by the estimation, validation and charting layers.

use thiserror::Error;

/// User-facing validation failures for a set of campaign inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Number of clicks and CPC must be greater than zero.")]
    ZeroClicksOrCpc,
    #[error("Number of conversions cannot exceed the number of clicks.")]
    ConversionsExceedClicks,
    #[error("Product price and CPC must be non-negative numbers.")]
    NegativeAmount,
    #[error("Confidence level must lie strictly between 0 and 1.")]
    ConfidenceOutOfRange,
}

/// Failures raised by the interval estimator and z-multiplier sources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("conversion rate is undefined with zero clicks")]
    ZeroClicks,
    #[error("cost per click must be non-zero to scale into ROAS")]
    ZeroCpc,
    #[error("conversions ({conversions}) exceed clicks ({clicks})")]
    ConversionsExceedClicks { conversions: u64, clicks: u64 },
    #[error("confidence level {0} is outside (0, 1)")]
    InvalidConfidence(f64),
    #[error("sampled z source needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("sampled z source accepts at most 10000000 samples, got {0}")]
    TooManySamples(usize),
}

/// Failures raised while laying out or rendering the chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot chart non-finite {field} ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("interval lower bound {lower} exceeds upper bound {upper}")]
    InvertedInterval { lower: f64, upper: f64 },
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
    #[error("writing chart failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for a full calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoasError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error(transparent)]
    Estimate(#[from] EstimateError),
}
