//! Return on ad spend with a Wald confidence interval and an error-bar chart.
//!
//! Data flows one way: [`inputs::CampaignInputs`] are validated, the point
//! estimate and interval are computed in [`estimate`], and [`chart`] draws the
//! result.

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod inputs;
pub mod logging;

pub use chart::RoasChart;
pub use error::{ChartError, EstimateError, InputError, RoasError};
pub use estimate::{evaluate, RoasInterval, RoasReport, ZSource};
pub use inputs::CampaignInputs;
