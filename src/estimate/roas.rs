//! Return on ad spend point estimate.

/// Compute revenue over ad spend.
///
/// Returns `f64::INFINITY` when spend is zero. Treat that value as a display
/// sentinel only; it must not flow into further arithmetic or charting.
pub fn roas(conversions: u64, price: f64, clicks: u64, cpc: f64) -> f64 {
    let total_revenue = conversions as f64 * price;
    let total_spend = clicks as f64 * cpc;
    if total_spend == 0.0 {
        return f64::INFINITY;
    }
    total_revenue / total_spend
}
