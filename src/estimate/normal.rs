//! Standard normal quantiles used as two-sided z multipliers.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EstimateError;

/// Sample count drawn by the sampled source when none is configured.
pub const DEFAULT_SAMPLES: usize = 10_000;
/// Largest sample count the sampled source accepts.
pub const MAX_SAMPLES: usize = 10_000_000;

// Acklam's rational approximation coefficients.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.024_25;

/// Where the z multiplier comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZSource {
    /// Deterministic inverse CDF.
    #[default]
    Exact,
    /// Empirical percentile of `samples` standard normal draws.
    Sampled { samples: usize, seed: Option<u64> },
}

/// Inverse of the standard normal CDF.
///
/// Relative error is around 1e-9 across the open unit interval.
pub fn inverse_cdf(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = ((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5];
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num * q / den
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail(q)
    }
}

fn tail(q: f64) -> f64 {
    let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
    let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
    num / den
}

/// Upper two-sided multiplier |z| at the `(1 + confidence_level) / 2` percentile.
pub fn z_upper(confidence_level: f64, source: &ZSource) -> Result<f64, EstimateError> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(EstimateError::InvalidConfidence(confidence_level));
    }
    let upper = (1.0 + confidence_level) / 2.0;
    let z = match source {
        ZSource::Exact => inverse_cdf(upper),
        ZSource::Sampled { samples, seed } => {
            let draws = standard_normal_draws(*samples, *seed)?;
            percentile(&draws, upper)
                .ok_or(EstimateError::TooFewSamples(draws.len()))?
                .abs()
        }
    };
    debug!(confidence_level, z, ?source, "resolved z multiplier");
    Ok(z)
}

/// Draw `n` standard normal variates, sorted ascending.
pub fn standard_normal_draws(n: usize, seed: Option<u64>) -> Result<Vec<f64>, EstimateError> {
    if n < 2 {
        return Err(EstimateError::TooFewSamples(n));
    }
    if n > MAX_SAMPLES {
        return Err(EstimateError::TooManySamples(n));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut draws = Vec::with_capacity(n);
    while draws.len() < n {
        // Box-Muller; shift into (0, 1] so the log stays finite.
        let u1 = 1.0 - rng.gen::<f64>();
        let u2 = rng.gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = std::f64::consts::TAU * u2;
        draws.push(radius * angle.cos());
        if draws.len() < n {
            draws.push(radius * angle.sin());
        }
    }
    draws.sort_by(|a, b| a.total_cmp(b));
    Ok(draws)
}

/// Percentile of sorted data with linear interpolation between order statistics.
///
/// `fraction` is clamped to `[0, 1]`. Returns `None` for empty data.
pub fn percentile(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = fraction.clamp(0.0, 1.0) * last as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let weight = rank - below as f64;
    Some(sorted[below] + (sorted[above] - sorted[below]) * weight)
}
