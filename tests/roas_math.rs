use roas_calculator::{
    error::EstimateError,
    estimate::{
        inverse_cdf, roas, roas_ci, roas_ci_with_z,
        normal::{percentile, standard_normal_draws, MAX_SAMPLES},
        z_upper, ZSource,
    },
};

#[test]
fn roas_matches_reference() {
    let value = roas(10, 100.0, 100, 1.0);
    assert!((value - 10.0).abs() < 1e-12);
}

#[test]
fn zero_conversions_give_zero_roas() {
    assert_eq!(roas(0, 49.99, 250, 0.35), 0.0);
}

#[test]
fn zero_spend_is_infinite() {
    assert_eq!(roas(5, 20.0, 40, 0.0), f64::INFINITY);
    assert_eq!(roas(5, 20.0, 0, 1.5), f64::INFINITY);
}

#[test]
fn interval_matches_reference() {
    let interval = roas_ci(10, 100, 100.0, 1.0, 0.95, &ZSource::Exact).unwrap();
    assert!((interval.lower - 4.120_108).abs() < 1e-4, "lower was {}", interval.lower);
    assert!((interval.upper - 15.879_892).abs() < 1e-4, "upper was {}", interval.upper);
    assert!(interval.contains(roas(10, 100.0, 100, 1.0)));
}

#[test]
fn all_converting_clicks_collapse_to_price_over_cpc() {
    let interval = roas_ci(50, 50, 20.0, 0.5, 0.99, &ZSource::Exact).unwrap();
    assert_eq!(interval.lower, 20.0 / 0.5);
    assert_eq!(interval.upper, 20.0 / 0.5);
    assert_eq!(interval.width(), 0.0);
}

#[test]
fn no_conversions_collapse_to_zero() {
    let interval = roas_ci(0, 80, 35.0, 0.7, 0.95, &ZSource::Exact).unwrap();
    assert_eq!(interval.lower, 0.0);
    assert_eq!(interval.upper, 0.0);
}

#[test]
fn small_samples_clamp_rate_bounds() {
    // 1 of 3 at 99%: both raw Wald bounds fall outside [0, 1].
    let interval = roas_ci_with_z(1, 3, 10.0, 2.0, 2.576).unwrap();
    assert_eq!(interval.lower, 0.0);
    assert!(interval.upper <= 10.0 / 2.0);
    assert!(interval.upper > roas(1, 10.0, 3, 2.0));
}

#[test]
fn higher_confidence_widens_interval() {
    let mut previous = 0.0;
    for level in [0.5, 0.8, 0.9, 0.95, 0.99] {
        let width = roas_ci(30, 400, 60.0, 1.2, level, &ZSource::Exact)
            .unwrap()
            .width();
        assert!(width > previous, "width {width} at {level} not above {previous}");
        previous = width;
    }
}

#[test]
fn degenerate_counts_are_rejected() {
    assert_eq!(
        roas_ci(0, 0, 10.0, 1.0, 0.95, &ZSource::Exact),
        Err(EstimateError::ZeroClicks)
    );
    assert_eq!(
        roas_ci(1, 10, 10.0, 0.0, 0.95, &ZSource::Exact),
        Err(EstimateError::ZeroCpc)
    );
    assert_eq!(
        roas_ci(11, 10, 10.0, 1.0, 0.95, &ZSource::Exact),
        Err(EstimateError::ConversionsExceedClicks {
            conversions: 11,
            clicks: 10
        })
    );
    assert_eq!(
        roas_ci(1, 10, 10.0, 1.0, 1.0, &ZSource::Exact),
        Err(EstimateError::InvalidConfidence(1.0))
    );
}

#[test]
fn inverse_cdf_hits_known_quantiles() {
    assert_eq!(inverse_cdf(0.5), 0.0);
    assert!((inverse_cdf(0.975) - 1.959_963_985).abs() < 1e-6);
    assert!((inverse_cdf(0.995) - 2.575_829_304).abs() < 1e-6);
    assert!((inverse_cdf(0.841_344_746) - 1.0).abs() < 1e-6);
    assert!((inverse_cdf(0.001) + 3.090_232_306).abs() < 1e-6);
    assert!((inverse_cdf(0.2) + inverse_cdf(0.8)).abs() < 1e-9);
    assert_eq!(inverse_cdf(0.0), f64::NEG_INFINITY);
    assert_eq!(inverse_cdf(1.0), f64::INFINITY);
}

#[test]
fn exact_z_for_ninety_five_percent() {
    let z = z_upper(0.95, &ZSource::Exact).unwrap();
    assert!((z - 1.959_963_985).abs() < 1e-6);
}

#[test]
fn seeded_sampling_is_reproducible_and_close() {
    let source = ZSource::Sampled {
        samples: 10_000,
        seed: Some(42),
    };
    let first = z_upper(0.95, &source).unwrap();
    let second = z_upper(0.95, &source).unwrap();
    assert_eq!(first, second);
    assert!((first - 1.96).abs() < 0.15, "sampled z was {first}");
}

#[test]
fn sampling_needs_two_draws() {
    let source = ZSource::Sampled {
        samples: 1,
        seed: Some(7),
    };
    assert_eq!(z_upper(0.95, &source), Err(EstimateError::TooFewSamples(1)));
}

#[test]
fn draws_are_sorted_and_centred() {
    let draws = standard_normal_draws(5_001, Some(3)).unwrap();
    assert_eq!(draws.len(), 5_001);
    assert!(draws.windows(2).all(|w| w[0] <= w[1]));
    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    assert!(mean.abs() < 0.1, "mean was {mean}");
}

#[test]
fn percentile_interpolates_between_order_statistics() {
    let sorted = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(percentile(&sorted, 0.0), Some(1.0));
    assert_eq!(percentile(&sorted, 1.0), Some(4.0));
    assert!((percentile(&sorted, 0.5).unwrap() - 2.5).abs() < 1e-12);
}

#[test]
fn percentile_of_empty_data_is_none() {
    assert_eq!(percentile(&[], 0.975), None);
    assert_eq!(percentile(&[3.5], 0.975), Some(3.5));
}

#[test]
fn oversized_sample_counts_are_rejected() {
    let source = ZSource::Sampled {
        samples: usize::MAX,
        seed: Some(1),
    };
    assert_eq!(
        z_upper(0.95, &source),
        Err(EstimateError::TooManySamples(usize::MAX))
    );
    assert_eq!(
        standard_normal_draws(MAX_SAMPLES + 1, Some(1)),
        Err(EstimateError::TooManySamples(MAX_SAMPLES + 1))
    );
}
