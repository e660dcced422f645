use roas_calculator::{cli::ZArgs, estimate::ZSource};

#[test]
fn exact_source_rejects_sampler_overrides() {
    let args = ZArgs {
        seed: Some(9),
        ..ZArgs::default()
    };
    let err = args.resolve(&ZSource::Exact).unwrap_err();
    assert!(err.to_string().contains("require the sampled z source"));
}

#[test]
fn configured_sampled_source_takes_overrides() {
    let args = ZArgs {
        samples: Some(2_000),
        ..ZArgs::default()
    };
    let configured = ZSource::Sampled {
        samples: 10_000,
        seed: Some(4),
    };
    assert_eq!(
        args.resolve(&configured).unwrap(),
        ZSource::Sampled {
            samples: 2_000,
            seed: Some(4),
        }
    );
}

#[test]
fn no_overrides_keep_configured_source() {
    assert_eq!(ZArgs::default().resolve(&ZSource::Exact).unwrap(), ZSource::Exact);
}
