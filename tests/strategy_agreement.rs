//! Cross-strategy integration tests.
//!
//! Exercises the public API end to end: literal ranks, multi-segment ranks
//! compared against the full sieve, config files on disk, and every error
//! path. Set `RUST_LOG=nthprime=debug` to see the sieve trace.

use nthprime::{
    nth_prime, primes_up_to_nth, Dispatcher, FullSieve, NthPrime, PrimeSequence, Rank,
    SegmentedSieve, SieveConfig, SieveError, SievePolicy, Strategy, WheelSieve,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn all_strategies() -> Vec<Box<dyn NthPrime>> {
    vec![
        Box::new(FullSieve::default()),
        Box::new(SegmentedSieve::default()),
        Box::new(WheelSieve::default()),
    ]
}

// --- Known values ---

#[test]
fn literal_scenarios_for_every_strategy() {
    init_tracing();
    let cases = [
        (0, 2),
        (1, 3),
        (2, 5),
        (8, 23),
        (10, 31),
        (99, 541),
        (500, 3_581),
        (1_000, 7_927),
        (10_000, 104_743),
    ];
    for strategy in all_strategies() {
        for (n, p) in cases {
            assert_eq!(strategy.nth_prime(n).unwrap(), p, "{} n={}", strategy.name(), n);
        }
    }
}

#[test]
fn rank_four_regrows_in_every_strategy() {
    init_tracing();
    for strategy in all_strategies() {
        assert_eq!(strategy.nth_prime(4).unwrap(), 11, "{}", strategy.name());
    }
}

// --- Cross-strategy agreement ---

#[test]
fn wheel_matches_full_sieve_across_range() {
    let reference = FullSieve::default().primes_up_to_nth(100_000).unwrap();
    let wheel = WheelSieve::default();
    for n in (0..5_000u64).chain((5_000..=100_000).step_by(997)).chain([100_000]) {
        assert_eq!(
            wheel.nth_prime(n).unwrap(),
            reference[n as usize],
            "wheel disagrees with full sieve at n={}",
            n
        );
    }
}

#[test]
fn segmented_matches_full_at_one_million() {
    init_tracing();
    let n = 1_000_000;
    let full = FullSieve::default().primes_up_to_nth(n).unwrap();
    let segmented = SegmentedSieve::default().primes_up_to_nth(n).unwrap();
    assert_eq!(segmented.len(), full.len());
    assert_eq!(segmented, full);
    assert_eq!(*full.last().unwrap(), 15_485_867);
    assert_eq!(WheelSieve::default().nth_prime(n).unwrap(), 15_485_867);
}

#[test]
fn top_level_functions_agree() {
    for n in [0, 3, 4, 97, 4_096, 65_537] {
        let primes = primes_up_to_nth(n).unwrap();
        assert_eq!(primes.len() as u64, n + 1);
        assert_eq!(*primes.last().unwrap(), nth_prime(n).unwrap());
    }
}

#[test]
fn concurrent_queries_are_independent() {
    let handles: Vec<_> = (0..4u64)
        .map(|t| std::thread::spawn(move || nth_prime(10_000 + t).unwrap()))
        .collect();
    let got: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(got, vec![104_743, 104_759, 104_761, 104_773]);
}

// --- Configuration ---

#[test]
fn dispatcher_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sieve.toml");
    std::fs::write(
        &path,
        r#"
nth_strategy = "segmented"
sequence_strategy = "full"
bound_margin = 0.05
"#,
    )
    .unwrap();
    let config = SieveConfig::load(&path).unwrap();
    assert_eq!(config.nth_strategy, Strategy::Segmented);
    let dispatcher = Dispatcher::new(config).unwrap();
    assert_eq!(dispatcher.nth_prime(10_000).unwrap(), 104_743);
    assert_eq!(dispatcher.primes_up_to_nth(10).unwrap().last(), Some(&31));
}

#[test]
fn bound_margin_does_not_change_results() {
    let config = SieveConfig {
        bound_margin: 0.5,
        ..SieveConfig::default()
    };
    let wide = Dispatcher::new(config).unwrap();
    let plain = Dispatcher::default();
    for n in [3, 4, 5, 1_000, 20_000] {
        assert_eq!(wide.nth_prime(n).unwrap(), plain.nth_prime(n).unwrap());
    }
}

// --- Errors ---

#[test]
fn negative_rank_is_invalid_argument() {
    assert!(matches!(
        Rank::try_from(-5i64),
        Err(SieveError::InvalidArgument { .. })
    ));
}

#[test]
fn oversized_rank_is_invalid_argument() {
    assert!(matches!(
        nth_prime(u64::MAX),
        Err(SieveError::InvalidArgument { .. })
    ));
    assert!(matches!(
        primes_up_to_nth(u64::MAX),
        Err(SieveError::InvalidArgument { .. })
    ));
}

#[test]
fn memory_ceiling_fails_the_call_only() {
    let tight = Dispatcher::new(SieveConfig {
        memory_limit_bytes: Some(4_096),
        ..SieveConfig::default()
    })
    .unwrap();
    assert!(matches!(
        tight.nth_prime(1_000_000),
        Err(SieveError::ResourceExhausted { .. })
    ));
    // Small ranks still fit under the same ceiling.
    assert_eq!(tight.nth_prime(1_000).unwrap(), 7_927);
}

#[test]
fn wheel_sequence_strategy_is_rejected() {
    let err = Dispatcher::new(SieveConfig {
        sequence_strategy: Strategy::Wheel,
        ..SieveConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, SieveError::InvalidConfig { .. }));
}

#[test]
fn regrowth_budget_zero_surfaces_bound_error() {
    let wheel = WheelSieve::new(SievePolicy {
        max_regrowths: 0,
        ..SievePolicy::default()
    });
    assert!(matches!(
        wheel.nth_prime(4),
        Err(SieveError::BoundTooSmall { n: 4, .. })
    ));
    assert_eq!(wheel.nth_prime(5).unwrap(), 13);
}
