use super::*;
use super::Strategy;
use crate::calculus::PrecisionCfg;
use proptest::prelude::*;

/// Closed-form arc length of `x^2` from 0 to `t`.
fn parabola_length(t: f64) -> f64 {
    t / 2.0 * (1.0 + 4.0 * t * t).sqrt() + (2.0 * t).asinh() / 4.0
}

fn assert_xs_close(seq: &PointSequence, expected: &[f64], tol: f64) {
    assert_eq!(seq.len(), expected.len());
    for (got, want) in seq.xs().iter().zip(expected) {
        assert!((got - want).abs() < tol, "got {got}, want {want} (tol {tol})");
    }
}

#[test]
fn line_splits_into_quarters() {
    let seq = resample(|x| x, 0.0, 1.0, 5, &PrecisionCfg::default()).unwrap();
    assert_xs_close(&seq, &[0.0, 0.25, 0.5, 0.75, 1.0], 1e-5);
    for p in &seq {
        assert!((p.y - p.x).abs() < 1e-12);
    }
    for c in seq.chord_lengths() {
        assert!((c - 2f64.sqrt() / 4.0).abs() < 1e-5);
    }
}

#[test]
fn line_splits_into_quarters_for_every_strategy_and_anchor() {
    let cfg = PrecisionCfg::default();
    for strategy in [Strategy::UnitWalk, Strategy::Doubling] {
        for anchor in [Anchor::Previous, Anchor::Origin] {
            let scfg = SolveCfg {
                strategy,
                anchor,
                ..SolveCfg::default()
            };
            let seq = resample_with(|x| x, 0.0, 1.0, 5, &cfg, &scfg).unwrap();
            assert_xs_close(&seq, &[0.0, 0.25, 0.5, 0.75, 1.0], 1e-5);
        }
    }
    // March overshoots each boundary by at most one step.
    let march = SolveCfg {
        strategy: Strategy::March,
        ..SolveCfg::default()
    };
    let seq = resample_with(|x| x, 0.0, 1.0, 5, &cfg, &march).unwrap();
    assert_xs_close(&seq, &[0.0, 0.25, 0.5, 0.75, 1.0], 5e-3);
}

#[test]
fn endpoints_are_exact() {
    let a = 0.1234567;
    let b = std::f64::consts::PI;
    for n in [2usize, 3, 7] {
        let seq = resample(f64::sin, a, b, n, &PrecisionCfg::default()).unwrap();
        assert_eq!(seq.len(), n);
        assert_eq!(seq.first().unwrap().x, a);
        assert_eq!(seq.last().unwrap().x, b);
    }
    // rounding stages keep the endpoints too
    let seq = resample(
        |x| x * x,
        a,
        b,
        4,
        &PrecisionCfg::from_degree(3),
    )
    .unwrap();
    assert_eq!(seq.first().unwrap().x, a);
    assert_eq!(seq.last().unwrap().x, b);
}

#[test]
fn parabola_segments_have_equal_length() {
    let n = 5;
    let seq = resample(|x| x * x, 1.0, 10.0, n, &PrecisionCfg::default()).unwrap();
    let total = parabola_length(10.0) - parabola_length(1.0);
    let segment = total / (n - 1) as f64;
    let xs = seq.xs();
    for w in xs.windows(2) {
        let len = parabola_length(w[1]) - parabola_length(w[0]);
        assert!(
            ((len - segment) / segment).abs() < 1e-4,
            "segment {len} vs {segment}"
        );
    }
}

#[test]
fn historical_runs_are_replayed() {
    let cfg = PrecisionCfg::from_degree(3);
    let scfg = SolveCfg::historical();

    let seq = resample_with(|x| x * x, 1.0, 10.0, 5, &cfg, &scfg).unwrap();
    assert_xs_close(
        &seq,
        &[1.0, 5.050742085681122, 7.093350091405263, 8.66905497024748, 10.0],
        1e-2,
    );

    let b = std::f64::consts::PI.powi(2);
    let seq = resample_with(|x| x * x, 1.41482675, b, 5, &cfg, &scfg).unwrap();
    assert_xs_close(
        &seq,
        &[
            1.41482675,
            5.0668250486983535,
            7.0409423912318765,
            8.573699654605555,
            9.869604401089358,
        ],
        1e-2,
    );
    // interior points sit on the step grid
    for p in &seq.points()[1..4] {
        assert!(((p.x * 1000.0) - (p.x * 1000.0).round()).abs() < 1e-6);
    }
}

#[test]
fn ramp_with_wiggle_matches_reference_points() {
    let seq = resample(|x| x + x.sin(), 0.0, 6.5, 11, &PrecisionCfg::default()).unwrap();
    let expected = [
        0.0, 0.452, 0.946, 1.551, 2.388, 3.381, 4.333, 5.044, 5.583, 6.051, 6.5,
    ];
    assert_xs_close(&seq, &expected, 1e-2);
}

#[test]
fn identical_inputs_are_bit_identical() {
    let cfg = PrecisionCfg::default();
    let scfg = SolveCfg {
        seed: 99,
        ..SolveCfg::default()
    };
    let f = |x: f64| x.exp() / 3.0;
    let p = resample_with(f, -1.0, 2.0, 9, &cfg, &scfg).unwrap();
    let q = resample_with(f, -1.0, 2.0, 9, &cfg, &scfg).unwrap();
    for (u, v) in p.iter().zip(q.iter()) {
        assert_eq!(u.x.to_bits(), v.x.to_bits());
        assert_eq!(u.y.to_bits(), v.y.to_bits());
    }
}

#[test]
fn seeds_change_guesses_not_answers() {
    let cfg = PrecisionCfg::default();
    let f = |x: f64| x.exp() / 3.0;
    let p = resample_with(f, -1.0, 2.0, 6, &cfg, &SolveCfg::default()).unwrap();
    let q = resample_with(
        f,
        -1.0,
        2.0,
        6,
        &cfg,
        &SolveCfg {
            seed: 12345,
            probe: ProbeKind::Sine,
            ..SolveCfg::default()
        },
    )
    .unwrap();
    for (u, v) in p.iter().zip(q.iter()) {
        assert!((u.x - v.x).abs() < 1e-5);
    }
}

#[test]
fn caller_owned_probe_is_used() {
    let cfg = PrecisionCfg::default();
    let scfg = SolveCfg::default();
    let mut probe = FixedProbe::new(vec![0.9, 0.1]);
    let seq = resample_with_probe(|x| x, 0.0, 1.0, 5, &cfg, &scfg, &mut probe).unwrap();
    assert_xs_close(&seq, &[0.0, 0.25, 0.5, 0.75, 1.0], 1e-5);
}

#[test]
fn rounding_inputs_snaps_interior_points() {
    let cfg = PrecisionCfg {
        round_inputs: true,
        ..PrecisionCfg::default()
    };
    let seq = resample(|x| 0.5 * x * x, 0.0, 2.0, 6, &cfg).unwrap();
    assert_eq!(seq.snapped(cfg.step_exponent), seq);
    for p in &seq.points()[1..5] {
        assert!(((p.x * 1000.0) - (p.x * 1000.0).round()).abs() < 1e-6);
    }
}

#[test]
fn invalid_params_are_rejected() {
    let cfg = PrecisionCfg::default();
    let bad = [
        resample(|x| x, 0.0, 1.0, 1, &cfg),
        resample(|x| x, 1.0, 1.0, 5, &cfg),
        resample(|x| x, 2.0, 1.0, 5, &cfg),
        resample(|x| x, f64::NAN, 1.0, 5, &cfg),
        resample(
            |x| x,
            0.0,
            1.0,
            5,
            &PrecisionCfg {
                step_exponent: 16,
                ..cfg
            },
        ),
    ];
    for r in bad {
        assert!(matches!(r, Err(ResampleError::InvalidParams { .. })), "{r:?}");
    }
}

#[test]
fn ill_defined_function_reports_non_finite_length() {
    let r = resample(f64::sqrt, -1.0, 1.0, 4, &PrecisionCfg::default());
    assert!(matches!(r, Err(ResampleError::NonFiniteLength { .. })));
}

#[test]
fn solver_finds_bound_for_unit_density() {
    let cfg = PrecisionCfg::default();
    let scfg = SolveCfg::default();
    let mut probe = FixedProbe::new(vec![0.5]);
    let x = solve_upper_bound(|_| 1.0, 0.0, 0.3, 1.0, &cfg, &scfg, &mut probe).unwrap();
    assert!((x - 0.3).abs() < 1e-6);
    // zero target collapses onto the start
    let x = solve_upper_bound(|_| 1.0, 0.0, 0.0, 1.0, &cfg, &scfg, &mut probe).unwrap();
    assert!(x.abs() < 1e-6);
}

#[test]
fn doubling_walk_handles_far_scales_where_unit_walk_gives_up() {
    let cfg = PrecisionCfg::default();
    let unit = SolveCfg {
        strategy: Strategy::UnitWalk,
        max_bracket_steps: 8,
        ..SolveCfg::default()
    };
    let mut probe = FixedProbe::new(vec![0.9]);
    let r = solve_upper_bound(|_| 1.0, 0.0, 100.0, 200.0, &cfg, &unit, &mut probe);
    assert!(matches!(r, Err(SolveError::Diverged { steps: 8, .. })), "{r:?}");

    let doubling = SolveCfg {
        max_bracket_steps: 8,
        ..SolveCfg::default()
    };
    let x = solve_upper_bound(|_| 1.0, 0.0, 100.0, 200.0, &cfg, &doubling, &mut probe).unwrap();
    assert!((x - 100.0).abs() < 1e-4);
}

#[test]
fn solver_reports_non_finite_density() {
    let cfg = PrecisionCfg::default();
    let mut probe = FixedProbe::new(vec![0.5]);
    for strategy in [Strategy::March, Strategy::UnitWalk, Strategy::Doubling] {
        let scfg = SolveCfg {
            strategy,
            ..SolveCfg::default()
        };
        let r = solve_upper_bound(|_| f64::NAN, 0.0, 0.5, 1.0, &cfg, &scfg, &mut probe);
        assert!(matches!(r, Err(SolveError::NonFinite { .. })), "{strategy:?}: {r:?}");
    }
    let r = solve_upper_bound(
        |_| 1.0,
        0.0,
        f64::NAN,
        1.0,
        &cfg,
        &SolveCfg::default(),
        &mut probe,
    );
    assert!(matches!(r, Err(SolveError::NonFinite { .. })));
}

#[test]
fn march_lands_within_one_step() {
    let cfg = PrecisionCfg::default();
    let scfg = SolveCfg {
        strategy: Strategy::March,
        ..SolveCfg::default()
    };
    let mut probe = FixedProbe::new(vec![0.5]);
    let x = solve_upper_bound(|_| 1.0, 2.0, 0.5, 3.0, &cfg, &scfg, &mut probe).unwrap();
    assert!(x >= 2.5 - 1e-9 && x <= 2.5 + 2e-3, "x={x}");
}

#[test]
fn error_messages_name_the_failing_point() {
    let err = ResampleError::Solve {
        index: 3,
        source: SolveError::NonFinite { x: 1.5 },
    };
    assert_eq!(
        err.to_string(),
        "point 3: non-finite length estimate near x=1.5"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn snapped_keeps_endpoints_and_is_idempotent() {
    let seq = resample(f64::exp, 0.01234, 1.98765, 6, &PrecisionCfg::default()).unwrap();
    let once = seq.snapped(2);
    assert_eq!(once.first().unwrap().x, 0.01234);
    assert_eq!(once.last().unwrap().x, 1.98765);
    assert_eq!(once.snapped(2), once);
    let pairs = once.clone().into_pairs();
    assert_eq!(pairs.len(), 6);
    assert_eq!(pairs[2], (once.points()[2].x, once.points()[2].y));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn increasing_functions_give_increasing_points(
        a in -2.0f64..1.0,
        len in 0.5f64..3.0,
        n in 2usize..8,
        seed in any::<u64>(),
    ) {
        let b = a + len;
        let scfg = SolveCfg { seed, ..SolveCfg::default() };
        let seq = resample_with(
            |x| x + 0.5 * x.powi(3),
            a,
            b,
            n,
            &PrecisionCfg::default(),
            &scfg,
        )
        .unwrap();
        prop_assert_eq!(seq.len(), n);
        prop_assert_eq!(seq.first().unwrap().x, a);
        prop_assert_eq!(seq.last().unwrap().x, b);
        let xs = seq.xs();
        for w in xs.windows(2) {
            prop_assert!(w[0] < w[1], "non-increasing: {:?}", xs);
        }
    }

    #[test]
    fn output_rounding_is_idempotent(
        a in -1.0f64..1.0,
        len in 0.5f64..2.0,
        e in 0u32..6,
    ) {
        let seq = resample(f64::sin, a, a + len, 5, &PrecisionCfg::default()).unwrap();
        let once = seq.snapped(e);
        prop_assert_eq!(once.snapped(e), once);
    }
}
