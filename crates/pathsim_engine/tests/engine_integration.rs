//! Integration tests for the path engine.
//!
//! These tests drive the public API end to end: named-parameter
//! construction, serde configuration, simulation and the batch runner.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use pathsim_core::math::correlation::CorrelationMatrix;
use pathsim_core::types::{ConfigurationError, DecompositionError, SimulationError};
use pathsim_engine::mc::{run_batch, EvaluationTimes, PathEngine};
use pathsim_engine::model::{GbmConfig, ModelConfig, ParamValue};
use pathsim_engine::rng::{NormalSource, SimRng};
use pathsim_engine::stats::log_return_correlation;
use proptest::prelude::*;

fn named(entries: Vec<(&str, ParamValue)>) -> BTreeMap<String, ParamValue> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn two_asset_params(rho: f64) -> BTreeMap<String, ParamValue> {
    named(vec![
        ("sigma", ParamValue::Vector(vec![0.2, 0.2])),
        ("r", ParamValue::Scalar(0.03)),
        ("rho", ParamValue::Matrix(vec![vec![1.0, rho], vec![rho, 1.0]])),
    ])
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_unknown_parameter_rejected() {
    let mut params = two_asset_params(0.5);
    params.insert("mu".to_string(), ParamValue::Scalar(0.1));

    let err = ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnknownParameter {
            model: "GeoBrownian",
            name: "mu".to_string(),
        }
    );
}

#[test]
fn test_unknown_model_rejected() {
    let err = ModelConfig::from_named("Heston", 100.0, &two_asset_params(0.5)).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownModel("Heston".to_string()));
}

#[test]
fn test_dimension_mismatch_rejected_at_construction() {
    let params = named(vec![
        ("sigma", ParamValue::Vector(vec![0.2, 0.2])),
        ("r", ParamValue::Scalar(0.03)),
        ("rho", ParamValue::Matrix(vec![vec![1.0, 0.0, 0.0]; 3])),
    ]);

    let err = ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DimensionMismatch {
            expected: 2,
            got: 3
        }
    );
}

#[test]
fn test_missing_correlation_rejected() {
    let params = named(vec![
        ("sigma", ParamValue::Vector(vec![0.2, 0.3])),
        ("r", ParamValue::Scalar(0.03)),
    ]);
    let err = ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap_err();
    assert_eq!(err, ConfigurationError::MissingCorrelation { dimension: 2 });
}

#[test]
fn test_toml_configuration_round_trip() {
    let config: ModelConfig = toml::from_str(
        r#"
        model = "GeoBrownian"
        initial_price = 100.0
        sigma = [0.2, 0.2]
        r = 0.03
        rho = [[1.0, 0.5], [0.5, 1.0]]
        "#,
    )
    .unwrap();

    let from_named = ModelConfig::from_named("GeoBrownian", 100.0, &two_asset_params(0.5)).unwrap();
    assert_eq!(config, from_named);
}

// ============================================================================
// Simulation Tests
// ============================================================================

#[test]
fn test_non_psd_correlation_fails_with_decomposition_error() {
    let params = named(vec![
        ("sigma", ParamValue::Vector(vec![0.2, 0.2])),
        ("r", ParamValue::Scalar(0.03)),
        ("rho", ParamValue::Matrix(vec![vec![1.0, 2.0], vec![2.0, 1.0]])),
    ]);
    let engine = PathEngine::new(ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap());

    let err = engine.simulate(EvaluationTimes::daily(5)).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Decomposition(DecompositionError::NotPositiveSemidefinite { .. })
    ));
}

#[test]
fn test_single_asset_matches_raw_draws() {
    let engine = PathEngine::new(GbmConfig::single(100.0, 0.25, 0.01).unwrap());
    let times = EvaluationTimes::daily(30);

    let output = engine
        .simulate_with_rng(&times, &mut SimRng::from_seed(9))
        .unwrap();

    let mut draws = vec![0.0; 30];
    SimRng::from_seed(9).fill_standard_normal(&mut draws);

    let dt: f64 = 1.0 / 252.0;
    let mut price = 100.0;
    for (step, eps) in draws.iter().enumerate() {
        price *= ((0.01 - 0.5 * 0.0625) * dt + 0.25 * eps * dt.sqrt()).exp();
        assert_relative_eq!(output.paths.get(step, 0), price, max_relative = 1e-12);
    }
}

#[test]
fn test_two_asset_daily_configuration() {
    let engine =
        PathEngine::new(ModelConfig::from_named("GeoBrownian", 100.0, &two_asset_params(0.5)).unwrap());
    let times = EvaluationTimes::daily(80);

    let output = engine
        .simulate_with_rng(&times, &mut SimRng::from_seed(42))
        .unwrap();
    assert_eq!(output.paths.shape(), (80, 2));
    assert!(output.paths.as_slice().iter().all(|p| *p > 0.0 && p.is_finite()));
}

#[test]
fn test_log_return_correlation_converges() {
    let engine =
        PathEngine::new(ModelConfig::from_named("GeoBrownian", 100.0, &two_asset_params(0.7)).unwrap());
    let times = EvaluationTimes::daily(100_000);

    let output = engine
        .simulate_with_rng(&times, &mut SimRng::from_seed(2024))
        .unwrap();
    let rho = log_return_correlation(&output.paths, 100.0, 0, 1);
    assert!((rho - 0.7).abs() < 0.01, "log-return correlation {}", rho);
}

#[test]
fn test_non_uniform_times() {
    let engine = PathEngine::new(GbmConfig::single(100.0, 0.0, 0.05).unwrap());
    let times = EvaluationTimes::new(vec![0.0, 0.5, 2.0]);

    let output = engine.simulate(&times).unwrap();
    assert_relative_eq!(output.paths.get(0, 0), 100.0, epsilon = 1e-12);
    assert_relative_eq!(output.paths.get(1, 0), 100.0 * 0.025_f64.exp(), max_relative = 1e-12);
    assert_relative_eq!(output.paths.get(2, 0), 100.0 * 0.1_f64.exp(), max_relative = 1e-12);
}

#[test]
fn test_decreasing_times_rejected() {
    let engine = PathEngine::new(GbmConfig::single(100.0, 0.2, 0.03).unwrap());
    let err = engine.simulate(vec![0.5, 0.25]).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Configuration(ConfigurationError::NonIncreasingTimes { index: 1, .. })
    ));
}

#[test]
fn test_perfectly_correlated_assets_share_paths() {
    let rho = CorrelationMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
    let engine = PathEngine::new(GbmConfig::new(100.0, vec![0.3, 0.3], 0.02, Some(rho)).unwrap());

    let output = engine.simulate(EvaluationTimes::daily(50)).unwrap();
    for row in output.paths.rows() {
        assert_relative_eq!(row[0], row[1], max_relative = 1e-14);
    }
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_batch_reports_phase_totals() {
    let engine =
        PathEngine::new(ModelConfig::from_named("GeoBrownian", 100.0, &two_asset_params(0.5)).unwrap());
    let summary = run_batch(&engine, &EvaluationTimes::daily(80), 200, 42).unwrap();

    assert_eq!(summary.trials, 200);
    assert_eq!(summary.terminal_mean.len(), 2);
    assert!(summary.terminal_mean.iter().all(|m| m.is_finite()));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_shape_is_steps_by_assets(
        n_assets in 1usize..5,
        n_steps in 1usize..40,
        rho in 0.0f64..0.9,
        seed in any::<u64>(),
    ) {
        let rows: Vec<Vec<f64>> = (0..n_assets)
            .map(|i| (0..n_assets).map(|j| if i == j { 1.0 } else { rho }).collect())
            .collect();
        let config = GbmConfig::new(
            100.0,
            vec![0.2; n_assets],
            0.03,
            Some(CorrelationMatrix::from_rows(&rows).unwrap()),
        )
        .unwrap();
        let engine = PathEngine::new(config);

        let output = engine
            .simulate_with_rng(&EvaluationTimes::daily(n_steps), &mut SimRng::from_seed(seed))
            .unwrap();
        prop_assert_eq!(output.paths.shape(), (n_steps, n_assets));
    }

    #[test]
    fn prop_zero_volatility_is_pure_drift(
        r in -0.05f64..0.1,
        steps in 1usize..30,
    ) {
        let engine = PathEngine::new(GbmConfig::single(100.0, 0.0, r).unwrap());
        let times = EvaluationTimes::daily(steps);
        let output = engine.simulate(&times).unwrap();

        let horizon = times.as_slice()[steps - 1];
        let expected = 100.0 * (r * horizon).exp();
        prop_assert!((output.paths.get(steps - 1, 0) - expected).abs() < 1e-9 * expected);
    }
}
