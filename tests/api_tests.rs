//! Tests for the public builder and estimator.
//!
//! These exercise only the public surface exported through the prelude:
//! configuration defaults, parameter and data validation, degenerate fits,
//! robustness, and the invariances the estimator guarantees.

use approx::assert_abs_diff_eq;
use lowess_nd::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Regular 2-D grid over [0, 1]² with `n` points per side.
fn grid_2d(n: usize) -> Vec<[f64; 2]> {
    let axis = linspace(0.0, 1.0, n);
    let mut points = Vec::with_capacity(n * n);
    for &a in &axis {
        for &b in &axis {
            points.push([a, b]);
        }
    }
    points
}

/// The line y = x on 21 points in [0, 1] with y[10] (at x = 0.5) replaced by 10.
fn line_with_outlier() -> (Vec<f64>, Vec<f64>) {
    let x = linspace(0.0, 1.0, 21);
    let mut y = x.clone();
    y[10] = 10.0;
    (x, y)
}

// ============================================================================
// Builder Defaults and Validation
// ============================================================================

#[test]
fn test_builder_defaults() {
    let model = Lowess::<f64>::new().build().unwrap();
    let config = model.config();

    assert_eq!(*model.kernel(), WeightFunction::Epanechnikov);
    assert_eq!(config.bandwidth, 1.0);
    assert_eq!(config.degree, PolynomialDegree::LINEAR);
    assert!(!config.robust);
    assert_eq!(config.robustness_method, RobustnessMethod::Bisquare);
    assert_eq!(config.robustness_iterations, 1);
    assert_eq!(config.robustness_scope, RobustnessScope::Local);
    assert_eq!(config.scaling_method, ScalingMethod::MAR);
    assert_eq!(config.distance_metric, DistanceMetric::Euclidean);
    assert_eq!(config.degenerate_fit_policy, DegenerateFitPolicy::ReturnNaN);
    assert_eq!(config.dimensions, None);
    assert!(!config.parallel);
}

#[test]
fn test_builder_sets_parameters() {
    let model = Lowess::<f64>::new()
        .kernel(Tricube)
        .bandwidth(0.25)
        .degree(3)
        .robust(true)
        .robustness_method(Huber)
        .robustness_iterations(4)
        .robustness_scope(RobustnessScope::Global)
        .scaling_method(MAD)
        .distance_metric(Manhattan)
        .degenerate_fit_policy(DegenerateFitPolicy::Error)
        .dimensions(2)
        .build()
        .unwrap();
    let config = model.config();

    assert_eq!(*model.kernel(), WeightFunction::Tricube);
    assert_eq!(config.bandwidth, 0.25);
    assert_eq!(config.degree.value(), 3);
    assert!(config.robust);
    assert_eq!(config.robustness_method, Huber);
    assert_eq!(config.robustness_iterations, 4);
    assert_eq!(config.robustness_scope, RobustnessScope::Global);
    assert_eq!(config.scaling_method, MAD);
    assert_eq!(config.distance_metric, Manhattan);
    assert_eq!(config.degenerate_fit_policy, DegenerateFitPolicy::Error);
    assert_eq!(config.dimensions, Some(2));
}

#[test]
fn test_builder_rejects_duplicates() {
    let err = Lowess::<f64>::new()
        .bandwidth(0.5)
        .bandwidth(0.7)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        LowessError::DuplicateParameter {
            parameter: "bandwidth"
        }
    );

    let err = Lowess::<f64>::new()
        .kernel(Tricube)
        .kernel(Epanechnikov)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        LowessError::DuplicateParameter {
            parameter: "kernel"
        }
    );

    let err = Lowess::<f64>::new().robust(true).robust(false).build();
    assert!(matches!(
        err,
        Err(LowessError::DuplicateParameter {
            parameter: "robust"
        })
    ));
}

#[test]
fn test_builder_rejects_invalid_parameters() {
    assert_eq!(
        Lowess::<f64>::new().bandwidth(0.0).build().unwrap_err(),
        LowessError::InvalidBandwidth(0.0)
    );
    assert_eq!(
        Lowess::<f64>::new().bandwidth(-2.0).build().unwrap_err(),
        LowessError::InvalidBandwidth(-2.0)
    );
    assert!(Lowess::<f64>::new().bandwidth(f64::NAN).build().is_err());
    assert_eq!(
        Lowess::<f64>::new().degree(MAX_DEGREE + 1).build().unwrap_err(),
        LowessError::InvalidDegree(MAX_DEGREE + 1)
    );
    assert_eq!(
        Lowess::<f64>::new()
            .robustness_iterations(1000)
            .build()
            .unwrap_err(),
        LowessError::InvalidIterations(1000)
    );
    assert_eq!(
        Lowess::<f64>::new()
            .distance_metric(Minkowski(0.5))
            .build()
            .unwrap_err(),
        LowessError::InvalidMinkowskiPower(0.5)
    );
    assert!(matches!(
        Lowess::<f64>::new()
            .distance_metric(Weighted(vec![1.0, f64::NAN]))
            .build(),
        Err(LowessError::InvalidMetricWeights(_))
    ));
    assert_eq!(
        Lowess::<f64>::new().dimensions(0).build().unwrap_err(),
        LowessError::InvalidDimensions(0)
    );
}

// ============================================================================
// Data Validation
// ============================================================================

#[test]
fn test_fit_rejects_mismatched_lengths() {
    let err = lowess(&[0.0, 1.0, 2.0], &[0.0, 1.0], &[0.5]).unwrap_err();
    assert_eq!(err, LowessError::MismatchedInputs { x_len: 3, y_len: 2 });
}

#[test]
fn test_fit_rejects_empty_training_set() {
    let x: Vec<f64> = Vec::new();
    let y: Vec<f64> = Vec::new();
    assert_eq!(
        lowess(&x, &y, &[0.5]).unwrap_err(),
        LowessError::EmptyInput
    );
}

#[test]
fn test_fit_rejects_non_finite_values() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 2.0];

    let err = lowess(&[0.0, f64::NAN, 2.0], &y, &[0.5]).unwrap_err();
    assert!(matches!(err, LowessError::InvalidNumericValue(_)));

    let err = lowess(&x, &[0.0, f64::INFINITY, 2.0], &[0.5]).unwrap_err();
    assert!(matches!(err, LowessError::InvalidNumericValue(_)));

    let err = lowess(&x, &y, &[f64::NEG_INFINITY]).unwrap_err();
    assert!(matches!(err, LowessError::InvalidNumericValue(_)));
}

#[test]
fn test_fit_rejects_query_dimension_mismatch() {
    let x = grid_2d(5);
    let y: Vec<f64> = x.iter().map(|p| p[0] + p[1]).collect();

    let err = lowess(&x, &y, &[0.5, 0.5]).unwrap_err();
    assert_eq!(
        err,
        LowessError::DimensionMismatch {
            expected: 2,
            got: 1
        }
    );

    let err = lowess(&x, &y, &[[0.5, 0.5, 0.5]]).unwrap_err();
    assert_eq!(
        err,
        LowessError::DimensionMismatch {
            expected: 2,
            got: 3
        }
    );
}

#[test]
fn test_fit_rejects_configured_dimension_mismatch() {
    let model = Lowess::new().dimensions(2).build().unwrap();
    let err = model.fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.0]).unwrap_err();
    assert_eq!(
        err,
        LowessError::DimensionMismatch {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_fit_rejects_ragged_rows() {
    let x = vec![vec![0.0, 1.0], vec![1.0], vec![2.0, 0.0]];
    let y = vec![0.0, 1.0, 2.0];
    let err = lowess(&x, &y, &[[0.5, 0.5]]).unwrap_err();
    assert_eq!(
        err,
        LowessError::InconsistentDimensions {
            row: 1,
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_fit_rejects_multi_column_response() {
    let x = [0.0, 1.0];
    let y = [[0.0, 1.0], [1.0, 2.0]];
    let err = lowess(&x, &y, &[0.5]).unwrap_err();
    assert_eq!(
        err,
        LowessError::DimensionMismatch {
            expected: 1,
            got: 2
        }
    );
}

#[test]
fn test_fit_rejects_too_few_points_for_degree() {
    let model = Lowess::new().degree(2).build().unwrap();
    let err = model.fit(&[0.0, 1.0], &[0.0, 1.0], &[0.5]).unwrap_err();
    assert_eq!(err, LowessError::TooFewPoints { got: 2, min: 3 });

    // A full quadratic in 2-D has six coefficients.
    let x = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.5, 0.5]];
    let y = [0.0, 1.0, 1.0, 2.0, 1.0];
    let err = model.fit(&x, &y, &[[0.5, 0.5]]).unwrap_err();
    assert_eq!(err, LowessError::TooFewPoints { got: 5, min: 6 });
}

#[test]
fn test_fit_rejects_metric_weight_length() {
    let model = Lowess::new()
        .distance_metric(Weighted(vec![1.0, 1.0, 1.0]))
        .build()
        .unwrap();
    let x = grid_2d(4);
    let y: Vec<f64> = x.iter().map(|p| p[0]).collect();
    assert!(matches!(
        model.fit(&x, &y, &[[0.5, 0.5]]),
        Err(LowessError::InvalidMetricWeights(_))
    ));
}

// ============================================================================
// Basic Estimation
// ============================================================================

#[test]
fn test_convenience_function_matches_builder() {
    let x = linspace(-2.0, 2.0, 41);
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    let q = linspace(-1.0, 1.0, 7);

    let quick = lowess(&x, &y, &q).unwrap();
    let built = Lowess::new().build().unwrap().predict(&x, &y, &q).unwrap();

    assert_eq!(quick.len(), q.len());
    for (a, b) in quick.iter().zip(&built) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-14);
    }
}

#[test]
fn test_local_linear_reproduces_linear_function_under_every_metric() {
    let x = grid_2d(11);
    let y: Vec<f64> = x.iter().map(|p| 1.0 + 2.0 * p[0] - p[1]).collect();
    let q = [[0.5, 0.5], [0.13, 0.71], [0.9, 0.05]];

    let metrics = [
        Euclidean,
        Manhattan,
        Chebyshev,
        Minkowski(3.0),
        Weighted(vec![1.0, 4.0]),
    ];
    for metric in metrics {
        let model = Lowess::new()
            .bandwidth(0.4)
            .distance_metric(metric.clone())
            .build()
            .unwrap();
        let result = model.fit(&x, &y, &q).unwrap();
        assert!(result.is_complete(), "{metric:?}");
        for (f, p) in result.iter().zip(&q) {
            assert_abs_diff_eq!(*f, 1.0 + 2.0 * p[0] - p[1], epsilon = 1e-9);
        }
    }
}

#[test]
fn test_local_quadratic_reproduces_quadratic_function() {
    let x = linspace(-1.0, 1.0, 41);
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v - 3.0 * v * v).collect();
    let q = [-0.95, -0.3, 0.0, 0.42, 1.0];

    let fitted = Lowess::new()
        .bandwidth(0.3)
        .degree(2)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();

    for (f, v) in fitted.iter().zip(&q) {
        assert_abs_diff_eq!(*f, 1.0 + 2.0 * v - 3.0 * v * v, epsilon = 1e-9);
    }
}

#[test]
fn test_degree_zero_is_kernel_weighted_mean() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 3.0, 6.0];

    // At 0.5 with bandwidth 1.5, x = 0 and x = 1 have equal weight and
    // x = 2 sits exactly on the boundary.
    let fitted = Lowess::new()
        .bandwidth(1.5)
        .degree(0)
        .build()
        .unwrap()
        .predict(&x, &y, &[0.5])
        .unwrap();
    assert_abs_diff_eq!(fitted[0], 1.5, epsilon = 1e-12);
}

#[test]
fn test_boundary_points_get_zero_weight() {
    // Neighbors at exactly one bandwidth contribute nothing, leaving only
    // the point under the query.
    let x = [0.0, 1.0, 2.0];
    let y = [5.0, 7.0, -3.0];

    let fitted = Lowess::new()
        .bandwidth(1.0)
        .degree(0)
        .build()
        .unwrap()
        .predict(&x, &y, &[1.0])
        .unwrap();
    assert_eq!(fitted, vec![7.0]);
}

#[test]
fn test_empty_query_set() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 2.0];
    let q: Vec<f64> = Vec::new();

    let result = Lowess::new().build().unwrap().fit(&x, &y, &q).unwrap();
    assert!(result.is_empty());
    assert!(result.is_complete());

    // An empty query set is accepted regardless of its nominal width.
    let q: Vec<[f64; 3]> = Vec::new();
    assert!(lowess(&x, &y, &q).unwrap().is_empty());
}

#[test]
fn test_input_shapes_agree() {
    let rows = grid_2d(6);
    let y: Vec<f64> = rows.iter().map(|p| p[0] * p[0] + p[1]).collect();
    let q = vec![[0.3, 0.3], [0.7, 0.2]];

    let nested: Vec<Vec<f64>> = rows.iter().map(|p| p.to_vec()).collect();
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let points = Points::from_flat(&flat, 2).unwrap();

    let model = Lowess::new().bandwidth(0.6).build().unwrap();
    let from_arrays = model.predict(&rows, &y, &q).unwrap();
    let from_nested = model.predict(&nested, &y, &q).unwrap();
    let from_points = model.predict(&points, &y, &q).unwrap();

    for i in 0..q.len() {
        assert_abs_diff_eq!(from_arrays[i], from_nested[i], epsilon = 1e-14);
        assert_abs_diff_eq!(from_arrays[i], from_points[i], epsilon = 1e-14);
    }
}

#[test]
fn test_estimator_is_reusable() {
    let model = Lowess::new().bandwidth(0.5).robust(true).build().unwrap();
    let x = linspace(0.0, 3.0, 31);
    let y: Vec<f64> = x.iter().map(|v| v.cos()).collect();
    let other_y: Vec<f64> = x.iter().map(|v| 10.0 * v).collect();
    let q = [0.5, 1.5, 2.5];

    let first = model.predict(&x, &y, &q).unwrap();
    let _ = model.predict(&x, &other_y, &q).unwrap();
    let second = model.predict(&x, &y, &q).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Invariances
// ============================================================================

#[test]
fn test_query_order_is_preserved() {
    let x = linspace(-3.0, 3.0, 61);
    let y: Vec<f64> = x.iter().map(|v| (2.0 * v).sin() + 0.1 * v).collect();
    let q = vec![-2.2, 0.4, 1.7, -0.9, 2.8];
    let reversed: Vec<f64> = q.iter().rev().copied().collect();

    let model = Lowess::new().bandwidth(0.7).degree(2).build().unwrap();
    let forward = model.predict(&x, &y, &q).unwrap();
    let backward = model.predict(&x, &y, &reversed).unwrap();

    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-14);
    }

    // Fitting each point on its own gives the same values.
    for (i, &v) in q.iter().enumerate() {
        let single = model.predict(&x, &y, &[v]).unwrap();
        assert_abs_diff_eq!(single[0], forward[i], epsilon = 1e-14);
    }
}

#[test]
fn test_points_outside_every_neighborhood_have_no_effect() {
    let x = linspace(0.0, 1.0, 21);
    let y: Vec<f64> = x.iter().map(|v| (3.0 * v).sin()).collect();
    let q = [0.2, 0.5, 0.8];
    let model = Lowess::new().bandwidth(0.5).build().unwrap();

    let base = model.predict(&x, &y, &q).unwrap();

    let mut x_far = x.clone();
    let mut y_far = y.clone();
    x_far.extend([5.0, 6.0]);
    y_far.extend([100.0, -100.0]);
    let with_far = model.predict(&x_far, &y_far, &q).unwrap();

    // Moving the far points (and changing their values) changes nothing.
    x_far[21] = 50.0;
    y_far[22] = 1e6;
    let moved = model.predict(&x_far, &y_far, &q).unwrap();

    for i in 0..q.len() {
        assert_abs_diff_eq!(base[i], with_far[i], epsilon = 1e-14);
        assert_abs_diff_eq!(base[i], moved[i], epsilon = 1e-14);
    }
}

// ============================================================================
// Kernels
// ============================================================================

#[test]
fn test_closure_kernel_matches_builtin() {
    let x = linspace(-2.0, 2.0, 41);
    let y: Vec<f64> = x.iter().map(|v| v.exp()).collect();
    let q = [-1.0, 0.0, 0.5];

    let builtin = lowess(&x, &y, &q).unwrap();
    let closure = Lowess::new()
        .kernel(|u: f64| 1.0 - u * u)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();

    for (a, b) in builtin.iter().zip(&closure) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_function_kernel_matches_variant() {
    let x = linspace(-2.0, 2.0, 41);
    let y: Vec<f64> = x.iter().map(|v| v * v * v).collect();
    let q = [-1.3, 0.1, 0.9];

    let variant = Lowess::new()
        .kernel(Tricube)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();
    let function = Lowess::new()
        .kernel(tricube::<f64>)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();

    for (a, b) in variant.iter().zip(&function) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-14);
    }
}

#[test]
fn test_kernels_differ() {
    let x = linspace(-2.0, 2.0, 41);
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    let q = [0.7];

    let epan = lowess(&x, &y, &q).unwrap();
    let tri = Lowess::new()
        .kernel(Tricube)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();
    assert!((epan[0] - tri[0]).abs() > 1e-6);
}

// ============================================================================
// Degenerate Fits
// ============================================================================

/// Training set with a dense cluster near zero and one isolated point at 2.
fn clustered() -> (Vec<f64>, Vec<f64>) {
    let x = vec![0.0, 0.1, 0.2, 0.3, 2.0];
    let y = x.iter().map(|v| 2.0 * v).collect();
    (x, y)
}

#[test]
fn test_degenerate_fits_return_nan_and_are_reported() {
    let (x, y) = clustered();
    let model = Lowess::new().bandwidth(0.5).build().unwrap();

    let result = model.fit(&x, &y, &[0.15, 2.0, 10.0]).unwrap();

    assert_eq!(result.len(), 3);
    assert_abs_diff_eq!(result.fitted[0], 0.3, epsilon = 1e-12);
    assert!(result.fitted[1].is_nan());
    assert!(result.fitted[2].is_nan());
    assert!(!result.is_complete());
    assert_eq!(
        result.failures,
        vec![
            (1, DegenerateFit::SingularSystem),
            (2, DegenerateFit::ZeroWeights)
        ]
    );
}

#[test]
fn test_degree_zero_survives_single_neighbor() {
    let (x, y) = clustered();
    let result = Lowess::new()
        .bandwidth(0.5)
        .degree(0)
        .build()
        .unwrap()
        .fit(&x, &y, &[2.0])
        .unwrap();

    assert!(result.is_complete());
    assert_abs_diff_eq!(result.fitted[0], 4.0, epsilon = 1e-12);
}

#[test]
fn test_error_policy_aborts_on_first_failure() {
    let (x, y) = clustered();
    let model = Lowess::new()
        .bandwidth(0.5)
        .degenerate_fit_policy(DegenerateFitPolicy::Error)
        .build()
        .unwrap();

    let err = model.fit(&x, &y, &[0.15, 2.0, 10.0]).unwrap_err();
    assert_eq!(
        err,
        LowessError::DegenerateFit {
            index: 1,
            reason: DegenerateFit::SingularSystem
        }
    );

    // Nothing fails, nothing aborts.
    assert!(model.fit(&x, &y, &[0.1, 0.2]).is_ok());
}

// ============================================================================
// Robustness
// ============================================================================

#[test]
fn test_local_bisquare_removes_isolated_outlier() {
    let (x, y) = line_with_outlier();

    let plain = Lowess::new()
        .bandwidth(0.31)
        .build()
        .unwrap()
        .predict(&x, &y, &[0.5])
        .unwrap();
    let robust = Lowess::new()
        .bandwidth(0.31)
        .robust(true)
        .build()
        .unwrap()
        .predict(&x, &y, &[0.5])
        .unwrap();

    // The outlier pulls the plain fit far off the line.
    assert!(plain[0] > 1.2);
    // One bisquare pass gives it zero weight.
    assert_abs_diff_eq!(robust[0], 0.5, epsilon = 1e-8);
}

#[test]
fn test_every_robustness_method_reduces_outlier_influence() {
    let (x, y) = line_with_outlier();
    let plain = Lowess::new()
        .bandwidth(0.31)
        .build()
        .unwrap()
        .predict(&x, &y, &[0.5])
        .unwrap()[0];

    for method in [Bisquare, Huber, Talwar] {
        for scaling in [MAR, MAD] {
            let robust = Lowess::new()
                .bandwidth(0.31)
                .robust(true)
                .robustness_method(method)
                .scaling_method(scaling)
                .build()
                .unwrap()
                .predict(&x, &y, &[0.5])
                .unwrap()[0];
            assert!(
                (robust - 0.5).abs() < (plain - 0.5).abs(),
                "{method:?}/{scaling:?}: robust {robust}, plain {plain}"
            );
        }
    }
}

#[test]
fn test_robustness_without_outliers_keeps_exact_fit() {
    let x = linspace(0.0, 1.0, 21);
    let y: Vec<f64> = x.iter().map(|v| 3.0 - v).collect();
    let q = [0.1, 0.5, 0.9];

    let fitted = Lowess::new()
        .bandwidth(0.4)
        .robust(true)
        .robustness_iterations(3)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();

    for (f, v) in fitted.iter().zip(&q) {
        assert_abs_diff_eq!(*f, 3.0 - v, epsilon = 1e-10);
    }
}

#[test]
fn test_zero_robustness_iterations_is_plain_fit() {
    let (x, y) = line_with_outlier();
    let plain = lowess(&x, &y, &[0.5]).unwrap();
    let robust = Lowess::new()
        .robust(true)
        .robustness_iterations(0)
        .build()
        .unwrap()
        .predict(&x, &y, &[0.5])
        .unwrap();
    assert_abs_diff_eq!(plain[0], robust[0], epsilon = 1e-14);
}

#[test]
fn test_global_robustness_weights() {
    let (x, y) = line_with_outlier();
    let model = Lowess::new()
        .bandwidth(0.31)
        .robust(true)
        .robustness_scope(RobustnessScope::Global)
        .build()
        .unwrap();

    let result = model.fit(&x, &y, &[0.5]).unwrap();
    let weights = result.robustness_weights.as_ref().unwrap();

    assert_eq!(weights.len(), x.len());
    assert!(weights.iter().all(|&w| (0.0..=1.0).contains(&w)));

    // The outlier gets the smallest weight; points far from it fit exactly.
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(weights[10], min);
    assert!(weights[10] < 0.5);
    assert_abs_diff_eq!(weights[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(weights[20], 1.0, epsilon = 1e-12);

    let plain = lowess(&x, &y, &[0.5]).unwrap();
    assert!((result.fitted[0] - 0.5).abs() < (plain[0] - 0.5).abs());
}

#[test]
fn test_local_robustness_reports_no_weights() {
    let (x, y) = line_with_outlier();
    let result = Lowess::new()
        .robust(true)
        .build()
        .unwrap()
        .fit(&x, &y, &[0.5])
        .unwrap();
    assert!(result.robustness_weights.is_none());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_result_metadata_and_display() {
    let (x, y) = clustered();
    let result = Lowess::new()
        .bandwidth(0.5)
        .build()
        .unwrap()
        .fit(&x, &y, &[0.15, 10.0])
        .unwrap();

    assert_eq!(result.dimensions, 1);
    assert_eq!(result.bandwidth, 0.5);
    assert_eq!(result.degree, 1);

    let text = result.to_string();
    assert!(text.contains("Summary:"));
    assert!(text.contains("Query points: 2"));
    assert!(text.contains("Fitted Values:"));
    assert!(text.contains("Failures:"));
    assert!(text.contains("no training point has positive weight"));
}

#[test]
fn test_display_elides_long_output() {
    let x = linspace(0.0, 1.0, 11);
    let y = x.clone();
    let q = linspace(0.0, 1.0, 30);
    let result = Lowess::new().build().unwrap().fit(&x, &y, &q).unwrap();

    let text = result.to_string();
    assert!(text.contains("..."));
    assert!(!text.contains("Failures:"));
}

#[test]
fn test_result_iteration() {
    let x = linspace(0.0, 1.0, 11);
    let y: Vec<f64> = x.iter().map(|v| 4.0 * v).collect();
    let result = Lowess::new().build().unwrap().fit(&x, &y, &[0.25, 0.75]).unwrap();

    let collected: Vec<f64> = (&result).into_iter().copied().collect();
    assert_eq!(collected, result.fitted);
    assert_eq!(result.into_fitted().len(), 2);
}

// ============================================================================
// Parallel Execution
// ============================================================================

#[test]
fn test_parallel_flag_matches_sequential() {
    let x = grid_2d(15);
    let y: Vec<f64> = x.iter().map(|p| (3.0 * p[0]).sin() * p[1]).collect();
    let q = grid_2d(9);

    let sequential = Lowess::new()
        .bandwidth(0.3)
        .degree(2)
        .robust(true)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();
    // Without the `parallel` feature this runs sequentially.
    let parallel = Lowess::new()
        .bandwidth(0.3)
        .degree(2)
        .robust(true)
        .parallel(true)
        .build()
        .unwrap()
        .predict(&x, &y, &q)
        .unwrap();

    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-14);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_reports_failures_in_order() {
    let (x, y) = clustered();
    let q = [10.0, 0.15, 2.0, 0.2, -5.0];
    let result = Lowess::new()
        .bandwidth(0.5)
        .parallel(true)
        .build()
        .unwrap()
        .fit(&x, &y, &q)
        .unwrap();

    let indices: Vec<usize> = result.failures.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 2, 4]);
    assert_abs_diff_eq!(result.fitted[1], 0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(result.fitted[3], 0.4, epsilon = 1e-12);
}
