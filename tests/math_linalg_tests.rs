#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use gp_kernels::internals::math::linalg::FloatLinalg;

// ============================================================================
// Squared Distance Tests
// ============================================================================

#[test]
fn test_squared_distance_f64_matches_f32() {
    let a = [0.5, -1.0, 2.0, 3.5, -0.25];
    let b = [1.5, 1.0, -2.0, 0.5, 0.75];
    let a32: Vec<f32> = a.iter().map(|&v| v as f32).collect();
    let b32: Vec<f32> = b.iter().map(|&v| v as f32).collect();

    let d64 = <f64 as FloatLinalg>::squared_distance(&a, &b);
    let d32 = <f32 as FloatLinalg>::squared_distance(&a32, &b32);

    // 1 + 4 + 16 + 9 + 1
    assert_relative_eq!(d64, 31.0);
    assert_relative_eq!(d32, 31.0_f32);
}

// ============================================================================
// Cholesky Tests
// ============================================================================

#[test]
fn test_cholesky_lower() {
    // [[4, 2], [2, 3]] = L Lᵀ with L = [[2, 0], [1, √2]]
    let a = [4.0, 2.0, 2.0, 3.0];
    let l = f64::cholesky_lower(&a, 2).unwrap();

    assert_relative_eq!(l[0], 2.0);
    assert_relative_eq!(l[1], 0.0);
    assert_relative_eq!(l[2], 1.0);
    assert_relative_eq!(l[3], 2.0f64.sqrt());
}

#[test]
fn test_cholesky_rejects_indefinite() {
    let a = [1.0, 2.0, 2.0, 1.0];
    assert!(f64::cholesky_lower(&a, 2).is_none());
}

// ============================================================================
// Eigendecomposition Tests
// ============================================================================

#[test]
fn test_symmetric_eigen_sorted_ascending() {
    let a = [2.0, 1.0, 1.0, 2.0];
    let (evals, evecs) = f64::symmetric_eigen(&a, 2).unwrap();

    assert_relative_eq!(evals[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(evals[1], 3.0, epsilon = 1e-12);
    assert_eq!(evecs.len(), 4);

    // Each column satisfies A v = λ v
    for k in 0..2 {
        let v = [evecs[k], evecs[2 + k]];
        let av = [a[0] * v[0] + a[1] * v[1], a[2] * v[0] + a[3] * v[1]];
        assert_relative_eq!(av[0], evals[k] * v[0], epsilon = 1e-12);
        assert_relative_eq!(av[1], evals[k] * v[1], epsilon = 1e-12);
    }
}

#[test]
fn test_symmetric_eigen_diagonal() {
    let a = [5.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 3.0];
    let (evals, _) = f64::symmetric_eigen(&a, 3).unwrap();
    assert_relative_eq!(evals[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(evals[1], 3.0, epsilon = 1e-12);
    assert_relative_eq!(evals[2], 5.0, epsilon = 1e-12);
}

// ============================================================================
// SPD Solve Tests
// ============================================================================

#[test]
fn test_solve_spd_multiple_rhs() {
    let a = [4.0, 2.0, 2.0, 3.0];
    // Columns of B are A·[1, 1]ᵀ = [6, 5]ᵀ and A·[1, -1]ᵀ = [2, -1]ᵀ
    let b = [6.0, 2.0, 5.0, -1.0];
    let x = f64::solve_spd(&a, &b, 2, 2).unwrap();

    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[2], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[3], -1.0, epsilon = 1e-12);
}
