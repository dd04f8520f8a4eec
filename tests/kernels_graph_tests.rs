use approx::assert_relative_eq;
use gp_kernels::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N_VERTICES: usize = 20;
const N_EDGES: usize = 40;

fn key() -> PrngKey {
    PrngKey::new(123)
}

/// Laplacian `D - A` of a random graph with `n` vertices and `m` distinct edges.
fn gnm_random_laplacian(n: usize, m: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lap = Matrix::zeros(n, n);
    let mut edges = 0;
    while edges < m {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        if i == j || lap[(i, j)] != 0.0 {
            continue;
        }
        lap[(i, j)] = -1.0;
        lap[(j, i)] = -1.0;
        lap[(i, i)] += 1.0;
        lap[(j, j)] += 1.0;
        edges += 1;
    }
    lap
}

fn graph_kernel() -> GraphKernel<f64> {
    let mut lap = gnm_random_laplacian(N_VERTICES, N_EDGES, 123);
    lap.add_to_diagonal(&[1e-12; N_VERTICES]);
    GraphKernel::new(lap).unwrap()
}

fn vertices(n: usize) -> Matrix<f64> {
    Matrix::column(&(0..n).map(|i| i as f64).collect::<Vec<_>>())
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_graph_kernel() {
    let kernel = graph_kernel();
    assert_eq!(kernel.num_vertex(), N_VERTICES);
    assert_eq!(kernel.evals().shape(), (N_VERTICES, 1));
    assert_eq!(kernel.evecs().shape(), (N_VERTICES, N_VERTICES));
    assert!(kernel.spectral());
    assert!(!kernel.stationary());
    assert_eq!(kernel.name(), "Graph kernel");

    let params = kernel.init_params(key());
    let keys: Vec<&str> = params.leaf().unwrap().keys().collect();
    assert_eq!(keys, vec!["lengthscale", "smoothness", "variance"]);

    let x = vertices(N_VERTICES);
    let kxx = kernel.gram(&x, &params).unwrap();
    assert_eq!(kxx.shape(), (N_VERTICES, N_VERTICES));

    let evals = (kxx + identity(N_VERTICES) * 1e-8).eigenvalues().unwrap();
    assert!(evals.iter().all(|&v| v > 0.0));
}

#[test]
fn test_graph_kernel_default_jitter() {
    let kernel = graph_kernel();
    let params = kernel.init_params(key());
    let kxx = kernel.gram(&vertices(N_VERTICES), &params).unwrap();

    let evals = (kxx + identity(N_VERTICES) * DEFAULT_JITTER).eigenvalues().unwrap();
    assert!(evals.iter().all(|&v| v > 0.0));
}

#[test]
fn test_laplacian_eigenvalues_ascending() {
    let kernel = graph_kernel();
    let evals = kernel.evals().as_slice();
    assert!(evals.windows(2).all(|w| w[0] <= w[1]));
    // Laplacians are positive semi-definite
    assert!(evals[0] > -1e-9);
}

#[test]
fn test_non_square_laplacian() {
    let lap = Matrix::<f64>::zeros(3, 4);
    assert_eq!(
        GraphKernel::new(lap).unwrap_err(),
        KernelError::NonSquareMatrix { rows: 3, cols: 4 }
    );
}

// ============================================================================
// Covariance Tests
// ============================================================================

#[test]
fn test_prior_variance_averages_to_variance() {
    let kernel = graph_kernel().variance(2.0);
    let params = kernel.init_params(key());
    let kxx = kernel.gram(&vertices(N_VERTICES), &params).unwrap();

    // Normalized spectral density sums to V, so the mean prior variance is σ²
    assert_relative_eq!(kxx.trace() / N_VERTICES as f64, 2.0, epsilon = 1e-10);
}

#[test]
fn test_spectral_density_normalized() {
    let kernel = graph_kernel();
    let params = kernel.init_params(key());
    let density = kernel.spectral_density(&params).unwrap();
    assert_eq!(density.len(), N_VERTICES);
    assert_relative_eq!(density.iter().sum::<f64>(), N_VERTICES as f64, epsilon = 1e-10);
}

#[test]
fn test_cross_covariance_matches_gram() {
    let kernel = graph_kernel();
    let params = kernel.init_params(key());
    let x = vertices(N_VERTICES);
    let a = Matrix::column(&[3.0, 7.0]);
    let b = Matrix::column(&[0.0, 7.0, 19.0]);

    let kxx = kernel.gram(&x, &params).unwrap().to_dense();
    let kab = kernel.cross_covariance(&a, &b, &params).unwrap();
    assert_eq!(kab.shape(), (2, 3));
    assert_relative_eq!(kab[(0, 0)], kxx[(3, 0)], epsilon = 1e-14);
    assert_relative_eq!(kab[(1, 1)], kxx[(7, 7)], epsilon = 1e-14);
    assert_relative_eq!(kab[(1, 2)], kxx[(7, 19)], epsilon = 1e-14);

    let k37 = kernel.evaluate(&[3.0], &[7.0], &params).unwrap();
    assert_relative_eq!(k37, kxx[(3, 7)], epsilon = 1e-14);
}

#[test]
fn test_vertex_column_from_active_dims() {
    let kernel = graph_kernel().active_dims([1]);
    let params = kernel.init_params(key());
    let x = Matrix::from_rows(&[[0.5, 2.0], [-3.0, 5.0]]).unwrap();
    let kxx = kernel.gram(&x, &params).unwrap();
    assert_eq!(kxx.shape(), (2, 2));
}

#[test]
fn test_invalid_vertex() {
    let kernel = graph_kernel();
    let params = kernel.init_params(key());

    for bad in [-1.0, 2.5, N_VERTICES as f64] {
        let x = Matrix::column(&[0.0, bad]);
        assert_eq!(
            kernel.gram(&x, &params).unwrap_err(),
            KernelError::InvalidVertex {
                value: bad,
                num_vertex: N_VERTICES
            }
        );
    }
}

#[test]
fn test_non_symmetric_laplacian() {
    let lap = Matrix::from_rows(&[[1.0, -5.0], [-1.0, 1.0]]).unwrap();
    assert_eq!(
        GraphKernel::new(lap).unwrap_err(),
        KernelError::NonSymmetricMatrix
    );
}

#[test]
fn test_non_positive_parameters_rejected() {
    let kernel = graph_kernel();
    let x = vertices(4);

    for name in ["lengthscale", "smoothness", "variance"] {
        for bad in [0.0, -1.0] {
            let mut set = kernel.init_params(key()).leaf().unwrap().clone();
            set.insert(name, vec![bad]);
            let params: KernelParams<f64> = set.into();
            let expected = KernelError::NonPositiveParameter {
                name: name.to_string(),
                value: bad,
            };

            assert_eq!(kernel.gram(&x, &params).unwrap_err(), expected);
            assert_eq!(kernel.cross_covariance(&x, &x, &params).unwrap_err(), expected);
            assert_eq!(kernel.evaluate(&[0.0], &[1.0], &params).unwrap_err(), expected);
        }
    }
}

#[test]
fn test_multiple_vertex_columns_rejected() {
    let kernel = graph_kernel().active_dims([0, 1]);
    let params = kernel.init_params(key());
    let x = Matrix::from_rows(&[[0.0, 1.0], [2.0, 3.0]]).unwrap();
    assert_eq!(
        kernel.gram(&x, &params).unwrap_err(),
        KernelError::DimensionMismatch { left: 1, right: 2 }
    );
}
