//! Integration tests for the linear solvers
//!
//! Every solver is run on the same small SPD system and on a 1-D
//! finite-volume diffusion problem, and dense and sparse variants are
//! checked against each other.

use approx::assert_relative_eq;
use math_linear_solvers::{
    Cholesky, IterativeSolver, LinearOperator, LinearSolver, LinearSolverType, Lu, Matrix,
    Options, Solver, SolverError, SparseCholesky, SparseLu, SparseMatrix, Vector,
};

/// `[[4, 1], [1, 3]]` in sparse storage
fn small_system() -> (SparseMatrix, Vector) {
    let a = SparseMatrix::from_triplets(2, 2, vec![(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0)])
        .expect("valid triplets");
    (a, Vector::from([1.0, 2.0]))
}

/// Cell-centred diffusion on `[0, 1]` with `n` cells, unit diffusivity,
/// Dirichlet values `left` and `right`, and a uniform source.
fn diffusion_system(n: usize, left: f64, right: f64, source: f64) -> (SparseMatrix, Vector) {
    let h = 1.0 / n as f64;
    let coupling = 1.0 / (h * h);
    let mut a = SparseMatrix::with_row_capacity(n, n, 3);
    let mut b = Vector::filled(n, source);

    for i in 0..n {
        if i > 0 {
            a.add(i, i - 1, -coupling);
            a.add(i, i, coupling);
        } else {
            // Half-cell distance to the boundary face
            a.add(i, i, 2.0 * coupling);
            b[i] += 2.0 * coupling * left;
        }
        if i + 1 < n {
            a.add(i, i + 1, -coupling);
            a.add(i, i, coupling);
        } else {
            a.add(i, i, 2.0 * coupling);
            b[i] += 2.0 * coupling * right;
        }
    }
    (a, b)
}

fn options() -> Options {
    Options {
        tolerance: 1e-10,
        max_iterations: 100_000,
        omega: 1.2,
        ..Options::default()
    }
}

#[test]
fn test_all_solvers_small_system() {
    let (a, b) = small_system();

    for kind in LinearSolverType::ALL {
        let solver = Solver::new(kind, &a, &options()).expect("solver should build");
        let x = solver.solve(&b).expect("solve should succeed");

        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-8);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-8);
        assert!(
            a.residual(&x, &b).unwrap().linf_norm() < 1e-8,
            "{} residual too large",
            solver.name()
        );
    }
}

#[test]
fn test_all_solvers_diffusion() {
    // Linear profile between the boundary values without a source
    let n = 16;
    let (a, b) = diffusion_system(n, 1.0, 3.0, 0.0);

    for kind in LinearSolverType::ALL {
        let solver = Solver::new(kind, &a, &options()).unwrap();
        let x = solver.solve(&b).unwrap();

        for i in 0..n {
            let centre = (i as f64 + 0.5) / n as f64;
            assert_relative_eq!(x[i], 1.0 + 2.0 * centre, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_diffusion_with_source() {
    // -u'' = 1 with zero boundaries gives u = x (1 - x) / 2, exact at cell centres
    // up to the boundary treatment
    let n = 50;
    let (a, b) = diffusion_system(n, 0.0, 0.0, 1.0);
    let x = SparseLu::new(a.clone()).unwrap().solve(&b).unwrap();

    assert!(a.residual(&x, &b).unwrap().linf_norm() < 1e-9);
    let middle = (x[n / 2 - 1] + x[n / 2]) / 2.0;
    assert_relative_eq!(middle, 0.125, epsilon = 1e-3);
}

#[test]
fn test_dense_and_sparse_agree() {
    let (a, b) = diffusion_system(12, 2.0, -1.0, 5.0);
    let dense: Matrix = a.to_dense();
    let round_trip = SparseMatrix::from_dense(&dense, 0.0);
    assert_eq!(round_trip.nnz(), a.nnz());

    let lu = Lu::new(dense.clone()).unwrap().solve(&b).unwrap();
    let sparse_lu = SparseLu::new(a.clone()).unwrap().solve(&b).unwrap();
    let chol = Cholesky::new(dense).unwrap().solve(&b).unwrap();
    let sparse_chol = SparseCholesky::new(a).unwrap().solve(&b).unwrap();

    for i in 0..b.len() {
        assert_relative_eq!(lu[i], sparse_lu[i], epsilon = 1e-10);
        assert_relative_eq!(lu[i], chol[i], epsilon = 1e-10);
        assert_relative_eq!(lu[i], sparse_chol[i], epsilon = 1e-10);
    }
}

#[test]
fn test_spd_solvers_match_lu() {
    let dense = Matrix::from_rows(vec![
        vec![6.0, 2.0, 1.0, 0.0],
        vec![2.0, 5.0, 2.0, 1.0],
        vec![1.0, 2.0, 7.0, 3.0],
        vec![0.0, 1.0, 3.0, 8.0],
    ])
    .unwrap();
    let sparse = SparseMatrix::from_dense(&dense, 0.0);
    let b = Vector::from([1.0, -2.0, 3.0, 0.5]);

    let reference = Lu::new(dense.clone()).unwrap().solve(&b).unwrap();
    let chol = Cholesky::new(dense).unwrap().solve(&b).unwrap();
    let cg = Solver::new(LinearSolverType::Cg, &sparse, &options())
        .unwrap()
        .solve(&b)
        .unwrap();

    for i in 0..4 {
        assert_relative_eq!(chol[i], reference[i], epsilon = 1e-10);
        assert_relative_eq!(cg[i], reference[i], epsilon = 1e-8);
    }
}

#[test]
fn test_direct_solve_is_idempotent() {
    let (a, b) = diffusion_system(20, 0.0, 1.0, 2.0);

    for kind in LinearSolverType::ALL.into_iter().filter(|k| k.is_direct()) {
        let solver = Solver::new(kind, &a, &options()).unwrap();
        let first = solver.solve(&b).unwrap();
        let second = solver.solve(&b).unwrap();
        assert_eq!(first, second, "{kind} is not idempotent");
    }
}

#[test]
fn test_stationary_metric_decreases() {
    // Stop after k iterations with an unreachable tolerance and read the metric
    // carried by the failure
    let (a, b) = diffusion_system(16, 0.0, 0.0, 1.0);

    for kind in [
        LinearSolverType::Jacobi,
        LinearSolverType::GaussSeidel,
        LinearSolverType::Sor,
        LinearSolverType::Ssor,
    ] {
        let mut previous = f64::INFINITY;
        for k in 1..=10 {
            let opts = Options {
                tolerance: 0.0,
                max_iterations: k,
                omega: 1.2,
                ..Options::default()
            };
            let solver = Solver::new(kind, &a, &opts).unwrap();
            let err = solver.solve(&b).unwrap_err();
            let SolverError::ConvergenceFailure {
                iterations,
                residual,
                ..
            } = err
            else {
                panic!("{kind}: expected a convergence failure, got {err}");
            };
            assert_eq!(iterations, k);
            assert!(residual < previous, "{kind}: metric grew at iteration {k}");
            previous = residual;
        }
    }
}

#[test]
fn test_iterative_solvers_accept_initial_guess() {
    let (a, b) = diffusion_system(16, 1.0, 3.0, 0.0);
    let exact = Lu::new(a.to_dense()).unwrap().solve(&b).unwrap();

    let solver = Solver::new(LinearSolverType::GaussSeidel, &a, &options()).unwrap();
    let iterative = solver.as_iterative().unwrap();

    let mut cold = Vector::zeros(16);
    let cold_summary = iterative.iterate(&mut cold, &b).unwrap();

    let mut warm = exact.clone();
    warm[0] += 1e-3;
    let warm_summary = iterative.iterate(&mut warm, &b).unwrap();

    assert!(warm_summary.iterations < cold_summary.iterations);
}

#[test]
fn test_vector_error_cases() {
    let err = Vector::from([1.0, 2.0])
        .try_add(&Vector::from([1.0, 2.0, 3.0]))
        .unwrap_err();
    assert!(err.is_dimension_error());

    let err = Vector::from([1.0, 0.0, 2.0])
        .try_div(&Vector::from([1.0, 0.0, 1.0]))
        .unwrap_err();
    assert!(err.is_zero_division());
}

#[test]
fn test_singular_factorizations() {
    let singular = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    let sparse = SparseMatrix::from_dense(&singular, 0.0);

    assert_eq!(
        Lu::new(singular).unwrap_err(),
        SolverError::SingularMatrix { column: 1 }
    );
    assert_eq!(
        SparseLu::new(sparse).unwrap_err(),
        SolverError::SingularMatrix { column: 1 }
    );
}

#[test]
fn test_cg_on_indefinite_matrix_exhausts_iterations() {
    let a = SparseMatrix::from_triplets(2, 2, vec![(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0), (1, 1, 1.0)])
        .unwrap();
    let opts = Options {
        max_iterations: 1,
        ..Options::default()
    };
    let err = Solver::new(LinearSolverType::Cg, &a, &opts)
        .unwrap()
        .solve(&Vector::from([1.0, 0.0]))
        .unwrap_err();

    assert!(err.is_convergence_error());
    assert!(matches!(err, SolverError::ConvergenceFailure { iterations: 1, .. }));
}

#[test]
fn test_cg_breakdown_reports_max_iterations() {
    // Zero diagonal makes p·Ap vanish on the first step
    let a = SparseMatrix::from_triplets(2, 2, vec![(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
    let opts = Options {
        max_iterations: 50,
        ..Options::default()
    };
    let err = Solver::new(LinearSolverType::Cg, &a, &opts)
        .unwrap()
        .solve(&Vector::from([1.0, 0.0]))
        .unwrap_err();

    assert!(err.is_convergence_error());
    assert!(matches!(
        err,
        SolverError::ConvergenceFailure { iterations: 50, .. }
    ));
}

#[test]
fn test_solve_checks_dimensions() {
    let (a, _) = small_system();
    let b = Vector::zeros(3);

    for kind in LinearSolverType::ALL {
        let solver = Solver::new(kind, &a, &options()).unwrap();
        let err = solver.solve(&b).unwrap_err();
        assert!(err.is_dimension_error(), "{kind} accepted a bad right-hand side");

        let mut x = Vector::zeros(5);
        let err = solver.solve_into(&mut x, &Vector::zeros(2)).unwrap_err();
        assert!(err.is_dimension_error());
    }
}

#[test]
fn test_sparse_set_and_add() {
    let mut a = SparseMatrix::new(3, 3);
    a.set(1, 2, 4.0);
    assert_eq!(a.locate(1, 2), Some(&4.0));

    a.add(0, 1, 2.5);
    assert_eq!(a.locate(0, 1), Some(&2.5));

    a.add(1, 2, 1.0);
    assert_eq!(a.get(1, 2), 5.0);
    assert_eq!(a.get(2, 2), 0.0);
    assert_eq!(a.nnz(), 2);
}
