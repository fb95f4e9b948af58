//! Verbose solves under an installed logger
//!
//! Run with `RUST_LOG=info cargo test --test verbose_logging -- --nocapture`
//! to see per-iteration progress.

use math_linear_solvers::{IterativeSolver, LinearSolverType, Options, Solver, SparseMatrix, Vector};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_verbose_iterative_solves() {
    init_logger();

    let a = SparseMatrix::from_triplets(
        3,
        3,
        vec![
            (0, 0, 4.0),
            (0, 1, -1.0),
            (1, 0, -1.0),
            (1, 1, 4.0),
            (1, 2, -1.0),
            (2, 1, -1.0),
            (2, 2, 4.0),
        ],
    )
    .unwrap();
    let b = Vector::from([1.0, 2.0, 3.0]);
    let options = Options {
        verbose: true,
        ..Options::default()
    };

    for kind in LinearSolverType::ALL.into_iter().filter(|k| !k.is_direct()) {
        let solver = Solver::new(kind, &a, &options).unwrap();
        let mut x = Vector::zeros(3);
        let summary = solver.as_iterative().unwrap().iterate(&mut x, &b).unwrap();
        log::info!("{kind}: {} iterations, x = {x}", summary.iterations);
        assert!(summary.residual < options.tolerance);
    }
}

#[test]
fn test_verbose_failure_still_returns_error() {
    init_logger();

    let a = SparseMatrix::identity(2);
    let options = Options {
        verbose: true,
        tolerance: 0.0,
        max_iterations: 3,
        ..Options::default()
    };
    let solver = Solver::new(LinearSolverType::Jacobi, &a, &options).unwrap();
    let err = solver
        .as_iterative()
        .unwrap()
        .iterate(&mut Vector::zeros(2), &Vector::from([1.0, 1.0]))
        .unwrap_err();
    assert!(err.is_convergence_error());
}
