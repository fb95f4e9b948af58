//! CG (Conjugate Gradient) solver
//!
//! The Conjugate Gradient method for symmetric positive definite systems.
//! In exact arithmetic it terminates in at most `n` iterations. Convergence
//! is measured by the relative residual `‖r‖₂ / ‖b‖₂`.

use super::IterativeBase;
use crate::dense::Vector;
use crate::error::Result;
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearOperator, LinearSolver};

/// Conjugate Gradient solver over a borrowed sparse matrix
///
/// Only correct for symmetric positive definite matrices; symmetry is not
/// checked. The contents of `x` passed to [`solve_into`](LinearSolver::solve_into)
/// are used as the initial guess.
#[derive(Debug, Clone)]
pub struct Cg<'a> {
    base: IterativeBase<'a>,
}

impl<'a> Cg<'a> {
    /// Create a solver for `matrix` using the tolerance and iteration limit in `options`
    pub fn new(matrix: &'a SparseMatrix, options: &Options) -> Self {
        Self {
            base: IterativeBase::new(matrix, options, "CG"),
        }
    }
}

impl LinearSolver for Cg<'_> {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn dimension(&self) -> usize {
        self.base.dimension()
    }

    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()> {
        self.iterate(x, b).map(|_| ())
    }
}

impl IterativeSolver for Cg<'_> {
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        self.base.check(x, b)?;
        let a = self.base.matrix();
        let tolerance = self.base.tolerance();

        let b_norm = b.l2_norm();
        if b_norm == 0.0 {
            x.fill(0.0);
            return Ok(self.base.converged(0, 0.0));
        }

        let mut r = a.residual(x, b)?;
        let mut rel_residual = r.l2_norm() / b_norm;
        if rel_residual < tolerance {
            return Ok(self.base.converged(0, rel_residual));
        }

        let mut p = r.clone();
        let mut rho = r.dot(&r)?;

        for iteration in 1..=self.base.max_iterations() {
            // q = A * p
            let q = a.matvec(&p)?;

            // alpha = rho / (p, q); zero curvature stalls the method for good,
            // so the whole iteration budget is reported as spent
            let pq = p.dot(&q)?;
            if pq == 0.0 || !pq.is_finite() {
                log::debug!("CG breakdown at iteration {iteration}: p·Ap = {pq:.6e}");
                return Err(self
                    .base
                    .convergence_error(self.base.max_iterations(), rel_residual));
            }
            let alpha = rho / pq;

            x.axpy(alpha, &p)?;
            r.axpy(-alpha, &q)?;

            rel_residual = r.l2_norm() / b_norm;
            self.base.report(iteration, rel_residual);
            if rel_residual < tolerance {
                return Ok(self.base.converged(iteration, rel_residual));
            }

            let rho_new = r.dot(&r)?;
            let beta = rho_new / rho;
            rho = rho_new;

            // p = r + beta * p
            p.scale_in_place(beta);
            p.try_add_assign(&r)?;
        }

        Err(self
            .base
            .convergence_error(self.base.max_iterations(), rel_residual))
    }
}
