//! Iterative solver options

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options shared by every iterative solver.
///
/// Each solver copies what it needs at construction, so changing an
/// `Options` value afterwards has no effect on existing solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Log per-iteration progress at info level
    pub verbose: bool,
    /// Convergence tolerance on the solver's metric
    pub tolerance: f64,
    /// Maximum number of iterations before giving up
    pub max_iterations: usize,
    /// Relaxation factor for SOR and SSOR
    pub omega: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            tolerance: 1.0e-8,
            max_iterations: 1000,
            omega: 1.5,
        }
    }
}
