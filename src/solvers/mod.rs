//! Solver interfaces and the result types they return.
//!
//! The one solver shipped here, [`CbcSolver`], drives the external `cbc`
//! executable over an MPS file. The [`Solver`] trait is the seam for other
//! backends with the same shape, such as an in-process binding that
//! marshals the model into a solver library's own objects.

use std::collections::HashMap;

use crate::model::Model;

pub use self::cbc::CbcSolver;

pub mod cbc;

/// Termination status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A proven optimal assignment was found
    Optimal,
    /// No feasible assignment exists
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
    /// The solver stopped before reaching an answer
    Unsolved,
    /// The solver reported something this crate does not recognize
    Undefined,
}

/// A solver's answer: the termination status and the assignment it found.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Termination status
    pub status: Status,
    /// Values by original variable name. Only variables actually present
    /// in the solver's output appear here.
    pub variables: HashMap<String, f64>,
}

impl Solution {
    /// Bundle a status with an assignment.
    pub fn new(status: Status, variables: HashMap<String, f64>) -> Solution {
        Solution { status, variables }
    }
}

/// Anything that can compute an assignment for a [`Model`].
pub trait Solver {
    /// Solve `model`.
    ///
    /// Every failure is terminal for the call: it is logged and collapses
    /// to `None`. There is no retry policy; callers re-invoke if they want
    /// another attempt.
    fn solve(&self, model: &Model) -> Option<Solution>;
}
