#![deny(missing_docs)]
//! A library to model linear programs, write them in the MPS file format
//! and solve them with the external [CBC](https://github.com/coin-or/Cbc)
//! binary.
//!
//! Build a model with the operators of [`model`], optionally check it with
//! [`validation`], then hand it to a [`solvers::Solver`]:
//!
//! ```
//! use lp_cbc::model::{Model, Objective, Variable};
//!
//! let x = Variable::integer("x", Some(0.0), None);
//! let y = Variable::real("y", Some(0.0), None);
//! let model = Model::new("production")
//!     .with_objective(Objective::maximize(&x + 2.0 * &y))
//!     .with_constraint((2.0 * &x + &y).leq(20.0), "capacity")
//!     .with_constraint((4.0 * &x - 5.0 * &y).geq(-10.0), "balance");
//!
//! assert!(lp_cbc::validation::validation_errors(&model).is_empty());
//!
//! let mut mps = Vec::new();
//! lp_cbc::mps_format::write(&model, &mut mps).unwrap();
//! assert!(String::from_utf8(mps).unwrap().starts_with("*SENSE:Maximize"));
//! ```
//!
//! Solving requires the `cbc` executable on the search path:
//!
//! ```no_run
//! # use lp_cbc::model::Model;
//! use lp_cbc::solvers::{CbcSolver, Solver};
//! # let model = Model::new("production");
//! if let Some(solution) = CbcSolver::new().solve(&model) {
//!     println!("{:?}: {:?}", solution.status, solution.variables);
//! }
//! ```

pub mod model;
pub mod mps_format;
pub mod solvers;
pub mod validation;
