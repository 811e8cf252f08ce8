//! Structural well-formedness checks to run over a [`Model`] before
//! handing it to a solver.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Domain, Model, Variable};

/// Characters reserved by the MPS format and the solver command line;
/// variable names must not contain them.
const RESERVED: [char; 7] = ['-', '+', '[', ']', ' ', '>', '/'];

/// A structural problem found in a [`Model`].
///
/// Each variant carries the offending entity. Validation is advisory:
/// nothing in this crate refuses to serialize or solve a model with
/// outstanding errors, but solver output for such a model is unreliable.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// A variable has an empty name.
    #[error("variable has an empty name")]
    EmptyVariableName(Variable),
    /// A variable name contains one of the reserved characters.
    #[error("variable name `{}` contains a reserved character", .0.name())]
    InvalidVariableName(Variable),
    /// `minimum > maximum`, or an explicit bound on a binary variable
    /// that differs from the binary bound.
    #[error("variable `{}` has invalid bounds", .0.name())]
    InvalidVariableBounds(Variable),
    /// The model name is empty or contains a space.
    #[error("`{0}` is not a valid model name")]
    InvalidModelName(String),
    /// Two distinct variables share a non-empty name; carries the later
    /// one.
    #[error("a distinct variable named `{}` already exists", .0.name())]
    DuplicateVariableName(Variable),
    /// Two constraints share a non-empty label; carries the repeated
    /// label.
    #[error("a constraint labeled `{0}` already exists")]
    DuplicateConstraintName(String),
}

/// Collect every structural error in `model`.
///
/// Errors are independent and all of them are reported, not just the
/// first. An empty result means the model is well-formed.
pub fn validation_errors(model: &Model) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if model.name.is_empty() || model.name.contains(' ') {
        errors.push(ValidationError::InvalidModelName(model.name.clone()));
    }
    let mut names: HashSet<String> = HashSet::new();
    for variable in model.variables() {
        let name = variable.name();
        if name.is_empty() {
            errors.push(ValidationError::EmptyVariableName(variable.clone()));
        } else if name.contains(&RESERVED[..]) {
            errors.push(ValidationError::InvalidVariableName(variable.clone()));
        }
        if !has_valid_bounds(&variable) {
            errors.push(ValidationError::InvalidVariableBounds(variable.clone()));
        }
        if !name.is_empty() && !names.insert(name.to_string()) {
            errors.push(ValidationError::DuplicateVariableName(variable.clone()));
        }
    }
    let mut labels: HashSet<&str> = HashSet::new();
    for (_, label) in &model.constraints {
        if !label.is_empty() && !labels.insert(label.as_str()) {
            errors.push(ValidationError::DuplicateConstraintName(label.clone()));
        }
    }
    errors
}

fn has_valid_bounds(variable: &Variable) -> bool {
    if variable.domain() == Domain::Binary {
        // explicit bounds on a binary variable must restate (0, 1)
        variable.minimum().map_or(true, |minimum| minimum == 0.0)
            && variable.maximum().map_or(true, |maximum| maximum == 1.0)
    } else {
        match (variable.minimum(), variable.maximum()) {
            (Some(minimum), Some(maximum)) => minimum <= maximum,
            _ => true,
        }
    }
}
