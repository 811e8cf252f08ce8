//! Types to build linear-programming models: variables, linear functions,
//! constraints, objectives and the [`Model`] consumed by the MPS writer and
//! the solvers.
//!
//! Arithmetic composition is cheap on purpose: `+`, `-` and scalar `*`
//! concatenate term lists without merging duplicate occurrences of a
//! variable. Call [`LinearFunction::normalize`] when a canonical form is
//! needed.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// The set of values a [`Variable`] ranges over.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Domain {
    /// Continuous real values
    Real,
    /// Whole numbers
    Integer,
    /// 0 or 1
    Binary,
}

#[derive(Debug)]
struct VariableData {
    name: String,
    domain: Domain,
    minimum: Option<f64>,
    maximum: Option<f64>,
}

/// A decision variable.
///
/// `Variable` is a cheap handle: cloning it yields a second reference to the
/// *same* variable. Equality and hashing go by identity, never by field
/// values, so two separately created variables that happen to share a name
/// stay distinct. The name clash itself is reported by
/// [`crate::validation::validation_errors`], not by this type.
#[derive(Clone, Debug)]
pub struct Variable(Arc<VariableData>);

impl Variable {
    /// A variable with an explicit domain and bounds. `None` leaves the
    /// corresponding side unbounded.
    pub fn new(
        name: impl Into<String>,
        domain: Domain,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Variable {
        Variable(Arc::new(VariableData {
            name: name.into(),
            domain,
            minimum,
            maximum,
        }))
    }

    /// A real-valued variable.
    pub fn real(name: impl Into<String>, minimum: Option<f64>, maximum: Option<f64>) -> Variable {
        Variable::new(name, Domain::Real, minimum, maximum)
    }

    /// An integer-valued variable.
    pub fn integer(
        name: impl Into<String>,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Variable {
        Variable::new(name, Domain::Integer, minimum, maximum)
    }

    /// A 0/1 variable. The `(0, 1)` bounds are implied.
    pub fn binary(name: impl Into<String>) -> Variable {
        Variable::new(name, Domain::Binary, None, None)
    }

    /// The user-supplied name. Solvers report assignments under this name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The domain declared at construction.
    pub fn domain(&self) -> Domain {
        self.0.domain
    }

    /// The lower bound as declared, without the binary default applied.
    pub fn minimum(&self) -> Option<f64> {
        self.0.minimum
    }

    /// The upper bound as declared, without the binary default applied.
    pub fn maximum(&self) -> Option<f64> {
        self.0.maximum
    }

    /// Declared bounds with the binary `(0, 1)` default filled in.
    pub fn effective_bounds(&self) -> (Option<f64>, Option<f64>) {
        if self.0.domain == Domain::Binary {
            (
                Some(self.0.minimum.unwrap_or(0.0)),
                Some(self.0.maximum.unwrap_or(1.0)),
            )
        } else {
            (self.0.minimum, self.0.maximum)
        }
    }

    /// Whether the solver treats this variable as binary: any non-real
    /// domain whose effective bounds are exactly `(0, 1)`. A declared
    /// `Integer` with bounds `(0, 1)` qualifies.
    pub fn is_binary(&self) -> bool {
        self.0.domain != Domain::Real
            && self.effective_bounds() == (Some(0.0), Some(1.0))
    }

    /// `self <= constant`
    pub fn leq(&self, constant: f64) -> LinearConstraint {
        LinearFunction::from(self).leq(constant)
    }

    /// `self >= constant`
    pub fn geq(&self, constant: f64) -> LinearConstraint {
        LinearFunction::from(self).geq(constant)
    }

    /// `self == constant`
    pub fn equals(&self, constant: f64) -> LinearConstraint {
        LinearFunction::from(self).equals(constant)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `factor * variable` product inside a [`LinearFunction`].
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    /// The variable, held by handle
    pub variable: Variable,
    /// Its coefficient
    pub factor: f64,
}

impl Term {
    /// A term with an explicit factor.
    pub fn new(variable: Variable, factor: f64) -> Term {
        Term { variable, factor }
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Term {
        Term::new(variable, 1.0)
    }
}

impl From<&Variable> for Term {
    fn from(variable: &Variable) -> Term {
        Term::new(variable.clone(), 1.0)
    }
}

/// A linear combination of variables plus a constant.
///
/// The term list keeps first-occurrence order and may contain the same
/// variable several times until [`LinearFunction::normalize`] merges it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearFunction {
    /// Terms in first-occurrence order, duplicates permitted
    pub terms: Vec<Term>,
    /// The constant offset
    pub constant: f64,
}

impl LinearFunction {
    /// A function with no terms, only a constant.
    pub fn constant(constant: f64) -> LinearFunction {
        LinearFunction {
            terms: Vec::new(),
            constant,
        }
    }

    /// Merge duplicate variables and drop cancelled terms.
    ///
    /// Terms are grouped by variable *identity* (two distinct variables
    /// sharing a name are never merged), groups keep the order of their
    /// first occurrence, and a group whose factors sum to exactly zero is
    /// dropped rather than kept with factor 0. The constant is unchanged.
    /// A function already in canonical form is returned as-is in O(n).
    pub fn normalize(self) -> LinearFunction {
        let mut seen = HashSet::with_capacity(self.terms.len());
        let canonical = self
            .terms
            .iter()
            .all(|term| term.factor != 0.0 && seen.insert(term.variable.clone()));
        if canonical {
            return self;
        }
        let mut position: HashMap<Variable, usize> = HashMap::with_capacity(self.terms.len());
        let mut merged: Vec<Term> = Vec::with_capacity(self.terms.len());
        for term in self.terms {
            match position.get(&term.variable) {
                Some(&at) => merged[at].factor += term.factor,
                None => {
                    position.insert(term.variable.clone(), merged.len());
                    merged.push(term);
                }
            }
        }
        merged.retain(|term| term.factor != 0.0);
        LinearFunction {
            terms: merged,
            constant: self.constant,
        }
    }

    /// Evaluate under `assignment`, keyed by variable name.
    ///
    /// Variables missing from the assignment count as 0; this is the
    /// documented reading of a partial solver answer, not an error.
    pub fn value(&self, assignment: &HashMap<String, f64>) -> f64 {
        self.terms
            .iter()
            .map(|term| term.factor * assignment.get(term.variable.name()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }

    /// `self <= constant`
    pub fn leq(self, constant: f64) -> LinearConstraint {
        LinearConstraint::new(self, Ordering::Less, constant)
    }

    /// `self >= constant`
    pub fn geq(self, constant: f64) -> LinearConstraint {
        LinearConstraint::new(self, Ordering::Greater, constant)
    }

    /// `self == constant`
    pub fn equals(self, constant: f64) -> LinearConstraint {
        LinearConstraint::new(self, Ordering::Equal, constant)
    }
}

impl From<Term> for LinearFunction {
    fn from(term: Term) -> LinearFunction {
        LinearFunction {
            terms: vec![term],
            constant: 0.0,
        }
    }
}

impl From<Variable> for LinearFunction {
    fn from(variable: Variable) -> LinearFunction {
        Term::from(variable).into()
    }
}

impl From<&Variable> for LinearFunction {
    fn from(variable: &Variable) -> LinearFunction {
        Term::from(variable).into()
    }
}

impl From<f64> for LinearFunction {
    fn from(constant: f64) -> LinearFunction {
        LinearFunction::constant(constant)
    }
}

impl From<&LinearFunction> for LinearFunction {
    fn from(function: &LinearFunction) -> LinearFunction {
        function.clone()
    }
}

impl fmt::Display for LinearFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index == 0 {
                if term.factor == 1.0 {
                    write!(f, "{}", term.variable)?;
                } else {
                    write!(f, "{} {}", term.factor, term.variable)?;
                }
            } else {
                let (sign, factor) = if term.factor < 0.0 {
                    ("-", -term.factor)
                } else {
                    ("+", term.factor)
                };
                if factor == 1.0 {
                    write!(f, " {} {}", sign, term.variable)?;
                } else {
                    write!(f, " {} {} {}", sign, factor, term.variable)?;
                }
            }
        }
        if self.terms.is_empty() {
            write!(f, "{}", self.constant)
        } else if self.constant < 0.0 {
            write!(f, " - {}", -self.constant)
        } else if self.constant > 0.0 {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}

impl<R: Into<LinearFunction>> Add<R> for LinearFunction {
    type Output = LinearFunction;

    fn add(mut self, rhs: R) -> LinearFunction {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<R: Into<LinearFunction>> Sub<R> for LinearFunction {
    type Output = LinearFunction;

    fn sub(self, rhs: R) -> LinearFunction {
        self + -rhs.into()
    }
}

impl Neg for LinearFunction {
    type Output = LinearFunction;

    fn neg(mut self) -> LinearFunction {
        for term in &mut self.terms {
            term.factor = -term.factor;
        }
        self.constant = -self.constant;
        self
    }
}

impl Mul<f64> for LinearFunction {
    type Output = LinearFunction;

    fn mul(mut self, rhs: f64) -> LinearFunction {
        for term in &mut self.terms {
            term.factor *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl Mul<LinearFunction> for f64 {
    type Output = LinearFunction;

    fn mul(self, rhs: LinearFunction) -> LinearFunction {
        rhs * self
    }
}

impl Div<f64> for LinearFunction {
    type Output = LinearFunction;

    fn div(mut self, rhs: f64) -> LinearFunction {
        for term in &mut self.terms {
            term.factor /= rhs;
        }
        self.constant /= rhs;
        self
    }
}

impl<R: Into<LinearFunction>> Add<R> for &Variable {
    type Output = LinearFunction;

    fn add(self, rhs: R) -> LinearFunction {
        LinearFunction::from(self) + rhs
    }
}

impl<R: Into<LinearFunction>> Add<R> for Variable {
    type Output = LinearFunction;

    fn add(self, rhs: R) -> LinearFunction {
        LinearFunction::from(self) + rhs
    }
}

impl<R: Into<LinearFunction>> Sub<R> for &Variable {
    type Output = LinearFunction;

    fn sub(self, rhs: R) -> LinearFunction {
        LinearFunction::from(self) - rhs
    }
}

impl<R: Into<LinearFunction>> Sub<R> for Variable {
    type Output = LinearFunction;

    fn sub(self, rhs: R) -> LinearFunction {
        LinearFunction::from(self) - rhs
    }
}

impl Neg for &Variable {
    type Output = LinearFunction;

    fn neg(self) -> LinearFunction {
        LinearFunction::from(Term::new(self.clone(), -1.0))
    }
}

impl Neg for Variable {
    type Output = LinearFunction;

    fn neg(self) -> LinearFunction {
        LinearFunction::from(Term::new(self, -1.0))
    }
}

impl Mul<f64> for &Variable {
    type Output = LinearFunction;

    fn mul(self, rhs: f64) -> LinearFunction {
        LinearFunction::from(Term::new(self.clone(), rhs))
    }
}

impl Mul<f64> for Variable {
    type Output = LinearFunction;

    fn mul(self, rhs: f64) -> LinearFunction {
        LinearFunction::from(Term::new(self, rhs))
    }
}

impl Mul<&Variable> for f64 {
    type Output = LinearFunction;

    fn mul(self, rhs: &Variable) -> LinearFunction {
        LinearFunction::from(Term::new(rhs.clone(), self))
    }
}

impl Mul<Variable> for f64 {
    type Output = LinearFunction;

    fn mul(self, rhs: Variable) -> LinearFunction {
        LinearFunction::from(Term::new(rhs, self))
    }
}

/// `function OP constant`.
///
/// The comparison reuses [`Ordering`]: `Less` is `<=`, `Equal` is `==` and
/// `Greater` is `>=`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    /// Left-hand side
    pub function: LinearFunction,
    /// `Less` `<=`, `Equal` `==`, `Greater` `>=`
    pub operator: Ordering,
    /// Right-hand side
    pub constant: f64,
}

impl LinearConstraint {
    /// Build `function OP constant`.
    pub fn new(function: LinearFunction, operator: Ordering, constant: f64) -> LinearConstraint {
        LinearConstraint {
            function,
            operator,
            constant,
        }
    }

    /// Evaluate the left-hand side under `assignment` and apply the
    /// comparison. Equality is exact floating-point equality.
    pub fn is_satisfied_by(&self, assignment: &HashMap<String, f64>) -> bool {
        let lhs = self.function.value(assignment);
        match self.operator {
            Ordering::Less => lhs <= self.constant,
            Ordering::Equal => lhs == self.constant,
            Ordering::Greater => lhs >= self.constant,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.function,
            match self.operator {
                Ordering::Less => "<=",
                Ordering::Equal => "==",
                Ordering::Greater => ">=",
            },
            self.constant
        )
    }
}

/// Optimization sense
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Sense {
    /// min
    Minimize,
    /// max
    Maximize,
}

/// An objective function together with its optimization sense.
#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    /// The function to optimize
    pub function: LinearFunction,
    /// Whether to minimize or maximize it
    pub sense: Sense,
}

impl Objective {
    /// Minimize `function`.
    pub fn minimize(function: impl Into<LinearFunction>) -> Objective {
        Objective {
            function: function.into(),
            sense: Sense::Minimize,
        }
    }

    /// Maximize `function`.
    pub fn maximize(function: impl Into<LinearFunction>) -> Objective {
        Objective {
            function: function.into(),
            sense: Sense::Maximize,
        }
    }
}

/// A named optimization model: an optional objective plus labeled
/// constraints.
///
/// Models are built once and then only read. Constraint labels may repeat
/// or stay empty; duplicated non-empty labels are reported by the
/// validator, not rejected here.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Model name; must be non-empty and free of spaces to validate
    pub name: String,
    /// What to optimize, if anything
    pub objective: Option<Objective>,
    /// Constraints with their labels, in insertion order
    pub constraints: Vec<(LinearConstraint, String)>,
}

impl Model {
    /// An empty model with the given name.
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            objective: None,
            constraints: Vec::new(),
        }
    }

    /// Set the objective.
    pub fn with_objective(mut self, objective: Objective) -> Model {
        self.objective = Some(objective);
        self
    }

    /// Append a constraint. Pass `""` to leave it unlabeled.
    pub fn with_constraint(
        mut self,
        constraint: LinearConstraint,
        label: impl Into<String>,
    ) -> Model {
        self.constraints.push((constraint, label.into()));
        self
    }

    /// The distinct variables (by identity) reachable from the objective
    /// and every constraint, in first-occurrence order.
    ///
    /// This order is load-bearing: it defines the positional column
    /// numbering shared by the MPS writer and the solution reader.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut variables = Vec::new();
        let functions = self
            .objective
            .iter()
            .map(|objective| &objective.function)
            .chain(self.constraints.iter().map(|(constraint, _)| &constraint.function));
        for function in functions {
            for term in &function.terms {
                if seen.insert(term.variable.clone()) {
                    variables.push(term.variable.clone());
                }
            }
        }
        variables
    }

    /// The objective's sense, or `Minimize` for a model without one.
    pub fn sense(&self) -> Sense {
        self.objective
            .as_ref()
            .map_or(Sense::Minimize, |objective| objective.sense)
    }
}
