use std::collections::HashMap;

use float_cmp::assert_approx_eq;
use lp_cbc::model::{LinearFunction, Term, Variable};

fn assignment(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[test]
fn composition_concatenates_without_merging() {
    let x = Variable::real("x", None, None);
    let f = &x + 2.0 * &x;
    assert_eq!(f.terms.len(), 2);

    let merged = f.normalize();
    assert_eq!(merged.terms.len(), 1);
    assert_eq!(merged.terms[0].factor, 3.0);
}

#[test]
fn variable_converts_to_unit_term() {
    let x = Variable::real("x", None, None);
    let f = LinearFunction::from(&x);
    assert_eq!(f.terms, vec![Term::new(x, 1.0)]);
    assert_eq!(f.constant, 0.0);
}

#[test]
fn addition_sums_constants() {
    let x = Variable::real("x", None, None);
    let f = (&x + 3.0) + (&x - 1.0);
    assert_eq!(f.constant, 2.0);
    assert_eq!(f.terms.len(), 2);
}

#[test]
fn scalar_multiplication_distributes() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = 2.0 * (&x + 3.0 * &y + 5.0);
    assert_eq!(f.terms[0].factor, 2.0);
    assert_eq!(f.terms[1].factor, 6.0);
    assert_eq!(f.constant, 10.0);
}

#[test]
fn scalar_division_undoes_multiplication() {
    let x = Variable::real("x", None, None);
    let f = (&x * 4.0 + 2.0) / 2.0;
    assert_eq!(f.terms[0].factor, 2.0);
    assert_eq!(f.constant, 1.0);
}

#[test]
fn negation_flips_every_factor_and_the_constant() {
    let x = Variable::real("x", None, None);
    let f = -(2.0 * &x + 5.0);
    assert_eq!(f.terms[0].factor, -2.0);
    assert_eq!(f.constant, -5.0);

    let g = -&x;
    assert_eq!(g.terms[0].factor, -1.0);
}

#[test]
fn composition_does_not_mutate_operands() {
    let x = Variable::real("x", None, None);
    let f = &x + 1.0;
    let g = f.clone() + &x;
    assert_eq!(f.terms.len(), 1);
    assert_eq!(g.terms.len(), 2);
}

#[test]
fn normalization_is_idempotent() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = &x + &y + 2.0 * &x - 3.0;

    let once = f.normalize();
    assert_eq!(once.clone().normalize(), once);
}

#[test]
fn normalization_preserves_evaluation() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = &x + &y + 2.0 * &x - 0.5 * &y + 7.0;
    let merged = f.clone().normalize();

    for values in [
        assignment(&[("x", 0.0), ("y", 0.0)]),
        assignment(&[("x", 1.5), ("y", -2.0)]),
        assignment(&[("x", -3.25), ("y", 10.0)]),
    ] {
        assert_approx_eq!(f64, f.value(&values), merged.value(&values), epsilon = 1e-12);
    }
}

#[test]
fn normalization_keeps_first_occurrence_order() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let z = Variable::real("z", None, None);
    let f = (&y + &x + &z + 2.0 * &x).normalize();

    let order: Vec<&str> = f.terms.iter().map(|t| t.variable.name()).collect();
    assert_eq!(order, ["y", "x", "z"]);
}

#[test]
fn cancelled_terms_are_dropped_not_kept_as_zero() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = (&x + &y - 1.0 * &x).normalize();

    assert_eq!(f.terms.len(), 1);
    assert_eq!(f.terms[0].variable.name(), "y");
}

#[test]
fn merging_goes_by_identity_not_by_name() {
    let a = Variable::real("x", None, None);
    let b = Variable::real("x", None, None);
    let f = (&a + &b).normalize();

    // same name, distinct identities: both terms survive
    assert_eq!(f.terms.len(), 2);
}

#[test]
fn cloned_handles_share_identity() {
    let a = Variable::real("x", None, None);
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!((&a + &b).normalize().terms.len(), 1);

    let unrelated = Variable::real("x", None, None);
    assert_ne!(a, unrelated);
}

#[test]
fn missing_variables_evaluate_as_zero() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = 2.0 * &x + 3.0 * &y + 1.0;
    assert_eq!(f.value(&assignment(&[("x", 2.0)])), 5.0);
}

#[test]
fn constraints_apply_their_comparison() {
    let x = Variable::real("x", None, None);
    let values = assignment(&[("x", 4.0)]);

    assert!((&x + 1.0).leq(5.0).is_satisfied_by(&values));
    assert!(!(&x + 1.0).leq(4.0).is_satisfied_by(&values));
    assert!((2.0 * &x).geq(8.0).is_satisfied_by(&values));
    assert!(!(2.0 * &x).geq(9.0).is_satisfied_by(&values));
    // equality is exact
    assert!((&x - 4.0).equals(0.0).is_satisfied_by(&values));
    assert!(!(&x - 4.0).equals(1e-12).is_satisfied_by(&values));
}

#[test]
fn variable_comparison_shorthands() {
    let x = Variable::real("x", None, None);
    let values = assignment(&[("x", 1.0)]);
    assert!(x.leq(1.0).is_satisfied_by(&values));
    assert!(x.geq(1.0).is_satisfied_by(&values));
    assert!(x.equals(1.0).is_satisfied_by(&values));
}

#[test]
fn binary_bounds_default_and_inference() {
    let declared = Variable::binary("b");
    assert_eq!(declared.effective_bounds(), (Some(0.0), Some(1.0)));
    assert!(declared.is_binary());

    // an integer constrained to (0, 1) is binary in all but name
    let inferred = Variable::integer("i", Some(0.0), Some(1.0));
    assert!(inferred.is_binary());

    let real = Variable::real("r", Some(0.0), Some(1.0));
    assert!(!real.is_binary());

    let wide = Variable::integer("w", Some(0.0), Some(2.0));
    assert!(!wide.is_binary());
}

#[test]
fn functions_display_readably() {
    let x = Variable::real("x", None, None);
    let y = Variable::real("y", None, None);
    let f = 2.0 * &x - &y + 5.0;
    assert_eq!(f.to_string(), "2 x - y + 5");
    assert_eq!(f.leq(7.0).to_string(), "2 x - y + 5 <= 7");
    assert_eq!(LinearFunction::constant(3.0).to_string(), "3");
}
