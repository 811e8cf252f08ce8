use std::collections::BTreeSet;
use std::path::Path;

use float_cmp::assert_approx_eq;
use lp_cbc::model::{Model, Objective, Variable};
use lp_cbc::solvers::cbc::WORKSPACE_PREFIX;
use lp_cbc::solvers::{CbcSolver, Solver, Status};

/// Maximize `x + 2y` with `x` integer and `y` real, both non-negative.
/// The optimum is `x = 7, y = 4.4` with objective value `15.8`.
fn basic_model() -> Model {
    let x = Variable::integer("x", Some(0.0), None);
    let y = Variable::real("y", Some(0.0), None);
    Model::new("Basic")
        .with_objective(Objective::maximize(&x + 2.0 * &y))
        .with_constraint((2.0 * &x + &y).leq(20.0), "")
        .with_constraint((4.0 * &x - 5.0 * &y).geq(-10.0), "")
        .with_constraint((-&x + 2.0 * &y).geq(-2.0), "")
        .with_constraint((-&x + 5.0 * &y).equals(15.0), "")
}

fn read(fixture: &str, model: &Model) -> lp_cbc::solvers::Solution {
    CbcSolver::new()
        .read_solution(&Path::new("tests/solution_files").join(fixture), model)
        .expect("fixture should be readable")
}

#[test]
fn optimal_solution_maps_columns_back_to_names() {
    let model = basic_model();
    let solution = read("optimal.sol", &model);

    assert_eq!(solution.status, Status::Optimal);
    assert_eq!(solution.variables.len(), 2);
    assert_eq!(solution.variables["x"], 7.0);
    assert_eq!(solution.variables["y"], 4.4);

    let objective = model.objective.expect("basic model has an objective");
    assert_approx_eq!(
        f64,
        objective.function.value(&solution.variables),
        15.8,
        epsilon = 1e-9
    );
}

#[test]
fn superbasic_markers_are_skipped() {
    let solution = read("optimal_superbasic.sol", &basic_model());
    assert_eq!(solution.status, Status::Optimal);
    assert_eq!(solution.variables["x"], 1.0);
    assert_eq!(solution.variables["y"], 2.5);
}

#[test]
fn status_keywords_map_to_statuses() {
    let model = basic_model();
    for (fixture, status) in [
        ("optimal.sol", Status::Optimal),
        ("infeasible.sol", Status::Infeasible),
        ("integer_infeasible.sol", Status::Infeasible),
        ("unbounded.sol", Status::Unbounded),
        ("stopped.sol", Status::Unsolved),
        ("garbled.sol", Status::Undefined),
    ] {
        assert_eq!(read(fixture, &model).status, status, "fixture {fixture}");
    }
}

#[test]
fn malformed_lines_are_skipped_best_effort() {
    let solution = read("garbled.sol", &basic_model());

    // the one well-formed binding with a known column survives
    assert_eq!(solution.variables.len(), 1);
    assert_eq!(solution.variables["x"], 7.0);
}

#[test]
fn duplicate_bindings_keep_the_last_value() {
    let solution = read("duplicate_binding.sol", &basic_model());
    assert_eq!(solution.variables["x"], 2.0);
}

#[test]
fn only_reported_variables_appear_in_the_result() {
    let solution = read("unbounded.sol", &basic_model());
    assert!(solution.variables.is_empty());
}

#[test]
fn unreadable_solution_file_yields_none() {
    let solver = CbcSolver::new();
    let missing = Path::new("tests/solution_files/does_not_exist.sol");
    assert!(solver.read_solution(missing, &basic_model()).is_none());
}

fn workspaces() -> BTreeSet<String> {
    std::fs::read_dir(std::env::temp_dir())
        .expect("temp dir is listable")
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(WORKSPACE_PREFIX))
        .collect()
}

#[test]
fn failed_solve_leaves_no_working_directory_behind() {
    let before = workspaces();
    let solver = CbcSolver::new().command_name("no-such-solver-executable".to_string());
    assert!(solver.solve(&basic_model()).is_none());
    assert_eq!(workspaces(), before);
}
