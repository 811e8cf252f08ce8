//! The COIN-OR CBC command-line solver.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::model::{Model, Sense};
use crate::mps_format::{self, COLUMN_PREFIX};
use crate::solvers::{Solution, Solver, Status};

/// Prefix of the per-call working directories created under the system
/// temp directory. Each directory is removed before `solve` returns.
pub const WORKSPACE_PREFIX: &str = "lp-cbc-";

/// Runs the `cbc` executable over an MPS file in a throwaway directory.
///
/// One `solve` call owns one freshly created working directory for the
/// model and solution files, so concurrent calls never share state. The
/// call blocks until the child process exits; no timeout is enforced.
#[derive(Debug, Clone)]
pub struct CbcSolver {
    command_name: String,
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CbcSolver {
    /// A solver invoking `cbc` from the search path.
    pub fn new() -> CbcSolver {
        CbcSolver {
            command_name: "cbc".to_string(),
        }
    }

    /// Use a different executable name or path.
    pub fn command_name(&self, command_name: String) -> CbcSolver {
        CbcSolver { command_name }
    }

    fn run_in(&self, workspace: &Path, model: &Model) -> Option<Solution> {
        let model_path = workspace.join("model.mps");
        if let Err(error) = mps_format::write_file(model, &model_path) {
            log::error!("cannot write {}: {}", model_path.display(), error);
            return None;
        }
        let solution_path = workspace.join("model.sol");
        let direction = match model.sense() {
            Sense::Minimize => "min",
            Sense::Maximize => "max",
        };
        let output = Command::new(&self.command_name)
            .arg(&model_path)
            .arg(direction)
            .args(["timeMode", "elapsed", "branch", "printingOptions", "normal", "solution"])
            .arg(&solution_path)
            .output();
        let output = match output {
            Ok(output) => output,
            Err(error) => {
                log::error!("cannot run {}: {}", self.command_name, error);
                return None;
            }
        };
        if !output.status.success() {
            // stdout is never parsed; status comes from the solution file
            log::error!("{} exited with {}", self.command_name, output.status);
            return None;
        }
        self.read_solution(&solution_path, model)
    }

    /// Parse a CBC solution file, resolving column indices back to the
    /// variable names of `model`.
    ///
    /// The first line carries the status keyword. Each remaining line is a
    /// candidate variable binding: an optional `**` marker, a sequence
    /// number, the synthetic column identifier and the value. Lines that do
    /// not fit are skipped, so a partially garbled file still yields the
    /// bindings that parse cleanly. An unreadable file yields `None`.
    pub fn read_solution(&self, path: &Path, model: &Model) -> Option<Solution> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                log::error!("cannot read {}: {}", path.display(), error);
                return None;
            }
        };
        let mut lines = text.lines();
        let status = match lines.next().and_then(|line| line.split_whitespace().next()) {
            Some("Optimal") => Status::Optimal,
            // either "Infeasible" or "Integer infeasible"
            Some("Infeasible") | Some("Integer") => Status::Infeasible,
            Some("Unbounded") => Status::Unbounded,
            // "Stopped on time", "on iterations", "on difficulties" or "on ctrl-c"
            Some("Stopped") => Status::Unsolved,
            _ => Status::Undefined,
        };
        let names = model.variables();
        let mut variables = HashMap::new();
        for line in lines {
            let mut tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.first() == Some(&"**") {
                tokens.remove(0);
            }
            if tokens.len() < 3 {
                continue;
            }
            let index = match tokens[1].strip_prefix(COLUMN_PREFIX) {
                Some(digits) => match digits.parse::<usize>() {
                    Ok(index) => index,
                    Err(_) => continue,
                },
                None => continue,
            };
            let value = match tokens[2].parse::<f64>() {
                Ok(value) => value,
                Err(_) => continue,
            };
            if let Some(variable) = names.get(index) {
                // duplicates overwrite; last write wins
                variables.insert(variable.name().to_string(), value);
            }
        }
        Some(Solution::new(status, variables))
    }
}

impl Solver for CbcSolver {
    fn solve(&self, model: &Model) -> Option<Solution> {
        let workspace = match tempfile::Builder::new().prefix(WORKSPACE_PREFIX).tempdir() {
            Ok(workspace) => workspace,
            Err(error) => {
                log::error!("cannot create a working directory: {}", error);
                return None;
            }
        };
        let solution = self.run_in(workspace.path(), model);
        // the directory goes away on every path, solved or not
        if let Err(error) = workspace.close() {
            log::warn!("cannot remove the working directory: {}", error);
        }
        solution
    }
}
