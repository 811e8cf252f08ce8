//! Serialize a [`Model`] in the MPS file format understood by CBC.
//!
//! The emitted file starts with the non-standard `*SENSE:` comment CBC
//! recognizes, and names every row and column with a synthetic, zero-padded
//! positional identifier (`C0000000`, `X0000000`). The identifiers are
//! fixed-width and collision-free regardless of what the user called their
//! variables; the original names are recovered from the column index by the
//! solution reader, never by string matching.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::{Domain, Model, Sense, Variable};

/// Prefix of the synthetic column identifiers.
pub(crate) const COLUMN_PREFIX: char = 'X';

/// By far the most frequent coefficient; rendered once.
const ONE: &str = "1.000000000000e+00";

/// Fixed-width signed scientific notation with 12 fractional digits, the
/// coefficient format used throughout the file (`-2.500000000000e+01`).
fn scientific(value: f64) -> Cow<'static, str> {
    if value == 1.0 {
        return Cow::Borrowed(ONE);
    }
    // adding zero collapses -0.0 to 0.0
    let rendered = format!("{:.12e}", value + 0.0);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            Cow::Owned(format!("{mantissa}e{exponent:+03}"))
        }
        None => Cow::Owned(rendered),
    }
}

fn constraint_row(index: usize) -> String {
    format!("C{index:07}")
}

fn column(index: usize) -> String {
    format!("{COLUMN_PREFIX}{index:07}")
}

/// Write `model` as MPS to `out`.
///
/// Functions are normalized while collecting coefficients, so each
/// `(column, row)` pair is emitted at most once and cancelled terms are
/// skipped. Section headers are written even when a section is empty.
pub fn write<W: Write>(model: &Model, out: &mut W) -> io::Result<()> {
    let sense = match model.sense() {
        Sense::Minimize => "Minimize",
        Sense::Maximize => "Maximize",
    };
    writeln!(out, "*SENSE:{sense}")?;
    writeln!(out, "NAME          MODEL")?;

    writeln!(out, "ROWS")?;
    if model.objective.is_some() {
        writeln!(out, " N  OBJ")?;
    }
    for (index, (constraint, _)) in model.constraints.iter().enumerate() {
        let kind = match constraint.operator {
            Ordering::Less => 'L',
            Ordering::Equal => 'E',
            Ordering::Greater => 'G',
        };
        writeln!(out, " {kind}  {}", constraint_row(index))?;
    }

    let variables = model.variables();
    let positions: HashMap<Variable, usize> = variables
        .iter()
        .enumerate()
        .map(|(position, variable)| (variable.clone(), position))
        .collect();
    // one contiguous block of (row, factor) entries per column, constraint
    // rows in index order, the objective row last
    let mut columns: Vec<Vec<(String, f64)>> = vec![Vec::new(); variables.len()];
    for (index, (constraint, _)) in model.constraints.iter().enumerate() {
        for term in constraint.function.clone().normalize().terms {
            columns[positions[&term.variable]].push((constraint_row(index), term.factor));
        }
    }
    if let Some(objective) = &model.objective {
        for term in objective.function.clone().normalize().terms {
            columns[positions[&term.variable]].push(("OBJ".to_string(), term.factor));
        }
    }

    writeln!(out, "COLUMNS")?;
    for (position, entries) in columns.iter().enumerate() {
        let integral = variables[position].domain() != Domain::Real;
        if integral {
            writeln!(out, "    MARKER                 'MARKER'                 'INTORG'")?;
        }
        for (row, factor) in entries {
            writeln!(out, "    {}  {row}  {}", column(position), scientific(*factor))?;
        }
        if integral {
            writeln!(out, "    MARKER                 'MARKER'                 'INTEND'")?;
        }
    }

    writeln!(out, "RHS")?;
    for (index, (constraint, _)) in model.constraints.iter().enumerate() {
        // the function's own constant moves over to the right-hand side
        let value = constraint.constant - constraint.function.constant;
        writeln!(out, "    RHS  {}  {}", constraint_row(index), scientific(value))?;
    }

    writeln!(out, "BOUNDS")?;
    for (position, variable) in variables.iter().enumerate() {
        if variable.is_binary() {
            writeln!(out, " BV BND  {}", column(position))?;
        }
    }
    writeln!(out, "ENDATA")?;
    Ok(())
}

/// Create `path` and write `model` to it through a buffered writer.
///
/// Failing to create the file is the hard failure of this module; a
/// partially written file is left for the caller's directory teardown.
pub fn write_file(model: &Model, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write(model, &mut out)?;
    out.flush()
}
