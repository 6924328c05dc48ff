use std::fmt::Write as _;

use anyhow::Context;
use lattice_algebra::{Rational, Vector};
use lattice_log::Timer;

use crate::cli::VectorArgs;
use crate::parse::parse_row;

/// Print both vectors, their sum and `right - left`
pub fn run(args: &VectorArgs) -> anyhow::Result<String> {
    let timer = Timer::new("lattice vector");

    let left = Vector::from_coefficients(parse_row::<Rational>(&args.left).context("invalid --left vector")?)?;
    let right =
        Vector::from_coefficients(parse_row::<Rational>(&args.right).context("invalid --right vector")?)?;

    let sum = left.try_add(&right)?;
    let difference = right.try_subtract(&left)?;

    let mut out = String::new();
    for value in [&left, &right, &sum, &difference] {
        writeln!(out, "{value}")?;
    }
    timer.complete();
    Ok(out.trim_end().to_string())
}
