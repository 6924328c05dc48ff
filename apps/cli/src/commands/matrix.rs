use anyhow::Context;
use lattice_algebra::{Integer, Matrix};
use lattice_log::Timer;
use tracing::debug;

use crate::cli::MatrixArgs;
use crate::parse::parse_rows;

/// Multiply `lhs` by `rhs`, returning the rendered product
pub fn run(args: &MatrixArgs) -> anyhow::Result<String> {
    let timer = Timer::new("lattice matrix");

    let lhs = Matrix::from_rows(parse_rows::<Integer>(&args.lhs).context("invalid --lhs matrix")?)
        .context("invalid --lhs matrix")?;
    let rhs = Matrix::from_rows(parse_rows::<Integer>(&args.rhs).context("invalid --rhs matrix")?)
        .context("invalid --rhs matrix")?;
    debug!(lhs = %lhs.space(), rhs = %rhs.space(), "multiplying");

    let product = lhs.multiply(&rhs)?;
    timer.complete();
    Ok(product.to_string())
}
