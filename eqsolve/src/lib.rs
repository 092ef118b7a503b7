//! Equation solver for 2D geometric constraints.
//!
//! Constraints are written as symbolic [`Expr`]essions which should equal zero.
//! The unknowns live in a [`ParameterStore`], and [`solve_system`] moves them with
//! Newton-Raphson until every equation is satisfied.
//! [`Sketch`] builds those equations from points and distances.

pub use crate::datatypes::Point;
pub use crate::error::{Error, TextualError};
pub use crate::expr::{Expr, Label, Vars};
pub use crate::linalg::LinearOutcome;
pub use crate::matrix::Matrix;
pub use crate::params::ParameterStore;
pub use crate::sketch::Sketch;
pub use crate::solve_outcome::{FailureOutcome, SolveOutcome};
pub use crate::solver::{Config, Jacobian, evaluate_system};
pub use crate::vector::Vector;
use crate::solver::Model;

/// Geometric data (points).
pub mod datatypes;
mod error;
mod expr;
/// Dense linear solvers.
pub mod linalg;
mod matrix;
mod params;
/// Points and distance constraints.
mod sketch;
mod solve_outcome;
/// Newton-Raphson over symbolic Jacobians.
mod solver;
/// Parser for textual representation of these problems.
pub mod textual;
mod vector;

/// Find values for every parameter which make every equation zero.
/// The parameters' current values are the initial guess, and are overwritten with the
/// solution. If solving fails, they hold the last iterate.
pub fn solve_system(
    equations: &[Expr],
    params: &mut ParameterStore,
    config: Config,
) -> Result<SolveOutcome, FailureOutcome> {
    let num_vars = params.len();
    let num_eqs = equations.len();
    let fail = |error: Error| FailureOutcome {
        error,
        num_vars,
        num_eqs,
    };

    // The parameter order now fixes the Jacobian's column order for the whole solve.
    let names: Vec<Label> = params.names().map(ToOwned::to_owned).collect();
    let model = Model::new(equations, &names).map_err(fail)?;
    let solved = model.solve_newton_raphson(params, config).map_err(fail)?;

    Ok(SolveOutcome {
        iterations: solved.iterations,
        final_values: params.as_vector(),
    })
}
