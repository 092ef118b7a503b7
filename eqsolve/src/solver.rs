use crate::{Error, Expr, Label, Vars, matrix::Matrix, vector::Vector};

mod newton;

/// Settings for the Newton-Raphson solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Give up after this many iterations.
    pub max_iterations: usize,
    /// The solve has converged once every component of the Newton step
    /// is at or below this (absolute) value.
    pub step_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_tolerance: 1e-6,
        }
    }
}

impl Config {
    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the step tolerance.
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }
}

/// Symbolic Jacobian of a system of equations.
/// Entry `[i][j]` is the derivative of equation `i` with respect to parameter `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Jacobian {
    rows: Vec<Vec<Expr>>,
    num_cols: usize,
}

impl Jacobian {
    /// Differentiate every equation with respect to every parameter.
    /// The order of `params` fixes the column order.
    pub fn build<S: AsRef<str>>(equations: &[Expr], params: &[S]) -> Result<Self, Error> {
        let rows = equations
            .iter()
            .map(|equation| {
                params
                    .iter()
                    .map(|param| equation.partial_derivative(param.as_ref()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rows,
            num_cols: params.len(),
        })
    }

    /// Number of equations.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of parameters.
    pub fn cols(&self) -> usize {
        self.num_cols
    }

    /// Derivative of equation `row` with respect to parameter `col`.
    pub fn entry(&self, row: usize, col: usize) -> &Expr {
        &self.rows[row][col]
    }

    /// Evaluate every entry at the given parameter values.
    pub fn evaluate(&self, vars: &Vars) -> Result<Matrix, Error> {
        let mut out = Matrix::zeros(self.rows(), self.cols());
        for (i, row) in self.rows.iter().enumerate() {
            for (j, derivative) in row.iter().enumerate() {
                out[i][j] = derivative.evaluate(vars)?;
            }
        }
        Ok(out)
    }
}

impl std::fmt::Display for Jacobian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let cells: Vec<_> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Evaluate every equation, giving the residual vector F.
pub fn evaluate_system(equations: &[Expr], vars: &Vars) -> Result<Vector, Error> {
    equations.iter().map(|e| e.evaluate(vars)).collect()
}

/// The problem to actually solve.
pub(crate) struct Model<'e> {
    equations: &'e [Expr],
    /// Built once: the derivatives don't depend on the parameter values.
    jacobian: Jacobian,
}

impl<'e> Model<'e> {
    pub fn new(equations: &'e [Expr], params: &[Label]) -> Result<Self, Error> {
        if equations.is_empty() || params.is_empty() {
            return Err(Error::EmptySystemNotAllowed);
        }
        let jacobian = Jacobian::build(equations, params)?;
        Ok(Self {
            equations,
            jacobian,
        })
    }
}
