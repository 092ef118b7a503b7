//! Dense linear solves: Gaussian elimination with partial pivoting,
//! plus a least-squares reduction for over-determined systems.
use log::trace;

use crate::{Error, matrix::Matrix, vector::Vector};

/// Result of a linear solve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum LinearOutcome {
    /// The system was solved. Over-determined systems get their least-squares solution.
    Converged(Vector),
    /// More unknowns than equations. No solution is attempted.
    Underdetermined {
        /// Number of equations (rows).
        equations: usize,
        /// Number of unknowns (columns).
        unknowns: usize,
    },
}

impl LinearOutcome {
    /// The solution, if there is one.
    pub fn solution(&self) -> Option<&Vector> {
        match self {
            LinearOutcome::Converged(x) => Some(x),
            LinearOutcome::Underdetermined { .. } => None,
        }
    }

    /// Was the system solved?
    pub fn is_converged(&self) -> bool {
        matches!(self, LinearOutcome::Converged(_))
    }

    /// Take the solution, treating an underdetermined system as an error.
    pub fn into_solution(self) -> Result<Vector, Error> {
        match self {
            LinearOutcome::Converged(x) => Ok(x),
            LinearOutcome::Underdetermined {
                equations,
                unknowns,
            } => Err(Error::Underdetermined {
                equations,
                unknowns,
            }),
        }
    }
}

/// Solve `coefficients * x = constants` for any shape of system.
///
/// - Square systems are solved directly.
/// - Over-determined systems (more rows than columns) are reduced with the normal equations
///   `AᵀA x = Aᵀb` first, which gives the least-squares solution.
/// - Under-determined systems are reported, never solved.
pub fn solve(coefficients: Matrix, constants: &Vector) -> Result<LinearOutcome, Error> {
    let (rows, cols) = coefficients.size();
    if constants.len() != rows {
        return Err(Error::DimensionMismatch {
            expected: rows,
            actual: constants.len(),
        });
    }
    if rows < cols {
        return Ok(LinearOutcome::Underdetermined {
            equations: rows,
            unknowns: cols,
        });
    }
    if rows > cols {
        let transposed = coefficients.transpose();
        let normal = transposed.multiply(&coefficients)?;
        let rhs = transposed
            .multiply(&Matrix::from_column(constants))?
            .column(0);
        return solve_square(normal, &rhs).map(LinearOutcome::Converged);
    }
    solve_square(coefficients, constants).map(LinearOutcome::Converged)
}

/// Solve a square system by elimination then back-substitution.
pub fn solve_square(coefficients: Matrix, constants: &Vector) -> Result<Vector, Error> {
    if !coefficients.is_square() {
        return Err(Error::DimensionMismatch {
            expected: coefficients.rows(),
            actual: coefficients.cols(),
        });
    }
    let mut augmented = coefficients;
    augmented.augment_vector(constants)?;
    gaussian_eliminate_partial_pivot(&mut augmented)?;
    trace!("Row echelon form\n{augmented}");
    back_substitute(&augmented)
}

/// Reduce `matrix` to row echelon form in place.
///
/// For each pivot column, the row with the largest absolute value in that column (at or below
/// the diagonal) is swapped into the pivot position, then every entry below the pivot is
/// eliminated by row subtraction.
pub fn gaussian_eliminate_partial_pivot(matrix: &mut Matrix) -> Result<(), Error> {
    let n = matrix.rows();
    if matrix.cols() < n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: matrix.cols(),
        });
    }
    for i in 0..n {
        let mut pivot_row = i;
        for j in (i + 1)..n {
            if matrix.get(j, i).abs() > matrix.get(pivot_row, i).abs() {
                pivot_row = j;
            }
        }
        let pivot = matrix.get(pivot_row, i);
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(Error::SingularSystem { column: i });
        }
        if pivot_row != i {
            trace!("Pivoting: swapping rows {i} and {pivot_row}");
            matrix.swap_rows(pivot_row, i);
        }

        for j in (i + 1)..n {
            let factor = matrix.get(j, i) / pivot;
            let reduced = matrix[j].subtract(&matrix[i].scale(factor))?;
            matrix[j] = reduced;
        }
    }
    Ok(())
}

/// Solve an upper-triangular augmented matrix `[U | b]` from the last row upward.
/// A zero or non-finite diagonal entry is reported as [`Error::SingularSystem`].
pub fn back_substitute(matrix: &Matrix) -> Result<Vector, Error> {
    let n = matrix.rows();
    if matrix.cols() != n + 1 {
        return Err(Error::DimensionMismatch {
            expected: n + 1,
            actual: matrix.cols(),
        });
    }
    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        let diagonal = matrix.get(i, i);
        if diagonal == 0.0 || !diagonal.is_finite() {
            return Err(Error::SingularSystem { column: i });
        }
        let sum: f64 = ((i + 1)..n).map(|j| matrix.get(i, j) * x[j]).sum();
        x[i] = (matrix.get(i, n) - sum) / diagonal;
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[track_caller]
    fn assert_vec_nearly(actual: &Vector, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "got {actual}, expected {expected:?}");
        }
    }

    #[test]
    fn square() {
        let a = m(&[&[3.0, 2.0, -4.0], &[2.0, 3.0, 3.0], &[5.0, -3.0, 1.0]]);
        let b = Vector::from([3.0, 15.0, 14.0]);
        let outcome = solve(a, &b).unwrap();
        assert!(outcome.is_converged());
        assert_vec_nearly(outcome.solution().unwrap(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn overconstrained_least_squares() {
        let a = m(&[&[1.0, 1.0], &[1.0, 2.0], &[1.0, 3.0]]);
        let b = Vector::from([1.0, 3.0, 2.0]);
        let outcome = solve(a, &b).unwrap();
        assert!(outcome.is_converged());
        assert_vec_nearly(outcome.solution().unwrap(), &[1.0, 0.5]);
    }

    #[test]
    fn underdetermined() {
        let a = m(&[&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]]);
        let b = Vector::from([1.0, 2.0]);
        let outcome = solve(a, &b).unwrap();
        assert_eq!(
            outcome,
            LinearOutcome::Underdetermined {
                equations: 2,
                unknowns: 3
            }
        );
        assert!(outcome.solution().is_none());
        assert_eq!(
            outcome.into_solution(),
            Err(Error::Underdetermined {
                equations: 2,
                unknowns: 3
            })
        );
    }

    #[test]
    fn needs_pivoting() {
        // The first row has a zero in the pivot position.
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let x = solve_square(a, &Vector::from([3.0, 5.0])).unwrap();
        assert_vec_nearly(&x, &[5.0, 3.0]);
    }

    #[test]
    fn picks_largest_pivot() {
        let mut a = m(&[&[1.0, 2.0, 3.0], &[-4.0, 1.0, 0.0]]);
        gaussian_eliminate_partial_pivot(&mut a).unwrap();
        // |-4| > |1| so the second row becomes the pivot row.
        assert_eq!(a[0], Vector::from([-4.0, 1.0, 0.0]));
        assert_eq!(a.get(1, 0), 0.0);
    }

    #[test]
    fn singular() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(
            solve_square(a, &Vector::from([3.0, 6.0])),
            Err(Error::SingularSystem { column: 1 })
        );
    }

    #[test]
    fn zero_column_is_singular() {
        let a = m(&[&[0.0, 1.0], &[0.0, 2.0]]);
        assert_eq!(
            solve(a, &Vector::from([1.0, 2.0])),
            Err(Error::SingularSystem { column: 0 })
        );
    }

    #[test]
    fn back_substitute_zero_diagonal() {
        // Already upper-triangular, but the second unknown has no coefficient.
        let a = m(&[&[1.0, 2.0, 3.0], &[0.0, 0.0, 1.0]]);
        assert_eq!(back_substitute(&a), Err(Error::SingularSystem { column: 1 }));
    }

    #[test]
    fn non_square_rejected() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(
            solve_square(a, &Vector::from([1.0, 2.0])),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn constants_length_checked() {
        let a = m(&[&[1.0, 0.0], &[0.0, 1.0]]);
        assert_eq!(
            solve(a, &Vector::from([1.0, 2.0, 3.0])),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn back_substitute_triangular() {
        // x + 2y = 5, 3y = 6
        let a = m(&[&[1.0, 2.0, 5.0], &[0.0, 3.0, 6.0]]);
        assert_vec_nearly(&back_substitute(&a).unwrap(), &[1.0, 2.0]);
        assert!(back_substitute(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).is_err());
    }
}
