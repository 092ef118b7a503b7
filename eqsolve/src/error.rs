use crate::{FailureOutcome, Label};

/// Errors from parsing and executing eqsolve's textual representation.
#[derive(thiserror::Error, Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum TextualError {
    /// No initial guess was given for this label.
    #[error("No guess was given for point {label}")]
    MissingGuess {
        /// The point that didn't have any guesses.
        label: String,
    },
    /// Guesses were given for labels that no instruction declared.
    #[error("You gave a guess for points which weren't defined: {labels:?}")]
    UnusedGuesses {
        /// The labels you gave guesses for which weren't defined.
        labels: Vec<String>,
    },
    /// The sketch rejected one of the instructions.
    #[error("{0}")]
    Sketch(#[from] Error),
    /// The problem was well-formed, but the solver could not satisfy it.
    #[error("Could not solve the problem: {0}")]
    Unsolvable(FailureOutcome),
}

/// Errors from the expression engine, the linear algebra and the Newton-Raphson solver.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum Error {
    /// Two operands had incompatible sizes.
    #[error("Dimensions don't match: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The size the operation required.
        expected: usize,
        /// The size it was actually given.
        actual: usize,
    },
    /// An expression referenced a parameter missing from the bindings it was evaluated against.
    #[error("Parameter {0} is not bound")]
    UnboundParameter(Label),
    /// A parameter store lookup found no such parameter.
    #[error("No parameter named {0}")]
    UnknownParameter(Label),
    /// A parameter was added to a store that already had one with that name.
    #[error("Parameter {0} was already defined")]
    DuplicateParameter(Label),
    /// Differentiation was requested on a node with no derivative rule.
    #[error("Cannot differentiate {operation} expressions")]
    UnsupportedOperation {
        /// Which kind of node could not be handled.
        operation: &'static str,
    },
    /// Gaussian elimination found no usable pivot.
    #[error("System is singular: no nonzero pivot in column {column}")]
    SingularSystem {
        /// Column of the augmented matrix where elimination stopped.
        column: usize,
    },
    /// There are more unknowns than equations.
    #[error("System is underdetermined: {equations} equations for {unknowns} unknowns")]
    Underdetermined {
        /// Number of equations (matrix rows).
        equations: usize,
        /// Number of unknowns (matrix columns).
        unknowns: usize,
    },
    /// Newton-Raphson did not find a solution within the allowed number of iterations.
    /// Consider raising the iterations?
    #[error("Could not find a solution in {iterations} iterations")]
    DidNotConverge {
        /// How many iterations ran before giving up.
        iterations: usize,
    },
    /// You provided an empty constraint system.
    #[error("Cannot solve an empty system")]
    EmptySystemNotAllowed,
    /// A point was added to a sketch that already had one with that name.
    #[error("Point {0} was already defined")]
    DuplicatePoint(Label),
    /// A constraint referred to a point the sketch doesn't have.
    #[error("You referred to the point {0} but it was never defined")]
    UndefinedPoint(Label),
}
