//! A plain-text format for sketch problems:
//!
//! ```text
//! # constraints
//! origin o = (0, 0)
//! point a
//! distance(o, a) = 5
//!
//! # guesses
//! a roughly (3, 3)
//! ```
mod executor;
mod instruction;
mod parser;

use std::str::FromStr;

pub use executor::Outcome;
pub use instruction::{DeclareOrigin, DeclarePoint, Distance, Instruction};
use winnow::Parser;

use crate::{Label, datatypes::Point};

/// Initial guess for a free point's position.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGuess {
    #[allow(missing_docs)]
    pub point: Label,
    #[allow(missing_docs)]
    pub guess: Point,
}

/// A parsed problem, ready to be turned into a [`crate::Sketch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Constraint lines, in the order they were written.
    pub instructions: Vec<Instruction>,
    #[allow(missing_docs)]
    pub point_guesses: Vec<PointGuess>,
}

impl FromStr for Problem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Problem::parse.parse(s).map_err(|e| e.to_string())
    }
}

impl Problem {
    /// Every point the problem declares, origins included, in declaration order.
    pub fn points(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(Instruction::declared_point)
            .collect()
    }

    /// Points the solver has to move.
    pub fn free_points(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(|instr| match instr {
                Instruction::DeclarePoint(DeclarePoint { label }) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}
