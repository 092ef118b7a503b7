use indexmap::IndexMap;

use crate::{Config, Sketch, SolveOutcome, TextualError, datatypes::Point};

use super::{
    Problem,
    instruction::{DeclareOrigin, DeclarePoint, Distance, Instruction},
};

impl Problem {
    /// Build the sketch this problem describes.
    /// Every free point needs exactly one guess.
    pub fn to_sketch(&self) -> Result<Sketch, TextualError> {
        // Maps labels to guesses. Anything left over at the end wasn't a declared point.
        let mut guesses: IndexMap<&str, Point> = self
            .point_guesses
            .iter()
            .map(|pg| (pg.point.as_str(), pg.guess))
            .collect();

        let mut sketch = Sketch::new();
        for instr in &self.instructions {
            match instr {
                Instruction::DeclareOrigin(DeclareOrigin { label, at }) => {
                    sketch.add_origin(label, at.x, at.y)?;
                }
                Instruction::DeclarePoint(DeclarePoint { label }) => {
                    let Some(guess) = guesses.shift_remove(label.as_str()) else {
                        return Err(TextualError::MissingGuess {
                            label: label.clone(),
                        });
                    };
                    sketch.add_point(label, guess.x, guess.y)?;
                }
                Instruction::Distance(Distance {
                    points: (p0, p1),
                    distance,
                }) => {
                    sketch.set_distance(p0, p1, *distance)?;
                }
            }
        }
        if !guesses.is_empty() {
            let labels = guesses.keys().map(|label| label.to_string()).collect();
            return Err(TextualError::UnusedGuesses { labels });
        }
        Ok(sketch)
    }

    /// Build the sketch, then solve it.
    pub fn solve(&self, config: Config) -> Result<Outcome, TextualError> {
        let mut sketch = self.to_sketch()?;
        let num_vars = sketch.params().len();
        let num_eqs = sketch.equations().len();
        let SolveOutcome { iterations, .. } = sketch
            .satisfy_constraints(config)
            .map_err(TextualError::Unsolvable)?;

        let mut points = IndexMap::new();
        for label in self.points() {
            points.insert(label.to_owned(), sketch.point(label)?);
        }
        Ok(Outcome {
            iterations,
            points,
            num_vars,
            num_eqs,
        })
    }
}

/// A solved problem.
#[derive(Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub struct Outcome {
    /// How many iterations of Newton's method were required?
    pub iterations: usize,
    /// Final position of every point, origins included, in declaration order.
    pub points: IndexMap<String, Point>,
    /// Size of the system.
    pub num_vars: usize,
    /// Size of the system.
    pub num_eqs: usize,
}

impl Outcome {
    /// Final position of the given point.
    pub fn get_point(&self, label: &str) -> Option<Point> {
        self.points.get(label).copied()
    }
}
