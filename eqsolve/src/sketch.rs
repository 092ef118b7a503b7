//! Points on a plane, and distance constraints between them.
use indexmap::IndexMap;

use crate::{
    Config, Error, Expr, FailureOutcome, Label, ParameterStore, SolveOutcome, datatypes::Point,
};

/// A point in the sketch, as two expressions.
/// Origins are constants; free points reference a pair of solver parameters.
#[derive(Clone, Debug, PartialEq)]
struct SketchPoint {
    x: Expr,
    y: Expr,
}

/// Geometric sketch which builds a system of equations as constraints are added.
#[derive(Clone, Debug, Default)]
pub struct Sketch {
    points: IndexMap<Label, SketchPoint>,
    equations: Vec<Expr>,
    params: ParameterStore,
}

impl Sketch {
    /// An empty sketch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix a point at the given position. It never moves.
    pub fn add_origin(&mut self, name: &str, x: f64, y: f64) -> Result<(), Error> {
        self.check_new_point(name)?;
        self.points.insert(
            name.to_owned(),
            SketchPoint {
                x: Expr::constant(x),
                y: Expr::constant(y),
            },
        );
        Ok(())
    }

    /// Add a free point, with an initial guess for its position.
    /// Its coordinates are the parameters `{name}x` and `{name}y`.
    pub fn add_point(&mut self, name: &str, x: f64, y: f64) -> Result<(), Error> {
        self.check_new_point(name)?;
        let x_param = format!("{name}x");
        let y_param = format!("{name}y");
        self.params.add(x_param.clone(), x)?;
        self.params.add(y_param.clone(), y)?;
        self.points.insert(
            name.to_owned(),
            SketchPoint {
                x: Expr::parameter(x_param),
                y: Expr::parameter(y_param),
            },
        );
        Ok(())
    }

    fn check_new_point(&self, name: &str) -> Result<(), Error> {
        if self.points.contains_key(name) {
            return Err(Error::DuplicatePoint(name.to_owned()));
        }
        Ok(())
    }

    fn sketch_point(&self, name: &str) -> Result<&SketchPoint, Error> {
        self.points
            .get(name)
            .ok_or_else(|| Error::UndefinedPoint(name.to_owned()))
    }

    /// Constrain points `a` and `b` to be `distance` apart.
    /// Adds the equation `(Ax-Bx)^2 + (Ay-By)^2 - d^2 = 0`.
    pub fn set_distance(&mut self, a: &str, b: &str, distance: f64) -> Result<(), Error> {
        let pa = self.sketch_point(a)?;
        let pb = self.sketch_point(b)?;
        let equation = (pa.x.clone() - pb.x.clone()).square()
            + (pa.y.clone() - pb.y.clone()).square()
            - Expr::constant(distance).square();
        self.equations.push(equation);
        Ok(())
    }

    /// Move every free point so that all constraints are satisfied.
    /// On failure, the parameters keep the solver's last iterate.
    pub fn satisfy_constraints(&mut self, config: Config) -> Result<SolveOutcome, FailureOutcome> {
        crate::solve_system(&self.equations, &mut self.params, config)
    }

    /// Current value of a parameter, e.g. `Ax`.
    pub fn param(&self, name: &str) -> Result<f64, Error> {
        self.params.get(name)
    }

    /// Current position of a point.
    pub fn point(&self, name: &str) -> Result<Point, Error> {
        let p = self.sketch_point(name)?;
        Ok(Point {
            x: p.x.evaluate(self.params.vars())?,
            y: p.y.evaluate(self.params.vars())?,
        })
    }

    /// Every point's name, in the order they were added.
    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    /// The solver parameters: two per free point.
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// One equation per constraint.
    pub fn equations(&self) -> &[Expr] {
        &self.equations
    }
}
