use indexmap::{IndexMap, IndexSet};

use crate::Error;

/// Name of a parameter.
pub type Label = String;

/// The value of each parameter an expression could reference.
/// Insertion order is preserved, and is meaningful to the solver.
pub type Vars = IndexMap<Label, f64>;

/// Symbolic scalar expression.
///
/// Expressions are immutable trees, built bottom-up with the `+`, `-`, `*` and unary `-`
/// operators plus [`Expr::square`]. Every combinator allocates a new node which owns its
/// operands. Nothing is ever simplified: `x^2` stays a square node even if `x` is a constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A fixed number.
    Constant(f64),
    /// A named parameter, looked up when the expression is evaluated.
    Parameter(Label),
    /// `lhs + rhs`
    Add(Box<Expr>, Box<Expr>),
    /// `lhs - rhs`
    Subtract(Box<Expr>, Box<Expr>),
    /// `lhs * rhs`
    Multiply(Box<Expr>, Box<Expr>),
    /// `operand^2`
    Square(Box<Expr>),
    /// `-operand`
    Negate(Box<Expr>),
}

impl Expr {
    /// Simplest expression: a constant.
    /// Does not depend on any parameters.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Expression with a single parameter, e.g. `x`.
    pub fn parameter(name: impl Into<Label>) -> Self {
        Self::Parameter(name.into())
    }

    /// `self^2`
    pub fn square(self) -> Self {
        Self::Square(Box::new(self))
    }

    /// Compute the value of this expression, looking up parameters in `vars`.
    pub fn evaluate(&self, vars: &Vars) -> Result<f64, Error> {
        let value = match self {
            Expr::Constant(value) => *value,
            Expr::Parameter(name) => vars
                .get(name)
                .copied()
                .ok_or_else(|| Error::UnboundParameter(name.clone()))?,
            Expr::Add(lhs, rhs) => lhs.evaluate(vars)? + rhs.evaluate(vars)?,
            Expr::Subtract(lhs, rhs) => lhs.evaluate(vars)? - rhs.evaluate(vars)?,
            Expr::Multiply(lhs, rhs) => lhs.evaluate(vars)? * rhs.evaluate(vars)?,
            Expr::Square(operand) => {
                let v = operand.evaluate(vars)?;
                v * v
            }
            Expr::Negate(operand) => -operand.evaluate(vars)?,
        };
        Ok(value)
    }

    /// Symbolic partial derivative of this expression with respect to the parameter `wrt`.
    ///
    /// Negation has no derivative rule, so differentiating through a [`Expr::Negate`]
    /// node fails with [`Error::UnsupportedOperation`].
    pub fn partial_derivative(&self, wrt: &str) -> Result<Expr, Error> {
        let derivative = match self {
            Expr::Constant(_) => Expr::constant(0.0),
            Expr::Parameter(name) if name == wrt => Expr::constant(1.0),
            Expr::Parameter(_) => Expr::constant(0.0),
            Expr::Add(lhs, rhs) => lhs.partial_derivative(wrt)? + rhs.partial_derivative(wrt)?,
            Expr::Subtract(lhs, rhs) => {
                lhs.partial_derivative(wrt)? - rhs.partial_derivative(wrt)?
            }
            // Product rule: d(LR) = dL*R + L*dR
            Expr::Multiply(lhs, rhs) => {
                let d_lhs = lhs.partial_derivative(wrt)?;
                let d_rhs = rhs.partial_derivative(wrt)?;
                d_lhs * (**rhs).clone() + (**lhs).clone() * d_rhs
            }
            // Chain rule, keeping the operand order 2*L*dL.
            Expr::Square(operand) => {
                Expr::constant(2.0) * (**operand).clone() * operand.partial_derivative(wrt)?
            }
            Expr::Negate(_) => {
                return Err(Error::UnsupportedOperation {
                    operation: "negate",
                });
            }
        };
        Ok(derivative)
    }

    /// Every distinct parameter this expression references, in order of first appearance.
    pub fn parameters(&self) -> Vec<&str> {
        let mut found = IndexSet::new();
        self.collect_parameters(&mut found);
        found.into_iter().collect()
    }

    fn collect_parameters<'a>(&'a self, found: &mut IndexSet<&'a str>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Parameter(name) => {
                found.insert(name.as_str());
            }
            Expr::Add(lhs, rhs) | Expr::Subtract(lhs, rhs) | Expr::Multiply(lhs, rhs) => {
                lhs.collect_parameters(found);
                rhs.collect_parameters(found);
            }
            Expr::Square(operand) | Expr::Negate(operand) => operand.collect_parameters(found),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::parameter(name)
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Subtract(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Multiply(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Negate(Box::new(self))
    }
}

/// Infix form, e.g. `16*B+B^2`.
/// No parentheses are inserted, so the output is not necessarily reparsable.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Constant(value) if value.fract() == 0.0 => write!(f, "{value:.0}"),
            Expr::Constant(value) => write!(f, "{value:.2}"),
            Expr::Parameter(name) => write!(f, "{name}"),
            Expr::Add(lhs, rhs) => write!(f, "{lhs}+{rhs}"),
            Expr::Subtract(lhs, rhs) => write!(f, "{lhs}-{rhs}"),
            Expr::Multiply(lhs, rhs) => write!(f, "{lhs}*{rhs}"),
            Expr::Square(operand) => write!(f, "{operand}^2"),
            Expr::Negate(operand) => write!(f, "-{operand}"),
        }
    }
}
