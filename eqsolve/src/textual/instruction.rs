use crate::{Label, datatypes::Point};

/// One line of the `# constraints` section.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `origin o = (0, 0)`
    DeclareOrigin(DeclareOrigin),
    /// `point p`
    DeclarePoint(DeclarePoint),
    /// `distance(p, q) = 5`
    Distance(Distance),
}

/// A fixed point at a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareOrigin {
    #[allow(missing_docs)]
    pub label: Label,
    /// Where the origin sits. It never moves.
    pub at: Point,
}

/// A free point which the solver will move.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarePoint {
    #[allow(missing_docs)]
    pub label: Label,
}

/// The two points must be exactly this far apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    #[allow(missing_docs)]
    pub points: (Label, Label),
    #[allow(missing_docs)]
    pub distance: f64,
}

impl Instruction {
    /// Point declared by this instruction, if any.
    pub fn declared_point(&self) -> Option<&str> {
        match self {
            Instruction::DeclareOrigin(DeclareOrigin { label, .. })
            | Instruction::DeclarePoint(DeclarePoint { label }) => Some(label),
            Instruction::Distance(_) => None,
        }
    }
}
