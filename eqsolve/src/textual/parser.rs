use super::{
    PointGuess, Problem,
    instruction::{DeclareOrigin, DeclarePoint, Distance, Instruction},
};
use crate::{Label, datatypes::Point};
use winnow::{
    Result as WResult,
    ascii::{alphanumeric1, multispace0, newline, space0, space1},
    combinator::{alt, delimited, eof, separated, separated_pair},
    prelude::*,
};

impl Problem {
    /// Parse a whole problem: a `# constraints` section then a `# guesses` section.
    pub fn parse(i: &mut &str) -> WResult<Self> {
        blank_lines(i);
        constraint_header.parse_next(i)?;
        let instructions: Vec<_> =
            separated(1.., Instruction::parse, end_of_line).parse_next(i)?;
        blank_lines(i);
        guesses_header.parse_next(i)?;
        let point_guesses: Vec<_> =
            separated(0.., PointGuess::parse, end_of_line).parse_next(i)?;
        blank_lines(i);
        eof.parse_next(i)?;
        Ok(Self {
            instructions,
            point_guesses,
        })
    }
}

impl PointGuess {
    /// Parse a guess like `p roughly (0, 0)`.
    pub fn parse(i: &mut &str) -> WResult<Self> {
        ignore_ws(i);
        (parse_label, space1, "roughly", space1, parse_point)
            .map(|(point, _, _, _, guess)| Self { point, guess })
            .parse_next(i)
    }
}

fn constraint_header(i: &mut &str) -> WResult<()> {
    ('#', space0, "constraints", end_of_line)
        .void()
        .parse_next(i)
}

fn guesses_header(i: &mut &str) -> WResult<()> {
    ('#', space0, "guesses", end_of_line).void().parse_next(i)
}

impl Instruction {
    fn parse(i: &mut &str) -> WResult<Self> {
        ignore_ws(i);
        alt((
            DeclareOrigin::parse.map(Instruction::DeclareOrigin),
            DeclarePoint::parse.map(Instruction::DeclarePoint),
            Distance::parse.map(Instruction::Distance),
        ))
        .parse_next(i)
    }
}

impl DeclareOrigin {
    // origin o = (0, 0)
    fn parse(i: &mut &str) -> WResult<Self> {
        ("origin", space1, parse_label, equals, parse_point)
            .map(|(_, _, label, _, at)| Self { label, at })
            .parse_next(i)
    }
}

impl DeclarePoint {
    // point p
    fn parse(i: &mut &str) -> WResult<Self> {
        ("point", space1, parse_label)
            .map(|(_, _, label)| Self { label })
            .parse_next(i)
    }
}

impl Distance {
    // distance(p, q) = 5
    fn parse(i: &mut &str) -> WResult<Self> {
        ("distance", space0, parse_label_pair, equals, parse_number)
            .map(|(_, _, points, _, distance)| Self { points, distance })
            .parse_next(i)
    }
}

/// Trailing spaces, then a newline.
fn end_of_line(i: &mut &str) -> WResult<()> {
    (space0, newline).void().parse_next(i)
}

fn equals(i: &mut &str) -> WResult<()> {
    delimited(space0, '=', space0).void().parse_next(i)
}

fn ws(i: &mut &str) -> WResult<()> {
    space0.parse_next(i).map(|_| ())
}

fn ignore_ws(i: &mut &str) {
    let _ = ws.parse_next(i);
}

fn blank(i: &mut &str) -> WResult<()> {
    multispace0.parse_next(i).map(|_| ())
}

fn blank_lines(i: &mut &str) {
    let _ = blank.parse_next(i);
}

fn parse_label(i: &mut &str) -> WResult<Label> {
    alphanumeric1.map(|s: &str| s.to_owned()).parse_next(i)
}

/// `(a, b)`, where both are labels.
fn parse_label_pair(i: &mut &str) -> WResult<(Label, Label)> {
    delimited(
        ('(', space0),
        separated_pair(parse_label, (space0, ',', space0), parse_label),
        (space0, ')'),
    )
    .parse_next(i)
}

/// `(x, y)`, where both are numbers.
fn parse_point(i: &mut &str) -> WResult<Point> {
    delimited(
        ('(', space0),
        separated_pair(parse_number, (space0, ',', space0), parse_number),
        (space0, ')'),
    )
    .map(|(x, y)| Point { x, y })
    .parse_next(i)
}

fn parse_number(i: &mut &str) -> WResult<f64> {
    winnow::ascii::float.parse_next(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point() {
        let mut i = "(1, -2.5)";
        assert_eq!(parse_point(&mut i).unwrap(), Point { x: 1.0, y: -2.5 });
        assert!(i.is_empty());
        let mut i = "( 3 ,4 )";
        assert_eq!(parse_point(&mut i).unwrap(), Point { x: 3.0, y: 4.0 });
    }

    #[test]
    fn test_instructions() {
        assert_eq!(
            Instruction::parse(&mut "  origin o1 = (10, 0)").unwrap(),
            Instruction::DeclareOrigin(DeclareOrigin {
                label: "o1".to_owned(),
                at: Point { x: 10.0, y: 0.0 },
            })
        );
        assert_eq!(
            Instruction::parse(&mut "point a").unwrap(),
            Instruction::DeclarePoint(DeclarePoint {
                label: "a".to_owned()
            })
        );
        assert_eq!(
            Instruction::parse(&mut "distance(o1, a) = 11.18").unwrap(),
            Instruction::Distance(Distance {
                points: ("o1".to_owned(), "a".to_owned()),
                distance: 11.18,
            })
        );
    }

    #[test]
    fn test_bad_instruction() {
        assert!(Instruction::parse(&mut "angle(a, b) = 90").is_err());
        assert!(Instruction::parse(&mut "point").is_err());
        assert!(Instruction::parse(&mut "distance(a) = 1").is_err());
    }

    #[test]
    fn test_guess() {
        assert_eq!(
            PointGuess::parse(&mut "a roughly (5, 3)").unwrap(),
            PointGuess {
                point: "a".to_owned(),
                guess: Point { x: 5.0, y: 3.0 },
            }
        );
    }
}
