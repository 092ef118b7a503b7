//! Parse the eqsolve text format, which describes a sketch,
//! then solve that sketch.
use eqsolve::{Config, datatypes::Point, textual::Problem};
use std::str::FromStr;

const EPSILON: f64 = 1e-5;

fn main() {
    let file = "\
# constraints
origin o1 = (0, 0)
origin o2 = (4, 0)
point p
distance(o1, p) = 5
distance(o2, p) = 3

# guesses
p roughly (3, 2)
";
    let problem = Problem::from_str(file).unwrap();
    let solution = problem.solve(Config::default()).unwrap();

    // Check the outcome.
    assert_points_eq(solution.get_point("p").unwrap(), Point { x: 4.0, y: 3.0 });
    assert_points_eq(solution.get_point("o2").unwrap(), Point { x: 4.0, y: 0.0 });
}

#[track_caller]
fn assert_points_eq(l: Point, r: Point) {
    let dist = l.euclidean_distance(r);
    assert!(dist < EPSILON, "LHS was {l}, RHS was {r}, dist was {dist}");
}
