//! A basic example for how to use the equation solver.
use eqsolve::{Config, Expr, ParameterStore, solve_system};

fn main() {
    // The unknowns, and initial guesses for their values.
    let mut params = ParameterStore::new();
    params.add("x", 1.0).unwrap();
    params.add("y", 1.0).unwrap();

    // Each equation should equal zero once it's solved.
    let x = || Expr::parameter("x");
    let y = || Expr::parameter("y");
    let equations = [
        // x^2 + y = 0
        x().square() + y(),
        // y^2 + x - 1 = 0
        y().square() + x() - Expr::constant(1.0),
    ];

    // Run the solver!
    let outcome = solve_system(&equations, &mut params, Config::default());

    // Check the outcome.
    match outcome {
        Ok(solution) => {
            println!("Converged after {} iterations", solution.iterations());
            print!("{params}");
        }
        Err(e) => {
            eprintln!("Could not solve: {e}");
            std::process::exit(1);
        }
    }
}
