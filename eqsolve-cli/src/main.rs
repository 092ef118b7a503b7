use std::{
    hint::black_box,
    io::{self, Read},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use eqsolve::{
    Config, FailureOutcome, TextualError,
    datatypes::Point,
    textual::{Distance, Instruction, Outcome, Problem},
};

use crate::visualize::GnuplotMode;

mod visualize;

const NUM_ITERS_BENCHMARK: u32 = 100;

#[derive(Parser)]
#[command(name = "eqsolve", version, about, long_about = None)]
struct Cli {
    /// Path to the problem file.
    /// Use '-' for stdin.
    #[arg(short = 'f', long)]
    filepath: PathBuf,

    /// Open the results in gnuplot if solve was successful.
    #[arg(long, default_value_t = false)]
    gnuplot: bool,

    /// Save results as a PNG (via gnuplot) if solve was successful.
    #[arg(short = 'o', long = "gnuplot-png-path")]
    gnuplot_png_path: Option<PathBuf>,

    /// Show the final values assigned to each point.
    #[arg(long = "show-points")]
    show_points: bool,

    /// Give up after this many Newton iterations.
    #[arg(long, default_value_t = Config::default().max_iterations)]
    max_iterations: usize,

    /// Converged once every component of the Newton step is at most this big.
    #[arg(long, default_value_t = Config::default().step_tolerance)]
    tolerance: f64,
}

impl Cli {
    fn chart_name(&self) -> String {
        if self.filepath.display().to_string() == "-" {
            "eqsolve".to_owned()
        } else {
            self.filepath.display().to_string()
        }
    }

    fn config(&self) -> Config {
        Config::default()
            .with_max_iterations(self.max_iterations)
            .with_step_tolerance(self.tolerance)
    }
}

/// A solved problem, plus what's needed to draw it.
#[derive(Debug)]
struct Solution {
    outcome: Outcome,
    /// Endpoints of each distance constraint.
    distances: Vec<(Point, Point)>,
    /// Mean time taken per solve.
    duration: Duration,
}

fn main() {
    let cli = Cli::parse();
    let soln = match main_inner(&cli) {
        Ok(soln) => soln,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    let soln = match soln {
        Ok(o) => o,
        Err(outcome) => {
            print_failure_output(&outcome);
            std::process::exit(1);
        }
    };
    if let Err(e) = handle_output(&soln, &cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn handle_output(soln: &Solution, cli: &Cli) -> anyhow::Result<()> {
    print_output(soln, cli.show_points);
    let points: Vec<_> = soln
        .outcome
        .points
        .iter()
        .map(|(label, point)| (label.clone(), *point))
        .collect();
    if let Some(ref p) = cli.gnuplot_png_path {
        let output_path = p.display().to_string();
        let mut program = visualize::gnuplot(
            &cli.chart_name(),
            &points,
            &soln.distances,
            GnuplotMode::WriteFile(output_path),
        );
        program.push_str("unset output\n"); // closes file
        visualize::run_gnuplot(&program)?;
    }
    if cli.gnuplot {
        let program = visualize::gnuplot(
            &cli.chart_name(),
            &points,
            &soln.distances,
            GnuplotMode::PopWindow,
        );
        visualize::run_gnuplot(&program)?;
    }
    Ok(())
}

type RunResult = Result<Solution, FailureOutcome>;

fn main_inner(cli: &Cli) -> anyhow::Result<RunResult> {
    let problem_txt = read_problem(cli)?;
    let parsed = Problem::from_str(&problem_txt).map_err(anyhow::Error::msg)?;
    let config = cli.config();

    // Ensure problem can be solved
    let outcome = match parsed.solve(config) {
        Ok(o) => o,
        Err(TextualError::Unsolvable(failure)) => return Ok(Err(failure)),
        Err(e) => return Err(e.into()),
    };

    // It succeeded. Benchmark its perf
    let duration = mean_solve_time(&parsed, config);

    let distances = parsed
        .instructions
        .iter()
        .filter_map(|instr| match instr {
            Instruction::Distance(Distance { points: (a, b), .. }) => {
                Some((*outcome.points.get(a)?, *outcome.points.get(b)?))
            }
            _ => None,
        })
        .collect();
    Ok(Ok(Solution {
        outcome,
        distances,
        duration,
    }))
}

/// Mean time of one solve, over `NUM_ITERS_BENCHMARK` timed solves.
fn mean_solve_time(problem: &Problem, config: Config) -> Duration {
    let now = std::time::Instant::now();
    for _ in 0..NUM_ITERS_BENCHMARK {
        let _ = black_box(problem.solve(config));
    }
    now.elapsed() / NUM_ITERS_BENCHMARK
}

/// Prints the output nicely to stdout.
fn print_output(soln: &Solution, show_points: bool) {
    let Outcome {
        iterations,
        points,
        num_vars,
        num_eqs,
        ..
    } = &soln.outcome;
    print_problem_size(*num_vars, *num_eqs);
    println!("Iterations needed: {iterations}");
    print_performance(soln.duration);
    if show_points {
        println!("Points:");
        for (label, Point { x, y }) in points {
            println!("\t{label}: ({x:.2}, {y:.2})");
        }
    }
}

fn print_performance(duration: Duration) {
    use colored::Colorize;
    let time = format!("{}μs", duration.as_micros());
    println!("Solved in {time} (mean over {NUM_ITERS_BENCHMARK} iterations)");
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        return;
    }
    let solves_per_second = (1.0 / secs) as u64;
    let solves_per_second = if solves_per_second <= 60 {
        solves_per_second.to_string().red()
    } else {
        solves_per_second.to_string().normal()
    };
    println!("i.e. {solves_per_second} solves per second");
}

fn print_problem_size(num_vars: usize, num_eqs: usize) {
    use colored::Colorize;
    print!("Problem size: ");
    if num_vars != num_eqs {
        let l = format!("{num_eqs} rows, {num_vars} vars");
        println!("{}", l.yellow());
    } else {
        println!("{num_eqs} rows, {num_vars} vars");
    }
}

fn print_failure_output(outcome: &FailureOutcome) {
    use colored::Colorize;
    print_problem_size(outcome.num_vars(), outcome.num_eqs());
    eprintln!("{}: {}", "Could not solve system".red(), outcome.error());
    eprintln!("{}", failure_hint(outcome));
}

fn failure_hint(outcome: &FailureOutcome) -> &'static str {
    if outcome.is_overconstrained() {
        "Your system might be overconstrained. Try removing constraints."
    } else if outcome.num_eqs() < outcome.num_vars() {
        "Your system is underconstrained. Try adding constraints."
    } else {
        "You might have contradictory constraints."
    }
}

/// Read the problem text from a file or stdin, depending on user args.
/// They pass a filename, or '-' for stdin, as the first CLI arg.
fn read_problem(cli: &Cli) -> anyhow::Result<String> {
    // Read from file
    if cli.filepath != PathBuf::from("-") {
        return std::fs::read_to_string(&cli.filepath)
            .with_context(|| format!("could not read {}", cli.filepath.display()));
    }

    // Read from stdin
    let mut problem_txt = String::with_capacity(100);
    let mut stdin = io::stdin();
    stdin
        .read_to_string(&mut problem_txt)
        .context("could not read the problem from stdin")?;
    Ok(problem_txt)
}

#[cfg(test)]
mod tests {
    use std::{
        process::{Command, Stdio},
        str::FromStr,
        time::Instant,
    };

    use eqsolve::{Config, Error, textual::Problem};

    use crate::{
        Cli, NUM_ITERS_BENCHMARK, failure_hint, handle_output, main_inner, mean_solve_time,
    };

    fn cli_for(case: &str) -> Cli {
        Cli {
            filepath: format!("../test_cases/{case}/problem.txt").into(),
            gnuplot: Default::default(),
            gnuplot_png_path: None,
            show_points: true,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }

    #[test]
    fn test_solvable_inner() {
        for case in [
            "tiny",
            "circle_intersection",
            "triangle_chain",
            "overconstrained",
        ] {
            let cli = cli_for(case);
            let soln = main_inner(&cli).unwrap().unwrap();
            assert!(!soln.outcome.points.is_empty());
            handle_output(&soln, &cli).unwrap();
        }
    }

    #[test]
    fn test_distances_for_plot() {
        let soln = main_inner(&cli_for("triangle_chain")).unwrap().unwrap();
        assert_eq!(soln.distances.len(), 6);
        for (a, b) in &soln.distances {
            assert!(a.euclidean_distance(*b) > 1.0);
        }
    }

    #[test]
    fn test_unsolvable_inner() {
        let failure = main_inner(&cli_for("underconstrained")).unwrap().unwrap_err();
        assert_eq!(
            failure.error,
            Error::Underdetermined {
                equations: 1,
                unknowns: 2
            }
        );
        assert_eq!(
            failure_hint(&failure),
            "Your system is underconstrained. Try adding constraints."
        );

        let mut cli = cli_for("inconsistent");
        cli.max_iterations = 10;
        let failure = main_inner(&cli).unwrap().unwrap_err();
        assert_eq!(failure.error, Error::DidNotConverge { iterations: 10 });
        assert_eq!(
            failure_hint(&failure),
            "You might have contradictory constraints."
        );
    }

    #[test]
    fn test_mean_solve_time() {
        let txt = std::fs::read_to_string("../test_cases/tiny/problem.txt").unwrap();
        let problem = Problem::from_str(&txt).unwrap();
        let start = Instant::now();
        let mean = mean_solve_time(&problem, Config::default());
        let total = start.elapsed();
        // Only the timed loop counts, so the mean can't exceed total / iterations.
        assert!(mean <= total / NUM_ITERS_BENCHMARK);
    }

    #[test]
    fn test_missing_file() {
        let err = main_inner(&cli_for("does_not_exist")).err().unwrap();
        assert!(err.to_string().contains("could not read"));
    }

    #[test]
    fn test_tiny() {
        let out = Command::new("cargo")
            .args([
                "run",
                "--quiet",
                "--",
                "-f",
                "../test_cases/tiny/problem.txt",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
            .wait_with_output()
            .unwrap();
        assert!(out.status.success());
        let stdout = String::from_utf8(out.stdout).unwrap();
        assert!(stdout.contains("Problem size: 2 rows, 2 vars"));
    }

    #[test]
    fn test_inconsistent_exit_code() {
        let out = Command::new("cargo")
            .args([
                "run",
                "--quiet",
                "--",
                "-f",
                "../test_cases/inconsistent/problem.txt",
                "--max-iterations",
                "5",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
            .wait_with_output()
            .unwrap();
        assert!(!out.status.success());
        let stderr = String::from_utf8(out.stderr).unwrap();
        assert!(stderr.contains("Could not find a solution in 5 iterations"));
    }
}
