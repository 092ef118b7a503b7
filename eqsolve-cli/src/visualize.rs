use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use eqsolve::datatypes::Point;

const POINT_COLOR: &str = "0x3C7A89";
const DISTANCE_COLOR: &str = "0x9FA2B2";

pub enum GnuplotMode {
    PopWindow,
    WriteFile(String),
}

/// Write a gnuplot program to show these points in a 2D scatter plot,
/// with a line segment for each distance constraint.
pub fn gnuplot(
    chart_name: &str,
    points: &[(String, Point)],
    distances: &[(Point, Point)],
    mode: GnuplotMode,
) -> String {
    let all_points = points
        .iter()
        .map(|(_label, Point { x, y })| format!("{x:.2} {y:.2} {POINT_COLOR}"))
        .collect::<Vec<_>>()
        .join("\n");
    let all_labels = points
        .iter()
        .map(|(label, Point { x, y })| {
            format!("set label \"{label}\\n({x:.2}, {y:.2})\" at {x:.2},{y:.2} offset 1,1")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let all_distances = distances
        .iter()
        .map(|(a, b)| {
            let length = a.euclidean_distance(*b);
            let mx = (a.x + b.x) / 2.0;
            let my = (a.y + b.y) / 2.0;
            format!(
                "set arrow from {},{} to {},{} nohead lw 1 lc rgb {DISTANCE_COLOR}\nset label \"{length:.2}\" at {mx:.2},{my:.2} center",
                a.x, a.y, b.x, b.y
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    // Get the furthest X and Y component in each direction,
    // so we can establish the span of the graph.
    let padding = 1.0;
    let xs = points.iter().map(|(_, p)| p.x);
    let ys = points.iter().map(|(_, p)| p.y);
    let min_x = xs.clone().fold(f64::INFINITY, f64::min) - padding;
    let max_x = xs.fold(f64::NEG_INFINITY, f64::max) + padding;
    let min_y = ys.clone().fold(f64::INFINITY, f64::min) - padding;
    let max_y = ys.fold(f64::NEG_INFINITY, f64::max) + padding;

    let display = match mode {
        GnuplotMode::PopWindow => "set term qt font \"Verdana\"\n".to_owned(),
        GnuplotMode::WriteFile(output_path) => format!(
            "set terminal pngcairo size 600,600 enhanced font 'Verdana,12'\nset output \"{output_path}\"\n"
        ),
    };
    format!(
        "\
{display}
# `noenhance` stops _ in path names being interpreted as subscript
set title \"Solution to {chart_name}\" noenhance
set xlabel \"X\"
set ylabel \"Y\"
set grid
set size ratio -1
unset key

{all_distances}

set xrange [{min_x}:{max_x}]
set yrange [{min_y}:{max_y}]

# Add labels for each point
{all_labels}

# Plot the points
plot \"-\" using 1:2:3 with points pointtype 7 pointsize 2 lc rgb variable title \"Points\"
{all_points}
e
"
    )
}

/// Pipe a program into `gnuplot` and wait for it to finish.
pub fn run_gnuplot(program: &str) -> Result<()> {
    let mut child = Command::new("gnuplot")
        .args(["-persist", "-"])
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to start gnuplot")?;
    {
        let stdin = child
            .stdin
            .as_mut()
            .context("failed to open gnuplot's stdin")?;
        stdin
            .write_all(program.as_bytes())
            .context("failed to write to gnuplot's stdin")?;
    }
    let status = child.wait().context("gnuplot did not run")?;
    anyhow::ensure!(status.success(), "gnuplot exited with {status}");
    Ok(())
}
