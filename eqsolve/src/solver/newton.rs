use log::{debug, info, warn};

use crate::{Config, Error, ParameterStore, linalg};

use super::{Model, evaluate_system};

#[derive(Debug)]
pub(crate) struct SuccessfulSolve {
    pub iterations: usize,
}

impl Model<'_> {
    /// Newton-Raphson: repeatedly solve `J d = F` and step `x <- x - d`
    /// until the step is within tolerance.
    /// On failure, `params` holds the last iterate.
    pub fn solve_newton_raphson(
        &self,
        params: &mut ParameterStore,
        config: Config,
    ) -> Result<SuccessfulSolve, Error> {
        for this_iteration in 0..config.max_iterations {
            let jacobian = self.jacobian.evaluate(params.vars())?;
            let residual = evaluate_system(self.equations, params.vars())?;

            // Non-square Jacobians are handled by the linear solver:
            // least squares when there are extra equations, an error when there are too few.
            let step = linalg::solve(jacobian, &residual)?.into_solution()?;
            let step_inf_norm = step.max_abs();
            debug!(
                "Newton iteration {this_iteration}: |F| = {:e}, |d| = {step_inf_norm:e}",
                residual.max_abs()
            );

            // fmax skips NaN, so a NaN step would otherwise look converged.
            if step.iter().any(|d| d.is_nan()) {
                warn!("Newton step became NaN on iteration {this_iteration}");
                return Err(Error::DidNotConverge {
                    iterations: this_iteration + 1,
                });
            }
            if step_inf_norm <= config.step_tolerance {
                let iterations = this_iteration + 1;
                info!("Converged after {iterations} iterations");
                return Ok(SuccessfulSolve { iterations });
            }

            let next = params.as_vector().subtract(&step)?;
            params.apply_vector(&next)?;
        }
        warn!(
            "Did not converge after {} iterations, last iterate was {}",
            config.max_iterations,
            params.as_vector()
        );
        Err(Error::DidNotConverge {
            iterations: config.max_iterations,
        })
    }
}
