use crate::{Error, vector::Vector};

/// Data from a successful solved system.
#[derive(Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub struct SolveOutcome {
    /// How many iterations of Newton's method were required?
    pub(crate) iterations: usize,
    /// Each parameter's final value, in the parameter store's order.
    pub(crate) final_values: Vector,
}

impl SolveOutcome {
    /// How many iterations of Newton's method were required?
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Each parameter's final value, in the parameter store's order.
    pub fn final_values(&self) -> &Vector {
        &self.final_values
    }
}

/// Returned when eqsolve could not solve a system.
#[derive(Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub struct FailureOutcome {
    /// The error that stopped the system from being solved.
    pub error: Error,
    /// Size of the system.
    pub num_vars: usize,
    /// Size of the system.
    pub num_eqs: usize,
}

impl FailureOutcome {
    /// The error that stopped the system from being solved.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Size of the system.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Size of the system.
    pub fn num_eqs(&self) -> usize {
        self.num_eqs
    }

    /// More equations than parameters?
    pub fn is_overconstrained(&self) -> bool {
        self.num_eqs > self.num_vars
    }
}

impl std::fmt::Display for FailureOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} equations, {} parameters)",
            self.error, self.num_eqs, self.num_vars
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overconstrained() {
        // Test the is_overconstrained getter does what we expect.
        let fo = FailureOutcome {
            error: Error::DidNotConverge { iterations: 100 },
            num_vars: 2,
            num_eqs: 3,
        };
        assert!(fo.is_overconstrained());
        assert_eq!(
            fo.to_string(),
            "Could not find a solution in 100 iterations (3 equations, 2 parameters)"
        );
    }
}
