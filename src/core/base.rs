use thiserror::Error;

/// Direction of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    /// Look for a minimum.
    #[default]
    Minimize,
    /// Look for a maximum.
    Maximize,
}

impl Goal {
    /// Maps a function value so that smaller is always better.
    ///
    /// The value is returned unchanged for minimization and negated for
    /// maximization. Algorithms compare oriented values which makes them
    /// agnostic to the goal.
    pub fn oriented(&self, value: f64) -> f64 {
        match self {
            Goal::Minimize => value,
            Goal::Maximize => -value,
        }
    }

    /// Returns `true` if `a` is strictly better than `b` with respect to the
    /// goal.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.oriented(a) < self.oriented(b)
    }

    /// Returns a human-readable name of the extremum kind.
    pub fn extremum(&self) -> &'static str {
        match self {
            Goal::Minimize => "minimum",
            Goal::Maximize => "maximum",
        }
    }
}

/// Error encountered while evaluating an objective.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// An invalid value (NaN, positive or negative infinity) of the function
    /// value occurred.
    #[error("invalid value encountered")]
    InvalidValue,
    /// A custom error specific to the objective.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Invalid setup of a search, detected before the first iteration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// None of delta, epsilon or maximum number of iterations was given.
    #[error("must provide either delta, epsilon or max iterations")]
    NoControls,
    /// The algorithm needs a step size.
    #[error("{0} requires delta")]
    MissingDelta(&'static str),
    /// The algorithm needs a tolerance.
    #[error("{0} requires epsilon")]
    MissingEpsilon(&'static str),
    /// Step size is zero or not finite.
    #[error("invalid delta {0}")]
    InvalidDelta(f64),
    /// Tolerance is not positive or not finite.
    #[error("invalid epsilon {0}")]
    InvalidEpsilon(f64),
    /// Lower bound is not less than upper bound, or a bound is not finite.
    #[error("invalid domain [{lower}, {upper}]")]
    InvalidDomain {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Expansion coefficient of simplex search must be greater than 1.
    #[error("gamma must be greater than 1, got {0}")]
    InvalidGamma(f64),
    /// Contraction coefficient of simplex search must lie in (0, 1).
    #[error("beta must lie between 0 and 1, got {0}")]
    InvalidBeta(f64),
    /// Simplex search needs at least one start.
    #[error("number of restarts must be positive")]
    NoRestarts,
    /// Fibonacci numbers are defined only for non-negative indices.
    #[error("cannot find fibonacci number of negative index {0}")]
    NegativeFibonacci(i64),
    /// Fibonacci number does not fit into a finite float.
    #[error("fibonacci number of index {0} is too large")]
    FibonacciOverflow(i64),
    /// No algorithm is registered under the name.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
}

/// Error returned from searches.
///
/// Seeding failures and running out of iterations are not errors. They are
/// reported through [`Status`](super::Status) of the outcome together with the
/// partial trace.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// The objective could not be evaluated.
    #[error("{0}")]
    Problem(#[from] ProblemError),
    /// The initial bracket does not enclose a stationary point.
    #[error(
        "bracket [{lower}, {upper}] must satisfy f'(lower) < 0 and f'(upper) > 0, got {lower_slope} and {upper_slope}"
    )]
    Precondition {
        /// Lower end of the bracket.
        lower: f64,
        /// Upper end of the bracket.
        upper: f64,
        /// Oriented derivative at the lower end.
        lower_slope: f64,
        /// Oriented derivative at the upper end.
        upper_slope: f64,
    },
    /// Second derivative is too close to zero to take a Newton step.
    #[error("second derivative {curvature} at x = {x} is too close to zero")]
    VanishingCurvature {
        /// Point of evaluation.
        x: f64,
        /// Value of the second derivative.
        curvature: f64,
    },
}
