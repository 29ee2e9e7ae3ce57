use nalgebra::Vector2;

use super::{
    base::{Error, Goal},
    controls::Controls,
    domain::{Domain, PlanarDomain},
    function::{Objective, PlanarObjective},
    trace::{Record, Trace},
};

/// Terminal state of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A termination criterion was satisfied.
    Converged,
    /// The iteration budget or the domain was exhausted before convergence.
    Exhausted,
    /// No valid starting point was found within the budget of tries.
    FailedToSeed,
}

/// Result of a one-variable search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// How the run ended.
    pub status: Status,
    /// Whether the run counts as successful. Running out of iterations is a
    /// success for some algorithms and a failure for others.
    pub success: bool,
    /// Number of records written into the trace.
    pub iterations: usize,
    /// Best estimate of the extremum location, if any.
    pub best: Option<f64>,
}

impl Outcome {
    pub(crate) fn converged(iterations: usize, best: f64) -> Self {
        Self {
            status: Status::Converged,
            success: true,
            iterations,
            best: Some(best),
        }
    }

    pub(crate) fn exhausted(iterations: usize, best: Option<f64>, success: bool) -> Self {
        Self {
            status: Status::Exhausted,
            success,
            iterations,
            best,
        }
    }

    pub(crate) fn failed_to_seed() -> Self {
        Self {
            status: Status::FailedToSeed,
            success: false,
            iterations: 0,
            best: None,
        }
    }
}

/// Point found by a two-variable search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Location.
    pub x: Vector2<f64>,
    /// Function value at the location.
    pub value: f64,
}

/// Result of a two-variable search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarOutcome {
    /// Converged if any start converged, otherwise exhausted if any start ran
    /// out of iterations, otherwise failed to seed.
    pub status: Status,
    /// Whether the run counts as successful.
    pub success: bool,
    /// Found extrema, best first for single-start methods and in the order of
    /// discovery for multi-start methods.
    pub solutions: Vec<Solution>,
}

/// Common interface for all one-variable searches.
///
/// The essential method is [`search`](Search::search) which runs the whole
/// iterative process on the domain and appends a record for every iteration
/// into the trace.
pub trait Search {
    /// Name of the algorithm.
    const NAME: &'static str;

    /// Record written in every iteration.
    type Record: Record;

    /// Runs the search.
    ///
    /// Configuration errors and precondition violations are returned before
    /// anything is appended into the trace.
    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error>;
}

/// Common interface for two-variable searches. See [`Search`].
pub trait PlanarSearch {
    /// Name of the algorithm.
    const NAME: &'static str;

    /// Record written in every iteration.
    type Record: Record;

    /// Runs the search.
    fn search<F: PlanarObjective>(
        &mut self,
        f: &F,
        dom: &PlanarDomain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<PlanarOutcome, Error>;
}
