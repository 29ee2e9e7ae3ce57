//! High-level API for running one-variable searches by name.
//!
//! The [`Algorithm`] registry maps the command-line names of the
//! one-variable searches to their implementations and column schemas. The
//! [`run`] function builds the domain from plain bounds, validates the
//! controls, runs the selected search and returns its outcome together with
//! the trace in the [table](crate::Table) form expected by reporters.
//!
//! ```rust
//! use extremum::driver::{self, Algorithm};
//! use extremum::{Controls, Goal};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let f = |x: f64| x.powi(2) / 2.0 + 125.0 / x;
//! let algorithm: Algorithm = "golden_section_search".parse().unwrap();
//! let controls = Controls::new().with_epsilon(0.01);
//!
//! let (outcome, table) = driver::run(
//!     algorithm,
//!     &f,
//!     1,
//!     10,
//!     &controls,
//!     Goal::Minimize,
//!     StdRng::seed_from_u64(0),
//! )
//! .unwrap();
//!
//! assert!(outcome.success);
//! assert_eq!(table.header, algorithm.header());
//! println!("{}", table);
//! ```

use std::{fmt, str::FromStr};

use log::debug;
use rand::Rng;

use crate::{
    algo::{
        bisection::BisectionRecord, bounding_phase::BoundingPhaseRecord,
        exhaustive::ExhaustiveRecord, fibonacci::FibonacciRecord,
        golden_section::GoldenSectionRecord, interval_halving::IntervalHalvingRecord,
        newton_raphson::NewtonRaphsonRecord, Bisection, BoundingPhase, ExhaustiveSearch,
        FibonacciSearch, GoldenSection, IntervalHalving, NewtonRaphson,
    },
    core::{
        ConfigError, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Table,
        Trace,
    },
};

/// One-variable algorithms available by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// [`ExhaustiveSearch`].
    ExhaustiveSearch,
    /// [`BoundingPhase`].
    BoundingPhase,
    /// [`IntervalHalving`].
    IntervalHalving,
    /// [`FibonacciSearch`].
    FibonacciSearch,
    /// [`GoldenSection`].
    GoldenSectionSearch,
    /// [`Bisection`].
    Bisection,
    /// [`NewtonRaphson`].
    NewtonRaphson,
}

impl Algorithm {
    /// All registered algorithms.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::ExhaustiveSearch,
        Algorithm::BoundingPhase,
        Algorithm::IntervalHalving,
        Algorithm::FibonacciSearch,
        Algorithm::GoldenSectionSearch,
        Algorithm::Bisection,
        Algorithm::NewtonRaphson,
    ];

    /// Name under which the algorithm is registered.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::ExhaustiveSearch => "exhaustive_search",
            Algorithm::BoundingPhase => "bounding_phase",
            Algorithm::IntervalHalving => "interval_halving",
            Algorithm::FibonacciSearch => "fibonacci_search",
            Algorithm::GoldenSectionSearch => "golden_section_search",
            Algorithm::Bisection => "bisection",
            Algorithm::NewtonRaphson => "newton_raphson",
        }
    }

    /// Column names of the trace produced by the algorithm.
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Algorithm::ExhaustiveSearch => ExhaustiveRecord::HEADER,
            Algorithm::BoundingPhase => BoundingPhaseRecord::HEADER,
            Algorithm::IntervalHalving => IntervalHalvingRecord::HEADER,
            Algorithm::FibonacciSearch => FibonacciRecord::HEADER,
            Algorithm::GoldenSectionSearch => GoldenSectionRecord::HEADER,
            Algorithm::Bisection => BisectionRecord::HEADER,
            Algorithm::NewtonRaphson => NewtonRaphsonRecord::HEADER,
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs given algorithm on the interval `[min, max]`.
///
/// The random number generator is used only by the algorithms with a random
/// starting point ([`BoundingPhase`] and [`NewtonRaphson`]).
pub fn run<F, B, R>(
    algorithm: Algorithm,
    f: &F,
    min: B,
    max: B,
    controls: &Controls,
    goal: Goal,
    rng: R,
) -> Result<(Outcome, Table), Error>
where
    F: Objective,
    B: Into<f64>,
    R: Rng,
{
    let dom = Domain::new(min.into(), max.into())?;
    controls.validate()?;

    debug!(
        "running {} for {} on [{}, {}]",
        algorithm,
        goal.extremum(),
        dom.lower(),
        dom.upper()
    );

    match algorithm {
        Algorithm::ExhaustiveSearch => drive(ExhaustiveSearch::new(), f, &dom, controls, goal),
        Algorithm::BoundingPhase => drive(BoundingPhase::new(rng), f, &dom, controls, goal),
        Algorithm::IntervalHalving => drive(IntervalHalving::new(), f, &dom, controls, goal),
        Algorithm::FibonacciSearch => drive(FibonacciSearch::new(), f, &dom, controls, goal),
        Algorithm::GoldenSectionSearch => drive(GoldenSection::new(), f, &dom, controls, goal),
        Algorithm::Bisection => drive(Bisection::new(), f, &dom, controls, goal),
        Algorithm::NewtonRaphson => drive(NewtonRaphson::new(rng), f, &dom, controls, goal),
    }
}

fn drive<S: Search, F: Objective>(
    mut algo: S,
    f: &F,
    dom: &Domain,
    controls: &Controls,
    goal: Goal,
) -> Result<(Outcome, Table), Error> {
    let mut trace = Trace::new();
    let outcome = algo.search(f, dom, controls, goal, &mut trace)?;

    debug!(
        "{} finished with {:?} after {} iterations",
        S::NAME,
        outcome.status,
        outcome.iterations
    );

    Ok((outcome, trace.to_table()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::testing::*;

    #[test]
    fn names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }

        assert_eq!(
            "simulated_annealing".parse::<Algorithm>(),
            Err(ConfigError::UnknownAlgorithm("simulated_annealing".to_string()))
        );
    }

    #[test]
    fn headers() {
        assert_eq!(
            Algorithm::GoldenSectionSearch.header(),
            &["iteration", "min", "max", "lk", "x1", "x2", "f(x1)", "f(x2)"]
        );
        assert_eq!(Algorithm::FibonacciSearch.header().last(), Some(&"k"));
    }

    #[test]
    fn every_algorithm_finds_reference_minimum() {
        let f = Reference::new();
        let controls = Controls::new().with_delta(0.01).with_epsilon(1e-3);

        for algorithm in Algorithm::ALL {
            let (outcome, table) = run(
                algorithm,
                &f,
                1,
                10,
                &controls,
                Goal::Minimize,
                StdRng::seed_from_u64(0),
            )
            .unwrap();

            assert!(outcome.success, "{}", algorithm);
            assert_eq!(table.header, algorithm.header());
            assert_eq!(table.rows.len(), outcome.iterations, "{}", algorithm);
            assert!(table.rows.iter().all(|row| row.len() == table.header.len()));
        }
    }

    #[test]
    fn real_bounds() {
        let f = Reference::new();
        let controls = Controls::new().with_delta(0.1);

        let (outcome, _) = run(
            Algorithm::ExhaustiveSearch,
            &f,
            0.1,
            10.0,
            &controls,
            Goal::Minimize,
            StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert!(f.is_optimum(outcome.best.unwrap(), 0.1));
    }

    #[test]
    fn invalid_setup() {
        let f = Reference::new();
        let rng = || StdRng::seed_from_u64(0);

        let result = run(
            Algorithm::IntervalHalving,
            &f,
            1,
            10,
            &Controls::new(),
            Goal::Minimize,
            rng(),
        );
        assert!(matches!(result, Err(Error::Config(ConfigError::NoControls))));

        let result = run(
            Algorithm::IntervalHalving,
            &f,
            10,
            1,
            &Controls::new().with_max_iters(10),
            Goal::Minimize,
            rng(),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidDomain { .. }))
        ));
    }
}
