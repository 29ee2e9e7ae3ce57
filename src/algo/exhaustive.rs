//! Exhaustive search.
//!
//! The simplest bracketing method. A window of three equally spaced points
//! slides from the lower bound with step `delta` until the middle point is a
//! strict local extremum of its neighbours. The window is then a bracket of
//! width `2 delta` around the extremum.
//!
//! Requires `delta`.

use log::debug;

use crate::core::{
    Cell, Controls, ConfigError, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace,
};

/// Exhaustive search. See [module](self) documentation for more details.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSearch(());

impl ExhaustiveSearch {
    /// Initializes the search.
    pub fn new() -> Self {
        Self(())
    }
}

/// Iteration record of [`ExhaustiveSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhaustiveRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Left point of the window.
    pub x1: f64,
    /// Middle point of the window.
    pub x2: f64,
    /// Right point of the window.
    pub x3: f64,
    /// `f(x1)`.
    pub f1: f64,
    /// `f(x2)`.
    pub f2: f64,
    /// `f(x3)`.
    pub f3: f64,
}

impl Record for ExhaustiveRecord {
    const HEADER: &'static [&'static str] = &["iteration", "x1", "x2", "x3", "f1", "f2", "f3"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.x1),
            Cell::Real(self.x2),
            Cell::Real(self.x3),
            Cell::Real(self.f1),
            Cell::Real(self.f2),
            Cell::Real(self.f3),
        ]
    }
}

impl Search for ExhaustiveSearch {
    const NAME: &'static str = "exhaustive search";

    type Record = ExhaustiveRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        let delta = controls.require_delta(Self::NAME)?;

        if delta < 0.0 {
            return Err(ConfigError::InvalidDelta(delta).into());
        }

        let window = |i: usize| {
            let x1 = dom.lower() + i as f64 * delta;
            (x1, x1 + delta, x1 + 2.0 * delta)
        };

        let mut iteration = 0;

        loop {
            let (x1, x2, x3) = window(iteration);

            if x3 > dom.upper() {
                debug!("window left the domain, no {} found", goal.extremum());
                return Ok(Outcome::exhausted(iteration, None, false));
            }

            let f1 = f.apply(x1)?;
            let f2 = f.apply(x2)?;
            let f3 = f.apply(x3)?;

            iteration += 1;
            trace.push(ExhaustiveRecord {
                iteration,
                x1,
                x2,
                x3,
                f1,
                f2,
                f3,
            });

            if goal.is_better(f2, f1) && goal.is_better(f2, f3) {
                debug!("found {} in [{}, {}]", goal.extremum(), x1, x3);
                return Ok(Outcome::converged(iteration, x2));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{core::Status, testing::*};

    #[test]
    fn reference_minimum() {
        let f = Reference::new();
        let dom = Domain::new(0.1, 10.0).unwrap();
        let controls = Controls::new().with_delta(0.1);
        let mut trace = Trace::new();

        let outcome = ExhaustiveSearch::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Converged);
        assert_eq!(outcome.iterations, trace.len());

        let last = trace.last().unwrap();
        assert!((last.x2 - 5.0).abs() <= 0.1);
        assert!(last.f1 > last.f2 && last.f2 < last.f3);
        assert!(consistent_records(&trace));
    }

    #[test]
    fn maximum_of_flipped_parabola() {
        let f = Parabola::new(2.0, -1.0);
        let dom = Domain::new(0.0, 5.0).unwrap();
        let controls = Controls::new().with_delta(0.25);
        let mut trace = Trace::new();

        let outcome = ExhaustiveSearch::new()
            .search(&f, &dom, &controls, Goal::Maximize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert!((outcome.best.unwrap() - 2.0).abs() <= 0.25);
    }

    #[test]
    fn monotone_function_fails() {
        let f = |x: f64| x;
        let dom = Domain::new(0.0, 1.0).unwrap();
        let controls = Controls::new().with_delta(0.1);
        let mut trace = Trace::new();

        let outcome = ExhaustiveSearch::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.status, Status::Exhausted);
        assert!(trace.iter().all(|record| record.x3 <= 1.0));
    }

    #[test]
    fn delta_is_required() {
        let f = Reference::new();
        let dom = Domain::new(0.1, 10.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-3);
        let mut trace = Trace::new();

        let result = ExhaustiveSearch::new().search(&f, &dom, &controls, Goal::Minimize, &mut trace);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingDelta(_)))
        ));
        assert!(trace.is_empty());
    }
}
