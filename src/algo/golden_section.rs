//! Golden-section search.
//!
//! Region-elimination method with the same elimination rule as
//! [Fibonacci search](super::fibonacci), but the test points are placed at
//! distance `lk = L0 / γ^k` from the ends of the bracket, where `γ` is the
//! golden ratio. Unlike Fibonacci search, the placement does not depend on
//! the iteration budget.

use log::debug;

use super::elimination::{narrow, test_points, Stop, Termination};
use crate::core::{
    Cell, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace,
};

/// Golden ratio, rounded to three decimal places.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Golden-section search. See [module](self) documentation for more details.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldenSection(());

impl GoldenSection {
    /// Initializes the search.
    pub fn new() -> Self {
        Self(())
    }
}

/// Iteration record of [`GoldenSection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenSectionRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Lower end of the bracket.
    pub min: f64,
    /// Upper end of the bracket.
    pub max: f64,
    /// Distance of the test points from the bracket ends.
    pub lk: f64,
    /// Lower test point.
    pub x1: f64,
    /// Upper test point.
    pub x2: f64,
    /// `f(x1)`.
    pub fx1: f64,
    /// `f(x2)`.
    pub fx2: f64,
}

impl Record for GoldenSectionRecord {
    const HEADER: &'static [&'static str] =
        &["iteration", "min", "max", "lk", "x1", "x2", "f(x1)", "f(x2)"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.min),
            Cell::Real(self.max),
            Cell::Real(self.lk),
            Cell::Real(self.x1),
            Cell::Real(self.x2),
            Cell::Real(self.fx1),
            Cell::Real(self.fx2),
        ]
    }
}

impl Search for GoldenSection {
    const NAME: &'static str = "golden section search";

    type Record = GoldenSectionRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        controls.validate()?;
        let termination = Termination::new(controls);

        let n = termination.max_iters();
        let l0 = dom.width();

        let mut min = dom.lower();
        let mut max = dom.upper();
        let mut k = 2;
        let mut iteration = 0;

        let stop = loop {
            if let Some(stop) = termination.check(max - min, iteration) {
                break stop;
            }

            if k > n {
                break Stop::Exhausted;
            }

            let lk = l0 / GOLDEN_RATIO.powi(k as i32);
            let (x1, x2) = test_points(min, max, lk);

            let fx1 = f.apply(x1)?;
            let fx2 = f.apply(x2)?;

            iteration += 1;
            trace.push(GoldenSectionRecord {
                iteration,
                min,
                max,
                lk,
                x1,
                x2,
                fx1,
                fx2,
            });

            narrow(goal, (x1, fx1), (x2, fx2), &mut min, &mut max);
            debug!("bracket narrowed to [{}, {}]", min, max);

            k += 1;
        };

        let best = 0.5 * (min + max);

        Ok(match stop {
            Stop::Converged => Outcome::converged(iteration, best),
            Stop::Exhausted => Outcome::exhausted(iteration, Some(best), true),
        })
    }
}
