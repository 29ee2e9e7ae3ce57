//! Interval halving method.
//!
//! Region-elimination method that compares the function at the midpoint and
//! at the two quarter points of the bracket and keeps the half (or the
//! central half) that must contain the extremum of a unimodal function.
//! Each iteration removes exactly half of the bracket.

use log::debug;

use super::elimination::{Stop, Termination};
use crate::core::{
    Cell, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace,
};

/// Interval halving search. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalHalving(());

impl IntervalHalving {
    /// Initializes the search.
    pub fn new() -> Self {
        Self(())
    }
}

/// Iteration record of [`IntervalHalving`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalHalvingRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Lower end of the bracket.
    pub min: f64,
    /// Upper end of the bracket.
    pub max: f64,
    /// Lower quarter point.
    pub x1: f64,
    /// Midpoint.
    pub xm: f64,
    /// Upper quarter point.
    pub x2: f64,
    /// `f(x1)`.
    pub fx1: f64,
    /// `f(xm)`.
    pub fxm: f64,
    /// `f(x2)`.
    pub fx2: f64,
}

impl Record for IntervalHalvingRecord {
    const HEADER: &'static [&'static str] = &[
        "iteration", "min", "max", "x1", "xm", "x2", "f(x1)", "f(xm)", "f(x2)",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.min),
            Cell::Real(self.max),
            Cell::Real(self.x1),
            Cell::Real(self.xm),
            Cell::Real(self.x2),
            Cell::Real(self.fx1),
            Cell::Real(self.fxm),
            Cell::Real(self.fx2),
        ]
    }
}

impl Search for IntervalHalving {
    const NAME: &'static str = "interval halving";

    type Record = IntervalHalvingRecord;

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

        let mut min = dom.lower();
        let mut max = dom.upper();
        let mut iteration = 0;

        let stop = loop {
            let length = max - min;

            if let Some(stop) = termination.check(length, iteration) {
                break stop;
            }

            let xm = 0.5 * (min + max);
            let x1 = min + length / 4.0;
            let x2 = max - length / 4.0;

            let fx1 = f.apply(x1)?;
            let fxm = f.apply(xm)?;
            let fx2 = f.apply(x2)?;

            iteration += 1;
            trace.push(IntervalHalvingRecord {
                iteration,
                min,
                max,
                x1,
                xm,
                x2,
                fx1,
                fxm,
                fx2,
            });

            if goal.is_better(fx1, fxm) {
                max = xm;
            } else if goal.is_better(fx2, fxm) {
                min = xm;
            } else {
                min = x1;
                max = x2;
            }

            debug!("bracket narrowed to [{}, {}]", min, max);
        };

        let best = 0.5 * (min + max);

        Ok(match stop {
            Stop::Converged => Outcome::converged(iteration, best),
            Stop::Exhausted => Outcome::exhausted(iteration, Some(best), true),
        })
    }
}
