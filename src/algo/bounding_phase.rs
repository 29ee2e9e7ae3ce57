//! Bounding phase method.
//!
//! A bracketing method which walks from a random starting point in the
//! direction of improvement with exponentially growing steps
//! `x(k+1) = x(k) + 2^k delta`. As soon as a step does not improve the
//! function value, the extremum is bracketed by `(x(k-1), x(k+1))`.
//!
//! The starting point `x0` must be such that the triple `f(x0 - |delta|)`,
//! `f(x0)`, `f(x0 + |delta|)` is monotone, which determines the direction.
//! It is searched for by random sampling with a limited number of tries.
//!
//! Requires `delta`.

use getset::{CopyGetters, Setters};
use log::debug;
use rand::Rng;

use crate::core::{
    Cell, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace,
};

/// Options for [`BoundingPhase`] search.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BoundingPhaseOptions {
    /// Number of random draws of the starting point. Default: `100`.
    seed_tries: usize,
}

impl Default for BoundingPhaseOptions {
    fn default() -> Self {
        Self { seed_tries: 100 }
    }
}

/// Bounding phase search. See [module](self) documentation for more details.
pub struct BoundingPhase<R> {
    options: BoundingPhaseOptions,
    rng: R,
}

impl<R: Rng> BoundingPhase<R> {
    /// Initializes the search with default options.
    pub fn new(rng: R) -> Self {
        Self::with_options(BoundingPhaseOptions::default(), rng)
    }

    /// Initializes the search with given options.
    pub fn with_options(options: BoundingPhaseOptions, rng: R) -> Self {
        Self { options, rng }
    }
}

/// Iteration record of [`BoundingPhase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingPhaseRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Previous point.
    pub xkm1: f64,
    /// Current point.
    pub xk: f64,
    /// Next point.
    pub xkp1: f64,
    /// `f(xk)`.
    pub fxk: f64,
    /// `f(xkp1)`.
    pub fxkp1: f64,
}

impl Record for BoundingPhaseRecord {
    const HEADER: &'static [&'static str] =
        &["iteration", "xkm1", "xk", "xkp1", "f(xk)", "f(xkp1)"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.xkm1),
            Cell::Real(self.xk),
            Cell::Real(self.xkp1),
            Cell::Real(self.fxk),
            Cell::Real(self.fxkp1),
        ]
    }
}

impl<R: Rng> BoundingPhase<R> {
    /// Finds a starting point and the signed step pointing toward
    /// improvement.
    fn seed<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        delta: f64,
        goal: Goal,
    ) -> Result<Option<(f64, f64)>, Error> {
        let step = delta.abs();

        for _ in 0..self.options.seed_tries {
            let x0 = match dom.sample_inner(step, &mut self.rng) {
                Some(x0) => x0,
                None => continue,
            };

            let f0 = goal.oriented(f.apply(x0 - step)?);
            let f1 = goal.oriented(f.apply(x0)?);
            let f2 = goal.oriented(f.apply(x0 + step)?);

            if f0 >= f1 && f1 >= f2 {
                return Ok(Some((x0, step)));
            } else if f0 <= f1 && f1 <= f2 {
                return Ok(Some((x0, -step)));
            }
        }

        Ok(None)
    }
}

impl<R: Rng> Search for BoundingPhase<R> {
    const NAME: &'static str = "bounding phase";

    type Record = BoundingPhaseRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        let delta = controls.require_delta(Self::NAME)?;
        let max_iters = controls.max_iters_or_default();

        let (x0, delta) = match self.seed(f, dom, delta, goal)? {
            Some(seed) => seed,
            None => {
                debug!(
                    "could not find a suitable x0 in {} tries",
                    self.options.seed_tries
                );
                return Ok(Outcome::failed_to_seed());
            }
        };

        debug!("x0 = {}, delta = {}", x0, delta);

        let mut xkm1 = x0;
        let mut xk = x0;
        let mut fxk = f.apply(xk)?;
        let mut iteration = 0;

        while dom.lower() < xk && xk < dom.upper() {
            if iteration == max_iters {
                debug!("maximum number of iterations reached");
                return Ok(Outcome::exhausted(iteration, Some(xk), false));
            }

            let xkp1 = dom.project(xk + 2f64.powi(iteration as i32) * delta);
            let fxkp1 = f.apply(xkp1)?;

            iteration += 1;
            trace.push(BoundingPhaseRecord {
                iteration,
                xkm1,
                xk,
                xkp1,
                fxk,
                fxkp1,
            });

            if !goal.is_better(fxkp1, fxk) {
                debug!(
                    "found {} in [{}, {}]",
                    goal.extremum(),
                    xkm1.min(xkp1),
                    xkm1.max(xkp1)
                );
                return Ok(Outcome::converged(iteration, xk));
            }

            xkm1 = xk;
            xk = xkp1;
            fxk = fxkp1;
        }

        debug!("reached the domain boundary at {} while still improving", xk);
        Ok(Outcome::exhausted(iteration, Some(xk), false))
    }
}
