//! Newton-Raphson method.
//!
//! Looks for a stationary point by Newton iteration on the derivative,
//! `x(k+1) = x(k) - f'(x(k)) / f''(x(k))`, with both derivatives
//! approximated by finite differences. Iterates are kept in the domain by
//! clamping. The starting point is drawn randomly from the interior of the
//! domain.
//!
//! The method finds a stationary point whatever its kind, so the goal only
//! matters for the caller's interpretation of the result.
//!
//! Requires `epsilon`, the tolerance on the derivative magnitude.

use getset::{CopyGetters, Setters};
use log::debug;
use rand::Rng;

use crate::{
    core::{Cell, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace},
    derivatives::{derivative, second_derivative, DEFAULT_STEP},
};

/// Options for [`NewtonRaphson`] search.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonRaphsonOptions {
    /// Number of random draws of the starting point. Default: `100`.
    seed_tries: usize,
    /// Step of the finite differences. Default: `0.01`.
    step: f64,
    /// Second derivative magnitude at or below which the Newton step is
    /// refused. Default: `f64::EPSILON`.
    min_curvature: f64,
}

impl Default for NewtonRaphsonOptions {
    fn default() -> Self {
        Self {
            seed_tries: 100,
            step: DEFAULT_STEP,
            min_curvature: f64::EPSILON,
        }
    }
}

/// Newton-Raphson search. See [module](self) documentation for more details.
pub struct NewtonRaphson<R> {
    options: NewtonRaphsonOptions,
    rng: R,
}

impl<R: Rng> NewtonRaphson<R> {
    /// Initializes the search with default options.
    pub fn new(rng: R) -> Self {
        Self::with_options(NewtonRaphsonOptions::default(), rng)
    }

    /// Initializes the search with given options.
    pub fn with_options(options: NewtonRaphsonOptions, rng: R) -> Self {
        Self { options, rng }
    }
}

/// Iteration record of [`NewtonRaphson`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphsonRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Current point.
    pub x: f64,
    /// `f(x)`.
    pub fx: f64,
    /// `f'(x)`.
    pub dx: f64,
    /// `f''(x)`.
    pub ddx: f64,
    /// Step taken from `x`, after clamping into the domain.
    pub step: f64,
}

impl Record for NewtonRaphsonRecord {
    const HEADER: &'static [&'static str] =
        &["iteration", "x", "f(x)", "f'(x)", "f''(x)", "step"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.x),
            Cell::Real(self.fx),
            Cell::Real(self.dx),
            Cell::Real(self.ddx),
            Cell::Real(self.step),
        ]
    }
}

impl<R: Rng> Search for NewtonRaphson<R> {
    const NAME: &'static str = "newton raphson";

    type Record = NewtonRaphsonRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        _goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        let epsilon = controls.require_epsilon(Self::NAME)?;
        let max_iters = controls.max_iters_or_default();
        let NewtonRaphsonOptions {
            seed_tries,
            step: h,
            min_curvature,
        } = self.options;

        let seed = (0..seed_tries).find_map(|_| dom.sample_inner(epsilon, &mut self.rng));

        let mut x0 = match seed {
            Some(x0) => x0,
            None => {
                debug!("could not find a suitable x0 in {} tries", seed_tries);
                return Ok(Outcome::failed_to_seed());
            }
        };

        debug!("x0 = {}", x0);

        let mut iteration = 0;

        while iteration < max_iters {
            let fx = f.apply(x0)?;
            let dx = derivative(f, x0, h)?;
            let ddx = second_derivative(f, x0, h)?;

            if ddx.abs() <= min_curvature {
                return Err(Error::VanishingCurvature {
                    x: x0,
                    curvature: ddx,
                });
            }

            let x1 = dom.project(x0 - dx / ddx);

            iteration += 1;
            trace.push(NewtonRaphsonRecord {
                iteration,
                x: x0,
                fx,
                dx,
                ddx,
                step: x1 - x0,
            });

            x0 = x1;

            if dx.abs() <= epsilon {
                debug!("|f'| = {} <= {}, stationary point at {}", dx.abs(), epsilon, x0);
                return Ok(Outcome::converged(iteration, x0));
            }
        }

        debug!("maximum number of iterations reached");
        Ok(Outcome::exhausted(iteration, Some(x0), false))
    }
}
