//! Bisection method on the derivative.
//!
//! Looks for a stationary point inside a bracket `[min, max]` where the
//! derivative changes sign from negative to positive (positive to negative
//! when maximizing). The midpoint of the bracket replaces the end with the
//! same derivative sign, so the bracket is halved in every iteration. The
//! derivative is approximated by finite differences, see
//! [`derivatives`](crate::derivatives).
//!
//! Requires `epsilon`, the tolerance on the derivative magnitude.

use getset::{CopyGetters, Setters};
use log::debug;

use crate::{
    core::{Cell, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace},
    derivatives::{derivative, DEFAULT_STEP},
};

/// Options for [`Bisection`] search.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BisectionOptions {
    /// Step of the finite difference. Default: `0.01`.
    step: f64,
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

/// Bisection search. See [module](self) documentation for more details.
#[derive(Debug, Clone, Default)]
pub struct Bisection {
    options: BisectionOptions,
}

impl Bisection {
    /// Initializes the search with default options.
    pub fn new() -> Self {
        Self::with_options(BisectionOptions::default())
    }

    /// Initializes the search with given options.
    pub fn with_options(options: BisectionOptions) -> Self {
        Self { options }
    }
}

/// Iteration record of [`Bisection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Lower end of the bracket.
    pub min: f64,
    /// Upper end of the bracket.
    pub max: f64,
    /// Midpoint.
    pub x: f64,
    /// `f'(min)`.
    pub dmin: f64,
    /// `f'(max)`.
    pub dmax: f64,
    /// `f'(x)`.
    pub dx: f64,
    /// `f(x)`.
    pub fx: f64,
}

impl Record for BisectionRecord {
    const HEADER: &'static [&'static str] = &[
        "iteration", "min", "max", "x", "f'(min)", "f'(max)", "f'(x)", "f(x)",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.min),
            Cell::Real(self.max),
            Cell::Real(self.x),
            Cell::Real(self.dmin),
            Cell::Real(self.dmax),
            Cell::Real(self.dx),
            Cell::Real(self.fx),
        ]
    }
}

impl Search for Bisection {
    const NAME: &'static str = "bisection";

    type Record = BisectionRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        let epsilon = controls.require_epsilon(Self::NAME)?;
        let max_iters = controls.max_iters_or_default();
        let h = self.options.step;

        let mut min = dom.lower();
        let mut max = dom.upper();

        let lower_slope = goal.oriented(derivative(f, min, h)?);
        let upper_slope = goal.oriented(derivative(f, max, h)?);

        if !(lower_slope < 0.0 && upper_slope > 0.0) {
            return Err(Error::Precondition {
                lower: min,
                upper: max,
                lower_slope,
                upper_slope,
            });
        }

        let mut iteration = 0;
        let mut x = 0.5 * (min + max);

        while iteration < max_iters {
            x = 0.5 * (min + max);

            let dmin = derivative(f, min, h)?;
            let dmax = derivative(f, max, h)?;
            let dx = derivative(f, x, h)?;
            let fx = f.apply(x)?;

            iteration += 1;
            trace.push(BisectionRecord {
                iteration,
                min,
                max,
                x,
                dmin,
                dmax,
                dx,
                fx,
            });

            if dx.abs() <= epsilon {
                debug!("|f'({})| = {} <= {}", x, dx.abs(), epsilon);
                return Ok(Outcome::converged(iteration, x));
            }

            if goal.oriented(dx) > 0.0 {
                max = x;
            } else {
                min = x;
            }

            debug!("bracket halved to [{}, {}]", min, max);
        }

        debug!("maximum number of iterations reached");
        Ok(Outcome::exhausted(iteration, Some(x), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        core::{ConfigError, Status},
        testing::*,
    };

    #[test]
    fn bracket_halves() {
        let f = Parabola::default();
        let dom = f.domains()[0];
        let epsilon = 1e-3;
        let controls = Controls::new().with_epsilon(epsilon);
        let mut trace = Trace::new();

        let outcome = Bisection::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Converged);

        let bound = (dom.width() / epsilon).log2().ceil() as usize;
        assert!(trace.len() <= bound, "{} > {}", trace.len(), bound);

        for pair in trace.records().windows(2) {
            assert_relative_eq!(
                pair[1].max - pair[1].min,
                0.5 * (pair[0].max - pair[0].min),
                max_relative = 1e-9
            );
        }

        for record in trace.iter() {
            assert!(record.dmin < 0.0 && record.dmax > 0.0);
        }
    }

    #[test]
    fn reference_minimum() {
        let f = Reference::new();
        let dom = Domain::new(1.0, 10.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-3);
        let mut trace = Trace::new();

        let outcome = Bisection::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert!(f.is_optimum(outcome.best.unwrap(), 0.01));
        assert!(consistent_records(&trace));
    }

    #[test]
    fn maximum() {
        let f = Parabola::new(2.0, -1.0);
        let dom = Domain::new(0.0, 5.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-4);
        let mut trace = Trace::new();

        let outcome = Bisection::new()
            .search(&f, &dom, &controls, Goal::Maximize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert!(f.is_optimum(outcome.best.unwrap(), 0.01));
    }

    #[test]
    fn no_sign_change() {
        let f = Reference::new();
        let dom = Domain::new(6.0, 10.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-3);
        let mut trace = Trace::new();

        let result = Bisection::new().search(&f, &dom, &controls, Goal::Minimize, &mut trace);

        assert!(matches!(result, Err(Error::Precondition { .. })));
        assert!(trace.is_empty());
    }

    #[test]
    fn exhaustion_is_failure() {
        let f = Reference::new();
        let dom = Domain::new(1.0, 10.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-9).with_max_iters(5);
        let mut trace = Trace::new();

        let outcome = Bisection::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.status, Status::Exhausted);
        assert_eq!(trace.len(), 5);
    }

    #[test]
    fn epsilon_is_required() {
        let f = Reference::new();
        let dom = Domain::new(1.0, 10.0).unwrap();
        let controls = Controls::new().with_delta(0.1);
        let mut trace = Trace::new();

        let result = Bisection::new().search(&f, &dom, &controls, Goal::Minimize, &mut trace);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingEpsilon(_)))
        ));
    }
}
