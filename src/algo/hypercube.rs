//! Hypercube (evolutionary) pattern search.
//!
//! A direct-search method for functions of two variables. In every
//! iteration the four corners of the axis-aligned box of size `step` around
//! the current center are sampled. The center moves to the best corner, or
//! the step is halved if no corner beats the center.
//!
//! The search starts from the center of the domain unless
//! [`HypercubeOptions`] give another initial point, for example `(1, 1)`.
//! The initial step is `(2, 2)` whatever the size of the domain. Corners
//! outside the domain are projected onto its boundary. Running out of
//! iterations is not considered a failure.
//!
//! Requires `epsilon`, the tolerance on the step norm.

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::Vector2;

use crate::core::{
    Cell, Controls, Error, Goal, PlanarDomain, PlanarObjective, PlanarOutcome, PlanarSearch,
    Record, Solution, Status, Trace,
};

/// Options for [`Hypercube`] search.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct HypercubeOptions {
    /// Initial center. Default: center of the domain.
    initial: Option<Vector2<f64>>,
    /// Initial step. Default: `(2, 2)`.
    step: Vector2<f64>,
}

impl Default for HypercubeOptions {
    fn default() -> Self {
        Self {
            initial: None,
            step: Vector2::new(2.0, 2.0),
        }
    }
}

/// Hypercube search. See [module](self) documentation for more details.
#[derive(Debug, Clone, Default)]
pub struct Hypercube {
    options: HypercubeOptions,
}

impl Hypercube {
    /// Initializes the search with default options.
    pub fn new() -> Self {
        Self::with_options(HypercubeOptions::default())
    }

    /// Initializes the search with given options.
    pub fn with_options(options: HypercubeOptions) -> Self {
        Self { options }
    }
}

/// Iteration record of [`Hypercube`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HypercubeRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Center at the beginning of the iteration.
    pub center: Vector2<f64>,
    /// `f(center)`.
    pub fcenter: f64,
    /// Sampled corners, counter-clockwise from the lower left one.
    pub corners: [Vector2<f64>; 4],
    /// Function values at the corners.
    pub fcorners: [f64; 4],
    /// Center for the next iteration.
    pub best: Vector2<f64>,
    /// `f(best)`.
    pub fbest: f64,
    /// Step used for sampling the corners.
    pub step: Vector2<f64>,
}

impl Record for HypercubeRecord {
    const HEADER: &'static [&'static str] = &[
        "iteration", "center", "x1", "x2", "x3", "x4", "best", "step", "|step|",
    ];

    fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(Self::HEADER.len());
        cells.push(Cell::Index(self.iteration));
        cells.push(Cell::Sample(self.center, self.fcenter));
        cells.extend(
            self.corners
                .iter()
                .zip(self.fcorners.iter())
                .map(|(x, fx)| Cell::Sample(*x, *fx)),
        );
        cells.push(Cell::Sample(self.best, self.fbest));
        cells.push(Cell::Point(self.step));
        cells.push(Cell::Real(self.step.norm()));
        cells
    }
}

const SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

impl PlanarSearch for Hypercube {
    const NAME: &'static str = "hypercube search";

    type Record = HypercubeRecord;

    fn search<F: PlanarObjective>(
        &mut self,
        f: &F,
        dom: &PlanarDomain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<PlanarOutcome, Error> {
        let epsilon = controls.require_epsilon(Self::NAME)?;
        let max_iters = controls.max_iters_or_default();

        let mut center = self.options.initial.unwrap_or_else(|| dom.center());
        dom.project(&mut center);
        let mut fcenter = f.apply(&center)?;
        let mut step = self.options.step;
        let mut iteration = 0;

        while step.norm() >= epsilon && iteration < max_iters {
            let mut corners = [center; 4];
            let mut fcorners = [0.0; 4];

            for (i, (sx, sy)) in SIGNS.iter().enumerate() {
                corners[i] += Vector2::new(sx * step.x, sy * step.y) * 0.5;
                dom.project(&mut corners[i]);
                fcorners[i] = f.apply(&corners[i])?;
            }

            let mut best = center;
            let mut fbest = fcenter;

            for (x, fx) in corners.iter().zip(fcorners.iter()) {
                if goal.is_better(*fx, fbest) {
                    best = *x;
                    fbest = *fx;
                }
            }

            iteration += 1;
            trace.push(HypercubeRecord {
                iteration,
                center,
                fcenter,
                corners,
                fcorners,
                best,
                fbest,
                step,
            });

            if best == center {
                step /= 2.0;
                debug!("no better corner, step halved to {:?}", step.as_slice());
            } else {
                center = best;
                fcenter = fbest;
                debug!("center moved to {:?}, f = {}", center.as_slice(), fcenter);
            }
        }

        let status = if step.norm() < epsilon {
            Status::Converged
        } else {
            debug!("maximum number of iterations reached");
            Status::Exhausted
        };

        Ok(PlanarOutcome {
            status,
            success: true,
            solutions: vec![Solution {
                x: center,
                value: fcenter,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{core::ConfigError, testing::*};

    #[test]
    fn himmelblau() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-4).with_max_iters(1000);
        let mut trace = Trace::new();

        let outcome = Hypercube::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Converged);
        assert_eq!(outcome.solutions.len(), 1);
        assert!(f.is_optimum(&outcome.solutions[0].x, 1e-2));
        assert!(consistent_records(&trace));
        assert_eq!(trace.records()[0].center, dom.center());
    }

    #[test]
    fn sphere() {
        let f = Sphere::default();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6).with_max_iters(1000);
        let mut trace = Trace::new();

        let outcome = Hypercube::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(f.is_optimum(&outcome.solutions[0].x, 1e-3));

        for pair in trace.records().windows(2) {
            assert!(pair[1].fcenter <= pair[0].fcenter);
        }
    }

    #[test]
    fn center_wins_ties() {
        let f = |_: f64, _: f64| 1.0;
        let dom = PlanarDomain::square(-1.0, 1.0).unwrap();
        let controls = Controls::new().with_epsilon(0.1);
        let mut trace = Trace::new();

        Hypercube::new()
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(trace.iter().all(|record| record.best == record.center));
        assert!(trace.iter().all(|record| record.center == Vector2::zeros()));
    }

    #[test]
    fn exhaustion_is_success() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-8).with_max_iters(3);
        let mut trace = Trace::new();

        let mut options = HypercubeOptions::default();
        options.set_initial(Some(Vector2::new(1.0, 1.0)));

        let outcome = Hypercube::with_options(options)
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Exhausted);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.records()[0].center, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn epsilon_is_required() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_max_iters(10);
        let mut trace = Trace::new();

        let result = Hypercube::new().search(&f, &dom, &controls, Goal::Minimize, &mut trace);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingEpsilon(_)))
        ));
    }
}
