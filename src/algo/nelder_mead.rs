//! Nelder-Mead (simplex) search.
//!
//! [Nelder-Mead](https://en.wikipedia.org/wiki/Nelder%E2%80%93Mead_method)
//! simplex-reflection method is a popular derivative-free optimization
//! algorithm. For functions of two variables it keeps a triangle of points,
//! which is reflected, expanded, contracted or shrunk based on the function
//! values comparison.
//!
//! Two variants are available (see [`SimplexVariant`]). The basic one runs
//! the textbook transformation cycle from a single random triangle. The
//! restarting one runs the search from several random triangles to recover
//! multiple extrema of a multi-modal function, keeps the points inside the
//! domain and replaces triangles which degenerate into a long thin shape.
//!
//! Requires `epsilon`. A run from one triangle stops when the values at the
//! best and the worst points differ by less than `epsilon`.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)
//!
//! \[2\] Optimization for Engineering Design: Algorithms and Examples

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{Matrix3, Vector2};
use rand::Rng;

use crate::core::{
    Cell, ConfigError, Controls, Error, Goal, PlanarDomain, PlanarObjective, PlanarOutcome,
    PlanarSearch, Record, Solution, Status, Trace,
};

/// Variant of the simplex search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimplexVariant {
    /// Single start, expansion coefficient 2 and contraction coefficient 0.5,
    /// inside contraction only. Points are not kept inside the domain.
    Basic,
    /// Multiple starts with configurable coefficients, outside and inside
    /// contraction, projection into the domain and replacement of collapsed
    /// triangles.
    #[default]
    Restarting,
}

/// Options for [`SimplexSearch`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SimplexOptions {
    /// Variant of the search. Default: restarting (see [`SimplexVariant`]).
    variant: SimplexVariant,
    /// Expansion coefficient, must be greater than 1. Ignored by the basic
    /// variant. Default: `1.5`.
    gamma: f64,
    /// Contraction coefficient, must lie in (0, 1). Ignored by the basic
    /// variant. Default: `0.5`.
    beta: f64,
    /// Number of starts of the restarting variant. Default: `16`.
    restarts: usize,
    /// Root-mean-square distance under which two found extrema are
    /// considered the same. Default: `0.01`.
    dedup_tolerance: f64,
    /// Area under which a triangle is considered collinear. Default: `0.01`.
    collinear_area: f64,
    /// Root-mean-square distance between the best two points over which a
    /// collinear triangle is replaced. Default: `1`.
    collinear_spread: f64,
    /// Minimal area of a random triangle. Default: `1e-6`.
    seed_area: f64,
    /// Number of random draws of a triangle. Default: `100`.
    seed_tries: usize,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            variant: SimplexVariant::Restarting,
            gamma: 1.5,
            beta: 0.5,
            restarts: 16,
            dedup_tolerance: 1e-2,
            collinear_area: 0.01,
            collinear_spread: 1.0,
            seed_area: 1e-6,
            seed_tries: 100,
        }
    }
}

/// Simplex search. See [module](self) documentation for more details.
pub struct SimplexSearch<R> {
    options: SimplexOptions,
    rng: R,
}

impl<R: Rng> SimplexSearch<R> {
    /// Initializes the search with default options.
    pub fn new(rng: R) -> Self {
        Self::with_options(SimplexOptions::default(), rng)
    }

    /// Initializes the search with given options.
    pub fn with_options(options: SimplexOptions, rng: R) -> Self {
        Self { options, rng }
    }
}

/// Transformation of the simplex performed in an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// Initial random triangle of a start.
    Init,
    /// The worst point reflected through the centroid of the other two.
    Reflection,
    /// Reflection continued further in the same direction.
    Expansion,
    /// Contraction on the side of the reflected point.
    OutsideContraction,
    /// Contraction on the side of the worst point.
    InsideContraction,
    /// All points moved halfway toward the best one.
    Shrink,
    /// Collapsed triangle replaced by a random one.
    Restart,
}

impl Transformation {
    /// Name of the transformation as it appears in the trace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transformation::Init => "init",
            Transformation::Reflection => "reflection",
            Transformation::Expansion => "expansion",
            Transformation::OutsideContraction => "outside contraction",
            Transformation::InsideContraction => "inside contraction",
            Transformation::Shrink => "shrink",
            Transformation::Restart => "restart",
        }
    }
}

/// Iteration record of [`SimplexSearch`].
///
/// Points are sorted from the best to the worst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexRecord {
    /// Start number, starting from 1.
    pub restart: usize,
    /// Iteration number within the start. Zero for the initial triangle.
    pub iteration: usize,
    /// Points of the triangle.
    pub simplex: [Vector2<f64>; 3],
    /// Function value at the best point.
    pub value: f64,
    /// Transformation which produced the triangle.
    pub transformation: Transformation,
}

impl SimplexRecord {
    /// Area of the recorded triangle.
    pub fn area(&self) -> f64 {
        area(&self.simplex)
    }
}

impl Record for SimplexRecord {
    const HEADER: &'static [&'static str] =
        &["restart", "iteration", "x0", "x1", "x2", "f(x0)", "move"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.restart),
            Cell::Index(self.iteration),
            Cell::Point(self.simplex[0]),
            Cell::Point(self.simplex[1]),
            Cell::Point(self.simplex[2]),
            Cell::Real(self.value),
            Cell::Label(self.transformation.as_str()),
        ]
    }
}

/// Area of the triangle.
pub fn area(points: &[Vector2<f64>; 3]) -> f64 {
    let [a, b, c] = points;
    #[rustfmt::skip]
    let m = Matrix3::new(
        a.x, b.x, c.x,
        a.y, b.y, c.y,
        1.0, 1.0, 1.0,
    );
    0.5 * m.determinant().abs()
}

/// Root-mean-square distance of two points, `sqrt(mean((a - b)²))`.
pub fn rms_distance(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (a - b).norm() / 2f64.sqrt()
}

/// Triangle with oriented function values, sorted from the best point.
struct Simplex {
    points: [Vector2<f64>; 3],
    values: [f64; 3],
}

impl Simplex {
    fn sort(&mut self) {
        let mut perm = [0, 1, 2];
        perm.sort_by(|a, b| self.values[*a].total_cmp(&self.values[*b]));

        self.points = perm.map(|i| self.points[i]);
        self.values = perm.map(|i| self.values[i]);
    }

    fn replace_worst(&mut self, x: Vector2<f64>, fx: f64) {
        self.points[2] = x;
        self.values[2] = fx;
    }

    fn record(
        &self,
        restart: usize,
        iteration: usize,
        goal: Goal,
        transformation: Transformation,
    ) -> SimplexRecord {
        SimplexRecord {
            restart,
            iteration,
            simplex: self.points,
            value: goal.oriented(self.values[0]),
            transformation,
        }
    }
}

impl<R: Rng> SimplexSearch<R> {
    fn validate(&self) -> Result<(), ConfigError> {
        let SimplexOptions {
            gamma,
            beta,
            restarts,
            ..
        } = self.options;

        if !(gamma > 1.0) {
            return Err(ConfigError::InvalidGamma(gamma));
        }

        if !(beta > 0.0 && beta < 1.0) {
            return Err(ConfigError::InvalidBeta(beta));
        }

        if restarts == 0 {
            return Err(ConfigError::NoRestarts);
        }

        Ok(())
    }

    /// Draws a random triangle of sufficient area.
    fn seed<F: PlanarObjective>(
        &mut self,
        f: &F,
        dom: &PlanarDomain,
        margin: f64,
        goal: Goal,
    ) -> Result<Option<Simplex>, Error> {
        for _ in 0..self.options.seed_tries {
            let points = [
                dom.sample(margin, &mut self.rng),
                dom.sample(margin, &mut self.rng),
                dom.sample(margin, &mut self.rng),
            ];

            if area(&points) <= self.options.seed_area {
                continue;
            }

            let mut values = [0.0; 3];
            for (value, x) in values.iter_mut().zip(points.iter()) {
                *value = goal.oriented(f.apply(x)?);
            }

            let mut simplex = Simplex { points, values };
            simplex.sort();
            return Ok(Some(simplex));
        }

        Ok(None)
    }

    /// Performs one transformation of a sorted simplex.
    fn transform<F: PlanarObjective>(
        &self,
        f: &F,
        dom: &PlanarDomain,
        goal: Goal,
        simplex: &mut Simplex,
    ) -> Result<Transformation, Error> {
        let restarting = self.options.variant == SimplexVariant::Restarting;
        let (gamma, beta) = if restarting {
            (self.options.gamma, self.options.beta)
        } else {
            (2.0, 0.5)
        };

        let eval = |mut x: Vector2<f64>| -> Result<(Vector2<f64>, f64), Error> {
            if restarting && dom.project(&mut x) {
                debug!("point projected into the domain");
            }
            let fx = goal.oriented(f.apply(&x)?);
            Ok((x, fx))
        };

        let [best, _, worst] = simplex.points;
        let [fbest, fmiddle, fworst] = simplex.values;

        let centroid = (simplex.points[0] + simplex.points[1]) * 0.5;
        debug!("centroid of simplex: {:?}", centroid.as_slice());

        let (reflection, freflection) = eval(centroid + (centroid - worst))?;

        if fbest <= freflection && freflection < fmiddle {
            simplex.replace_worst(reflection, freflection);
            return Ok(Transformation::Reflection);
        }

        if freflection < fbest {
            let (expansion, fexpansion) = eval(centroid + (centroid - worst) * gamma)?;

            return if fexpansion < freflection {
                simplex.replace_worst(expansion, fexpansion);
                Ok(Transformation::Expansion)
            } else {
                simplex.replace_worst(reflection, freflection);
                Ok(Transformation::Reflection)
            };
        }

        if restarting && freflection < fworst {
            let (contraction, fcontraction) = eval(centroid + (centroid - worst) * beta)?;

            if fcontraction <= freflection {
                simplex.replace_worst(contraction, fcontraction);
                return Ok(Transformation::OutsideContraction);
            }
        } else {
            let (contraction, fcontraction) = eval(centroid + (worst - centroid) * beta)?;

            if fcontraction < fworst {
                simplex.replace_worst(contraction, fcontraction);
                return Ok(Transformation::InsideContraction);
            }
        }

        for i in 1..3 {
            let x = best + (simplex.points[i] - best) * 0.5;
            simplex.points[i] = x;
            simplex.values[i] = goal.oriented(f.apply(&x)?);
        }

        Ok(Transformation::Shrink)
    }

    /// Runs the search from a single start. Returns the best point unless the
    /// start failed to seed.
    #[allow(clippy::too_many_arguments)]
    fn run<F: PlanarObjective>(
        &mut self,
        f: &F,
        dom: &PlanarDomain,
        epsilon: f64,
        max_iters: usize,
        goal: Goal,
        restart: usize,
        trace: &mut Trace<SimplexRecord>,
    ) -> Result<(Status, Option<Solution>), Error> {
        let restarting = self.options.variant == SimplexVariant::Restarting;
        let margin = if restarting { 0.0 } else { epsilon };

        let mut simplex = match self.seed(f, dom, margin, goal)? {
            Some(simplex) => simplex,
            None => {
                debug!(
                    "could not find a non-degenerate simplex in {} tries",
                    self.options.seed_tries
                );
                return Ok((Status::FailedToSeed, None));
            }
        };

        trace.push(simplex.record(restart, 0, goal, Transformation::Init));

        let mut iteration = 0;

        loop {
            let solution = Solution {
                x: simplex.points[0],
                value: goal.oriented(simplex.values[0]),
            };

            if (simplex.values[0] - simplex.values[2]).abs() < epsilon {
                debug!("start {} converged in {} iterations", restart, iteration);
                return Ok((Status::Converged, Some(solution)));
            }

            if iteration == max_iters {
                debug!("start {}: maximum number of iterations reached", restart);
                return Ok((Status::Exhausted, Some(solution)));
            }

            let mut transformation = self.transform(f, dom, goal, &mut simplex)?;
            simplex.sort();

            if restarting
                && area(&simplex.points) < self.options.collinear_area
                && rms_distance(&simplex.points[0], &simplex.points[1])
                    > self.options.collinear_spread
            {
                debug!("simplex collapsed into a line, replacing it with a random one");

                simplex = match self.seed(f, dom, margin, goal)? {
                    Some(simplex) => simplex,
                    None => return Ok((Status::FailedToSeed, None)),
                };
                transformation = Transformation::Restart;
            }

            iteration += 1;

            debug!(
                "performed {},\tfx = {} - {}",
                transformation.as_str(),
                goal.oriented(simplex.values[0]),
                goal.oriented(simplex.values[2])
            );

            trace.push(simplex.record(restart, iteration, goal, transformation));
        }
    }
}

impl<R: Rng> PlanarSearch for SimplexSearch<R> {
    const NAME: &'static str = "simplex search";

    type Record = SimplexRecord;

    fn search<F: PlanarObjective>(
        &mut self,
        f: &F,
        dom: &PlanarDomain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<PlanarOutcome, Error> {
        let epsilon = controls.require_epsilon(Self::NAME)?;
        self.validate()?;

        let max_iters = controls.max_iters_or_default();
        let restarts = match self.options.variant {
            SimplexVariant::Basic => 1,
            SimplexVariant::Restarting => self.options.restarts,
        };

        let mut solutions: Vec<Solution> = Vec::new();
        let mut converged = false;
        let mut exhausted = false;

        for restart in 1..=restarts {
            let (status, solution) =
                self.run(f, dom, epsilon, max_iters, goal, restart, trace)?;

            match status {
                Status::Converged => converged = true,
                Status::Exhausted => exhausted = true,
                Status::FailedToSeed => {}
            }

            if let Some(solution) = solution {
                let unique = solutions
                    .iter()
                    .all(|found| rms_distance(&found.x, &solution.x) >= self.options.dedup_tolerance);

                if unique {
                    debug!(
                        "new {} found at {:?}, f = {}",
                        goal.extremum(),
                        solution.x.as_slice(),
                        solution.value
                    );
                    solutions.push(solution);
                }
            }
        }

        let status = if converged {
            Status::Converged
        } else if exhausted {
            Status::Exhausted
        } else {
            Status::FailedToSeed
        };

        Ok(PlanarOutcome {
            status,
            success: !solutions.is_empty(),
            solutions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::testing::*;

    fn basic() -> SimplexOptions {
        let mut options = SimplexOptions::default();
        options.set_variant(SimplexVariant::Basic);
        options
    }

    #[test]
    fn triangle_area() {
        let right = [Vector2::zeros(), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)];
        let line = [Vector2::zeros(), Vector2::new(1.0, 1.0), Vector2::new(2.0, 2.0)];

        assert_abs_diff_eq!(area(&right), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(area(&line), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            rms_distance(&Vector2::zeros(), &Vector2::new(1.0, 1.0)),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn himmelblau_all_minima() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6).with_max_iters(500);
        let mut trace = Trace::new();

        let outcome = SimplexSearch::new(StdRng::seed_from_u64(42))
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Converged);
        assert_eq!(outcome.solutions.len(), 4);

        for solution in &outcome.solutions {
            assert!(f.is_optimum(&solution.x, 1e-2), "{:?}", solution);
        }

        for optimum in f.optima() {
            assert!(outcome
                .solutions
                .iter()
                .any(|solution| (solution.x - optimum).norm() <= 1e-2));
        }

        assert!(consistent_records(&trace));
    }

    #[test]
    fn exhausted_starts_keep_best_vertex() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6).with_max_iters(5);
        let mut trace = Trace::new();

        let mut options = SimplexOptions::default();
        options.set_restarts(2);

        let outcome = SimplexSearch::with_options(options, StdRng::seed_from_u64(7))
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status, Status::Exhausted);
        assert!(!outcome.solutions.is_empty());

        for solution in &outcome.solutions {
            assert!(trace.iter().any(|record| record.simplex[0] == solution.x));
            assert_eq!(solution.value, f.eval(&solution.x));
        }
    }

    #[test]
    fn himmelblau_solutions_are_unique() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6).with_max_iters(500);
        let mut trace = Trace::new();

        let outcome = SimplexSearch::new(StdRng::seed_from_u64(3))
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert!(outcome.solutions.len() <= 4);

        for (i, a) in outcome.solutions.iter().enumerate() {
            assert!(f.is_optimum(&a.x, 1e-2), "{:?}", a);

            for b in &outcome.solutions[i + 1..] {
                assert!(rms_distance(&a.x, &b.x) >= 1e-2);
            }
        }

        let starts = trace
            .iter()
            .filter(|record| record.transformation == Transformation::Init)
            .count();
        assert_eq!(starts, 16);
    }

    #[test]
    fn basic_best_never_worsens() {
        let f = Sphere::default();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-8).with_max_iters(200);
        let mut trace = Trace::new();

        let outcome = SimplexSearch::with_options(basic(), StdRng::seed_from_u64(5))
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.solutions.len(), 1);
        assert!(f.is_optimum(&outcome.solutions[0].x, 1e-2));

        assert_eq!(trace.records()[0].transformation, Transformation::Init);
        assert!(trace.iter().all(|record| record.restart == 1));
        assert!(trace.iter().all(|record| record.area() > 0.0));

        for pair in trace.records().windows(2) {
            assert!(pair[1].value <= pair[0].value);
        }
    }

    #[test]
    fn basic_maximum() {
        let f = |x: f64, y: f64| -((x - 1.0).powi(2) + (y + 0.5).powi(2));
        let dom = PlanarDomain::square(-5.0, 5.0).unwrap();
        let controls = Controls::new().with_epsilon(1e-8).with_max_iters(200);
        let mut trace = Trace::new();

        let outcome = SimplexSearch::with_options(basic(), StdRng::seed_from_u64(8))
            .search(&f, &dom, &controls, Goal::Maximize, &mut trace)
            .unwrap();

        assert!(outcome.success);
        assert!((outcome.solutions[0].x - Vector2::new(1.0, -0.5)).norm() < 1e-2);

        for pair in trace.records().windows(2) {
            assert!(pair[1].value >= pair[0].value);
        }
    }

    #[test]
    fn random_triangles_are_not_degenerate() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6).with_max_iters(200);
        let mut trace = Trace::new();

        SimplexSearch::new(StdRng::seed_from_u64(13))
            .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
            .unwrap();

        let seeded = trace.iter().filter(|record| {
            matches!(
                record.transformation,
                Transformation::Init | Transformation::Restart
            )
        });

        for record in seeded {
            assert!(record.area() > 1e-6);
        }

        assert!(trace.iter().all(|record| record.area() > 0.0));
    }

    #[test]
    fn same_seed_same_trace() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6);

        let run = || {
            let mut options = SimplexOptions::default();
            options.set_restarts(4);

            let mut trace = Trace::new();
            let outcome = SimplexSearch::with_options(options, StdRng::seed_from_u64(99))
                .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
                .unwrap();
            (outcome, trace)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn invalid_options() {
        let f = Himmelblau::new();
        let dom = f.domain();
        let controls = Controls::new().with_epsilon(1e-6);

        let check = |options: SimplexOptions, expected: ConfigError| {
            let mut trace = Trace::new();
            let result = SimplexSearch::with_options(options, StdRng::seed_from_u64(0)).search(
                &f,
                &dom,
                &controls,
                Goal::Minimize,
                &mut trace,
            );

            match result {
                Err(Error::Config(error)) => assert_eq!(error, expected),
                other => panic!("unexpected result {:?}", other),
            }
            assert!(trace.is_empty());
        };

        let mut options = SimplexOptions::default();
        options.set_gamma(1.0);
        check(options, ConfigError::InvalidGamma(1.0));

        let mut options = SimplexOptions::default();
        options.set_beta(1.0);
        check(options, ConfigError::InvalidBeta(1.0));

        let mut options = SimplexOptions::default();
        options.set_restarts(0);
        check(options, ConfigError::NoRestarts);

        let mut trace = Trace::new();
        let result = SimplexSearch::new(StdRng::seed_from_u64(0)).search(
            &f,
            &dom,
            &Controls::new().with_max_iters(10),
            Goal::Minimize,
            &mut trace,
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingEpsilon(_)))
        ));
    }
}
