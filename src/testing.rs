//! Reference objectives and utilities useful for benchmarking, debugging and
//! smoke testing.
//!
//! [`Reference`] and [`Himmelblau`] are recommended for first tests. Others
//! can be used for specific conditions (e.g., no unimodal region at all).
//!
//! # References
//!
//! \[1\] Optimization for Engineering Design: Algorithms and Examples
//!
//! \[2\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)

#![allow(unused)]

use nalgebra::Vector2;

use crate::core::{Domain, Objective, PlanarDomain, PlanarObjective};

/// Extension of the [`Objective`] trait that provides additional information
/// that is useful for testing searches.
pub trait TestFunction: Objective {
    /// Standard search intervals for the objective. Using the same intervals is
    /// essential for fair comparison of methods.
    fn domains(&self) -> Vec<Domain>;

    /// Locations of the extrema of interest.
    fn optima(&self) -> Vec<f64>;

    /// Tests if given point is close to one of the [optima](TestFunction::optima).
    fn is_optimum(&self, x: f64, eps: f64) -> bool {
        self.optima().iter().any(|opt| (opt - x).abs() <= eps)
    }
}

/// Extension of the [`PlanarObjective`] trait that provides additional
/// information that is useful for testing searches.
pub trait TestPlanarFunction: PlanarObjective {
    /// Standard search rectangle for the objective.
    fn domain(&self) -> PlanarDomain;

    /// Locations of the global optima.
    fn optima(&self) -> Vec<Vector2<f64>>;

    /// Tests if given point is close to one of the
    /// [optima](TestPlanarFunction::optima) in Euclidean distance.
    fn is_optimum(&self, x: &Vector2<f64>, eps: f64) -> bool {
        self.optima().iter().any(|opt| (opt - x).norm() <= eps)
    }
}

/// The function `x²/2 + 125/x` \[1\].
///
/// It has a single minimum at `x = 5` on the positive half-line and is not
/// defined at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference(());

impl Reference {
    /// Initializes the objective.
    pub fn new() -> Self {
        Self(())
    }
}

impl Objective for Reference {
    fn eval(&self, x: f64) -> f64 {
        x.powi(2) / 2.0 + 125.0 / x
    }
}

impl TestFunction for Reference {
    fn domains(&self) -> Vec<Domain> {
        vec![
            Domain::new(0.1, 10.0).unwrap(),
            Domain::new(1.0, 10.0).unwrap(),
        ]
    }

    fn optima(&self) -> Vec<f64> {
        vec![5.0]
    }
}

/// Parabola `a (x - c)² / 2` with the minimum at `c` (or maximum if `a` is
/// negative).
#[derive(Debug, Clone, Copy)]
pub struct Parabola {
    center: f64,
    curvature: f64,
}

impl Parabola {
    /// Initializes the parabola with given center and curvature.
    pub fn new(center: f64, curvature: f64) -> Self {
        assert!(curvature != 0.0, "curvature must be non-zero");
        Self { center, curvature }
    }
}

impl Default for Parabola {
    fn default() -> Self {
        Self::new(3.0, 1.0)
    }
}

impl Objective for Parabola {
    fn eval(&self, x: f64) -> f64 {
        self.curvature * (x - self.center).powi(2) / 2.0
    }
}

impl TestFunction for Parabola {
    fn domains(&self) -> Vec<Domain> {
        vec![Domain::new(self.center - 2.0, self.center + 7.0).unwrap()]
    }

    fn optima(&self) -> Vec<f64> {
        vec![self.center]
    }
}

/// Comb `cos(π x / step)`.
///
/// Any three points spaced by `step` form a zigzag, so there is no window of
/// that spacing where the function is monotone.
#[derive(Debug, Clone, Copy)]
pub struct Comb {
    step: f64,
}

impl Comb {
    /// Initializes the comb with given tooth spacing.
    pub fn new(step: f64) -> Self {
        assert!(step > 0.0, "step must be positive");
        Self { step }
    }
}

impl Objective for Comb {
    fn eval(&self, x: f64) -> f64 {
        (std::f64::consts::PI * x / self.step).cos()
    }
}

impl TestFunction for Comb {
    fn domains(&self) -> Vec<Domain> {
        vec![Domain::new(0.0, 100.0 * self.step).unwrap()]
    }

    fn optima(&self) -> Vec<f64> {
        // Minima are at odd multiples of the step.
        (0..50)
            .map(|i| (2 * i + 1) as f64 * self.step)
            .collect()
    }
}

/// [Himmelblau's function](https://en.wikipedia.org/wiki/Himmelblau%27s_function)
/// \[2\].
///
/// A multi-modal function with four global minima of value zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Himmelblau(());

impl Himmelblau {
    /// Initializes the objective.
    pub fn new() -> Self {
        Self(())
    }
}

impl PlanarObjective for Himmelblau {
    fn eval(&self, x: &Vector2<f64>) -> f64 {
        let (x, y) = (x[0], x[1]);
        (x.powi(2) + y - 11.0).powi(2) + (x + y.powi(2) - 7.0).powi(2)
    }
}

impl TestPlanarFunction for Himmelblau {
    fn domain(&self) -> PlanarDomain {
        PlanarDomain::square(-5.0, 5.0).unwrap()
    }

    fn optima(&self) -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(3.0, 2.0),
            Vector2::new(-2.805118, 3.131312),
            Vector2::new(-3.779310, -3.283186),
            Vector2::new(3.584428, -1.848126),
        ]
    }
}

/// [Sphere function](https://en.wikipedia.org/wiki/Test_functions_for_optimization)
/// `(x - a)² + (y - b)²` with a single minimum at `(a, b)`.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vector2<f64>,
}

impl Sphere {
    /// Initializes the objective with given minimum.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            center: Vector2::new(a, b),
        }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(1.0, -0.5)
    }
}

impl PlanarObjective for Sphere {
    fn eval(&self, x: &Vector2<f64>) -> f64 {
        (x - self.center).norm_squared()
    }
}

impl TestPlanarFunction for Sphere {
    fn domain(&self) -> PlanarDomain {
        PlanarDomain::square(-5.0, 5.0).unwrap()
    }

    fn optima(&self) -> Vec<Vector2<f64>> {
        vec![self.center]
    }
}

/// Checks that every record has as many cells as the header has columns.
pub fn consistent_records<R: crate::core::Record>(trace: &crate::core::Trace<R>) -> bool {
    trace
        .iter()
        .all(|record| record.cells().len() == R::HEADER.len())
}
