#![warn(missing_docs)]

//! # Extremum
//!
//! Classical methods for finding an extremum (minimum or maximum) of a
//! function of one variable on an interval, and two direct-search methods for
//! functions of two variables.
//!
//! All methods record every iteration into a caller-owned [`Trace`] with a
//! fixed column schema, so that the process can be tabulated, plotted or
//! animated after the run.
//!
//! ## Algorithms
//!
//! Bracketing methods find a small interval enclosing the extremum of a
//! unimodal function:
//!
//! * [Exhaustive search](algo::exhaustive)
//! * [Bounding phase](algo::bounding_phase)
//!
//! Region-elimination methods shrink a known bracket:
//!
//! * [Interval halving](algo::interval_halving)
//! * [Fibonacci search](algo::fibonacci)
//! * [Golden-section search](algo::golden_section)
//!
//! Derivative-based methods look for a stationary point using [finite
//! differences](derivatives):
//!
//! * [Bisection](algo::bisection)
//! * [Newton-Raphson](algo::newton_raphson)
//!
//! Direct-search methods for functions of two variables:
//!
//! * [Hypercube search](algo::hypercube)
//! * [Nelder-Mead simplex search](algo::nelder_mead) -- Recommended for
//!   multi-modal functions, it restarts from random triangles to find more
//!   than one extremum.
//!
//! ## Problem
//!
//! The objective is any type that implements the [`Objective`] trait (or
//! [`PlanarObjective`] for two variables). Closures work out of the box.
//!
//! ```rust
//! use extremum::{algo::GoldenSection, Controls, Domain, Goal, Search, Trace};
//!
//! let f = |x: f64| x.powi(2) / 2.0 + 125.0 / x;
//! let dom = Domain::new(0.1, 10.0).unwrap();
//!
//! // At least one of delta, epsilon and max iterations must be given.
//! let controls = Controls::new().with_epsilon(1e-3);
//! let mut trace = Trace::new();
//!
//! let outcome = GoldenSection::new()
//!     .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
//!     .unwrap();
//!
//! assert!(outcome.success);
//! assert!((outcome.best.unwrap() - 5.0).abs() < 1e-3);
//!
//! for record in &trace {
//!     println!("{}: [{}, {}]", record.iteration, record.min, record.max);
//! }
//! ```
//!
//! Methods with a random starting point take a random number generator, so
//! the runs are reproducible with a seeded one.
//!
//! ```rust
//! use extremum::{algo::SimplexSearch, Controls, Goal, PlanarDomain, PlanarSearch, Trace};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let himmelblau = |x: f64, y: f64| (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2);
//! let dom = PlanarDomain::square(-5.0, 5.0).unwrap();
//! let controls = Controls::new().with_epsilon(1e-6).with_max_iters(500);
//! let mut trace = Trace::new();
//!
//! let outcome = SimplexSearch::new(StdRng::seed_from_u64(1))
//!     .search(&himmelblau, &dom, &controls, Goal::Minimize, &mut trace)
//!     .unwrap();
//!
//! for solution in &outcome.solutions {
//!     println!("{:?}: {}", solution.x.as_slice(), solution.value);
//! }
//! ```
//!
//! To select a one-variable method by its name, use the [`driver`].
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
mod core;
pub mod derivatives;
pub mod driver;

pub use core::*;

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
