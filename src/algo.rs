//! The collection of implemented algorithms.
//!
//! One-variable searches implement [`Search`](crate::Search), two-variable
//! searches implement [`PlanarSearch`](crate::PlanarSearch).

pub mod bisection;
pub mod bounding_phase;
mod elimination;
pub mod exhaustive;
pub mod fibonacci;
pub mod golden_section;
pub mod hypercube;
pub mod interval_halving;
pub mod nelder_mead;
pub mod newton_raphson;

pub use bisection::Bisection;
pub use bounding_phase::BoundingPhase;
pub use exhaustive::ExhaustiveSearch;
pub use fibonacci::FibonacciSearch;
pub use golden_section::GoldenSection;
pub use hypercube::Hypercube;
pub use interval_halving::IntervalHalving;
pub use nelder_mead::SimplexSearch;
pub use newton_raphson::NewtonRaphson;
