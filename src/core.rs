//! Core abstractions and types.
//!
//! *Users* are mainly interested in the [`Objective`] and [`PlanarObjective`]
//! traits, the [domain](Domain), [termination controls](Controls) and the
//! [trace](Trace) filled by the searches.
//!
//! Algorithm *developers* are interested in implementing the [`Search`] or
//! [`PlanarSearch`] trait with a dedicated [`Record`] type and using tools in
//! the [derivatives](crate::derivatives) module.

mod base;
mod controls;
mod domain;
mod function;
mod search;
mod trace;

pub use base::*;
pub use controls::*;
pub use domain::*;
pub use function::*;
pub use search::*;
pub use trace::*;
