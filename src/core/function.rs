use std::{cell::RefCell, collections::HashMap};

use log::trace;
use nalgebra::Vector2;

use super::base::ProblemError;

/// The trait for defining objectives of one variable.
///
/// ## Defining an objective
///
/// An objective is any type that implements [`Objective`]. The only required
/// method is [`eval`](Objective::eval) which computes the function value.
/// Closures `Fn(f64) -> f64` are objectives too.
///
/// ```rust
/// use extremum::Objective;
///
/// struct Reference;
///
/// impl Objective for Reference {
///     fn eval(&self, x: f64) -> f64 {
///         x.powi(2) / 2.0 + 125.0 / x
///     }
/// }
///
/// assert!(Reference.apply(0.0).is_err());
/// assert_eq!(Reference.apply(5.0).unwrap(), 37.5);
/// ```
pub trait Objective {
    /// Calculates the function value.
    fn eval(&self, x: f64) -> f64;

    /// Calculates the function value and checks that it is finite.
    ///
    /// Algorithms call this method. Any NaN or infinity is turned into
    /// [`ProblemError::InvalidValue`] so that domain errors of the objective
    /// are never mistaken for regular values.
    fn apply(&self, x: f64) -> Result<f64, ProblemError> {
        let fx = self.eval(x);
        trace!("f({}) = {}", x, fx);

        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(ProblemError::InvalidValue)
        }
    }
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// The trait for defining objectives of two variables.
///
/// Closures `Fn(f64, f64) -> f64` are planar objectives too.
pub trait PlanarObjective {
    /// Calculates the function value.
    fn eval(&self, x: &Vector2<f64>) -> f64;

    /// Calculates the function value and checks that it is finite. See
    /// [`Objective::apply`].
    fn apply(&self, x: &Vector2<f64>) -> Result<f64, ProblemError> {
        let fx = self.eval(x);
        trace!("f({}, {}) = {}", x[0], x[1], fx);

        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(ProblemError::InvalidValue)
        }
    }
}

impl<F> PlanarObjective for F
where
    F: Fn(f64, f64) -> f64,
{
    fn eval(&self, x: &Vector2<f64>) -> f64 {
        self(x[0], x[1])
    }
}

/// Objective adapter that remembers computed values.
///
/// The cache is keyed by the exact bit pattern of the input and is never
/// evicted. It is owned by the caller, so its lifetime is under their control.
pub struct Memoized<F> {
    f: F,
    cache: RefCell<HashMap<u64, f64>>,
}

impl<F: Objective> Memoized<F> {
    /// Wraps the objective.
    pub fn new(f: F) -> Self {
        Self {
            f,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Gets the number of cached values.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Forgets all cached values.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl<F: Objective> Objective for Memoized<F> {
    fn eval(&self, x: f64) -> f64 {
        if let Some(fx) = self.cache.borrow().get(&x.to_bits()) {
            return *fx;
        }

        let fx = self.f.eval(x);
        self.cache.borrow_mut().insert(x.to_bits(), fx);
        fx
    }
}

/// Planar counterpart of [`Memoized`].
pub struct MemoizedPlanar<F> {
    f: F,
    cache: RefCell<HashMap<(u64, u64), f64>>,
}

impl<F: PlanarObjective> MemoizedPlanar<F> {
    /// Wraps the objective.
    pub fn new(f: F) -> Self {
        Self {
            f,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Gets the number of cached values.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Forgets all cached values.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl<F: PlanarObjective> PlanarObjective for MemoizedPlanar<F> {
    fn eval(&self, x: &Vector2<f64>) -> f64 {
        let key = (x[0].to_bits(), x[1].to_bits());

        if let Some(fx) = self.cache.borrow().get(&key) {
            return *fx;
        }

        let fx = self.f.eval(x);
        self.cache.borrow_mut().insert(key, fx);
        fx
    }
}
