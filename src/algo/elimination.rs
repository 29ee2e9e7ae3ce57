//! Rules shared by the region-elimination methods.

use log::debug;

use crate::core::{Controls, Goal};

/// Termination family of the region-elimination methods.
///
/// The run stops when the bracket is shorter than `epsilon`, when `delta` is
/// longer than the bracket, or when the iteration budget is spent. Spending
/// the budget is not a failure for these methods.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Termination {
    epsilon: Option<f64>,
    delta: Option<f64>,
    max_iters: usize,
}

/// Reason why the elimination loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    Converged,
    Exhausted,
}

impl Termination {
    pub fn new(controls: &Controls) -> Self {
        Self {
            epsilon: controls.epsilon(),
            delta: controls.delta(),
            max_iters: controls.max_iters_or_default(),
        }
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Checks the bracket of given length before the iteration `iteration`
    /// (counted from zero) is performed.
    pub fn check(&self, length: f64, iteration: usize) -> Option<Stop> {
        if let Some(epsilon) = self.epsilon {
            if length < epsilon {
                debug!("bracket length {} < epsilon {}", length, epsilon);
                return Some(Stop::Converged);
            }
        }

        if let Some(delta) = self.delta {
            if delta > length {
                debug!("delta {} > bracket length {}", delta, length);
                return Some(Stop::Converged);
            }
        }

        if iteration >= self.max_iters {
            debug!("maximum number of iterations reached");
            return Some(Stop::Exhausted);
        }

        None
    }
}

/// Places two test points at distance `lk` from the ends of the bracket,
/// ordered so that the first is not greater than the second. Points never
/// leave the bracket.
pub(crate) fn test_points(min: f64, max: f64, lk: f64) -> (f64, f64) {
    let a = (min + lk).max(min).min(max);
    let b = (max - lk).max(min).min(max);
    (a.min(b), a.max(b))
}

/// Narrows the bracket `[min, max]` using two interior test points
/// `x1 <= x2`.
///
/// The part beyond the worse point is eliminated. On an exact tie both test
/// points become the new bounds.
pub(crate) fn narrow(
    goal: Goal,
    (x1, fx1): (f64, f64),
    (x2, fx2): (f64, f64),
    min: &mut f64,
    max: &mut f64,
) {
    if goal.is_better(fx1, fx2) {
        *max = x2;
    } else if goal.is_better(fx2, fx1) {
        *min = x1;
    } else {
        *min = x1;
        *max = x2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn termination_order() {
        let t = Termination::new(&Controls::new().with_epsilon(0.1).with_max_iters(5));

        assert_eq!(t.check(1.0, 0), None);
        assert_eq!(t.check(0.05, 0), Some(Stop::Converged));
        assert_eq!(t.check(1.0, 5), Some(Stop::Exhausted));

        let t = Termination::new(&Controls::new().with_delta(0.5));
        assert_eq!(t.check(0.4, 0), Some(Stop::Converged));
        assert_eq!(t.check(0.6, 99), None);
        assert_eq!(t.check(0.6, 100), Some(Stop::Exhausted));
    }

    #[test]
    fn crossed_points_are_ordered() {
        assert_eq!(test_points(0.0, 1.0, 0.25), (0.25, 0.75));
        assert_eq!(test_points(0.0, 1.0, 0.75), (0.25, 0.75));
        assert_eq!(test_points(0.0, 1.0, 1.5), (0.0, 1.0));
    }

    #[test]
    fn tie_keeps_both_points() {
        let (mut min, mut max) = (0.0, 1.0);
        narrow(Goal::Minimize, (0.4, 1.0), (0.6, 1.0), &mut min, &mut max);
        assert_eq!((min, max), (0.4, 0.6));

        let (mut min, mut max) = (0.0, 1.0);
        narrow(Goal::Maximize, (0.4, 2.0), (0.6, 1.0), &mut min, &mut max);
        assert_eq!((min, max), (0.0, 0.6));
    }
}
