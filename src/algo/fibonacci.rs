//! Fibonacci search.
//!
//! Region-elimination method which places two test points at distance
//! `lk = Fib(n - k + 1) / Fib(n + 1) * L0` from the ends of the bracket, where
//! `L0` is the length of the original bracket and `n` is the iteration
//! budget. The part beyond the worse test point is eliminated. One of the
//! test points of an iteration coincides with a test point of the next one,
//! so the bracket shrinks by the inverse golden ratio in the limit.
//!
//! The iteration budget (default 100) determines the length of the
//! sequence. A budget of more than 1475 iterations is rejected because the
//! Fibonacci numbers do not fit into `f64` anymore.

use log::debug;

use super::elimination::{narrow, test_points, Stop, Termination};
use crate::core::{
    Cell, ConfigError, Controls, Domain, Error, Goal, Objective, Outcome, Record, Search, Trace,
};

/// Memo table of Fibonacci numbers `Fib(0) = 0`, `Fib(1) = 1`.
///
/// Values are stored as floats since they are only ever used in ratios. The
/// largest index with a finite value is 1476.
#[derive(Debug, Clone)]
pub struct Fibonacci {
    table: Vec<f64>,
}

impl Fibonacci {
    /// Creates the table with the first two numbers.
    pub fn new() -> Self {
        Self {
            table: vec![0.0, 1.0],
        }
    }

    /// Gets the Fibonacci number of given index, extending the table if
    /// needed.
    pub fn get(&mut self, n: i64) -> Result<f64, ConfigError> {
        if n < 0 {
            return Err(ConfigError::NegativeFibonacci(n));
        }

        let index = n as usize;

        while self.table.len() <= index {
            let len = self.table.len();
            let next = self.table[len - 1] + self.table[len - 2];

            if !next.is_finite() {
                return Err(ConfigError::FibonacciOverflow(n));
            }

            self.table.push(next);
        }

        Ok(self.table[index])
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

/// Fibonacci search. See [module](self) documentation for more details.
#[derive(Debug, Clone, Default)]
pub struct FibonacciSearch {
    fib: Fibonacci,
}

impl FibonacciSearch {
    /// Initializes the search with an empty memo table.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Iteration record of [`FibonacciSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FibonacciRecord {
    /// Iteration number, starting from 1.
    pub iteration: usize,
    /// Lower end of the bracket.
    pub min: f64,
    /// Upper end of the bracket.
    pub max: f64,
    /// Distance of the test points from the bracket ends.
    pub lk: f64,
    /// Lower test point.
    pub x1: f64,
    /// Upper test point.
    pub x2: f64,
    /// `f(x1)`.
    pub fx1: f64,
    /// `f(x2)`.
    pub fx2: f64,
    /// Step of the Fibonacci sequence, starting from 2.
    pub k: usize,
}

impl Record for FibonacciRecord {
    const HEADER: &'static [&'static str] = &[
        "iteration", "min", "max", "lk", "x1", "x2", "f(x1)", "f(x2)", "k",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iteration),
            Cell::Real(self.min),
            Cell::Real(self.max),
            Cell::Real(self.lk),
            Cell::Real(self.x1),
            Cell::Real(self.x2),
            Cell::Real(self.fx1),
            Cell::Real(self.fx2),
            Cell::Index(self.k),
        ]
    }
}

impl Search for FibonacciSearch {
    const NAME: &'static str = "fibonacci search";

    type Record = FibonacciRecord;

    fn search<F: Objective>(
        &mut self,
        f: &F,
        dom: &Domain,
        controls: &Controls,
        goal: Goal,
        trace: &mut Trace<Self::Record>,
    ) -> Result<Outcome, Error> {
        controls.validate()?;
        let termination = Termination::new(controls);

        let n = termination.max_iters() as i64;
        let denom = self.fib.get(n + 1)?;
        let l0 = dom.width();

        let mut min = dom.lower();
        let mut max = dom.upper();
        let mut k = 2;
        let mut iteration = 0;

        let stop = loop {
            if let Some(stop) = termination.check(max - min, iteration) {
                break stop;
            }

            if k as i64 > n {
                debug!("fibonacci sequence of length {} used up", n);
                break Stop::Exhausted;
            }

            let lk = self.fib.get(n - k as i64 + 1)? / denom * l0;
            // In the last step of the sequence the points meet and cross.
            let (x1, x2) = test_points(min, max, lk);

            let fx1 = f.apply(x1)?;
            let fx2 = f.apply(x2)?;

            iteration += 1;
            trace.push(FibonacciRecord {
                iteration,
                min,
                max,
                lk,
                x1,
                x2,
                fx1,
                fx2,
                k,
            });

            narrow(goal, (x1, fx1), (x2, fx2), &mut min, &mut max);
            debug!("k = {}, bracket narrowed to [{}, {}]", k, min, max);

            k += 1;
        };

        let best = 0.5 * (min + max);

        Ok(match stop {
            Stop::Converged => Outcome::converged(iteration, best),
            Stop::Exhausted => Outcome::exhausted(iteration, Some(best), true),
        })
    }
}
