//! Tools for derivative-based methods.
//!
//! Derivatives are approximated by plain finite differences with a fixed
//! step. There is no adaptive step control, so very small steps lose
//! precision to cancellation.

use crate::core::{Objective, ProblemError};

/// Default step for finite differences.
pub const DEFAULT_STEP: f64 = 0.01;

/// Approximates the first derivative by forward difference
/// `(f(x + h) - f(x)) / h`.
pub fn derivative<F: Objective + ?Sized>(f: &F, x: f64, h: f64) -> Result<f64, ProblemError> {
    let fx = f.apply(x)?;
    let fxh = f.apply(x + h)?;
    Ok((fxh - fx) / h)
}

/// Approximates the second derivative by central difference
/// `(f(x + h) - 2 f(x) + f(x - h)) / h²`.
pub fn second_derivative<F: Objective + ?Sized>(
    f: &F,
    x: f64,
    h: f64,
) -> Result<f64, ProblemError> {
    let fx = f.apply(x)?;
    let fxh = f.apply(x + h)?;
    let fxmh = f.apply(x - h)?;
    Ok((fxh - 2.0 * fx + fxmh) / (h * h))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn parabola() {
        let f = |x: f64| x * x;

        // Forward difference of x² is exactly 2x + h.
        assert_abs_diff_eq!(derivative(&f, 3.0, DEFAULT_STEP).unwrap(), 6.01, epsilon = 1e-9);
        assert_abs_diff_eq!(
            second_derivative(&f, 3.0, DEFAULT_STEP).unwrap(),
            2.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn domain_error_propagates() {
        let f = |x: f64| 125.0 / x;
        assert!(derivative(&f, 0.0, DEFAULT_STEP).is_err());
        assert!(second_derivative(&f, -DEFAULT_STEP, DEFAULT_STEP).is_err());
    }
}
