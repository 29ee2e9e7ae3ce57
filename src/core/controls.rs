use getset::CopyGetters;

use super::base::ConfigError;

/// Maximum number of iterations used when the caller does not give one.
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Termination controls of a single search run.
///
/// Each algorithm uses a different subset. Step size (`delta`) drives the
/// bracketing methods, tolerance (`epsilon`) the derivative-based and
/// multivariable methods, and region elimination accepts any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Controls {
    /// Step size.
    delta: Option<f64>,
    /// Convergence tolerance.
    epsilon: Option<f64>,
    /// Maximum number of iterations.
    max_iters: Option<usize>,
}

impl Controls {
    /// Creates empty controls. At least one control must be set before the
    /// controls pass [`validate`](Controls::validate).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step size.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = Some(max_iters);
        self
    }

    /// Checks that at least one control is given and that the given values
    /// make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delta.is_none() && self.epsilon.is_none() && self.max_iters.is_none() {
            return Err(ConfigError::NoControls);
        }

        if let Some(delta) = self.delta {
            if !delta.is_finite() || delta == 0.0 {
                return Err(ConfigError::InvalidDelta(delta));
            }
        }

        if let Some(epsilon) = self.epsilon {
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(ConfigError::InvalidEpsilon(epsilon));
            }
        }

        Ok(())
    }

    /// Gets the step size or fails for an algorithm that cannot work without
    /// it.
    pub fn require_delta(&self, algo: &'static str) -> Result<f64, ConfigError> {
        self.validate()?;
        self.delta.ok_or(ConfigError::MissingDelta(algo))
    }

    /// Gets the tolerance or fails for an algorithm that cannot work without
    /// it.
    pub fn require_epsilon(&self, algo: &'static str) -> Result<f64, ConfigError> {
        self.validate()?;
        self.epsilon.ok_or(ConfigError::MissingEpsilon(algo))
    }

    /// Gets the maximum number of iterations, [`DEFAULT_MAX_ITERS`] if not
    /// given.
    pub fn max_iters_or_default(&self) -> usize {
        self.max_iters.unwrap_or(DEFAULT_MAX_ITERS)
    }
}
