//! Search domain definition such as bounds for variables.

use nalgebra::Vector2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::base::ConfigError;

/// Search interval of a one-variable problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lower: f64,
    upper: f64,
}

impl Domain {
    /// Creates the interval `[lower, upper]`.
    ///
    /// Fails if `lower >= upper` or any of the bounds is not finite.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(ConfigError::InvalidDomain { lower, upper });
        }

        Ok(Self { lower, upper })
    }

    /// Gets the lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Gets the upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Gets the length of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Checks whether the point lies in the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Projects the point into the interval.
    pub fn project(&self, x: f64) -> f64 {
        x.clamp(self.lower, self.upper)
    }

    /// Samples a point uniformly from the open interval `(lower + margin,
    /// upper - margin)`.
    ///
    /// Returns `None` if the margin leaves no room for sampling or the draw
    /// hits the shrunk bounds exactly.
    pub fn sample_inner<R: Rng + ?Sized>(&self, margin: f64, rng: &mut R) -> Option<f64> {
        let lower = self.lower + margin;
        let upper = self.upper - margin;

        if !(lower < upper) {
            return None;
        }

        let x = Uniform::new(lower, upper).sample(rng);
        (x > lower && x < upper).then_some(x)
    }
}

/// Search rectangle of a two-variable problem.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarDomain {
    lower: Vector2<f64>,
    upper: Vector2<f64>,
}

impl PlanarDomain {
    /// Creates the square `[min, max]²`.
    pub fn square(min: f64, max: f64) -> Result<Self, ConfigError> {
        Self::new(Vector2::new(min, min), Vector2::new(max, max))
    }

    /// Creates the rectangle with given per-axis bounds.
    pub fn new(lower: Vector2<f64>, upper: Vector2<f64>) -> Result<Self, ConfigError> {
        for i in 0..2 {
            Domain::new(lower[i], upper[i])?;
        }

        Ok(Self { lower, upper })
    }

    /// Gets the lower corner.
    pub fn lower(&self) -> &Vector2<f64> {
        &self.lower
    }

    /// Gets the upper corner.
    pub fn upper(&self) -> &Vector2<f64> {
        &self.upper
    }

    /// Gets the center of the rectangle.
    pub fn center(&self) -> Vector2<f64> {
        (self.lower + self.upper) * 0.5
    }

    /// Projects given point into the domain. Returns `true` if the point was
    /// outside.
    pub fn project(&self, x: &mut Vector2<f64>) -> bool {
        let mut not_feasible = false;

        self.lower
            .iter()
            .zip(self.upper.iter())
            .zip(x.iter_mut())
            .for_each(|((li, ui), xi)| {
                if *xi < *li {
                    *xi = *li;
                    not_feasible = true;
                } else if *xi > *ui {
                    *xi = *ui;
                    not_feasible = true;
                }
            });

        not_feasible
    }

    /// Samples a point uniformly from the rectangle shrunk by `margin` on
    /// every side.
    ///
    /// If the margin is too large for an axis, that axis is sampled from the
    /// full interval.
    pub fn sample<R: Rng + ?Sized>(&self, margin: f64, rng: &mut R) -> Vector2<f64> {
        Vector2::from_fn(|i, _| {
            let mut lower = self.lower[i] + margin;
            let mut upper = self.upper[i] - margin;

            if !(lower < upper) {
                lower = self.lower[i];
                upper = self.upper[i];
            }

            Uniform::new(lower, upper).sample(rng)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn invalid_bounds() {
        assert!(matches!(
            Domain::new(1.0, 1.0),
            Err(ConfigError::InvalidDomain { .. })
        ));
        assert!(Domain::new(2.0, -1.0).is_err());
        assert!(Domain::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(PlanarDomain::new(Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.5)).is_err());
    }

    #[test]
    fn projection() {
        let dom = PlanarDomain::square(-5.0, 5.0).unwrap();

        let mut x = Vector2::new(7.0, -1.0);
        assert!(dom.project(&mut x));
        assert_eq!(x, Vector2::new(5.0, -1.0));

        let mut y = Vector2::new(0.5, 0.5);
        assert!(!dom.project(&mut y));
    }

    #[test]
    fn inner_sampling_respects_margin() {
        let dom = Domain::new(0.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let x = dom.sample_inner(0.25, &mut rng).unwrap();
            assert!(x > 0.25 && x < 0.75);
        }

        assert_eq!(dom.sample_inner(0.5, &mut rng), None);
    }
}
