use log::debug;
use ml_core::RegressionModel;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::{ModelGen, Result};

/// Default half-open range the slope is drawn from.
pub const SLOPE_RANGE: (f64, f64) = (-1., 1.);

/// Default half-open range the intercept is drawn from.
pub const INTERCEPT_RANGE: (f64, f64) = (-5., 5.);

/// A model generator that draws slope and intercept from independent uniform distributions.
#[derive(Debug, Clone)]
pub struct RandModelGen<R: Rng> {
    rng: R,
    slope: Uniform<f64>,
    intercept: Uniform<f64>,
}

impl<R: Rng> RandModelGen<R> {
    /// Creates a new `RandModelGen` model generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `slope` - The inclusive lower and exclusive upper limit for the slope.
    /// * `intercept` - The inclusive lower and exclusive upper limit for the intercept.
    ///
    /// # Returns
    /// An error if any range is invalid (low >= high or not finite).
    pub fn new(rng: R, slope: (f64, f64), intercept: (f64, f64)) -> Result<Self> {
        Ok(Self {
            rng,
            slope: Uniform::new(slope.0, slope.1)?,
            intercept: Uniform::new(intercept.0, intercept.1)?,
        })
    }

    /// Creates a new `RandModelGen` over `SLOPE_RANGE` and `INTERCEPT_RANGE`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    pub fn uniform(rng: R) -> Result<Self> {
        Self::new(rng, SLOPE_RANGE, INTERCEPT_RANGE)
    }
}

impl<R: Rng> ModelGen for RandModelGen<R> {
    fn sample(&mut self) -> RegressionModel {
        let model = RegressionModel::new(
            self.slope.sample(&mut self.rng),
            self.intercept.sample(&mut self.rng),
        );

        debug!("sampled random model {model}");
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn samples_within_default_ranges() {
        let mut model_gen = RandModelGen::uniform(seeded_rng()).unwrap();

        for _ in 0..1000 {
            let model = model_gen.sample();
            assert!((-1. ..1.).contains(&model.slope()));
            assert!((-5. ..5.).contains(&model.intercept()));
        }
    }

    #[test]
    fn same_seed_same_models() {
        let mut a = RandModelGen::uniform(seeded_rng()).unwrap();
        let mut b = RandModelGen::uniform(seeded_rng()).unwrap();

        for _ in 0..10 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(RandModelGen::new(seeded_rng(), (1., 1.), INTERCEPT_RANGE).is_err());
        assert!(RandModelGen::new(seeded_rng(), SLOPE_RANGE, (5., -5.)).is_err());
    }
}
