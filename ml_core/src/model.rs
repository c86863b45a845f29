use std::fmt;

/// A one dimensional linear predictor `y = slope * x + intercept`.
///
/// This is plain data: training and aggregation always produce a new model
/// instead of mutating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegressionModel {
    slope: f64,
    intercept: f64,
}

impl RegressionModel {
    /// Creates a new `RegressionModel`.
    ///
    /// # Args
    /// * `slope` - The line's slope.
    /// * `intercept` - The value of the line at `x = 0`.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// The `{0, 0}` model every client starts with.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Whether both parameters are finite.
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.2}x + {:.2}", self.slope, self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(RegressionModel::zero(), RegressionModel::new(0., 0.));
    }

    #[test]
    fn predict() {
        let model = RegressionModel::new(2., -1.);
        assert_eq!(model.predict(0.), -1.);
        assert_eq!(model.predict(3.), 5.);
    }

    #[test]
    fn display_rounds_to_two_decimals() {
        let model = RegressionModel::new(1.23456, -0.5);
        assert_eq!(model.to_string(), "y = 1.23x + -0.50");
    }
}
