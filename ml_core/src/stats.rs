use crate::{MlError, Point, RegressionModel, Result};

/// Goodness of fit of a model against a reference point set.
///
/// Fields are private so the set of reported statistics can grow without
/// breaking the public API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegressionStats {
    r_squared: f64,
    ss_residual: f64,
}

impl RegressionStats {
    /// Creates a new `RegressionStats`.
    ///
    /// # Args
    /// * `r_squared` - Coefficient of determination.
    /// * `ss_residual` - Sum of squared residuals.
    pub fn new(r_squared: f64, ss_residual: f64) -> Self {
        Self {
            r_squared,
            ss_residual,
        }
    }

    /// Returns the coefficient of determination, `1 - ss_residual / ss_total`.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Returns the sum of squared residuals.
    pub fn ss_residual(&self) -> f64 {
        self.ss_residual
    }
}

/// Computes R² and the residual sum of squares of `model` over `points`.
///
/// # Args
/// * `model` - The model to evaluate.
/// * `points` - The reference point set.
///
/// # Returns
/// The statistics, or `{0, 0}` when `points` is empty.
///
/// # Errors
/// Returns `MlError::DegenerateVariance` when every `y` is identical, since the
/// total sum of squares is then zero and R² is undefined.
pub fn compute_stats(model: &RegressionModel, points: &[Point]) -> Result<RegressionStats> {
    if points.is_empty() {
        return Ok(RegressionStats::default());
    }

    let n = points.len() as f64;
    let mean_y = points.iter().map(Point::y).sum::<f64>() / n;

    let ss_total: f64 = points.iter().map(|p| (p.y() - mean_y).powi(2)).sum();
    let ss_residual: f64 = points
        .iter()
        .map(|p| (p.y() - model.predict(p.x())).powi(2))
        .sum();

    if ss_total == 0. {
        return Err(MlError::DegenerateVariance);
    }

    Ok(RegressionStats::new(1. - ss_residual / ss_total, ss_residual))
}
