use log::{debug, warn};
use ml_core::{LossFn, MlError, Mse, Point, RegressionModel, Result};

/// Step used by the forward finite-difference gradient estimate.
pub const FD_STEP: f64 = 0.01;

/// Outcome of a local training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    model: RegressionModel,
    initial_loss: f64,
    final_loss: f64,
    epochs: usize,
}

impl TrainReport {
    /// The refined model.
    pub fn model(&self) -> RegressionModel {
        self.model
    }

    /// Loss of the starting model over the training points.
    pub fn initial_loss(&self) -> f64 {
        self.initial_loss
    }

    /// Loss of the refined model over the training points.
    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Whether the run ended with a higher loss than it started with, which
    /// usually means the learning rate is too large for the step `FD_STEP`.
    pub fn is_diverging(&self) -> bool {
        self.final_loss > self.initial_loss
    }
}

/// Refines a model over a client's private points using gradient descent on a
/// numerically estimated gradient.
///
/// The gradient is never derived analytically. Each partial derivative is the
/// forward difference `(L(θ + h) - L(θ)) / h` with `h = FD_STEP`, so the update
/// inherits the bias and instability of that approximation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTrainer<L: LossFn = Mse> {
    loss_fn: L,
}

impl LocalTrainer<Mse> {
    /// Creates a new `LocalTrainer` minimizing the mean squared error.
    pub fn new() -> Self {
        Self { loss_fn: Mse }
    }
}

impl<L: LossFn> LocalTrainer<L> {
    /// Creates a new `LocalTrainer` minimizing the given loss function.
    ///
    /// # Args
    /// * `loss_fn` - The loss to minimize.
    pub fn with_loss(loss_fn: L) -> Self {
        Self { loss_fn }
    }

    /// Trains a copy of `start` and returns the refined model.
    ///
    /// # Args
    /// * `start` - The model to start from, left untouched.
    /// * `points` - The client's training points.
    /// * `epochs` - Number of gradient steps.
    /// * `learning_rate` - Scale applied to every gradient step.
    ///
    /// # Errors
    /// See [`LocalTrainer::fit`].
    pub fn train(
        &self,
        start: RegressionModel,
        points: &[Point],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<RegressionModel> {
        self.fit(start, points, epochs, learning_rate)
            .map(|report| report.model())
    }

    /// Trains a copy of `start` and reports the loss before and after.
    ///
    /// # Args
    /// * `start` - The model to start from, left untouched.
    /// * `points` - The client's training points.
    /// * `epochs` - Number of gradient steps.
    /// * `learning_rate` - Scale applied to every gradient step.
    ///
    /// # Returns
    /// A `TrainReport` holding the refined model.
    ///
    /// # Errors
    /// * `MlError::InsufficientData` if `points` is empty.
    /// * `MlError::Diverged` if the parameters stop being finite.
    pub fn fit(
        &self,
        start: RegressionModel,
        points: &[Point],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<TrainReport> {
        if points.is_empty() {
            return Err(MlError::InsufficientData);
        }

        let initial_loss = self.loss_fn.loss(&start, points);
        let mut slope = start.slope();
        let mut intercept = start.intercept();

        for epoch in 0..epochs {
            let (grad_slope, grad_intercept) = self.gradient(slope, intercept, points);

            slope -= grad_slope * learning_rate;
            intercept -= grad_intercept * learning_rate;

            debug!(
                epoch = epoch,
                grad_slope = grad_slope,
                grad_intercept = grad_intercept,
                slope = slope,
                intercept = intercept;
                "finite-difference step"
            );

            if !(slope.is_finite() && intercept.is_finite()) {
                warn!(epoch = epoch, learning_rate = learning_rate; "training diverged");
                return Err(MlError::Diverged { epoch });
            }
        }

        let model = RegressionModel::new(slope, intercept);
        let report = TrainReport {
            model,
            initial_loss,
            final_loss: self.loss_fn.loss(&model, points),
            epochs,
        };

        if report.is_diverging() {
            warn!(
                initial_loss = report.initial_loss,
                final_loss = report.final_loss,
                learning_rate = learning_rate;
                "loss increased during local training"
            );
        }

        Ok(report)
    }

    /// Estimates `(∂L/∂slope, ∂L/∂intercept)` with forward differences.
    fn gradient(&self, slope: f64, intercept: f64, points: &[Point]) -> (f64, f64) {
        let loss = |m, b| self.loss_fn.loss(&RegressionModel::new(m, b), points);
        let base = loss(slope, intercept);

        let grad_slope = (loss(slope + FD_STEP, intercept) - base) / FD_STEP;
        let grad_intercept = (loss(slope, intercept + FD_STEP) - base) / FD_STEP;

        (grad_slope, grad_intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_core::Mae;

    fn line_points(slope: f64, intercept: f64) -> Vec<Point> {
        (-10..=10)
            .map(|x| Point::new(x as f64, slope * x as f64 + intercept))
            .collect()
    }

    #[test]
    fn empty_points_is_insufficient_data() {
        let trainer = LocalTrainer::new();
        let err = trainer
            .train(RegressionModel::new(1., 0.), &[], 10, 0.1)
            .unwrap_err();

        assert_eq!(err, MlError::InsufficientData);
    }

    #[test]
    fn zero_epochs_is_identity() {
        let trainer = LocalTrainer::new();
        let start = RegressionModel::new(0.3, -2.);
        let model = trainer.train(start, &line_points(1., 1.), 0, 0.1).unwrap();

        assert_eq!(model, start);
    }

    #[test]
    fn zero_learning_rate_is_identity() {
        let trainer = LocalTrainer::new();
        let start = RegressionModel::new(0.3, -2.);
        let model = trainer.train(start, &line_points(1., 1.), 25, 0.).unwrap();

        assert_eq!(model, start);
    }

    #[test]
    fn single_step_matches_forward_difference() {
        // L(m, b) = (m + b - 2)^2 for the single point (1, 2).
        let points = [Point::new(1., 2.)];
        let trainer = LocalTrainer::new();
        let model = trainer
            .train(RegressionModel::zero(), &points, 1, 0.1)
            .unwrap();

        let base = 4.;
        let grad = ((FD_STEP - 2.) * (FD_STEP - 2.) - base) / FD_STEP;
        let expected = -grad * 0.1;

        assert!((model.slope() - expected).abs() < 1e-12);
        assert!((model.intercept() - expected).abs() < 1e-12);
    }

    #[test]
    fn one_step_reduces_loss() {
        let points = [Point::new(1., 2.)];
        let trainer = LocalTrainer::new();
        let report = trainer
            .fit(RegressionModel::zero(), &points, 1, 0.1)
            .unwrap();

        assert!(report.final_loss() < report.initial_loss());
        assert!(!report.is_diverging());
    }

    #[test]
    fn converges_near_the_generating_line() {
        let points = line_points(-0.8, 1.5);
        let trainer = LocalTrainer::new();
        let model = trainer
            .train(RegressionModel::new(1., 0.), &points, 500, 0.01)
            .unwrap();

        // The forward difference biases the minimum by roughly h / 2.
        assert!((model.slope() + 0.8).abs() < 0.05, "slope: {}", model.slope());
        assert!((model.intercept() - 1.5).abs() < 0.05, "intercept: {}", model.intercept());
    }

    #[test]
    fn start_model_is_untouched() {
        let start = RegressionModel::new(1., 0.);
        let _ = LocalTrainer::new().train(start, &line_points(2., 0.), 5, 0.01);

        assert_eq!(start, RegressionModel::new(1., 0.));
    }

    #[test]
    fn deterministic() {
        let points = line_points(0.5, -3.);
        let trainer = LocalTrainer::new();
        let a = trainer.train(RegressionModel::zero(), &points, 15, 0.01).unwrap();
        let b = trainer.train(RegressionModel::zero(), &points, 15, 0.01).unwrap();

        assert_eq!(a.slope().to_bits(), b.slope().to_bits());
        assert_eq!(a.intercept().to_bits(), b.intercept().to_bits());
    }

    #[test]
    fn large_learning_rate_is_reported_as_diverging() {
        let points = line_points(1., 0.);
        let report = LocalTrainer::new()
            .fit(RegressionModel::zero(), &points, 3, 1.)
            .unwrap();

        assert!(report.is_diverging());
        assert!(report.model().is_finite());
    }

    #[test]
    fn overflow_is_diverged() {
        // The first step lands near 1e201, the next loss overflows to infinity.
        let points = line_points(1., 0.);
        let err = LocalTrainer::new()
            .fit(RegressionModel::zero(), &points, 5, 1e200)
            .unwrap_err();

        assert_eq!(err, MlError::Diverged { epoch: 1 });
    }

    #[test]
    fn absolute_loss_moves_toward_data() {
        let points = [Point::new(1., 2.)];
        let trainer = LocalTrainer::with_loss(Mae);
        let report = trainer
            .fit(RegressionModel::zero(), &points, 1, 0.1)
            .unwrap();

        assert!(report.final_loss() < report.initial_loss());
    }
}
