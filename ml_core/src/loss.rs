use crate::{Point, RegressionModel};

/// A loss function measuring how far a model's predictions are from a point set.
pub trait LossFn {
    /// Computes the mean prediction error of `model` over `points`.
    ///
    /// An empty point set yields `0.0`. That value is defined but degenerate:
    /// callers that need a meaningful loss must reject empty sets themselves.
    fn loss(&self, model: &RegressionModel, points: &[Point]) -> f64;
}

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, model: &RegressionModel, points: &[Point]) -> f64 {
        mean_of(points, |p| (model.predict(p.x()) - p.y()).powi(2))
    }
}

/// Mean absolute error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mae;

impl Mae {
    /// Returns a new `Mae`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mae {
    fn loss(&self, model: &RegressionModel, points: &[Point]) -> f64 {
        mean_of(points, |p| (model.predict(p.x()) - p.y()).abs())
    }
}

/// Selects one of the available loss functions at runtime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LossKind {
    #[default]
    Squared,
    Absolute,
}

impl LossFn for LossKind {
    fn loss(&self, model: &RegressionModel, points: &[Point]) -> f64 {
        match self {
            LossKind::Squared => Mse.loss(model, points),
            LossKind::Absolute => Mae.loss(model, points),
        }
    }
}

fn mean_of(points: &[Point], err: impl Fn(&Point) -> f64) -> f64 {
    if points.is_empty() {
        return 0.;
    }

    points.iter().map(err).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        vec![Point::new(0., 1.), Point::new(1., 1.), Point::new(2., 4.)]
    }

    #[test]
    fn mse_on_known_values() {
        // residuals: -1, 0, -2
        let model = RegressionModel::new(1., 0.);
        assert_eq!(Mse.loss(&model, &points()), 5. / 3.);
    }

    #[test]
    fn mae_on_known_values() {
        let model = RegressionModel::new(1., 0.);
        assert_eq!(Mae.loss(&model, &points()), 1.);
    }

    #[test]
    fn empty_is_zero() {
        let model = RegressionModel::new(3., 7.);
        assert_eq!(Mse.loss(&model, &[]), 0.);
        assert_eq!(Mae.loss(&model, &[]), 0.);
    }

    #[test]
    fn exact_fit_is_zero() {
        let model = RegressionModel::new(2., 1.);
        let points: Vec<_> = (0..5)
            .map(|i| Point::new(i as f64, 2. * i as f64 + 1.))
            .collect();

        assert_eq!(Mse.loss(&model, &points), 0.);
    }

    #[test]
    fn deterministic() {
        let model = RegressionModel::new(0.37, -1.9);
        let points = points();

        let a = Mse.loss(&model, &points);
        let b = Mse.loss(&model, &points);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn kind_dispatches() {
        let model = RegressionModel::new(1., 0.);
        let points = points();

        assert_eq!(LossKind::Squared.loss(&model, &points), Mse.loss(&model, &points));
        assert_eq!(LossKind::Absolute.loss(&model, &points), Mae.loss(&model, &points));
        assert_eq!(LossKind::default(), LossKind::Squared);
    }
}
