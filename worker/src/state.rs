use ml_core::{Point, RegressionModel};

/// A client's private partition of the data and its latest local model.
#[derive(Debug, Clone)]
pub struct ClientState {
    id: usize,

    /// Private training points, in insertion order.
    points: Vec<Point>,

    /// Result of the last local training run, `{0, 0}` until the first one.
    local_model: RegressionModel,
}

impl ClientState {
    /// Creates a new `ClientState` with no points and a zero local model.
    ///
    /// # Args
    /// * `id` - One based client identifier.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            points: Vec::new(),
            local_model: RegressionModel::zero(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn local_model(&self) -> RegressionModel {
        self.local_model
    }

    #[inline]
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Replaces every point at once.
    ///
    /// Points are otherwise only ever appended. This is the one bulk entry
    /// point, used when a whole preset partition is loaded into a client and
    /// the orchestrator rebuilds its all-data union right after. The local
    /// model is kept.
    pub fn replace_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    /// Overwrites the local model wholesale.
    #[inline]
    pub fn set_local_model(&mut self, model: RegressionModel) {
        self.local_model = model;
    }
}
