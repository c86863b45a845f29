use std::num::NonZeroUsize;

use log::{debug, info, warn};
use ml_core::{LossKind, MlError, Point, RegressionModel, RegressionStats, compute_stats};
use parameter_server::{
    aggregation::{Aggregator, WeightedAverage},
    initialization::{ConstModelGen, ModelGen, RandModelGen},
};
use rand::{SeedableRng, rngs::StdRng};
use worker::{ClientState, LocalTrainer, TrainReport};

use crate::{
    Hyperparameters, Result, SimulationError,
    configs::{ModelInitConfig, SimulationConfig},
};

/// Which of the server-side views are enabled.
///
/// In a real deployment the server never sees client data, so both views are
/// for demonstration only and are switched off whenever the model is randomized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub show_data: bool,
    pub show_stats: bool,
}

/// What happened to one client during [`SimulationState::run_round`].
#[derive(Debug)]
pub enum RoundOutcome {
    /// The local model was merged, producing `global`.
    Pushed {
        client_id: usize,
        local: RegressionModel,
        global: RegressionModel,
    },

    /// Training raised the client's loss, so its model was kept out of the
    /// global model.
    Skipped {
        client_id: usize,
        local: RegressionModel,
    },

    /// Training or aggregation failed and nothing changed for this client.
    Failed {
        client_id: usize,
        error: SimulationError,
    },
}

/// The whole simulation: one server with a global model and `N` clients with
/// private data and local models.
///
/// Every operation either applies its full effect or returns an error and
/// leaves the state unchanged.
pub struct SimulationState {
    global_model: RegressionModel,
    clients: Vec<ClientState>,
    /// Union of every client's points, used for display and statistics only.
    all_points: Vec<Point>,
    hyperparameters: Hyperparameters,
    loss: LossKind,
    randomizer: RandModelGen<StdRng>,
    display: DisplayFlags,
}

impl SimulationState {
    /// Creates a new `SimulationState` with default settings.
    ///
    /// # Arguments
    /// * `clients` - Amount of clients, identified by `1..=clients`.
    ///
    /// # Errors
    /// Never fails with the default sampling ranges, see [`SimulationState::from_config`].
    pub fn new(clients: NonZeroUsize) -> Result<Self> {
        Self::from_config(&SimulationConfig {
            clients,
            ..Default::default()
        })
    }

    /// Creates a new `SimulationState` from a configuration.
    ///
    /// # Arguments
    /// * `config` - The simulation's configuration.
    ///
    /// # Errors
    /// Returns an error if any hyperparameter, sampling range or the initial
    /// model is invalid.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let hyperparameters = config.hyperparameters()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut randomizer = RandModelGen::new(rng, config.slope_range, config.intercept_range)?;

        let global_model = match config.init {
            ModelInitConfig::Const { slope, intercept } => {
                ConstModelGen::new(RegressionModel::new(slope, intercept)).sample()
            }
            ModelInitConfig::Uniform => randomizer.sample(),
        };

        if !global_model.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "initial model must be finite".into(),
            ));
        }

        let clients = (1..=config.clients.get()).map(ClientState::new).collect();

        info!(
            clients = config.clients.get(),
            epochs = hyperparameters.epochs(),
            learning_rate = hyperparameters.learning_rate(),
            aggregation_weight = hyperparameters.aggregation_weight();
            "simulation created with global model {global_model}"
        );

        Ok(Self {
            global_model,
            clients,
            all_points: Vec::new(),
            hyperparameters,
            loss: config.loss_fn.into(),
            randomizer,
            display: DisplayFlags::default(),
        })
    }

    pub fn global_model(&self) -> RegressionModel {
        self.global_model
    }

    pub fn clients(&self) -> &[ClientState] {
        &self.clients
    }

    /// Looks up a client by its one based id.
    pub fn client(&self, client_id: usize) -> Result<&ClientState> {
        let idx = self.client_index(client_id)?;
        Ok(&self.clients[idx])
    }

    /// Every point added so far, across all clients.
    pub fn all_points(&self) -> &[Point] {
        &self.all_points
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    pub fn display_flags(&self) -> DisplayFlags {
        self.display
    }

    /// Replaces the global model with one drawn uniformly at random and
    /// switches off the display flags.
    ///
    /// # Returns
    /// The new global model.
    pub fn randomize_global_model(&mut self) -> RegressionModel {
        self.global_model = self.randomizer.sample();
        self.display = DisplayFlags::default();

        info!("global model randomized to {}", self.global_model);
        self.global_model
    }

    /// Appends a point to a client's private set and to the all-data set.
    ///
    /// # Arguments
    /// * `client_id` - The receiving client.
    /// * `x` - The input value.
    /// * `y` - The observed label.
    ///
    /// # Errors
    /// * `SimulationError::UnknownClient` if there's no such client.
    /// * `SimulationError::InvalidPoint` if `x` or `y` isn't finite.
    pub fn add_point(&mut self, client_id: usize, x: f64, y: f64) -> Result<()> {
        let idx = self.client_index(client_id)?;
        let point = Point::new(x, y);

        if !point.is_finite() {
            warn!(client_id = client_id; "rejected non-finite point ({x}, {y})");
            return Err(SimulationError::InvalidPoint { client_id, x, y });
        }

        self.clients[idx].push_point(point);
        self.all_points.push(point);

        debug!(client_id = client_id, points = self.clients[idx].points().len(); "added point ({x}, {y})");
        Ok(())
    }

    /// Trains a copy of the global model over a client's points and stores it
    /// as that client's local model.
    ///
    /// # Arguments
    /// * `client_id` - The training client.
    ///
    /// # Returns
    /// The new local model.
    ///
    /// # Errors
    /// * `SimulationError::UnknownClient` if there's no such client.
    /// * `MlError::InsufficientData` if the client has no points.
    /// * `MlError::Diverged` if the parameters stop being finite.
    pub fn run_local_training(&mut self, client_id: usize) -> Result<RegressionModel> {
        self.train_client(client_id).map(|report| report.model())
    }

    /// Merges a client's stored local model into the global model.
    ///
    /// # Arguments
    /// * `client_id` - The pushing client.
    ///
    /// # Returns
    /// The new global model.
    ///
    /// # Errors
    /// * `SimulationError::UnknownClient` if there's no such client.
    /// * `MlError::InvalidWeight` if the aggregation weight is invalid.
    /// * `MlError::Overflow` if the merged model isn't finite, in which case
    ///   the global model is left as it was.
    pub fn push_local_model(&mut self, client_id: usize) -> Result<RegressionModel> {
        let idx = self.client_index(client_id)?;
        let local = self.clients[idx].local_model();

        let aggregator = WeightedAverage::new(self.hyperparameters.aggregation_weight())?;
        let model = aggregator
            .aggregate(&self.global_model, &local)
            .inspect_err(|e| warn!(client_id = client_id; "push rejected: {e}"))?;
        self.global_model = model;

        info!(client_id = client_id; "global model updated to {}", self.global_model);
        Ok(self.global_model)
    }

    /// Trains every client in id order and pushes each local model whose
    /// training lowered the loss.
    ///
    /// A client that fails to train, or whose loss went up, doesn't move the
    /// global model. Its outcome says why.
    pub fn run_round(&mut self) -> Vec<RoundOutcome> {
        (1..=self.clients.len())
            .map(|client_id| {
                let report = match self.train_client(client_id) {
                    Ok(report) => report,
                    Err(error) => return RoundOutcome::Failed { client_id, error },
                };

                let local = report.model();
                if report.is_diverging() {
                    warn!(client_id = client_id; "loss went up, skipping push of {local}");
                    return RoundOutcome::Skipped { client_id, local };
                }

                match self.push_local_model(client_id) {
                    Ok(global) => RoundOutcome::Pushed {
                        client_id,
                        local,
                        global,
                    },
                    Err(error) => RoundOutcome::Failed { client_id, error },
                }
            })
            .collect()
    }

    /// Computes R² and the residual sum of squares of the global model.
    ///
    /// # Arguments
    /// * `reference_points` - The points to evaluate against.
    ///
    /// # Errors
    /// `MlError::DegenerateVariance` if every `y` in `reference_points` is equal.
    pub fn compute_stats(&self, reference_points: &[Point]) -> Result<RegressionStats> {
        Ok(compute_stats(&self.global_model, reference_points)?)
    }

    /// Same as [`SimulationState::compute_stats`] over the all-data set.
    pub fn global_stats(&self) -> Result<RegressionStats> {
        self.compute_stats(&self.all_points)
    }

    pub fn set_epochs(&mut self, epochs: usize) {
        self.hyperparameters.set_epochs(epochs);
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        self.hyperparameters.set_learning_rate(learning_rate)
    }

    pub fn set_aggregation_weight(&mut self, weight: f64) -> Result<()> {
        self.hyperparameters.set_aggregation_weight(weight)
    }

    /// Replaces the points of the first clients with the given partitions and
    /// rebuilds the all-data set. Models are left untouched.
    ///
    /// # Arguments
    /// * `partitions` - One point set per client, in client order. Partitions
    ///   beyond the amount of clients are ignored.
    ///
    /// # Errors
    /// `SimulationError::InvalidPoint` if any point isn't finite.
    pub fn load_preset(&mut self, partitions: Vec<Vec<Point>>) -> Result<()> {
        for (idx, partition) in partitions.iter().enumerate() {
            if let Some(p) = partition.iter().find(|p| !p.is_finite()) {
                return Err(SimulationError::InvalidPoint {
                    client_id: idx + 1,
                    x: p.x(),
                    y: p.y(),
                });
            }
        }

        if partitions.len() > self.clients.len() {
            warn!(
                "preset has {} partitions but there are only {} clients",
                partitions.len(),
                self.clients.len()
            );
        }

        for (client, partition) in self.clients.iter_mut().zip(partitions) {
            client.replace_points(partition);
        }

        self.all_points = self
            .clients
            .iter()
            .flat_map(|c| c.points().iter().copied())
            .collect();

        info!(points = self.all_points.len(); "preset loaded");
        Ok(())
    }

    /// Flips the "show data" view.
    ///
    /// # Returns
    /// The new value of the flag.
    ///
    /// # Errors
    /// `MlError::InsufficientData` while there are no points.
    pub fn toggle_show_data(&mut self) -> Result<bool> {
        self.ensure_data()?;
        self.display.show_data = !self.display.show_data;
        Ok(self.display.show_data)
    }

    /// Flips the "show stats" view.
    ///
    /// # Returns
    /// The new value of the flag.
    ///
    /// # Errors
    /// `MlError::InsufficientData` while there are no points.
    pub fn toggle_show_stats(&mut self) -> Result<bool> {
        self.ensure_data()?;
        self.display.show_stats = !self.display.show_stats;
        Ok(self.display.show_stats)
    }

    fn train_client(&mut self, client_id: usize) -> Result<TrainReport> {
        let idx = self.client_index(client_id)?;
        let hp = self.hyperparameters;

        let trainer = LocalTrainer::with_loss(self.loss);
        let report = trainer
            .fit(
                self.global_model,
                self.clients[idx].points(),
                hp.epochs(),
                hp.learning_rate(),
            )
            .inspect_err(|e| warn!(client_id = client_id; "local training failed: {e}"))?;

        let model = report.model();
        self.clients[idx].set_local_model(model);

        info!(
            client_id = client_id,
            epochs = report.epochs(),
            initial_loss = report.initial_loss(),
            final_loss = report.final_loss();
            "local model updated to {model}"
        );

        Ok(report)
    }

    fn ensure_data(&self) -> Result<()> {
        if self.all_points.is_empty() {
            return Err(MlError::InsufficientData.into());
        }

        Ok(())
    }

    fn client_index(&self, client_id: usize) -> Result<usize> {
        if client_id == 0 || client_id > self.clients.len() {
            return Err(SimulationError::UnknownClient {
                client_id,
                clients: self.clients.len(),
            });
        }

        Ok(client_id - 1)
    }
}
