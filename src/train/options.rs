use crate::activation::activation::ActivationFunction;

/// Number of independent trials the model-selection driver runs.
pub const DEFAULT_TRIALS: usize = 5;
/// Consecutive non-improving epochs tolerated before a trial stops.
pub const DEFAULT_MAX_PATIENCE: usize = 15;
/// Hard cap on epochs per trial.
pub const DEFAULT_MAX_EPOCHS: usize = 2000;
/// Training error at or below which a trial stops early.
pub const DEFAULT_DESIRED_ERROR: f64 = 0.001;
/// Step size for the SGD engine.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Hyperparameters for the training drivers.
///
/// # Fields
/// - `trials`            — independent {init, split, train} runs to compare
/// - `max_epochs`        — epoch cap per trial
/// - `max_patience`      — non-improving epochs tolerated before stopping
/// - `desired_error`     — training MSE at or below which a trial stops
/// - `learning_rate`     — SGD step size
/// - `hidden_size`       — hidden layer width; `None` applies the
///                         input-width / 2 rule of thumb (minimum 1)
/// - `hidden_activation` — activation for the hidden layer
/// - `output_activation` — activation for the output layer
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub trials: usize,
    pub max_epochs: usize,
    pub max_patience: usize,
    pub desired_error: f64,
    pub learning_rate: f64,
    pub hidden_size: Option<usize>,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
}

impl TrainOptions {
    /// Hidden layer width for a given input width: the configured override,
    /// or half the input width with a floor of one neuron.
    pub fn hidden_size_for(&self, num_inputs: usize) -> usize {
        self.hidden_size.unwrap_or_else(|| (num_inputs / 2).max(1))
    }
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            trials: DEFAULT_TRIALS,
            max_epochs: DEFAULT_MAX_EPOCHS,
            max_patience: DEFAULT_MAX_PATIENCE,
            desired_error: DEFAULT_DESIRED_ERROR,
            learning_rate: DEFAULT_LEARNING_RATE,
            hidden_size: None,
            hidden_activation: ActivationFunction::Elliot,
            output_activation: ActivationFunction::Elliot,
        }
    }
}
