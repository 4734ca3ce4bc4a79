pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod predict;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use data::dataset::{Dataset, Sample};
pub use data::split::split;
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use loss::mse::MseLoss;
pub use math::matrix::Matrix;
pub use network::network::{Network, OutputRange};
pub use network::scaling::ScalingParams;
pub use optim::sgd::Sgd;
pub use train::early_stop::{train_with_early_stopping, EpochReport, StopReason, Trial};
pub use train::engine::{Engine, SgdEngine};
pub use train::epoch::{train_epoch, train_to_target};
pub use train::options::TrainOptions;
pub use train::selection::{run_selection, SelectionEvent, SelectionOutcome, SelectionState};
