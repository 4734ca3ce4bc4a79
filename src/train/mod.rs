pub mod early_stop;
pub mod engine;
pub mod epoch;
pub mod options;
pub mod selection;

pub use early_stop::{train_with_early_stopping, EpochReport, StopReason, Trial};
pub use engine::{Engine, SgdEngine};
pub use epoch::{train_epoch, train_to_target, ProgressReport};
pub use options::TrainOptions;
pub use selection::{run_selection, SelectionEvent, SelectionOutcome, SelectionState};
