use crate::data::dataset::Dataset;
use crate::train::engine::Engine;
use crate::train::options::TrainOptions;

/// How a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Error failed to improve for more than `max_patience` epochs.
    Patience,
    /// Training error reached `desired_error`.
    TargetError,
    /// `max_epochs` elapsed.
    EpochLimit,
}

/// Per-epoch diagnostic emitted before the stopping decision is applied.
///
/// Field order matches the tab-separated line the CLI prints:
/// epoch, patience counter, previously recorded error, combined error,
/// validation error, training error.
#[derive(Debug, Clone, Copy)]
pub struct EpochReport {
    /// 1-based epoch number within the trial.
    pub epoch: usize,
    /// Patience counter as of the start of this epoch.
    pub patience: usize,
    /// Best combined error recorded so far (+∞ until first recorded).
    pub recorded_error: f64,
    /// This epoch's train + validation error.
    pub combined_error: f64,
    pub validation_error: f64,
    pub train_error: f64,
}

/// Outcome of one early-stopped training run.
#[derive(Debug, Clone, Copy)]
pub struct Trial {
    /// The trial's score: the lowest combined error seen at a moment when
    /// train and validation error improved together. Stays +∞ for trials
    /// where the two never improved in lockstep.
    pub best_combined_error: f64,
    pub stop_reason: StopReason,
    /// Epochs actually run.
    pub epochs: usize,
}

/// Transient per-trial counters; fresh for every call so no state can leak
/// between trials.
struct TrialState {
    patience: usize,
    best_train: f64,
    best_validation: f64,
    best_combined: f64,
}

impl TrialState {
    fn new() -> TrialState {
        TrialState {
            patience: 0,
            best_train: f64::INFINITY,
            best_validation: f64::INFINITY,
            best_combined: f64::INFINITY,
        }
    }
}

/// Trains one network epoch-by-epoch, stopping on patience exhaustion, the
/// target error, or the epoch limit.
///
/// Per epoch: one training pass over `train`, then both splits are
/// evaluated. An epoch that worsens **either** error burns patience; an
/// epoch that worsens neither resets it and advances the running bests. The
/// trial's score is updated only when train and validation error sit at or
/// below their running bests simultaneously — improving on one axis alone
/// (overfitting one split) never records a score.
pub fn train_with_early_stopping<E: Engine>(
    engine: &mut E,
    train: &Dataset,
    validation: &Dataset,
    opts: &TrainOptions,
    mut on_epoch: impl FnMut(&EpochReport),
) -> Trial {
    let mut state = TrialState::new();

    for epoch in 1..=opts.max_epochs {
        engine.train_epoch(train);
        let train_error = engine.evaluate(train);
        let validation_error = engine.evaluate(validation);
        let combined_error = train_error + validation_error;

        on_epoch(&EpochReport {
            epoch,
            patience: state.patience,
            recorded_error: state.best_combined,
            combined_error,
            validation_error,
            train_error,
        });

        if train_error > state.best_train || validation_error > state.best_validation {
            state.patience += 1;
            if state.patience > opts.max_patience {
                return Trial {
                    best_combined_error: state.best_combined,
                    stop_reason: StopReason::Patience,
                    epochs: epoch,
                };
            }
        } else {
            state.patience = 0;
            if validation_error < state.best_validation {
                state.best_validation = validation_error;
            }
            if train_error < state.best_train {
                state.best_train = train_error;
            }
            if train_error <= state.best_train && validation_error <= state.best_validation {
                state.best_combined = combined_error;
            }
        }

        if train_error <= opts.desired_error {
            return Trial {
                best_combined_error: state.best_combined,
                stop_reason: StopReason::TargetError,
                epochs: epoch,
            };
        }
    }

    Trial {
        best_combined_error: state.best_combined,
        stop_reason: StopReason::EpochLimit,
        epochs: opts.max_epochs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{Dataset, Sample};

    const TRAIN_LEN: usize = 2;
    const VALIDATION_LEN: usize = 3;

    fn dataset(len: usize) -> Dataset {
        let samples = (0..len)
            .map(|i| Sample {
                input: vec![i as f64],
                target: vec![0.0],
            })
            .collect();
        Dataset::from_samples(samples).unwrap()
    }

    /// Engine whose per-epoch train/validation errors are scripted; the
    /// split is identified by its length.
    struct ScriptedEngine {
        train_errors: Vec<f64>,
        validation_errors: Vec<f64>,
        epoch: usize,
    }

    impl ScriptedEngine {
        fn new(train_errors: Vec<f64>, validation_errors: Vec<f64>) -> ScriptedEngine {
            assert_eq!(train_errors.len(), validation_errors.len());
            ScriptedEngine {
                train_errors,
                validation_errors,
                epoch: 0,
            }
        }
    }

    impl Engine for ScriptedEngine {
        fn train_epoch(&mut self, _data: &Dataset) {
            self.epoch += 1;
        }
        fn evaluate(&mut self, data: &Dataset) -> f64 {
            let i = self.epoch - 1;
            if data.len() == TRAIN_LEN {
                self.train_errors[i]
            } else {
                self.validation_errors[i]
            }
        }
    }

    fn opts(max_epochs: usize, max_patience: usize, desired_error: f64) -> TrainOptions {
        TrainOptions {
            max_epochs,
            max_patience,
            desired_error,
            ..TrainOptions::default()
        }
    }

    #[test]
    fn strictly_improving_run_never_burns_patience() {
        let errs: Vec<f64> = (0..6).map(|i| 1.0 - 0.1 * i as f64).collect();
        let mut engine = ScriptedEngine::new(errs.clone(), errs.clone());

        let mut patiences = Vec::new();
        let trial = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(6, 3, 0.0),
            |r| patiences.push(r.patience),
        );

        assert_eq!(trial.stop_reason, StopReason::EpochLimit);
        assert!(patiences.iter().all(|&p| p == 0));
        // Last epoch improved on both fronts, so its combined error is the score.
        assert!((trial.best_combined_error - 2.0 * errs[5]).abs() < 1e-12);
    }

    #[test]
    fn persistent_worsening_stops_after_patience_plus_one_epochs() {
        // Epoch 1 improves (from +inf); every later epoch worsens validation.
        let max_patience = 3;
        let train: Vec<f64> = vec![0.5, 0.4, 0.3, 0.2, 0.1, 0.05, 0.04, 0.03];
        let validation: Vec<f64> = vec![0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2];
        let mut engine = ScriptedEngine::new(train, validation);

        let trial = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(100, max_patience, 0.0),
            |_| {},
        );

        assert_eq!(trial.stop_reason, StopReason::Patience);
        // Last improvement at epoch 1, then max_patience + 1 worsening epochs.
        assert_eq!(trial.epochs, 1 + max_patience + 1);
        assert!((trial.best_combined_error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn target_error_stops_regardless_of_patience() {
        let train = vec![0.9, 0.6, 0.01];
        let validation = vec![0.9, 0.6, 0.5];
        let mut engine = ScriptedEngine::new(train, validation);

        let trial = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(100, 3, 0.05),
            |_| {},
        );

        assert_eq!(trial.stop_reason, StopReason::TargetError);
        assert_eq!(trial.epochs, 3);
    }

    #[test]
    fn score_requires_both_errors_improving_together() {
        // Epoch 2 has the lowest combined error but validation worsened, so
        // the recorded score must stay at epoch 1's combined error.
        let train = vec![0.5, 0.1, 0.09];
        let validation = vec![0.5, 0.55, 0.6];
        let mut engine = ScriptedEngine::new(train, validation);

        let trial = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(3, 10, 0.0),
            |_| {},
        );

        assert_eq!(trial.stop_reason, StopReason::EpochLimit);
        assert!((trial.best_combined_error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lockstep_never_improving_leaves_score_unset() {
        // Validation improves while train worsens and vice versa; the score
        // is never recorded and stays +inf. Epoch 1 is the exception: both
        // errors beat +inf, so seed the sequences to diverge from epoch 1.
        // Train worsens immediately, validation keeps improving.
        let train = vec![0.5, 0.6, 0.7, 0.8, 0.9];
        let validation = vec![0.5, 0.4, 0.3, 0.2, 0.1];
        let mut engine = ScriptedEngine::new(train, validation);

        let trial = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(5, 2, 0.0),
            |_| {},
        );

        // Epoch 1 recorded; afterwards train-only worsening burns patience.
        assert_eq!(trial.stop_reason, StopReason::Patience);
        assert!((trial.best_combined_error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reports_carry_the_diagnostic_fields() {
        let train = vec![0.4, 0.3];
        let validation = vec![0.6, 0.5];
        let mut engine = ScriptedEngine::new(train, validation);

        let mut reports = Vec::new();
        let _ = train_with_early_stopping(
            &mut engine,
            &dataset(TRAIN_LEN),
            &dataset(VALIDATION_LEN),
            &opts(2, 5, 0.0),
            |r| reports.push(*r),
        );

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].epoch, 1);
        assert!(reports[0].recorded_error.is_infinite());
        assert!((reports[0].combined_error - 1.0).abs() < 1e-12);
        // Epoch 2's report carries epoch 1's recorded score.
        assert!((reports[1].recorded_error - 1.0).abs() < 1e-12);
        assert!((reports[1].train_error - 0.3).abs() < 1e-12);
        assert!((reports[1].validation_error - 0.5).abs() < 1e-12);
    }
}
