use rand::Rng;

use crate::data::dataset::Dataset;
use crate::data::split::split;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::early_stop::{train_with_early_stopping, EpochReport};
use crate::train::engine::SgdEngine;
use crate::train::options::TrainOptions;

/// Accumulator for the best model across trials.
///
/// Replacement requires a **strictly** lower error: a later trial that ties
/// the current best is discarded, and a trial whose score stayed +∞ can
/// never be retained.
pub struct SelectionState<M> {
    best: Option<M>,
    best_error: f64,
}

impl<M> SelectionState<M> {
    pub fn new() -> SelectionState<M> {
        SelectionState {
            best: None,
            best_error: f64::INFINITY,
        }
    }

    /// Offers a trial's model; keeps it (dropping the previous best) only
    /// when its error is strictly lower. Returns whether it was kept.
    pub fn offer(&mut self, model: M, error: f64) -> bool {
        if error < self.best_error {
            self.best = Some(model);
            self.best_error = error;
            true
        } else {
            false
        }
    }

    pub fn best_error(&self) -> f64 {
        self.best_error
    }

    pub fn into_best(self) -> Option<(M, f64)> {
        let error = self.best_error;
        self.best.map(|m| (m, error))
    }
}

impl<M> Default for SelectionState<M> {
    fn default() -> Self {
        SelectionState::new()
    }
}

/// Progress notifications from `run_selection`. The library never prints;
/// the CLI renders these.
#[derive(Debug)]
pub enum SelectionEvent<'a> {
    /// One training epoch inside a trial.
    Epoch(&'a EpochReport),
    /// A trial finished; `best_error` is the global best after comparison.
    TrialFinished {
        trial: usize,
        trial_error: f64,
        best_error: f64,
    },
    /// A trial could not run and was skipped.
    TrialSkipped { trial: usize, reason: String },
}

/// The retained best network and its recorded combined error.
pub struct SelectionOutcome {
    pub network: Network,
    pub best_error: f64,
}

/// Repeats {fresh network, re-split, train with early stopping} for
/// `opts.trials` trials and keeps the single best network.
///
/// Each trial gets a fresh network (topology from the dataset dimensions
/// and the hidden-width rule), input-scaling parameters captured from the
/// full dataset, weights re-initialized from its training split, and its
/// own shuffled train/validation halves. Trials that cannot run — the
/// dataset is too small to split — are skipped with a `TrialSkipped` event.
///
/// Fails with `NoViableModel` when no trial produced a retainable network,
/// either because every trial was skipped or because no trial ever recorded
/// a finite score.
pub fn run_selection<R: Rng>(
    data: &Dataset,
    opts: &TrainOptions,
    rng: &mut R,
    mut on_event: impl FnMut(SelectionEvent<'_>),
) -> Result<SelectionOutcome> {
    let mut selection: SelectionState<Network> = SelectionState::new();

    for trial in 0..opts.trials {
        let (train, validation) = match split(data, 0.5, rng) {
            Ok(halves) => halves,
            Err(err) => {
                on_event(SelectionEvent::TrialSkipped {
                    trial,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mut network = Network::standard(
            data.num_inputs(),
            opts.hidden_size_for(data.num_inputs()),
            data.num_outputs(),
            opts.hidden_activation,
            opts.output_activation,
            rng,
        );
        network.set_input_scaling(data, 0.0, 1.0);
        network.init_weights(&train, rng);

        let train_scaled = network.scale_dataset(&train);
        let validation_scaled = network.scale_dataset(&validation);

        let trial_result = {
            let mut engine = SgdEngine::new(&mut network, Sgd::new(opts.learning_rate), rng);
            train_with_early_stopping(&mut engine, &train_scaled, &validation_scaled, opts, |r| {
                on_event(SelectionEvent::Epoch(r))
            })
        };

        selection.offer(network, trial_result.best_combined_error);
        on_event(SelectionEvent::TrialFinished {
            trial,
            trial_error: trial_result.best_combined_error,
            best_error: selection.best_error(),
        });
    }

    selection
        .into_best()
        .map(|(network, best_error)| SelectionOutcome {
            network,
            best_error,
        })
        .ok_or(Error::NoViableModel)
}
