use rand::Rng;

use crate::data::dataset::Dataset;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch;

/// The two operations the training drivers need from a network engine.
///
/// The early-stopping trainer and the plain epoch driver are written against
/// this seam, never against `Network` directly, so the stopping logic can be
/// exercised with scripted error sequences in tests.
pub trait Engine {
    /// Runs one training epoch over `data`.
    fn train_epoch(&mut self, data: &Dataset);

    /// Mean squared error of the current parameters over `data`.
    fn evaluate(&mut self, data: &Dataset) -> f64;
}

/// Production engine: a `Network` trained by online SGD.
pub struct SgdEngine<'a, R: Rng> {
    network: &'a mut Network,
    optimizer: Sgd,
    rng: &'a mut R,
}

impl<'a, R: Rng> SgdEngine<'a, R> {
    pub fn new(network: &'a mut Network, optimizer: Sgd, rng: &'a mut R) -> SgdEngine<'a, R> {
        SgdEngine {
            network,
            optimizer,
            rng,
        }
    }
}

impl<R: Rng> Engine for SgdEngine<'_, R> {
    fn train_epoch(&mut self, data: &Dataset) {
        epoch::train_epoch(self.network, data, &self.optimizer, self.rng);
    }

    fn evaluate(&mut self, data: &Dataset) -> f64 {
        self.network.mse(data)
    }
}
