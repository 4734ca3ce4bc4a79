use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::dataset::Dataset;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::engine::Engine;

/// One full pass of online SGD over `data` in a freshly shuffled order.
/// Returns the mean training loss of the pass.
pub fn train_epoch<R: Rng>(
    network: &mut Network,
    data: &Dataset,
    optimizer: &Sgd,
    rng: &mut R,
) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut total_loss = 0.0;
    for &idx in &order {
        let sample = &data.samples()[idx];

        let output = network.forward(&sample.input);
        total_loss += MseLoss::loss(&output, &sample.target);

        // Initial delta: ∂L/∂a at the output layer.
        let mut delta = Matrix::row(&MseLoss::derivative(&output, &sample.target));

        for i in (0..network.layers.len()).rev() {
            let layer_input = if i == 0 {
                Matrix::row(&sample.input)
            } else {
                network.layers[i - 1].activations().clone()
            };

            // Gradients first, then the next delta through the still-current
            // weights, then the weight update.
            let (w_grad, b_grad) = network.layers[i].gradients(&delta, &layer_input);
            if i > 0 {
                delta = b_grad.dot(&network.layers[i].weights.transpose());
            }
            optimizer.step(&mut network.layers[i], &w_grad, &b_grad);
        }
    }

    total_loss / n as f64
}

/// Progress line emitted by `train_to_target` every `report_interval` epochs.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReport {
    pub epoch: usize,
    pub error: f64,
}

/// Plain training driver: epochs until the error reaches `desired_error` or
/// `max_epochs` is hit. Returns the final training error.
pub fn train_to_target<E: Engine>(
    engine: &mut E,
    data: &Dataset,
    max_epochs: usize,
    report_interval: usize,
    desired_error: f64,
    mut on_report: impl FnMut(&ProgressReport),
) -> f64 {
    let mut error = f64::INFINITY;
    for epoch in 1..=max_epochs {
        engine.train_epoch(data);
        error = engine.evaluate(data);

        if epoch == 1 || (report_interval > 0 && epoch % report_interval == 0) {
            on_report(&ProgressReport { epoch, error });
        }
        if error <= desired_error {
            break;
        }
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::data::dataset::Sample;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn linear_dataset() -> Dataset {
        // y = x, easily representable by a 1-1-1 linear net.
        let samples = (0..8)
            .map(|i| {
                let x = i as f64 / 8.0;
                Sample {
                    input: vec![x],
                    target: vec![x],
                }
            })
            .collect();
        Dataset::from_samples(samples).unwrap()
    }

    #[test]
    fn repeated_epochs_reduce_training_error() {
        let mut rng = StdRng::seed_from_u64(21);
        let data = linear_dataset();
        let mut network = Network::standard(
            1,
            1,
            1,
            ActivationFunction::Linear,
            ActivationFunction::Linear,
            &mut rng,
        );
        let optimizer = Sgd::new(0.1);

        let before = network.mse(&data);
        for _ in 0..50 {
            train_epoch(&mut network, &data, &optimizer, &mut rng);
        }
        let after = network.mse(&data);
        assert!(
            after < before,
            "error should drop: before {} after {}",
            before,
            after
        );
    }

    #[test]
    fn train_to_target_stops_at_desired_error() {
        let mut rng = StdRng::seed_from_u64(22);
        let data = linear_dataset();
        let mut network = Network::standard(
            1,
            1,
            1,
            ActivationFunction::Linear,
            ActivationFunction::Linear,
            &mut rng,
        );
        let mut rng2 = StdRng::seed_from_u64(23);
        let mut engine = crate::train::engine::SgdEngine::new(&mut network, Sgd::new(0.2), &mut rng2);

        let mut reports = 0usize;
        let error = train_to_target(&mut engine, &data, 500, 10, 0.01, |_| reports += 1);
        assert!(error.is_finite());
        assert!(reports > 0);
    }
}
