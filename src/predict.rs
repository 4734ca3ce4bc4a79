use crate::data::dataset::Dataset;
use crate::network::network::{Network, OutputRange};

/// Runs every row of `data` through `network`, in order, producing one
/// scalar prediction per row.
///
/// Inputs are scaled with the parameters embedded in the network at
/// training time; when a persisted `OutputRange` is supplied, raw outputs
/// are normalized onto the common [0, 1] scale. Targets present in the data
/// file are ignored.
pub fn predict_rows(
    network: &mut Network,
    output_range: Option<OutputRange>,
    data: &Dataset,
) -> Vec<f64> {
    data.samples()
        .iter()
        .map(|sample| {
            let scaled = network.scale_input(&sample.input);
            let raw = network.forward(&scaled)[0];
            match output_range {
                Some(range) => range.normalize(raw),
                None => raw,
            }
        })
        .collect()
}

/// Fixed 20-decimal-place rendering used for every printed prediction.
pub fn format_prediction(value: f64) -> String {
    format!("{:.20}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::data::dataset::Sample;
    use crate::math::matrix::Matrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 1-1-1 linear network computing the identity.
    fn identity_network() -> Network {
        let mut rng = StdRng::seed_from_u64(41);
        let mut network = Network::standard(
            1,
            1,
            1,
            ActivationFunction::Linear,
            ActivationFunction::Linear,
            &mut rng,
        );
        for layer in &mut network.layers {
            layer.weights = Matrix::from_data(vec![vec![1.0]]);
            layer.biases = Matrix::from_data(vec![vec![0.0]]);
        }
        network
    }

    #[test]
    fn printed_prediction_has_exactly_twenty_decimals() {
        let mut network = identity_network();
        let data = Dataset::from_samples(vec![Sample {
            input: vec![0.5],
            target: vec![0.5],
        }])
        .unwrap();

        let predictions = predict_rows(&mut network, None, &data);
        assert_eq!(predictions.len(), 1);

        let line = format_prediction(predictions[0]);
        let decimals = line.split('.').nth(1).expect("decimal point");
        assert_eq!(decimals.len(), 20);
        assert!((line.parse::<f64>().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn predictions_preserve_row_order() {
        let mut network = identity_network();
        let samples = (0..5)
            .map(|i| Sample {
                input: vec![i as f64 / 10.0],
                target: vec![0.0],
            })
            .collect();
        let data = Dataset::from_samples(samples).unwrap();

        let predictions = predict_rows(&mut network, None, &data);
        for (i, p) in predictions.iter().enumerate() {
            assert!((p - i as f64 / 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn output_range_normalizes_predictions() {
        let mut network = identity_network();
        let data = Dataset::from_samples(vec![Sample {
            input: vec![3.0],
            target: vec![0.0],
        }])
        .unwrap();

        let range = OutputRange { min: 2.0, max: 4.0 };
        let predictions = predict_rows(&mut network, Some(range), &data);
        assert!((predictions[0] - 0.5).abs() < 1e-12);
    }
}
