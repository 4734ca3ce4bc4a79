/// Mean squared error — the evaluation metric every driver reports and the
/// loss the SGD engine trains against.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²) over one sample's outputs.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let total: f64 = predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, e)| (p - e) * (p - e))
            .sum();
        total / predicted.len() as f64
    }

    /// Gradient of the (halved-scale) loss per output: predicted - expected.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, e)| p - e)
            .collect()
    }
}
