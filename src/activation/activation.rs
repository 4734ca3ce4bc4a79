use serde::{Deserialize, Serialize};

/// Activation functions applied element-wise after a layer's linear transform.
///
/// The set mirrors the functions the original prediction networks were tuned
/// with: the fast Elliot sigmoid approximations for hidden and output layers,
/// plus a symmetric cosine that worked well for some output layers.
/// `Elliot`, `Sigmoid` span (0, 1); the `*Symmetric` variants span (-1, 1);
/// `Linear` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// (x/2) / (1 + |x|) + 0.5 — sigmoid-shaped, cheap, output in (0, 1).
    Elliot,
    /// x / (1 + |x|) — output in (-1, 1).
    ElliotSymmetric,
    Sigmoid,
    /// 2 / (1 + e^(-2x)) - 1, i.e. tanh(x).
    SigmoidSymmetric,
    /// cos(x) — periodic; output in [-1, 1].
    CosSymmetric,
    Linear,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Elliot => (x / 2.0) / (1.0 + x.abs()) + 0.5,
            ActivationFunction::ElliotSymmetric => x / (1.0 + x.abs()),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::SigmoidSymmetric => x.tanh(),
            ActivationFunction::CosSymmetric => x.cos(),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative with respect to the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Elliot => {
                let d = 1.0 + x.abs();
                1.0 / (2.0 * d * d)
            }
            ActivationFunction::ElliotSymmetric => {
                let d = 1.0 + x.abs();
                1.0 / (d * d)
            }
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::SigmoidSymmetric => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::CosSymmetric => -x.sin(),
            ActivationFunction::Linear => 1.0,
        }
    }
}
