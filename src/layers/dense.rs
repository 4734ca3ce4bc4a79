use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;

/// A fully-connected layer.
///
/// `weights` has shape (input_size, size); `biases` is a 1×size row.
/// The forward pass caches the pre-activation row `z = xW + b` and the
/// activation row `a = σ(z)`; both are needed by backpropagation and are
/// not persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Matrix,
    pub activation: ActivationFunction,
    #[serde(skip)]
    pre_activations: Matrix,
    #[serde(skip)]
    activations: Matrix,
}

impl Layer {
    pub fn new<R: Rng>(
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            weights: Matrix::random(input_size, size, 1.0, rng),
            biases: Matrix::random(1, size, 1.0, rng),
            activation,
            pre_activations: Matrix::zeros(1, size),
            activations: Matrix::zeros(1, size),
        }
    }

    /// Number of neurons in this layer.
    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Width of the input this layer expects.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Activations cached by the most recent `feed` call.
    pub fn activations(&self) -> &Matrix {
        &self.activations
    }

    /// Forward pass for one sample; caches intermediates for backprop.
    pub fn feed(&mut self, input: &[f64]) -> Vec<f64> {
        let z = Matrix::row(input).dot(&self.weights).add(&self.biases);
        let a = z.map(|x| self.activation.function(x));
        self.pre_activations = z;
        self.activations = a.clone();
        a.data.into_iter().next().unwrap_or_default()
    }

    /// Gradients for this layer given `delta = ∂L/∂a` (error in activation
    /// space) and the layer's input row. Returns (weights_grad, biases_grad).
    pub fn gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        // δ_z = δ_a ⊙ σ'(z), taken at the cached pre-activation.
        let act_derivative = self
            .pre_activations
            .map(|x| self.activation.derivative(x));
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = inputs.transpose().dot(&layer_delta);
        (weights_grad, layer_delta)
    }

    /// Applies pre-computed gradients scaled by the learning rate.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = self.weights.sub(&weights_grad.map(|x| x * lr));
        self.biases = self.biases.sub(&biases_grad.map(|x| x * lr));
    }

    /// Re-draws weights and biases uniformly in [-scale, scale].
    pub fn reinitialize<R: Rng>(&mut self, scale: f64, rng: &mut R) {
        self.weights = Matrix::random(self.weights.rows, self.weights.cols, scale, rng);
        self.biases = Matrix::random(self.biases.rows, self.biases.cols, scale, rng);
    }
}
