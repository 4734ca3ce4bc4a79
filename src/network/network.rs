use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::network::scaling::ScalingParams;

/// Observed minimum and maximum of the network's first output over a
/// training set. Appended to the model file by the plain trainer and parsed
/// back out by the predictor to bring raw outputs onto a common scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRange {
    pub min: f64,
    pub max: f64,
}

impl OutputRange {
    /// Maps a raw output into [0, 1] relative to the observed range.
    /// A degenerate range passes the value through unchanged.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (value - self.min) / span
        } else {
            value
        }
    }
}

/// A feed-forward network plus the input-scaling parameters captured at
/// training time.
#[derive(Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    pub input_scaling: Option<ScalingParams>,
}

impl Network {
    /// Builds the standard three-layer topology used by all the drivers:
    /// input → hidden → output, fully connected.
    pub fn standard<R: Rng>(
        num_input: usize,
        num_hidden: usize,
        num_output: usize,
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        rng: &mut R,
    ) -> Network {
        Network {
            layers: vec![
                Layer::new(num_input, num_hidden, hidden_activation, rng),
                Layer::new(num_hidden, num_output, output_activation, rng),
            ],
            input_scaling: None,
        }
    }

    pub fn num_input(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size())
    }

    pub fn num_output(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size())
    }

    /// Forward pass; caches per-layer activations for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed(&current);
        }
        current
    }

    /// Mean squared error over a dataset.
    pub fn mse(&mut self, data: &Dataset) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for sample in data.samples() {
            let output = self.forward(&sample.input);
            total += MseLoss::loss(&output, &sample.target);
        }
        total / data.len() as f64
    }

    /// Nguyen–Widrow style re-initialization of all trainable parameters,
    /// scaled to the span of the training inputs.
    pub fn init_weights<R: Rng>(&mut self, data: &Dataset, rng: &mut R) {
        let (min, max) = data.input_bounds();
        let span = if max > min { max - min } else { 1.0 };
        for layer in &mut self.layers {
            let fan_in = layer.input_size().max(1);
            let beta = 0.7 * (layer.size() as f64).powf(1.0 / fan_in as f64);
            layer.reinitialize(2.0 * beta / span, rng);
        }
    }

    /// Captures per-dimension input bounds from `data`, mapping onto
    /// [new_min, new_max]. The parameters persist with the network.
    pub fn set_input_scaling(&mut self, data: &Dataset, new_min: f64, new_max: f64) {
        self.input_scaling = Some(ScalingParams::from_dataset(data, new_min, new_max));
    }

    /// Scales one input row with the stored parameters; identity when no
    /// scaling was captured.
    pub fn scale_input(&self, input: &[f64]) -> Vec<f64> {
        match &self.input_scaling {
            Some(params) => params.scale_input(input),
            None => input.to_vec(),
        }
    }

    /// Scales a whole dataset's inputs with the stored parameters.
    pub fn scale_dataset(&self, data: &Dataset) -> Dataset {
        match &self.input_scaling {
            Some(params) => params.scale_dataset(data),
            None => data.clone(),
        }
    }

    /// Runs every input of `data` through the network and reports the
    /// observed min/max of the first output.
    pub fn output_range(&mut self, data: &Dataset) -> OutputRange {
        let mut range = OutputRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        };
        for sample in data.samples() {
            let out = self.forward(&sample.input)[0];
            if out < range.min {
                range.min = out;
            }
            if out > range.max {
                range.max = out;
            }
        }
        range
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by
    /// `save_json`. Rejects files carrying an appended output range; use
    /// `load_with_output_range` for those.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let text = fs::read_to_string(path)?;
        let network = serde_json::from_str(&text)?;
        Ok(network)
    }

    /// Writes the JSON network followed by two space-separated fixed-point
    /// floats: the observed output min and max. The trailing pair is not
    /// part of the JSON document; `load_with_output_range` parses it back.
    pub fn save_with_output_range<P: AsRef<Path>>(&self, path: P, range: OutputRange) -> Result<()> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push_str(&format!(" {:22.20} {:22.20}", range.min, range.max));
        fs::write(path, text)?;
        Ok(())
    }

    /// Loads a network saved by either `save_json` or
    /// `save_with_output_range`, returning the appended range when present.
    pub fn load_with_output_range<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Network, Option<OutputRange>)> {
        let text = fs::read_to_string(path)?;
        let mut stream = serde_json::Deserializer::from_str(&text).into_iter::<Network>();
        let network = stream
            .next()
            .ok_or_else(|| Error::ModelFormat("file holds no network document".into()))??;
        let trailing: Vec<&str> = text[stream.byte_offset()..].split_whitespace().collect();
        let range = match trailing.as_slice() {
            [] => None,
            [min, max] => {
                let min = min.parse::<f64>().map_err(|_| {
                    Error::ModelFormat(format!("appended output min '{}' is not a number", min))
                })?;
                let max = max.parse::<f64>().map_err(|_| {
                    Error::ModelFormat(format!("appended output max '{}' is not a number", max))
                })?;
                Some(OutputRange { min, max })
            }
            _ => {
                return Err(Error::ModelFormat(format!(
                    "expected two appended output-range values, found {}",
                    trailing.len()
                )))
            }
        };
        Ok((network, range))
    }
}
