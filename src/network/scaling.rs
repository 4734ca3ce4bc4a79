use serde::{Deserialize, Serialize};

use crate::data::dataset::{Dataset, Sample};

/// Per-dimension linear input scaling captured from a training set.
///
/// Each input dimension `i` is mapped from its observed `[mins[i], maxs[i]]`
/// range onto `[new_min, new_max]`. The parameters travel with the persisted
/// network so that prediction-time inputs are scaled exactly as the
/// training inputs were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParams {
    mins: Vec<f64>,
    maxs: Vec<f64>,
    new_min: f64,
    new_max: f64,
}

impl ScalingParams {
    /// Observes per-dimension input bounds over `data`.
    pub fn from_dataset(data: &Dataset, new_min: f64, new_max: f64) -> ScalingParams {
        let width = data.num_inputs();
        let mut mins = vec![f64::INFINITY; width];
        let mut maxs = vec![f64::NEG_INFINITY; width];
        for s in data.samples() {
            for (i, &v) in s.input.iter().enumerate() {
                if v < mins[i] {
                    mins[i] = v;
                }
                if v > maxs[i] {
                    maxs[i] = v;
                }
            }
        }
        ScalingParams {
            mins,
            maxs,
            new_min,
            new_max,
        }
    }

    /// Scales one input row. Constant dimensions map to `new_min`.
    pub fn scale_input(&self, input: &[f64]) -> Vec<f64> {
        input
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let span = self.maxs[i] - self.mins[i];
                if span > 0.0 {
                    (v - self.mins[i]) / span * (self.new_max - self.new_min) + self.new_min
                } else {
                    self.new_min
                }
            })
            .collect()
    }

    /// Scales every input in `data`; targets pass through unchanged.
    pub fn scale_dataset(&self, data: &Dataset) -> Dataset {
        let samples = data
            .samples()
            .iter()
            .map(|s| Sample {
                input: self.scale_input(&s.input),
                target: s.target.clone(),
            })
            .collect();
        data.with_samples(samples)
    }
}
