use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// One (input, target) pair. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// An ordered collection of samples sharing the same input and target widths.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) samples: Vec<Sample>,
    pub(crate) num_inputs: usize,
    pub(crate) num_outputs: usize,
}

impl Dataset {
    /// Builds a dataset from samples, validating that every row matches the
    /// widths of the first.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Dataset> {
        let first = samples
            .first()
            .ok_or_else(|| Error::DataFormat("dataset contains no samples".into()))?;
        let num_inputs = first.input.len();
        let num_outputs = first.target.len();
        if num_inputs == 0 || num_outputs == 0 {
            return Err(Error::DataFormat(
                "samples must have at least one input and one target value".into(),
            ));
        }
        for (i, s) in samples.iter().enumerate() {
            if s.input.len() != num_inputs || s.target.len() != num_outputs {
                return Err(Error::DataFormat(format!(
                    "sample {}: expected {} input / {} target values, got {} / {}",
                    i,
                    num_inputs,
                    num_outputs,
                    s.input.len(),
                    s.target.len()
                )));
            }
        }
        Ok(Dataset {
            samples,
            num_inputs,
            num_outputs,
        })
    }

    /// Loads a training-data file.
    ///
    /// Format: a header line `count num_inputs num_outputs`, then for each
    /// sample an input vector followed by a target vector. Values are
    /// whitespace-separated; line breaks carry no meaning beyond separating
    /// tokens, so wrapped vectors parse the same as one-per-line files.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let text = fs::read_to_string(path)?;
        Dataset::parse(&text)
    }

    fn parse(text: &str) -> Result<Dataset> {
        let mut tokens = text.split_whitespace();

        let count = next_usize(&mut tokens, "sample count")?;
        let num_inputs = next_usize(&mut tokens, "input width")?;
        let num_outputs = next_usize(&mut tokens, "output width")?;
        if num_inputs == 0 || num_outputs == 0 {
            return Err(Error::DataFormat(
                "header declares a zero input or output width".into(),
            ));
        }
        if count == 0 {
            return Err(Error::DataFormat("header declares zero samples".into()));
        }

        let mut samples = Vec::with_capacity(count);
        for s in 0..count {
            let input = next_vector(&mut tokens, num_inputs, s, "input")?;
            let target = next_vector(&mut tokens, num_outputs, s, "target")?;
            samples.push(Sample { input, target });
        }

        Ok(Dataset {
            samples,
            num_inputs,
            num_outputs,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// In-place uniform shuffle.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }

    /// Copies `count` samples starting at `start` into a new dataset that
    /// shares no state with this one.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn subset(&self, start: usize, count: usize) -> Dataset {
        Dataset {
            samples: self.samples[start..start + count].to_vec(),
            num_inputs: self.num_inputs,
            num_outputs: self.num_outputs,
        }
    }

    /// Smallest and largest value across all inputs; (0, 1) for safety if
    /// the dataset is empty.
    pub fn input_bounds(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in &self.samples {
            for &v in &s.input {
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
        }
        if min > max {
            (0.0, 1.0)
        } else {
            (min, max)
        }
    }

    /// Rebuilds a dataset with the same widths from transformed samples.
    pub(crate) fn with_samples(&self, samples: Vec<Sample>) -> Dataset {
        Dataset {
            samples,
            num_inputs: self.num_inputs,
            num_outputs: self.num_outputs,
        }
    }
}

fn next_usize<'a, I>(tokens: &mut I, what: &str) -> Result<usize>
where
    I: Iterator<Item = &'a str>,
{
    let tok = tokens
        .next()
        .ok_or_else(|| Error::DataFormat(format!("missing {} in header", what)))?;
    tok.parse::<usize>()
        .map_err(|_| Error::DataFormat(format!("{} '{}' is not a non-negative integer", what, tok)))
}

fn next_vector<'a, I>(tokens: &mut I, width: usize, sample: usize, what: &str) -> Result<Vec<f64>>
where
    I: Iterator<Item = &'a str>,
{
    let mut values = Vec::with_capacity(width);
    for i in 0..width {
        let tok = tokens.next().ok_or_else(|| {
            Error::DataFormat(format!(
                "sample {}: {} vector ends after {} of {} values",
                sample, what, i, width
            ))
        })?;
        let v = tok.parse::<f64>().map_err(|_| {
            Error::DataFormat(format!(
                "sample {}: {} value '{}' is not a number",
                sample, what, tok
            ))
        })?;
        values.push(v);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const XOR: &str = "4 2 1\n0 0\n0\n0 1\n1\n1 0\n1\n1 1\n0\n";

    #[test]
    fn parses_header_and_samples() {
        let data = Dataset::parse(XOR).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.num_inputs(), 2);
        assert_eq!(data.num_outputs(), 1);
        assert_eq!(data.samples()[1].input, vec![0.0, 1.0]);
        assert_eq!(data.samples()[1].target, vec![1.0]);
    }

    #[test]
    fn parses_wrapped_vectors() {
        // Same samples, arbitrary line breaks.
        let data = Dataset::parse("2 3 1\n1 2\n3\n0.5\n4 5 6 0.25\n").unwrap();
        assert_eq!(data.samples()[0].input, vec![1.0, 2.0, 3.0]);
        assert_eq!(data.samples()[1].target, vec![0.25]);
    }

    #[test]
    fn rejects_truncated_file() {
        let err = Dataset::parse("3 2 1\n0 0\n0\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)));
    }

    #[test]
    fn rejects_non_numeric_value() {
        let err = Dataset::parse("1 2 1\n0 x\n0\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)));
    }

    #[test]
    fn subset_is_independent() {
        let mut data = Dataset::parse(XOR).unwrap();
        let sub = data.subset(1, 2);
        let before = sub.samples()[0].clone();
        let mut rng = StdRng::seed_from_u64(3);
        data.shuffle(&mut rng);
        assert_eq!(sub.samples()[0], before);
    }

    #[test]
    fn input_bounds_span_all_inputs() {
        let data = Dataset::parse("2 2 1\n-3 1\n0\n2 7\n0\n").unwrap();
        assert_eq!(data.input_bounds(), (-3.0, 7.0));
    }
}
