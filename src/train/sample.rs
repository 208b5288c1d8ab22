use serde::{Serialize, Deserialize};

use crate::math::vector::abs_sum;
use crate::network::{error::NetworkError, network::Network};

/// Samples kept by the device build.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 100;
/// Minimum Σ|input| for a captured spectrum to count as a sample rather than silence.
pub const DEFAULT_ENERGY_GATE: f64 = 0.13;

/// One supervised example: a feature vector and the output it should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Sample {
        Sample { inputs, targets }
    }

    /// Checks both vectors against the network's input and output widths.
    pub fn check(&self, network: &Network) -> Result<(), NetworkError> {
        check_dims(&self.inputs, &self.targets, network.input_size(), network.output_size())
    }
}

fn check_dims(inputs: &[f64], targets: &[f64], input_size: usize, output_size: usize) -> Result<(), NetworkError> {
    if inputs.len() != input_size {
        return Err(NetworkError::mismatch("input vector", input_size, inputs.len()));
    }
    if targets.len() != output_size {
        return Err(NetworkError::mismatch("target vector", output_size, targets.len()));
    }
    Ok(())
}

/// Fixed-capacity training set. Storage for `capacity` samples is reserved
/// up front and the buffer refuses to grow past it.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    capacity: usize,
    input_size: usize,
    output_size: usize,
    energy_gate: Option<f64>,
}

impl SampleBuffer {
    pub fn new(capacity: usize, input_size: usize, output_size: usize) -> SampleBuffer {
        SampleBuffer {
            samples: Vec::with_capacity(capacity),
            capacity,
            input_size,
            output_size,
            energy_gate: None,
        }
    }

    /// Buffer shaped for `network`'s input and output widths.
    pub fn for_network(network: &Network, capacity: usize) -> SampleBuffer {
        SampleBuffer::new(capacity, network.input_size(), network.output_size())
    }

    /// Drops samples whose Σ|input| falls below `threshold`.
    pub fn with_energy_gate(mut self, threshold: f64) -> SampleBuffer {
        self.energy_gate = Some(threshold);
        self
    }

    /// Stores `sample`. Returns `Ok(false)` when the energy gate drops it.
    pub fn try_push(&mut self, sample: Sample) -> Result<bool, NetworkError> {
        check_dims(&sample.inputs, &sample.targets, self.input_size, self.output_size)?;
        if let Some(threshold) = self.energy_gate {
            if abs_sum(&sample.inputs) < threshold {
                return Ok(false);
            }
        }
        if self.is_full() {
            return Err(NetworkError::SampleBufferFull { capacity: self.capacity });
        }
        self.samples.push(sample);
        Ok(true)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
