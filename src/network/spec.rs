use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;
use crate::network::error::NetworkError;

/// Default learning rate, folded into the deltas during backprop.
pub const DEFAULT_LEARNING_RATE: f64 = 0.4;
/// Default half-width of the symmetric weight/bias init interval.
pub const DEFAULT_INIT_RANGE: f64 = 1.0;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       - number of units in this layer
/// - `activation` - activation applied after the weighted sum; ignored for
///                  the input layer, whose values are copied verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    #[serde(default)]
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn sigmoid(size: usize) -> LayerSpec {
        LayerSpec { size, activation: ActivationFunction::Sigmoid }
    }
}

/// Hyperparameters of the training-loop controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSpec {
    pub learning_rate: f64,
    /// Mean per-sample loss at or below which training stops.
    pub ideal_error: f64,
    pub max_epochs: usize,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        TrainingSpec {
            learning_rate: DEFAULT_LEARNING_RATE,
            ideal_error: 0.04,
            max_epochs: 200,
        }
    }
}

/// A serializable description of a network: topology, initialization and
/// training hyperparameters. Trained weights are never part of it.
///
/// The default is the on-device build: a 128-bin magnitude spectrum in,
/// three hidden layers, two class scores out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Ordered layer list, input first. Needs at least two entries.
    pub layers: Vec<LayerSpec>,
    /// Weights and biases start uniform in `[-init_range, init_range]`.
    #[serde(default = "default_init_range")]
    pub init_range: f64,
    /// Seed for reproducible initialization; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub training: TrainingSpec,
}

fn default_init_range() -> f64 {
    DEFAULT_INIT_RANGE
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec {
            layers: [128, 128, 64, 64, 2].into_iter().map(LayerSpec::sigmoid).collect(),
            init_range: DEFAULT_INIT_RANGE,
            seed: Some(45452),
            training: TrainingSpec::default(),
        }
    }
}

impl NetworkSpec {
    /// All-sigmoid spec from a width list, default init and training.
    pub fn from_widths(widths: &[usize]) -> NetworkSpec {
        NetworkSpec {
            layers: widths.iter().copied().map(LayerSpec::sigmoid).collect(),
            init_range: DEFAULT_INIT_RANGE,
            seed: None,
            training: TrainingSpec::default(),
        }
    }

    pub fn widths(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.size).collect()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), NetworkError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
