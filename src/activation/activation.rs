use serde::{Serialize, Deserialize};

/// Per-layer activation, chosen once when the network is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// 1 / (1 + e^-x)
    #[default]
    Sigmoid,
    /// Pass-through.
    Linear,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative evaluated at the pre-activation `x` (not at the output).
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_prime(x),
            ActivationFunction::Linear => 1.0,
        }
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// σ(x)·(1 − σ(x))
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}
