use rand::Rng;

use crate::{
    activation::activation::ActivationFunction,
    math::{matrix::Matrix, vector::dot},
    network::error::NetworkError,
};

/// One non-input layer. Every buffer is sized in `new` and only overwritten
/// afterwards.
#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    neurons: Vec<f64>,
    pre_neurons: Vec<f64>,  // z = Wx + b, kept for the derivative
    weights: Matrix,        // size x input_size, row j = incoming weights of unit j
    weights_t: Matrix,      // input_size x size, refreshed before the previous layer's backprop
    biases: Vec<f64>,
    deltas: Vec<f64>,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        init_range: f64,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::random_uniform(size, input_size, init_range, rng);
        let biases = (0..size).map(|_| rng.gen_range(-init_range..=init_range)).collect();

        Layer {
            size,
            input_size,
            neurons: vec![0.0; size],
            pre_neurons: vec![0.0; size],
            weights,
            weights_t: Matrix::zeros(input_size, size),
            biases,
            deltas: vec![0.0; size],
            activator: activation
        }
    }

    /// z[j] = b[j] + Σ_k W[j][k]·input[k],  a[j] = f(z[j])
    pub fn feed_from(&mut self, input: &[f64]) {
        for j in 0..self.size {
            let z = self.biases[j] + dot(self.weights.row(j), input);
            self.pre_neurons[j] = z;
            self.neurons[j] = self.activator.function(z);
        }
    }

    /// Output-layer deltas: δ[j] = error[j] · f'(z[j]) · lr
    pub fn output_deltas(&mut self, errors: &[f64], learning_rate: f64) {
        for j in 0..self.size {
            self.deltas[j] = errors[j] * self.activator.derivative(self.pre_neurons[j]) * learning_rate;
        }
    }

    /// Hidden-layer deltas from the layer this one feeds:
    /// δ[l] = (δ_next · Wᵀ_next[l]) · f'(z[l]) · lr
    ///
    /// `next` must have had `refresh_transposed` called since its last update.
    pub fn hidden_deltas(&mut self, next: &Layer, learning_rate: f64) {
        for l in 0..self.size {
            self.deltas[l] = dot(&next.deltas, next.weights_t.row(l))
                * self.activator.derivative(self.pre_neurons[l])
                * learning_rate;
        }
    }

    pub fn refresh_transposed(&mut self) {
        self.weights.transpose_into(&mut self.weights_t);
    }

    /// b[j] -= δ[j],  W[j][k] -= δ[j]·input[k]
    pub fn apply_deltas(&mut self, input: &[f64]) {
        for (j, row) in self.weights.data.iter_mut().enumerate() {
            let delta = self.deltas[j];
            self.biases[j] -= delta;
            for (w, x) in row.iter_mut().zip(input.iter()) {
                *w -= delta * x;
            }
        }
    }

    /// Overwrites weights and biases in place. On any shape disagreement,
    /// including rows of `weights.data` that contradict its header, the layer
    /// is left untouched.
    pub fn load(&mut self, weights: &Matrix, biases: &[f64]) -> Result<(), NetworkError> {
        if weights.rows != self.size {
            return Err(NetworkError::mismatch("weight matrix row count", self.size, weights.rows));
        }
        if weights.cols != self.input_size {
            return Err(NetworkError::mismatch("weight matrix row", self.input_size, weights.cols));
        }
        if weights.data.len() != self.size {
            return Err(NetworkError::mismatch("weight matrix data rows", self.size, weights.data.len()));
        }
        if let Some(row) = weights.data.iter().find(|row| row.len() != self.input_size) {
            return Err(NetworkError::mismatch("weight matrix data row", self.input_size, row.len()));
        }
        if biases.len() != self.size {
            return Err(NetworkError::mismatch("bias vector", self.size, biases.len()));
        }
        self.weights.copy_from(weights);
        self.biases.copy_from_slice(biases);
        Ok(())
    }

    pub fn outputs(&self) -> &[f64] {
        &self.neurons
    }

    pub fn zs(&self) -> &[f64] {
        &self.pre_neurons
    }

    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Weights plus biases.
    pub fn parameter_count(&self) -> usize {
        self.size * self.input_size + self.size
    }
}
