use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    layers::dense::Layer,
    loss::abs_sum::AbsSumLoss,
    math::matrix::Matrix,
    network::{error::NetworkError, spec::{LayerSpec, NetworkSpec}},
};

/// A fixed-topology feed-forward network.
///
/// Layer 0 is the input layer and only holds the values last passed to
/// `feed_inputs`; every later layer is a [`Layer`] addressed by index. All
/// buffers are allocated by the constructor and only overwritten afterwards,
/// so a training run never touches the allocator.
#[derive(Debug, Clone)]
pub struct Network {
    inputs: Vec<f64>,
    layers: Vec<Layer>,
    errors: Vec<f64>,
}

impl Network {
    /// Builds an all-sigmoid network from layer widths, input first, with an
    /// entropy-seeded initialization in `[-1, 1]`.
    pub fn new(widths: &[usize]) -> Result<Network, NetworkError> {
        Network::from_spec(&NetworkSpec::from_widths(widths))
    }

    /// Builds the network described by `spec`, seeded from `spec.seed` if set.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network, NetworkError> {
        let mut rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::with_rng(&spec.layers, spec.init_range, &mut rng)
    }

    /// Builds a network drawing its initial weights and biases from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        layer_specs: &[LayerSpec],
        init_range: f64,
        rng: &mut R,
    ) -> Result<Network, NetworkError> {
        validate_topology(layer_specs, init_range)?;

        let layers = layer_specs
            .windows(2)
            .map(|pair| Layer::new(pair[1].size, pair[0].size, pair[1].activation, init_range, rng))
            .collect();
        let output_size = layer_specs[layer_specs.len() - 1].size;

        Ok(Network {
            inputs: vec![0.0; layer_specs[0].size],
            layers,
            errors: vec![0.0; output_size],
        })
    }

    /// Copies `inputs` into the input layer. On a length mismatch nothing is
    /// written.
    pub fn feed_inputs(&mut self, inputs: &[f64]) -> Result<(), NetworkError> {
        if inputs.len() != self.inputs.len() {
            return Err(NetworkError::mismatch("input vector", self.inputs.len(), inputs.len()));
        }
        self.inputs.copy_from_slice(inputs);
        Ok(())
    }

    /// Recomputes pre-activations and activations of every non-input layer,
    /// left to right, from the current input layer.
    pub fn propagate_forward(&mut self) {
        self.layers[0].feed_from(&self.inputs);
        for i in 1..self.layers.len() {
            let (prev, rest) = self.layers.split_at_mut(i);
            rest[0].feed_from(prev[i - 1].outputs());
        }
    }

    /// Feeds `inputs` and runs a forward pass, returning the output layer.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<&[f64], NetworkError> {
        self.feed_inputs(inputs)?;
        self.propagate_forward();
        Ok(self.current_output())
    }

    /// Stores `output - target` per output unit and returns Σ|output - target|.
    /// On a length mismatch the error buffer is left untouched.
    pub fn evaluate_error(&mut self, targets: &[f64]) -> Result<f64, NetworkError> {
        if targets.len() != self.errors.len() {
            return Err(NetworkError::mismatch("target vector", self.errors.len(), targets.len()));
        }
        let output = self.layers[self.layers.len() - 1].outputs();
        Ok(AbsSumLoss::errors_into(output, targets, &mut self.errors))
    }

    /// Fills every layer's deltas from the stored errors, output layer first.
    /// Each layer's deltas are scaled by `learning_rate`; the update step
    /// applies them unscaled.
    pub fn backpropagate(&mut self, learning_rate: f64) {
        let last = self.layers.len() - 1;
        self.layers[last].output_deltas(&self.errors, learning_rate);

        for i in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let next = &mut tail[0];
            next.refresh_transposed();
            head[i].hidden_deltas(next, learning_rate);
        }
    }

    /// Applies the current deltas to every weight and bias.
    pub fn update(&mut self) {
        self.layers[0].apply_deltas(&self.inputs);
        for i in 1..self.layers.len() {
            let (prev, rest) = self.layers.split_at_mut(i);
            rest[0].apply_deltas(prev[i - 1].outputs());
        }
    }

    /// One online SGD step for the sample last evaluated.
    pub fn backpropagate_and_update(&mut self, learning_rate: f64) {
        self.backpropagate(learning_rate);
        self.update();
    }

    /// Output-layer activations from the last forward pass.
    pub fn current_output(&self) -> &[f64] {
        self.layers[self.layers.len() - 1].outputs()
    }

    /// Activations of layer `index`, where 0 is the input layer.
    pub fn activations(&self, index: usize) -> Option<&[f64]> {
        match index {
            0 => Some(self.inputs.as_slice()),
            i => self.layers.get(i - 1).map(Layer::outputs),
        }
    }

    /// Per-output errors from the last `evaluate_error`.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Non-input layers, first hidden layer first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn widths(&self) -> Vec<usize> {
        std::iter::once(self.inputs.len())
            .chain(self.layers.iter().map(|l| l.size))
            .collect()
    }

    pub fn input_size(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_size(&self) -> usize {
        self.errors.len()
    }

    /// Weights and biases of non-input layer `index` (0 = first hidden layer).
    pub fn parameters(&self, index: usize) -> Result<(&Matrix, &[f64]), NetworkError> {
        let layer = self.layer(index)?;
        Ok((layer.weights(), layer.biases()))
    }

    /// Copies externally supplied weights and biases into non-input layer
    /// `index`. Shapes must match exactly; nothing is resized.
    pub fn load_parameters(&mut self, index: usize, weights: &Matrix, biases: &[f64]) -> Result<(), NetworkError> {
        let count = self.layers.len();
        self.layers.get_mut(index)
            .ok_or(NetworkError::LayerOutOfRange { index, count })?
            .load(weights, biases)
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Bytes of numeric storage owned by the network: activations, zs,
    /// deltas, errors, weights (plus their transposed scratch) and biases.
    pub fn buffer_bytes(&self) -> usize {
        let per_layer: usize = self.layers.iter()
            .map(|l| 4 * l.size + 2 * l.size * l.input_size)
            .sum();
        (self.inputs.len() + self.errors.len() + per_layer) * std::mem::size_of::<f64>()
    }

    fn layer(&self, index: usize) -> Result<&Layer, NetworkError> {
        self.layers.get(index)
            .ok_or(NetworkError::LayerOutOfRange { index, count: self.layers.len() })
    }
}

fn validate_topology(layer_specs: &[LayerSpec], init_range: f64) -> Result<(), NetworkError> {
    if layer_specs.len() < 2 {
        return Err(NetworkError::InvalidTopology {
            reason: format!("need at least 2 layer widths, got {}", layer_specs.len()),
        });
    }
    if let Some(pos) = layer_specs.iter().position(|l| l.size == 0) {
        return Err(NetworkError::InvalidTopology {
            reason: format!("layer {pos} has width 0"),
        });
    }
    if !init_range.is_finite() || init_range < 0.0 {
        return Err(NetworkError::InvalidTopology {
            reason: format!("init range must be a finite non-negative number, got {init_range}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use approx::assert_abs_diff_eq;

    fn seeded(widths: &[usize], seed: u64) -> Network {
        let specs: Vec<LayerSpec> = widths.iter().copied().map(LayerSpec::sigmoid).collect();
        Network::with_rng(&specs, 1.0, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn rejects_short_or_empty_topologies() {
        assert!(matches!(Network::new(&[]), Err(NetworkError::InvalidTopology { .. })));
        assert!(matches!(Network::new(&[3]), Err(NetworkError::InvalidTopology { .. })));
        assert!(matches!(Network::new(&[3, 0, 1]), Err(NetworkError::InvalidTopology { .. })));
    }

    #[test]
    fn rejects_bad_init_range() {
        let specs = [LayerSpec::sigmoid(2), LayerSpec::sigmoid(1)];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Network::with_rng(&specs, f64::NAN, &mut rng).is_err());
        assert!(Network::with_rng(&specs, -1.0, &mut rng).is_err());
    }

    #[test]
    fn two_layer_network_has_no_hidden_layer() {
        let mut net = seeded(&[3, 2], 1);
        assert_eq!(net.layers().len(), 1);
        net.forward(&[0.1, 0.2, 0.3]).unwrap();
        net.evaluate_error(&[0.0, 1.0]).unwrap();
        net.backpropagate_and_update(0.5);
        assert_eq!(net.current_output().len(), 2);
    }

    #[test]
    fn same_seed_same_weights() {
        let a = seeded(&[4, 3, 2], 99);
        let b = seeded(&[4, 3, 2], 99);
        for i in 0..2 {
            assert_eq!(a.parameters(i).unwrap(), b.parameters(i).unwrap());
        }
    }

    #[test]
    fn feed_inputs_mismatch_leaves_activations_alone() {
        let mut net = seeded(&[3, 2, 1], 5);
        net.forward(&[0.5, -0.5, 1.0]).unwrap();
        let before: Vec<Vec<f64>> = (0..3).map(|i| net.activations(i).unwrap().to_vec()).collect();

        let err = net.feed_inputs(&[1.0, 2.0]).unwrap_err();
        assert!(err.is_dimension_mismatch());

        let after: Vec<Vec<f64>> = (0..3).map(|i| net.activations(i).unwrap().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn evaluate_error_mismatch_leaves_errors_alone() {
        let mut net = seeded(&[2, 2], 5);
        net.forward(&[1.0, 0.0]).unwrap();
        net.evaluate_error(&[0.0, 0.0]).unwrap();
        let before = net.errors().to_vec();
        assert!(net.evaluate_error(&[0.0]).unwrap_err().is_dimension_mismatch());
        assert_eq!(net.errors(), &before[..]);
    }

    #[test]
    fn forward_pass_is_repeatable() {
        let mut net = seeded(&[3, 4, 2], 11);
        net.feed_inputs(&[0.3, -0.7, 0.9]).unwrap();
        net.propagate_forward();
        let first = net.current_output().to_vec();
        net.propagate_forward();
        assert_eq!(net.current_output(), &first[..]);
    }

    #[test]
    fn evaluate_error_is_output_minus_target() {
        let mut net = seeded(&[2, 2], 3);
        let out = net.forward(&[0.2, 0.4]).unwrap().to_vec();
        let loss = net.evaluate_error(&[1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(net.errors()[0], out[0] - 1.0);
        assert_abs_diff_eq!(net.errors()[1], out[1]);
        assert_abs_diff_eq!(loss, (1.0 - out[0]) + out[1], epsilon = 1e-12);
    }

    #[test]
    fn load_parameters_checks_shape_and_index() {
        let mut net = seeded(&[2, 3, 1], 0);
        assert!(net.load_parameters(0, &Matrix::zeros(2, 3), &[0.0; 3]).unwrap_err().is_dimension_mismatch());
        assert!(net.load_parameters(0, &Matrix::zeros(3, 2), &[0.0; 2]).unwrap_err().is_dimension_mismatch());
        assert!(matches!(
            net.load_parameters(2, &Matrix::zeros(1, 3), &[0.0]),
            Err(NetworkError::LayerOutOfRange { index: 2, count: 2 })
        ));
        net.load_parameters(1, &Matrix::from_data(vec![vec![1.0, 2.0, 3.0]]), &[4.0]).unwrap();
        let (w, b) = net.parameters(1).unwrap();
        assert_eq!(w.data, vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!(b, &[4.0]);
    }

    #[test]
    fn load_parameters_rejects_ragged_matrix_without_panicking() {
        let mut net = seeded(&[2, 1], 0);
        let before = net.parameters(0).unwrap().0.clone();
        let ragged = Matrix { rows: 1, cols: 2, data: vec![vec![1.0]] };
        assert!(net.load_parameters(0, &ragged, &[0.0]).unwrap_err().is_dimension_mismatch());
        assert_eq!(net.parameters(0).unwrap().0, &before);
    }

    #[test]
    fn hidden_deltas_carry_the_learning_rate_per_layer() {
        let mut net = seeded(&[3, 4, 2], 8);
        net.forward(&[0.2, -0.4, 0.9]).unwrap();
        net.evaluate_error(&[1.0, 0.0]).unwrap();

        net.backpropagate(1.0);
        let unit: Vec<Vec<f64>> = net.layers().iter().map(|l| l.deltas().to_vec()).collect();
        net.backpropagate(0.5);

        // Output layer scales by lr, the hidden layer by lr twice.
        for (d, u) in net.layers()[1].deltas().iter().zip(&unit[1]) {
            assert_abs_diff_eq!(*d, u * 0.5, epsilon = 1e-15);
        }
        for (d, u) in net.layers()[0].deltas().iter().zip(&unit[0]) {
            assert_abs_diff_eq!(*d, u * 0.25, epsilon = 1e-15);
        }
    }

    #[test]
    fn linear_output_layer_passes_z_through() {
        let specs = [
            LayerSpec::sigmoid(2),
            LayerSpec { size: 1, activation: ActivationFunction::Linear },
        ];
        let mut net = Network::with_rng(&specs, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
        net.load_parameters(0, &Matrix::from_data(vec![vec![2.0, -1.0]]), &[0.5]).unwrap();
        let out = net.forward(&[1.0, 3.0]).unwrap();
        assert_abs_diff_eq!(out[0], -0.5);
    }

    #[test]
    fn footprint_counts_every_buffer() {
        let net = seeded(&[2, 3, 1], 0);
        assert_eq!(net.parameter_count(), (2 * 3 + 3) + (3 + 1));
        // inputs 2 + errors 1 + layer1 (4*3 + 2*6) + layer2 (4*1 + 2*3)
        assert_eq!(net.buffer_bytes(), (2 + 1 + 24 + 10) * 8);
    }
}
