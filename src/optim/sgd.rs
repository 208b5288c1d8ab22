use crate::network::network::Network;

/// Plain online SGD: one update per sample, no momentum, no accumulation.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Backpropagates the network's stored errors and applies the update.
    pub fn step(&self, network: &mut Network) {
        network.backpropagate_and_update(self.learning_rate);
    }
}
