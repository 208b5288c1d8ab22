use log::warn;

use crate::{
    network::{error::NetworkError, network::Network},
    optim::sgd::Sgd,
    train::sample::Sample,
};

/// Loss and bookkeeping for one pass over the training set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochOutcome {
    /// Mean loss over trained samples; `f64::INFINITY` if none were trained.
    pub mean_loss: f64,
    pub trained: usize,
    pub skipped: usize,
}

/// Feed, forward, evaluate, backprop and update for a single sample.
///
/// Dimensions are checked before anything is written, so a rejected sample
/// leaves the network exactly as it was.
pub fn train_sample(network: &mut Network, sample: &Sample, optimizer: &Sgd) -> Result<f64, NetworkError> {
    sample.check(network)?;
    network.feed_inputs(&sample.inputs)?;
    network.propagate_forward();
    let loss = network.evaluate_error(&sample.targets)?;
    optimizer.step(network);
    Ok(loss)
}

/// One epoch of online SGD over `samples`, in the given order.
pub fn train_epoch(network: &mut Network, samples: &[Sample], optimizer: &Sgd) -> EpochOutcome {
    let mut total_loss = 0.0;
    let mut trained = 0;
    let mut skipped = 0;

    for (idx, sample) in samples.iter().enumerate() {
        match train_sample(network, sample, optimizer) {
            Ok(loss) => {
                total_loss += loss;
                trained += 1;
            }
            Err(e) => {
                warn!("skipping sample {idx}: {e}");
                skipped += 1;
            }
        }
    }

    let mean_loss = if trained == 0 { f64::INFINITY } else { total_loss / trained as f64 };
    EpochOutcome { mean_loss, trained, skipped }
}
