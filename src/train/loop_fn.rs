use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::sample::Sample;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Controller state. `Converged` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    Running,
    /// The last epoch's mean loss reached `ideal_error`.
    Converged,
    /// The epoch budget ran out first.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    /// Mean loss of the last completed epoch.
    pub final_loss: f64,
    /// Epochs actually run, always at least 1.
    pub epochs: usize,
    pub state: TrainState,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` until an epoch's mean loss is at or below
/// `config.ideal_error` or `config.max_epochs` epochs have run.
///
/// The check happens after each epoch, so at least one full epoch always
/// runs. Samples are visited in the order given; mis-sized samples are
/// skipped and logged, and do not count towards the mean.
pub fn train_loop(network: &mut Network, samples: &[Sample], config: &TrainConfig) -> TrainReport {
    let optimizer = Sgd::new(config.learning_rate);

    info!(
        "training {:?} on {} samples (lr = {}, ideal error = {}, max epochs = {})",
        network.widths(), samples.len(), config.learning_rate, config.ideal_error, config.max_epochs
    );
    if samples.is_empty() {
        warn!("training set is empty; loss cannot converge");
    }

    let mut epoch = 0;
    let mut mean_loss = f64::INFINITY;
    let mut state = TrainState::Running;

    while state == TrainState::Running {
        let t_start = Instant::now();
        let outcome = train_epoch(network, samples, &optimizer);
        epoch += 1;
        mean_loss = outcome.mean_loss;

        debug!("epoch {epoch}: mean loss = {mean_loss:.6}, skipped = {}", outcome.skipped);

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                max_epochs: config.max_epochs,
                mean_loss,
                skipped: outcome.skipped,
                elapsed_ms: u64::try_from(t_start.elapsed().as_millis()).unwrap_or(u64::MAX),
            };
            // Nobody listening is fine.
            let _ = tx.send(stats);
        }

        state = next_state(epoch, mean_loss, config);
    }

    info!("training stopped after {epoch} epochs: {state:?}, mean loss = {mean_loss:.6}");
    if let Some(last) = network.layers().last() {
        trace!("output layer weights: {:?}, biases: {:?}", last.weights().data, last.biases());
    }

    TrainReport { final_loss: mean_loss, epochs: epoch, state }
}

/// Runs [`train_loop`] with the given stopping criteria and returns only the
/// final epoch's mean loss.
pub fn train(
    network: &mut Network,
    samples: &[Sample],
    learning_rate: f64,
    ideal_error: f64,
    max_epochs: usize,
) -> f64 {
    let config = TrainConfig::new(learning_rate, ideal_error, max_epochs);
    train_loop(network, samples, &config).final_loss
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn next_state(epoch: usize, mean_loss: f64, config: &TrainConfig) -> TrainState {
    if mean_loss <= config.ideal_error {
        TrainState::Converged
    } else if epoch >= config.max_epochs {
        TrainState::Exhausted
    } else {
        TrainState::Running
    }
}
