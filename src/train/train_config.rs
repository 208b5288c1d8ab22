use std::sync::mpsc;
use crate::network::spec::TrainingSpec;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `learning_rate` - folded into every layer's deltas during backprop
/// - `ideal_error`   - stop once an epoch's mean loss is at or below this
/// - `max_epochs`    - epoch budget; one epoch always runs
/// - `progress_tx`   - optional diagnostic sink; one `EpochStats` is sent per
///                     completed epoch. Send failures are ignored, a dropped
///                     receiver does not stop training.
pub struct TrainConfig {
    pub learning_rate: f64,
    pub ideal_error: f64,
    pub max_epochs: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(learning_rate: f64, ideal_error: f64, max_epochs: usize) -> Self {
        TrainConfig {
            learning_rate,
            ideal_error,
            max_epochs,
            progress_tx: None,
        }
    }

    pub fn from_spec(spec: &TrainingSpec) -> Self {
        TrainConfig::new(spec.learning_rate, spec.ideal_error, spec.max_epochs)
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_copies_stopping_criteria() {
        let config = TrainConfig::from_spec(&TrainingSpec::default());
        assert_eq!(config.learning_rate, 0.4);
        assert_eq!(config.ideal_error, 0.04);
        assert_eq!(config.max_epochs, 200);
        assert!(config.progress_tx.is_none());
    }
}
