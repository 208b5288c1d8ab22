pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod sample;

pub use trainer::{train_epoch, train_sample, EpochOutcome};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train, train_loop, TrainReport, TrainState};
pub use sample::{Sample, SampleBuffer};
