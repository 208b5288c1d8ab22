pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::error::NetworkError;
pub use network::spec::{LayerSpec, NetworkSpec, TrainingSpec};
pub use loss::abs_sum::AbsSumLoss;
pub use optim::sgd::Sgd;
pub use train::{train, train_loop, Sample, SampleBuffer, TrainConfig, TrainReport, TrainState};
