pub mod error;
pub mod network;
pub mod spec;

pub use error::NetworkError;
pub use network::Network;
pub use spec::{LayerSpec, NetworkSpec, TrainingSpec};
