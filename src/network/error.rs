use thiserror::Error;

/// Failures reported by the network and its training helpers.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("sample buffer is full (capacity {capacity})")]
    SampleBufferFull { capacity: usize },

    #[error("layer index {index} out of range (network has {count} non-input layers)")]
    LayerOutOfRange { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> NetworkError {
        NetworkError::DimensionMismatch { what, expected, actual }
    }

    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, NetworkError::DimensionMismatch { .. })
    }
}
