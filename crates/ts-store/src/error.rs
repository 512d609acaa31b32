//! Error types for ts-store.

use thiserror::Error;

use ts_sim::SimError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in `{key}`: {source}")]
    Json {
        key:    String,
        #[source]
        source: serde_json::Error,
    },

    /// Keys become file names; separators and empty keys are refused.
    #[error("invalid store key `{0}`")]
    InvalidKey(String),

    #[error("restored world is inconsistent: {0}")]
    Sim(#[from] SimError),
}

pub type StoreResult<T> = Result<T, StoreError>;
