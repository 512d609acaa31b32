//! Graph-store error type.

use thiserror::Error;

use ts_core::StationId;

/// Errors produced by `ts-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("station {0} not found in network")]
    StationNotFound(StationId),

    #[error("no link from {from} to {to}")]
    LinkNotFound { from: StationId, to: StationId },

    #[error("station {0} cannot be linked to itself")]
    SelfLink(StationId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
