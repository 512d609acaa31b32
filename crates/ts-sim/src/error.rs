use thiserror::Error;

use ts_core::{CoreError, StationId};
use ts_fleet::FleetError;
use ts_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    /// A purchase was refused.  Nothing was changed.
    #[error("insufficient funds: price {price:.2}, balance {balance:.2}")]
    InsufficientFunds { price: f64, balance: f64 },

    #[error("stations {a} and {b} are already linked")]
    AlreadyLinked { a: StationId, b: StationId },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
