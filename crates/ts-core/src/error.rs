//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{LineId, StationId, VehicleTypeId};

/// The base error type shared by `ts-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("line {0} not found")]
    LineNotFound(LineId),

    #[error("vehicle type {0} not found")]
    VehicleTypeNotFound(VehicleTypeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ts-core`.
pub type CoreResult<T> = Result<T, CoreError>;
