use thiserror::Error;

use ts_core::{LineId, VehicleTypeId};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("line {0} not found")]
    LineNotFound(LineId),

    #[error("vehicle type {0} not found")]
    VehicleTypeNotFound(VehicleTypeId),

    #[error("index {index} out of range for line {line} with {len} stations")]
    IndexOutOfRange {
        line:  LineId,
        index: usize,
        len:   usize,
    },
}

pub type FleetResult<T> = Result<T, FleetError>;
