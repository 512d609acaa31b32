//! The `OutputWriter` trait implemented by output backends.

use crate::{OutputResult, StationSnapshotRow, TickSummaryRow, VehicleSnapshotRow};

/// A sink for rows produced by [`SimOutputObserver`](crate::SimOutputObserver).
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    fn write_station_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
