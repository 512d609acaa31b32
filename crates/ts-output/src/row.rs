//! Plain data row types written by output backends.

use ts_fleet::VehicleState;

/// Summary of one tick, flattened from a `TickReport`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    /// Simulated seconds since day 0, after the tick.
    pub sim_time_secs:  f64,
    pub activated:      u32,
    pub created:        u64,
    pub boarded:        u64,
    pub served:         u64,
    pub departed:       u64,
    pub stalled:        u32,
    pub ticket_revenue: f64,
    pub maintenance:    f64,
    pub money:          f64,
}

/// One vehicle at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:          u64,
    pub vehicle_id:    u32,
    pub line_id:       u32,
    pub state:         VehicleState,
    /// Index of the station being approached.
    pub station_index: u32,
    pub percent:       f64,
    /// Planar position; idle vehicles report their line's origin.
    pub x:             f64,
    pub y:             f64,
    pub passengers:    u32,
    pub overcrowded:   bool,
}

/// One spawned station at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationSnapshotRow {
    pub tick:        u64,
    pub station_id:  u32,
    pub waiting:     u32,
    pub overcrowded: bool,
}
