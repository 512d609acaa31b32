//! Per-tick summary returned by [`World::advance`][crate::World::advance].

use ts_core::{StationId, VehicleId};
use ts_fleet::StallReason;
use ts_network::OvercrowdingChange;

/// Everything that changed during one tick.
///
/// Replaces change notifications: callers poll the report instead of
/// subscribing to the world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// 1-based count of `advance` calls on this world.
    pub tick:           u64,
    /// Clock value after the tick.
    pub now:            f64,
    pub elapsed_secs:   f64,

    pub activated:      Vec<StationId>,
    pub created:        usize,
    /// Created passengers with no path to their destination.
    pub unroutable:     usize,
    pub boarded:        usize,
    pub served:         usize,
    /// Summed origin-to-destination time of the passengers served.
    pub trip_secs:      f64,
    pub departed:       usize,
    pub arrivals:       usize,

    pub ticket_revenue: f64,
    pub maintenance:    f64,
    /// Balance after the tick.
    pub money:          f64,

    pub stalled:        Vec<(VehicleId, StallReason)>,
    /// Threshold crossings in the order they happened; a station can appear
    /// twice if it flipped both ways.
    pub overcrowding:   Vec<OvercrowdingChange>,
}

impl TickReport {
    /// Ticket revenue minus maintenance.
    pub fn net_income(&self) -> f64 {
        self.ticket_revenue - self.maintenance
    }

    /// Average trip time of this tick's served passengers, if any.
    pub fn mean_trip_secs(&self) -> Option<f64> {
        (self.served > 0).then(|| self.trip_secs / self.served as f64)
    }
}
