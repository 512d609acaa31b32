//! Simulation observer trait for progress reporting and data collection.

use ts_core::{Economy, SimClock};
use ts_fleet::Fleet;
use ts_network::Network;

use crate::TickReport;

/// Callbacks invoked by [`World::advance_with`][crate::World::advance_with]
/// and the `run_*` loops.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: revenue printer
///
/// ```rust,ignore
/// struct Revenue(f64);
///
/// impl SimObserver for Revenue {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.0 += report.ticket_revenue;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the clock moves.
    fn on_tick_start(&mut self, _clock: &SimClock) {}

    /// Called once the tick has been fully applied.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called at snapshot intervals with read-only access to the world
    /// state, so writers can record vehicle positions and queue lengths
    /// without the world knowing about any output format.
    fn on_snapshot(
        &mut self,
        _clock:   &SimClock,
        _network: &Network,
        _fleet:   &Fleet,
        _economy: &Economy,
    ) {}

    /// Called once after the last tick of a `run_*` loop.
    fn on_run_end(&mut self, _clock: &SimClock) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
