//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use log::warn;

use ts_core::{Economy, SimClock};
use ts_fleet::Fleet;
use ts_network::Network;
use ts_sim::{SimObserver, TickReport};

use crate::row::{StationSnapshotRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and vehicle / station
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    /// Tick number of the last `on_tick_end`, stamped on snapshots.
    last_tick:  u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_tick: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output writer failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.last_tick = report.tick;
        let row = TickSummaryRow {
            tick:           report.tick,
            sim_time_secs:  report.now,
            activated:      report.activated.len() as u32,
            created:        report.created as u64,
            boarded:        report.boarded as u64,
            served:         report.served as u64,
            departed:       report.departed as u64,
            stalled:        report.stalled.len() as u32,
            ticket_revenue: report.ticket_revenue,
            maintenance:    report.maintenance,
            money:          report.money,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(
        &mut self,
        _clock:   &SimClock,
        network:  &Network,
        fleet:    &Fleet,
        _economy: &Economy,
    ) {
        let tick = self.last_tick;

        let vehicles: Vec<VehicleSnapshotRow> = fleet
            .iter_vehicles()
            .map(|v| {
                let pos = v.position(network).or_else(|| {
                    let origin = *fleet.line(v.line)?.station_ids.first()?;
                    network.station(origin).map(|s| s.position)
                });
                VehicleSnapshotRow {
                    tick,
                    vehicle_id:    v.id.0,
                    line_id:       v.line.0,
                    state:         v.state(),
                    station_index: v.location.station_index as u32,
                    percent:       v.location.percent,
                    x:             pos.map_or(f64::NAN, |p| p.x),
                    y:             pos.map_or(f64::NAN, |p| p.y),
                    passengers:    v.passengers.len() as u32,
                    overcrowded:   v.is_overcrowded(),
                }
            })
            .collect();

        let stations: Vec<StationSnapshotRow> = network
            .stations
            .iter()
            .filter(|s| s.spawned)
            .map(|s| StationSnapshotRow {
                tick,
                station_id:  s.id.0,
                waiting:     s.waiting.len() as u32,
                overcrowded: s.is_overcrowded(),
            })
            .collect();

        if !vehicles.is_empty() {
            let result = self.writer.write_vehicle_snapshots(&vehicles);
            self.store_err(result);
        }
        if !stations.is_empty() {
            let result = self.writer.write_station_snapshots(&stations);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _clock: &SimClock) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
