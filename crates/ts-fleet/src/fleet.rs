//! The `Fleet`: every line, schedule, vehicle type and vehicle.

use log::debug;

use ts_core::{LineId, StationId, VehicleId, VehicleTypeId};
use ts_network::{Network, OvercrowdingChange};

use crate::{
    advance_vehicle, FleetError, FleetResult, Line, Schedule, StallReason, TickContext, Vehicle,
    VehicleInfo, VehicleType,
};

/// Aggregate of every [`VehicleUpdate`](crate::VehicleUpdate) in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FleetReport {
    pub departed:     usize,
    pub arrivals:     usize,
    pub boarded:      usize,
    pub served:       usize,
    /// Total trip time of the passengers served this tick.
    pub trip_secs:    f64,
    pub stalled:      Vec<(VehicleId, StallReason)>,
    /// Stations where passengers were dropped with no route from there.
    pub stranded_at:  Vec<StationId>,
    pub overcrowding: Vec<OvercrowdingChange>,
}

/// Lines and vehicles.
///
/// `lines`, `schedules` and `vehicles` are all indexed by `LineId` and
/// always have the same length.  Vehicle ids are global and sequential;
/// lines and vehicles are never destroyed.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    pub lines:         Vec<Line>,
    pub schedules:     Vec<Schedule>,
    /// Vehicles per line, in purchase order.
    pub vehicles:      Vec<Vec<Vehicle>>,
    pub vehicle_types: Vec<VehicleType>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble from persisted collections.  Missing schedules or vehicle
    /// lists are padded with defaults so every line has both.
    pub fn from_parts(
        lines:         Vec<Line>,
        mut schedules: Vec<Schedule>,
        mut vehicles:  Vec<Vec<Vehicle>>,
        vehicle_types: Vec<VehicleType>,
    ) -> Self {
        schedules.resize_with(lines.len(), Schedule::default);
        vehicles.resize_with(lines.len(), Vec::new);
        Self { lines, schedules, vehicles, vehicle_types }
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    /// Register a new line with an empty vehicle list.
    pub fn add_line(
        &mut self,
        name:        impl Into<String>,
        color:       impl Into<String>,
        station_ids: Vec<StationId>,
        schedule:    Schedule,
    ) -> LineId {
        let id = LineId(self.lines.len() as u32);
        self.lines.push(Line::new(id, name, color, station_ids));
        self.schedules.push(schedule);
        self.vehicles.push(Vec::new());
        id
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.index())
    }

    pub fn line_mut(&mut self, id: LineId) -> FleetResult<&mut Line> {
        self.lines.get_mut(id.index()).ok_or(FleetError::LineNotFound(id))
    }

    pub fn schedule(&self, id: LineId) -> Option<&Schedule> {
        self.schedules.get(id.index())
    }

    /// Replace line `line.id` and its schedule.  Returns the previous line.
    ///
    /// The last-departure stamp of the old schedule is kept.
    pub fn edit_line(&mut self, line: Line, mut schedule: Schedule) -> FleetResult<Line> {
        let idx = line.id.index();
        let old = self.lines.get_mut(idx).ok_or(FleetError::LineNotFound(line.id))?;
        let previous = std::mem::replace(old, line);
        schedule.previous_departure = self.schedules[idx].previous_departure;
        self.schedules[idx] = schedule;
        Ok(previous)
    }

    // ── Vehicle types ─────────────────────────────────────────────────────

    pub fn add_vehicle_type(&mut self, info: VehicleInfo) -> VehicleTypeId {
        let id = VehicleTypeId(self.vehicle_types.len() as u32);
        self.vehicle_types.push(VehicleType { id, info });
        id
    }

    /// Replace the info of type `id`.  Vehicles already bought keep theirs.
    pub fn edit_vehicle_type(&mut self, id: VehicleTypeId, info: VehicleInfo) -> FleetResult<()> {
        let t = self.vehicle_types.get_mut(id.index()).ok_or(FleetError::VehicleTypeNotFound(id))?;
        t.info = info;
        Ok(())
    }

    pub fn vehicle_type(&self, id: VehicleTypeId) -> Option<&VehicleType> {
        self.vehicle_types.get(id.index())
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    /// Attach a new vehicle of type `type_id` to `line`, idle at its origin.
    pub fn add_vehicle(&mut self, type_id: VehicleTypeId, line: LineId) -> FleetResult<VehicleId> {
        let vehicle_type =
            self.vehicle_types.get(type_id.index()).ok_or(FleetError::VehicleTypeNotFound(type_id))?;
        if line.index() >= self.lines.len() {
            return Err(FleetError::LineNotFound(line));
        }
        let id = VehicleId(self.vehicle_count() as u32);
        let vehicle = Vehicle::from_type(id, line, vehicle_type);
        self.vehicles[line.index()].push(vehicle);
        debug!("{id} ({}) added to line {line}", vehicle_type.info.name);
        Ok(id)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.iter_vehicles().find(|v| v.id == id)
    }

    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().flatten()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.iter().map(Vec::len).sum()
    }

    /// Passengers currently aboard any vehicle.
    pub fn passengers_aboard(&self) -> usize {
        self.iter_vehicles().map(|v| v.passengers.len()).sum()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every vehicle on every non-inert line, in line then purchase
    /// order.
    pub fn tick(&mut self, network: &mut Network, ctx: &TickContext) -> FleetReport {
        let mut report = FleetReport::default();

        for ((line, schedule), vehicles) in
            self.lines.iter().zip(self.schedules.iter_mut()).zip(self.vehicles.iter_mut())
        {
            if line.is_inert() {
                continue;
            }
            for vehicle in vehicles.iter_mut() {
                let u = advance_vehicle(vehicle, line, schedule, network, ctx);
                report.departed += usize::from(u.departed);
                report.arrivals += usize::from(u.arrived_at.is_some());
                report.boarded += u.boarded;
                report.served += u.served;
                report.trip_secs += u.trip_secs;
                if let Some(reason) = u.stalled {
                    report.stalled.push((vehicle.id, reason));
                }
                report.stranded_at.extend(u.stranded_at);
                report.overcrowding.extend(u.overcrowding);
            }
        }
        report
    }
}
