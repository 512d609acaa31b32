//! The per-vehicle state machine: departure gate, motion, arrival, dwell.
//!
//! # Motion
//!
//! Station positions are planar units of [`METRES_PER_UNIT`] metres.  Per
//! tick a vehicle covers `max_speed · elapsed_ms · multiplier` metres
//! (speed in metres per millisecond), added to `percent` as a share of the
//! link length.  Arrival triggers when `percent` exceeds 100; the overshoot
//! is discarded.
//!
//! # Failure handling
//!
//! Nothing here returns an error.  A vehicle that cannot continue (missing
//! next link, line shortened under it) unloads at the station it stands at
//! and goes back to idle; the reason is reported in [`VehicleUpdate::stalled`].

use log::{debug, warn};

use ts_core::{CapacityPolicy, StationId, METRES_PER_UNIT};
use ts_network::{Link, Network, OvercrowdingChange};

use crate::{board, disembark, Line, Schedule, Vehicle};

/// Per-tick inputs shared by every vehicle.
#[derive(Copy, Clone, Debug)]
pub struct TickContext {
    /// Clock value after this tick's advance, in simulated seconds.
    pub now:        f64,
    /// Wall-clock delta driving this tick.
    pub elapsed_ms: f64,
    pub multiplier: f64,
    pub capacity:   CapacityPolicy,
}

/// Why a vehicle dropped back to idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// No link between two consecutive stations of the line.
    MissingLink { from: StationId, to: StationId },
    /// The line no longer has the station the vehicle was heading to.
    IndexOutOfRange { index: usize, len: usize },
}

/// What happened to one vehicle during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehicleUpdate {
    pub departed:     bool,
    /// Station reached this tick.
    pub arrived_at:   Option<StationId>,
    pub boarded:      usize,
    pub served:       usize,
    /// Total trip time of the passengers served this tick.
    pub trip_secs:    f64,
    /// Station holding passengers dropped off with no route from there.
    pub stranded_at:  Option<StationId>,
    pub stalled:      Option<StallReason>,
    pub overcrowding: Option<OvercrowdingChange>,
}

/// Advance `vehicle` on `line` by one tick.
///
/// `line` must not be inert; the fleet skips inert lines.
pub fn advance_vehicle(
    vehicle:  &mut Vehicle,
    line:     &Line,
    schedule: &mut Schedule,
    network:  &mut Network,
    ctx:      &TickContext,
) -> VehicleUpdate {
    let mut update = VehicleUpdate::default();
    if line.is_inert() {
        return update;
    }

    // ── Dwell gate ────────────────────────────────────────────────────────
    if vehicle.location.stopped {
        if ctx.now - vehicle.location.stopped_at >= schedule.stopping_time_secs {
            vehicle.location.stopped = false;
        } else {
            return update;
        }
    }

    // ── Departure gate ────────────────────────────────────────────────────
    if vehicle.location.current_link.is_none() {
        if schedule.departure_due(ctx.now) {
            depart(vehicle, line, schedule, network, ctx, &mut update);
        }
        return update;
    }

    // ── Motion ────────────────────────────────────────────────────────────
    let Some((from, to)) = vehicle.location.travel_endpoints() else {
        return update;
    };
    let (Some(a), Some(b)) = (network.station(from), network.station(to)) else {
        return update;
    };
    let units = a.position.distance(b.position);
    let metres = vehicle.info.metres_per_ms() * ctx.elapsed_ms * ctx.multiplier;
    if units > 0.0 {
        vehicle.location.percent += 100.0 * metres / (units * METRES_PER_UNIT);
    } else {
        // Co-located stations: arrive on the first moving tick.
        vehicle.location.percent = f64::INFINITY;
    }
    if vehicle.location.percent <= 100.0 {
        return update;
    }

    arrive(vehicle, line, network, to, ctx, &mut update);
    update
}

fn depart(
    vehicle:  &mut Vehicle,
    line:     &Line,
    schedule: &mut Schedule,
    network:  &mut Network,
    ctx:      &TickContext,
    update:   &mut VehicleUpdate,
) {
    let (origin, next) = (line.station_ids[0], line.station_ids[1]);
    let Some((link, forward)) = find_link(network, origin, next) else {
        // Stays idle and retries every tick until the line is fixed.
        debug!("{} on line {} cannot depart: {origin} and {next} are not linked", vehicle.id, line.id);
        return;
    };

    let loc = &mut vehicle.location;
    loc.current_link = Some(link);
    loc.track_is_forward = forward;
    loc.station_index = 1;
    loc.reverse_trip = false;
    loc.percent = 0.0;
    schedule.previous_departure = ctx.now;
    update.departed = true;
    debug!("{} departed {origin} on line {}", vehicle.id, line.id);

    if let Some(station) = network.station_mut(origin) {
        let prev_len = station.waiting.len();
        update.boarded =
            board(&mut vehicle.passengers, vehicle.info.capacity, station, next, ctx.capacity);
        update.overcrowding = station.overcrowding_change(prev_len);
    }
}

fn arrive(
    vehicle: &mut Vehicle,
    line:    &Line,
    network: &mut Network,
    here:    StationId,
    ctx:     &TickContext,
    update:  &mut VehicleUpdate,
) {
    update.arrived_at = Some(here);
    let len = line.len();
    let loc = &mut vehicle.location;
    loc.percent = 0.0;

    if loc.station_index >= len {
        let reason = StallReason::IndexOutOfRange { index: loc.station_index, len };
        stall(vehicle, line, network, here, reason, ctx.now, update);
        return;
    }

    // Step to the next index, turning back at either end of the line.
    if loc.reverse_trip {
        if loc.station_index == 0 {
            loc.reverse_trip = false;
            loc.station_index = 1;
        } else {
            loc.station_index -= 1;
        }
    } else if loc.station_index + 1 >= len {
        loc.reverse_trip = true;
        loc.station_index = len - 2;
    } else {
        loc.station_index += 1;
    }

    let next = line.station_ids[loc.station_index];
    let Some((link, forward)) = find_link(network, here, next) else {
        let reason = StallReason::MissingLink { from: here, to: next };
        stall(vehicle, line, network, here, reason, ctx.now, update);
        return;
    };
    loc.current_link = Some(link);
    loc.track_is_forward = forward;
    loc.stopped = true;
    loc.stopped_at = ctx.now;

    let Some(station) = network.station_mut(here) else {
        return;
    };
    let prev_len = station.waiting.len();
    let dropped = disembark(&mut vehicle.passengers, station, Some(next), ctx.now);
    update.served = dropped.served;
    update.trip_secs = dropped.trip_secs;
    if dropped.stranded > 0 {
        update.stranded_at = Some(here);
    }
    update.boarded =
        board(&mut vehicle.passengers, vehicle.info.capacity, station, next, ctx.capacity);
    update.overcrowding = station.overcrowding_change(prev_len);
}

/// Unload everyone at `here` and return to idle at the origin.
fn stall(
    vehicle: &mut Vehicle,
    line:    &Line,
    network: &mut Network,
    here:    StationId,
    reason:  StallReason,
    now:     f64,
    update:  &mut VehicleUpdate,
) {
    warn!("{} on line {} stalled at {here}: {reason:?}", vehicle.id, line.id);
    vehicle.reset_to_idle();
    update.stalled = Some(reason);

    let Some(station) = network.station_mut(here) else {
        return;
    };
    let prev_len = station.waiting.len();
    let dropped = disembark(&mut vehicle.passengers, station, None, now);
    update.served += dropped.served;
    update.trip_secs += dropped.trip_secs;
    if dropped.stranded > 0 {
        update.stranded_at = Some(here);
    }
    update.overcrowding = station.overcrowding_change(prev_len);
}

/// The link record `a → b`, or failing that `b → a` travelled backwards.
fn find_link(network: &Network, a: StationId, b: StationId) -> Option<(Link, bool)> {
    if let Some(l) = network.link(a, b) {
        return Some((l.clone(), true));
    }
    network.link(b, a).map(|l| (l.clone(), false))
}
