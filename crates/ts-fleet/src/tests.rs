//! Unit tests for ts-fleet.

use ts_core::{
    CapacityPolicy, GeoPoint, LineId, Passenger, PassengerId, Position, StationId, VehicleId,
    VehicleTypeId,
};
use ts_network::{Network, Station};

use crate::{
    advance_vehicle, Fleet, Line, Schedule, TickContext, Vehicle, VehicleInfo, VehicleState,
    VehicleType,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `n` spawned stations on the x axis, `spacing` planar units apart, linked
/// in a chain.  100 units = 1 km.
fn chain(n: u32, spacing: f64) -> Network {
    let stations = (0..n)
        .map(|i| {
            let mut s = Station::new(StationId(i), format!("S{i}"), GeoPoint::default());
            s.position = Position::new(i as f64 * spacing, 0.0);
            s.activate(100, 1.0, 60.0);
            s
        })
        .collect();
    let mut net = Network::from_parts(stations, Vec::new());
    for i in 1..n {
        net.connect(StationId(i - 1), StationId(i)).unwrap();
    }
    net
}

fn ids(v: &[u32]) -> Vec<StationId> {
    v.iter().map(|&i| StationId(i)).collect()
}

fn line(stations: &[u32]) -> Line {
    Line::new(LineId(0), "L", "#000000", ids(stations))
}

/// 36 km/h = 10 m per second of wall time: 1 % of a 1 km link per 1000 ms.
fn slow_type() -> VehicleType {
    VehicleType { id: VehicleTypeId(0), info: VehicleInfo::new("Test", 36.0, 10) }
}

fn vehicle() -> Vehicle {
    Vehicle::from_type(VehicleId(0), LineId(0), &slow_type())
}

fn ctx(now: f64, elapsed_ms: f64) -> TickContext {
    TickContext { now, elapsed_ms, multiplier: 1.0, capacity: CapacityPolicy::Advisory }
}

fn passenger(id: u64, itinerary: &[u32]) -> Passenger {
    let it = ids(itinerary);
    let (o, d) = (it.first().copied().unwrap_or_default(), it.last().copied().unwrap_or_default());
    Passenger::new(PassengerId(id), o, d, it, 0.0)
}

/// Put `v` en route to `line[index]` with the given progress.
fn place(v: &mut Vehicle, net: &Network, from: u32, to: u32, index: usize, reverse: bool, percent: f64) {
    v.location.current_link = net.link(StationId(from), StationId(to)).cloned();
    v.location.track_is_forward = true;
    v.location.station_index = index;
    v.location.reverse_trip = reverse;
    v.location.percent = percent;
}

// ── Departure & motion ────────────────────────────────────────────────────────

#[cfg(test)]
mod departure {
    use super::*;

    #[test]
    fn first_advance_departs_towards_second_station() {
        let mut net = chain(3, 100.0);
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(43_200.0, 1e9));

        assert!(u.departed);
        let link = v.location.current_link.as_ref().unwrap();
        assert_eq!((link.from, link.to), (StationId(0), StationId(1)));
        assert_eq!(v.location.station_index, 1);
        assert_eq!(v.location.percent, 0.0);
        assert_eq!(v.state(), VehicleState::EnRoute);
        assert_eq!(schedule.previous_departure, 43_200.0);
    }

    #[test]
    fn interval_gates_departure() {
        let mut net = chain(2, 100.0);
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(300.0, 0.0);
        schedule.previous_departure = 1_000.0;
        let mut v = vehicle();

        assert!(!advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(1_300.0, 16.0)).departed);
        assert_eq!(v.state(), VehicleState::Idle);
        assert!(advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(1_300.5, 16.0)).departed);
    }

    #[test]
    fn second_vehicle_waits_one_interval() {
        let mut net = chain(2, 100.0);
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(60.0, 0.0);
        let mut a = vehicle();
        let mut b = vehicle();

        advance_vehicle(&mut a, &line, &mut schedule, &mut net, &ctx(100.0, 16.0));
        let u = advance_vehicle(&mut b, &line, &mut schedule, &mut net, &ctx(100.0, 16.0));
        assert!(!u.departed);
        let u = advance_vehicle(&mut b, &line, &mut schedule, &mut net, &ctx(161.0, 16.0));
        assert!(u.departed);
    }

    #[test]
    fn boards_at_origin_on_departure() {
        let mut net = chain(3, 100.0);
        net.stations[0].waiting.push(passenger(0, &[0, 1, 2]));
        net.stations[0].waiting.push(passenger(1, &[0, 1]));
        net.stations[0].waiting.push(passenger(2, &[0, 4]));
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(10.0, 16.0));
        assert_eq!(u.boarded, 2);
        assert_eq!(v.passengers.len(), 2);
        assert!(v.passengers.iter().all(|p| !p.waiting));
        assert_eq!(net.stations[0].waiting.len(), 1);
    }

    #[test]
    fn unlinked_origin_stays_idle() {
        let mut net = chain(3, 100.0);
        net.disconnect(StationId(0), StationId(1)).unwrap();
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(10.0, 16.0));
        assert!(!u.departed);
        assert_eq!(v.state(), VehicleState::Idle);
        assert_eq!(schedule.previous_departure, 0.0);
    }

    #[test]
    fn inert_line_does_nothing() {
        let mut net = chain(2, 100.0);
        let line = line(&[0]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(10.0, 16.0));
        assert_eq!(u, Default::default());
        assert_eq!(v.state(), VehicleState::Idle);
    }

    #[test]
    fn progress_scales_with_speed_distance_and_multiplier() {
        let mut net = chain(2, 100.0);
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        place(&mut v, &net, 0, 1, 1, false, 0.0);

        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert!((v.location.percent - 1.0).abs() < 1e-9);

        let fast = TickContext { multiplier: 10.0, ..ctx(0.0, 1_000.0) };
        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &fast);
        assert!((v.location.percent - 11.0).abs() < 1e-9);
    }

    #[test]
    fn position_interpolates_along_link() {
        let net = chain(2, 100.0);
        let mut v = vehicle();
        assert_eq!(v.position(&net), None);
        place(&mut v, &net, 0, 1, 1, false, 25.0);
        assert_eq!(v.position(&net), Some(Position::new(25.0, 0.0)));
        v.location.track_is_forward = false;
        assert_eq!(v.position(&net), Some(Position::new(75.0, 0.0)));
    }
}

// ── Arrival, dwell, reversal ──────────────────────────────────────────────────

#[cfg(test)]
mod arrival {
    use super::*;

    #[test]
    fn arrival_steps_index_and_dwells() {
        let mut net = chain(3, 100.0);
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 30.0);
        let mut v = vehicle();
        place(&mut v, &net, 0, 1, 1, false, 99.5);

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(100.0, 1_000.0));
        assert_eq!(u.arrived_at, Some(StationId(1)));
        assert_eq!(v.location.station_index, 2);
        assert_eq!(v.location.percent, 0.0);
        assert_eq!(v.state(), VehicleState::Dwelling);
        let link = v.location.current_link.as_ref().unwrap();
        assert_eq!((link.from, link.to), (StationId(1), StationId(2)));

        // Still dwelling 29 s later; moving at 30 s.
        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(129.0, 1_000.0));
        assert_eq!(v.location.percent, 0.0);
        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(130.0, 1_000.0));
        assert_eq!(v.state(), VehicleState::EnRoute);
        assert!(v.location.percent > 0.0);
    }

    #[test]
    fn exactly_one_hundred_is_not_arrival() {
        let mut net = chain(2, 100.0);
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        place(&mut v, &net, 0, 1, 1, false, 99.0);
        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert_eq!(u.arrived_at, None);
    }

    #[test]
    fn turns_back_at_both_ends() {
        let mut net = chain(3, 100.0);
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();

        place(&mut v, &net, 1, 2, 2, false, 100.0);
        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert!(v.location.reverse_trip);
        assert_eq!(v.location.station_index, 1);
        let link = v.location.current_link.as_ref().unwrap();
        assert_eq!((link.from, link.to), (StationId(2), StationId(1)));

        v.location.stopped = false;
        place(&mut v, &net, 1, 0, 0, true, 100.0);
        advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert!(!v.location.reverse_trip);
        assert_eq!(v.location.station_index, 1);
    }

    #[test]
    fn shuttles_forever_without_leaving_the_line() {
        // 10-unit links: about 10 s per hop at 36 km/h.
        let mut net = chain(4, 10.0);
        let line = line(&[0, 1, 2, 3]);
        let mut schedule = Schedule::new(0.0, 5.0);
        let mut v = vehicle();

        let mut visited_ends = Vec::new();
        let mut now = 0.0;
        for _ in 0..20_000 {
            now += 0.1;
            let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(now, 100.0));
            assert!(v.location.station_index < line.len());
            if let Some(s) = u.arrived_at.filter(|&s| s == StationId(0) || s == StationId(3)) {
                visited_ends.push(s);
            }
            assert!(u.stalled.is_none());
        }
        assert!(visited_ends.len() >= 4, "ends visited: {visited_ends:?}");
        assert!(visited_ends.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn co_located_stations_arrive_immediately() {
        let mut net = chain(2, 0.0);
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        place(&mut v, &net, 0, 1, 1, false, 0.0);
        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 16.0));
        assert_eq!(u.arrived_at, Some(StationId(1)));
    }

    #[test]
    fn missing_next_link_stalls_and_unloads() {
        let mut net = chain(3, 100.0);
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        v.passengers = vec![passenger(0, &[0, 1]), passenger(1, &[0, 1, 2])];
        place(&mut v, &net, 0, 1, 1, false, 100.0);
        net.disconnect(StationId(1), StationId(2)).unwrap();

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert!(matches!(u.stalled, Some(crate::StallReason::MissingLink { .. })));
        assert_eq!(u.served, 1);
        assert_eq!(v.state(), VehicleState::Idle);
        assert!(v.passengers.is_empty());
        assert_eq!(net.stations[1].waiting.len(), 1);
        assert!(net.stations[1].waiting[0].waiting);
    }

    #[test]
    fn shortened_line_stalls_at_reached_station() {
        let mut net = chain(3, 100.0);
        let mut line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        v.passengers = vec![passenger(0, &[1, 2])];
        place(&mut v, &net, 1, 2, 2, false, 100.0);
        line.remove_station(StationId(2));

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert_eq!(u.stalled, Some(crate::StallReason::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(u.served, 1);
        assert_eq!(v.state(), VehicleState::Idle);
    }
}

// ── Boarding protocol ─────────────────────────────────────────────────────────

#[cfg(test)]
mod boarding {
    use super::*;
    use crate::{board, disembark};

    #[test]
    fn disembark_rules() {
        let mut net = chain(4, 100.0);
        let station = &mut net.stations[1];
        let mut aboard = vec![
            passenger(0, &[0, 1]),       // destination
            passenger(1, &[0, 1, 2]),    // rides on
            passenger(2, &[0, 1, 3]),    // transfers
            passenger(3, &[0, 3]),       // not on itinerary: stranded
        ];

        let out = disembark(&mut aboard, station, Some(StationId(2)), 500.0);
        assert_eq!(out.served, 1);
        assert_eq!(out.transferred, 2);
        assert_eq!(out.stranded, 1);
        assert_eq!(aboard.len(), 1);
        assert_eq!(aboard[0].id, PassengerId(1));
        let queued: Vec<_> = station.waiting.iter().map(|p| p.id).collect();
        assert_eq!(queued, vec![PassengerId(2), PassengerId(3)]);
    }

    #[test]
    fn served_passengers_carry_their_trip_time() {
        let mut net = chain(3, 100.0);
        let station = &mut net.stations[2];
        let mut early = passenger(0, &[0, 2]);
        early.created_at = 100.0;
        let mut late = passenger(1, &[1, 2]);
        late.created_at = 400.0;
        let mut aboard = vec![early, late, passenger(2, &[0, 2, 1])];

        let out = disembark(&mut aboard, station, None, 1_000.0);

        assert_eq!(out.served, 2);
        assert_eq!(out.trip_secs, 900.0 + 600.0);
        // Only the passenger still travelling is queued, and unstamped.
        assert_eq!(station.waiting.len(), 1);
        assert_eq!(station.waiting[0].served_at, 0.0);
    }

    #[test]
    fn board_matches_next_station_in_queue_order() {
        let mut net = chain(3, 100.0);
        let station = &mut net.stations[1];
        station.waiting = vec![
            passenger(0, &[1, 2]),
            passenger(1, &[1, 0]),
            passenger(2, &[0, 1, 2]),
            passenger(3, &[1, 0, 2]),
        ];
        let mut aboard = Vec::new();

        let n = board(&mut aboard, 10, station, StationId(2), CapacityPolicy::Advisory);
        assert_eq!(n, 2);
        let ids: Vec<_> = aboard.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![0, 2]);
        let left: Vec<_> = station.waiting.iter().map(|p| p.id.0).collect();
        assert_eq!(left, vec![1, 3]);
    }

    #[test]
    fn advisory_capacity_overfills() {
        let mut net = chain(2, 100.0);
        let station = &mut net.stations[0];
        station.waiting = (0..15).map(|i| passenger(i, &[0, 1])).collect();
        let mut aboard = Vec::new();
        assert_eq!(board(&mut aboard, 10, station, StationId(1), CapacityPolicy::Advisory), 15);
        assert!(station.waiting.is_empty());
    }

    #[test]
    fn enforced_capacity_stops_at_limit() {
        let mut net = chain(2, 100.0);
        let station = &mut net.stations[0];
        station.waiting = (0..15).map(|i| passenger(i, &[0, 1])).collect();
        let mut aboard = vec![passenger(99, &[0, 1])];
        assert_eq!(board(&mut aboard, 10, station, StationId(1), CapacityPolicy::Enforced), 9);
        assert_eq!(aboard.len(), 10);
        assert_eq!(station.waiting.len(), 6);
    }

    #[test]
    fn arrival_disembarks_before_boarding() {
        let mut net = chain(3, 100.0);
        net.stations[1].waiting.push(passenger(10, &[1, 2]));
        let line = line(&[0, 1, 2]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();
        v.passengers = vec![passenger(0, &[0, 1]), passenger(1, &[0, 1, 0])];
        place(&mut v, &net, 0, 1, 1, false, 100.0);

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(0.0, 1_000.0));
        assert_eq!(u.served, 1);
        assert_eq!(u.boarded, 1);
        let aboard: Vec<_> = v.passengers.iter().map(|p| p.id.0).collect();
        assert_eq!(aboard, vec![10]);
        assert_eq!(net.stations[1].waiting[0].id, PassengerId(1));
    }

    #[test]
    fn overcrowding_reported_when_queue_drains() {
        let mut net = chain(2, 100.0);
        net.stations[0].waiting_max = 2;
        net.stations[0].waiting = (0..3).map(|i| passenger(i, &[0, 1])).collect();
        let line = line(&[0, 1]);
        let mut schedule = Schedule::new(0.0, 0.0);
        let mut v = vehicle();

        let u = advance_vehicle(&mut v, &line, &mut schedule, &mut net, &ctx(10.0, 16.0));
        let change = u.overcrowding.unwrap();
        assert_eq!(change.station, StationId(0));
        assert!(!change.overcrowded);
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use super::*;
    use crate::FleetError;

    fn fleet_with_line() -> Fleet {
        let mut fleet = Fleet::new();
        fleet.add_vehicle_type(slow_type().info);
        fleet.add_line("A", "#da291c", ids(&[0, 1, 2]), Schedule::new(0.0, 0.0));
        fleet
    }

    #[test]
    fn ids_are_sequential() {
        let mut fleet = fleet_with_line();
        let b = fleet.add_line("B", "#7ba4db", ids(&[1, 2]), Schedule::default());
        assert_eq!(b, LineId(1));
        assert_eq!(fleet.vehicles.len(), 2);
        assert_eq!(fleet.schedules.len(), 2);

        let v0 = fleet.add_vehicle(VehicleTypeId(0), LineId(1)).unwrap();
        let v1 = fleet.add_vehicle(VehicleTypeId(0), LineId(0)).unwrap();
        assert_eq!((v0, v1), (VehicleId(0), VehicleId(1)));
        assert_eq!(fleet.vehicle(v1).unwrap().line, LineId(0));
        assert_eq!(fleet.vehicle_count(), 2);
    }

    #[test]
    fn add_vehicle_rejects_unknown_refs() {
        let mut fleet = fleet_with_line();
        assert!(matches!(
            fleet.add_vehicle(VehicleTypeId(5), LineId(0)),
            Err(FleetError::VehicleTypeNotFound(_))
        ));
        assert!(matches!(
            fleet.add_vehicle(VehicleTypeId(0), LineId(5)),
            Err(FleetError::LineNotFound(_))
        ));
        assert_eq!(fleet.vehicle_count(), 0);
    }

    #[test]
    fn edit_line_keeps_departure_stamp() {
        let mut fleet = fleet_with_line();
        fleet.schedules[0].previous_departure = 500.0;

        let mut edited = fleet.lines[0].clone();
        edited.name = "A'".into();
        edited.hidden = true;
        edited.station_ids = ids(&[0, 1]);
        let old = fleet.edit_line(edited, Schedule::new(120.0, 20.0)).unwrap();

        assert_eq!(old.station_ids, ids(&[0, 1, 2]));
        assert_eq!(fleet.lines[0].name, "A'");
        assert!(fleet.lines[0].hidden);
        assert_eq!(fleet.schedules[0].interval_secs, 120.0);
        assert_eq!(fleet.schedules[0].previous_departure, 500.0);

        let ghost = Line::new(LineId(9), "?", "#fff", Vec::new());
        assert!(matches!(fleet.edit_line(ghost, Schedule::default()), Err(FleetError::LineNotFound(_))));
    }

    #[test]
    fn edit_vehicle_type_leaves_existing_vehicles() {
        let mut fleet = fleet_with_line();
        let v = fleet.add_vehicle(VehicleTypeId(0), LineId(0)).unwrap();
        fleet.edit_vehicle_type(VehicleTypeId(0), VehicleInfo::new("Fast", 300.0, 50)).unwrap();
        assert_eq!(fleet.vehicle_type(VehicleTypeId(0)).unwrap().info.name, "Fast");
        assert_eq!(fleet.vehicle(v).unwrap().info.name, "Test");
        assert!(fleet.edit_vehicle_type(VehicleTypeId(3), slow_type().info).is_err());
    }

    #[test]
    fn from_parts_pads_missing_collections() {
        let fleet = Fleet::from_parts(vec![line(&[0, 1]), line(&[1, 2])], Vec::new(), Vec::new(), Vec::new());
        assert_eq!(fleet.schedules.len(), 2);
        assert_eq!(fleet.vehicles.len(), 2);
    }

    #[test]
    fn tick_aggregates_and_skips_inert_lines() {
        let mut net = chain(3, 100.0);
        let mut fleet = fleet_with_line();
        fleet.add_line("Inert", "#fff", ids(&[2]), Schedule::new(0.0, 0.0));
        fleet.add_vehicle(VehicleTypeId(0), LineId(0)).unwrap();
        fleet.add_vehicle(VehicleTypeId(0), LineId(1)).unwrap();
        net.stations[0].waiting.push(passenger(0, &[0, 1]));

        let report = fleet.tick(&mut net, &ctx(10.0, 16.0));
        assert_eq!(report.departed, 1);
        assert_eq!(report.boarded, 1);
        assert_eq!(fleet.passengers_aboard(), 1);
        assert_eq!(fleet.vehicle(VehicleId(1)).unwrap().state(), VehicleState::Idle);
    }
}
