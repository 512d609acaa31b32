//! Unit tests for ts-demand.

use ts_core::{Economy, GeoPoint, MapProjection, Passenger, PassengerId, Settings, SimRng, StationId};
use ts_network::{Network, NetworkBuilder, Pathfinder};

use crate::PassengerGenerator;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn network(n: u32, edges: &[(u32, u32)]) -> Network {
    let proj = MapProjection::new(GeoPoint::new(49.0, 2.0), GeoPoint::new(48.0, 3.0));
    let mut b = NetworkBuilder::new(proj);
    for i in 0..n {
        b.add_station(format!("S{i}"), GeoPoint::new(48.5, 2.0 + i as f64 * 0.01));
    }
    for &(a, c) in edges {
        b.add_link(StationId(a), StationId(c));
    }
    b.build()
}

/// Jitter-free settings so countdowns are exact.
fn flat_settings() -> Settings {
    Settings {
        station_spawn_time_variation: 0.0,
        passenger_arrival_interval_variation: 0.0,
        ..Settings::default()
    }
}

fn ids(v: &[u32]) -> Vec<StationId> {
    v.iter().map(|&i| StationId(i)).collect()
}

fn waiting_passenger(id: u64, origin: u32, dest: u32, itinerary: &[u32]) -> Passenger {
    Passenger::new(PassengerId(id), StationId(origin), StationId(dest), ids(itinerary), 0.0)
}

struct Fixture {
    network:    Network,
    pathfinder: Pathfinder,
    rng:        SimRng,
    economy:    Economy,
    generator:  PassengerGenerator,
}

impl Fixture {
    fn new(network: Network, settings: Settings) -> Self {
        Self {
            network,
            pathfinder: Pathfinder::default(),
            rng:        SimRng::new(7),
            economy:    Economy::new(0.0),
            generator:  PassengerGenerator::new(settings),
        }
    }

    fn tick(&mut self, elapsed_s: f64) -> crate::GeneratorReport {
        self.generator.tick(
            elapsed_s,
            0.0,
            &mut self.network,
            &mut self.pathfinder,
            &mut self.rng,
            &mut self.economy,
        )
    }
}

// ── Station activation ────────────────────────────────────────────────────────

#[cfg(test)]
mod activation {
    use super::*;

    #[test]
    fn opening_burst_activates_start_number() {
        let mut fx = Fixture::new(network(6, &[]), flat_settings());
        let report = fx.tick(0.0);
        assert_eq!(report.activated, ids(&[0, 1, 2]));
        assert_eq!(fx.network.spawned_ids(), ids(&[0, 1, 2]));
        assert_eq!(fx.generator.next_station_spawn, 600.0);
    }

    #[test]
    fn activated_station_gets_settings() {
        let settings = Settings { waiting_passengers_max: 42, passenger_arrival_rate: 2.0, ..flat_settings() };
        let mut fx = Fixture::new(network(3, &[]), settings);
        fx.tick(0.0);
        let s = &fx.network.stations[0];
        assert!(s.spawned);
        assert_eq!(s.waiting_max, 42);
        assert_eq!(s.arrival_rate, 2.0);
        assert_eq!(s.next_arrival, 60.0);
        assert!(s.waiting.is_empty());
    }

    #[test]
    fn later_stations_wait_for_countdown() {
        let mut fx = Fixture::new(network(6, &[]), flat_settings());
        fx.tick(0.0);

        assert!(fx.tick(599.0).activated.is_empty());
        assert!(fx.tick(1.0).activated.is_empty()); // countdown reaches 0
        assert_eq!(fx.tick(1.0).activated, ids(&[3])); // fires the tick after
        assert_eq!(fx.generator.next_station_spawn, 600.0);
    }

    #[test]
    fn start_number_one_has_no_burst() {
        let settings = Settings { station_start_number: 1, ..flat_settings() };
        let mut fx = Fixture::new(network(4, &[]), settings);
        assert_eq!(fx.tick(0.0).activated, ids(&[0]));
    }

    #[test]
    fn no_dormant_stations_left() {
        let mut fx = Fixture::new(network(2, &[]), flat_settings());
        assert_eq!(fx.tick(0.0).activated, ids(&[0, 1]));
        fx.generator.next_station_spawn = 0.0;
        assert!(fx.tick(0.0).activated.is_empty());
        assert_eq!(fx.generator.next_station_spawn, 600.0);
    }

    #[test]
    fn resumed_countdown_is_respected() {
        let mut r#gen = PassengerGenerator::with_countdown(flat_settings(), 10.0);
        let mut net = network(3, &[]);
        let report = r#gen.tick(
            5.0,
            0.0,
            &mut net,
            &mut Pathfinder::default(),
            &mut SimRng::new(1),
            &mut Economy::default(),
        );
        assert!(report.activated.is_empty());
        assert_eq!(r#gen.next_station_spawn, 5.0);
    }
}

// ── Passenger arrival ─────────────────────────────────────────────────────────

#[cfg(test)]
mod arrivals {
    use super::*;

    fn eager_settings() -> Settings {
        Settings { passenger_arrival_interval: 0.0, ..flat_settings() }
    }

    #[test]
    fn passengers_get_routed_itineraries() {
        let settings = Settings { station_start_number: 2, ..flat_settings() };
        let mut fx = Fixture::new(network(2, &[(0, 1)]), settings);
        fx.tick(0.0);
        assert_eq!(fx.tick(60.0).created, 0); // 60 -> 0
        let report = fx.tick(1.0);
        assert_eq!(report.created, 2);
        assert_eq!(fx.economy.stats.passengers_created, 2);

        let p = &fx.network.stations[0].waiting[0];
        assert_eq!(p.destination, StationId(1));
        assert_eq!(p.itinerary, ids(&[0, 1]));
        assert!(p.waiting);
        assert_eq!(fx.network.stations[1].waiting[0].itinerary, ids(&[1, 0]));
    }

    #[test]
    fn passenger_ids_are_sequential() {
        let settings = Settings { station_start_number: 2, ..eager_settings() };
        let mut fx = Fixture::new(network(2, &[(0, 1)]), settings);
        fx.tick(0.0);
        fx.tick(0.0);
        let mut seen: Vec<u64> = fx
            .network
            .stations
            .iter()
            .flat_map(|s| s.waiting.iter().map(|p| p.id.0))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(fx.network.stations[0].waiting[0].name, "Passenger 1");
    }

    #[test]
    fn lone_station_keeps_countdown_expired() {
        let settings = Settings { station_start_number: 1, ..flat_settings() };
        let mut fx = Fixture::new(network(2, &[(0, 1)]), settings);
        fx.tick(0.0);
        fx.network.stations[0].next_arrival = 0.0;

        assert_eq!(fx.tick(1.0).created, 0);
        assert_eq!(fx.network.stations[0].next_arrival, 0.0);
        assert_eq!(fx.economy.stats.passengers_created, 0);
    }

    #[test]
    fn destination_is_never_origin() {
        let settings = Settings { station_start_number: 4, ..eager_settings() };
        let mut fx = Fixture::new(network(4, &[(0, 1), (1, 2), (2, 3)]), settings);
        for _ in 0..50 {
            fx.tick(1.0);
        }
        for s in &fx.network.stations {
            assert!(s.waiting.iter().all(|p| p.destination != s.id && p.origin == s.id));
        }
    }

    #[test]
    fn unlinked_destination_yields_empty_itinerary() {
        let settings = Settings { station_start_number: 2, ..eager_settings() };
        let mut fx = Fixture::new(network(2, &[]), settings);
        fx.tick(0.0);
        let report = fx.tick(0.0);
        assert_eq!(report.created, 2);
        assert_eq!(report.unroutable, 2);
        assert!(fx.network.stations[0].waiting[0].itinerary.is_empty());
    }

    #[test]
    fn arrival_rate_divides_interval() {
        let settings =
            Settings { station_start_number: 2, passenger_arrival_rate: 4.0, ..flat_settings() };
        let mut fx = Fixture::new(network(2, &[(0, 1)]), settings);
        fx.tick(0.0);
        fx.network.stations[0].next_arrival = 0.0;
        fx.tick(0.0);
        assert_eq!(fx.network.stations[0].next_arrival, 15.0);
    }

    #[test]
    fn queue_grows_past_capacity_and_flags_once() {
        let settings = Settings { station_start_number: 2, ..eager_settings() };
        let mut fx = Fixture::new(network(2, &[(0, 1)]), settings);

        let mut flips = Vec::new();
        for _ in 0..150 {
            let report = fx.tick(1.0);
            flips.extend(report.overcrowding.into_iter().filter(|c| c.station == StationId(0)));
        }

        let station = &fx.network.stations[0];
        assert_eq!(station.waiting.len(), 150);
        assert!(station.is_overcrowded());
        assert_eq!(flips.len(), 1);
        assert!(flips[0].overcrowded);
    }

    #[test]
    fn seeded_runs_repeat() {
        let run = || {
            let settings = Settings { station_start_number: 5, ..eager_settings() };
            let mut fx = Fixture::new(network(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]), settings);
            for _ in 0..20 {
                fx.tick(1.0);
            }
            fx.network.stations[2].waiting.iter().map(|p| p.destination).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}

// ── Itinerary refresh ─────────────────────────────────────────────────────────

#[cfg(test)]
mod refresh {
    use super::*;
    use crate::{refresh_itineraries, reroute_stranded};

    /// 0-1-2 with a detour 0-3-4-2.
    fn detour_network() -> Network {
        network(5, &[(0, 1), (1, 2), (0, 3), (3, 4), (4, 2)])
    }

    #[test]
    fn deleted_link_reroutes_waiting_passengers() {
        let mut net = detour_network();
        let mut pf = Pathfinder::default();
        let itinerary = pf.find_path(&net, StationId(0), StationId(2));
        assert_eq!(itinerary, ids(&[0, 1, 2]));
        net.stations[0].waiting.push(waiting_passenger(0, 0, 2, &[0, 1, 2]));

        net.disconnect(StationId(1), StationId(2)).unwrap();
        pf.link_removed(StationId(1), StationId(2));
        let report = refresh_itineraries(&mut net, &mut pf, &ids(&[1, 2]));

        assert_eq!(report.rerouted, 1);
        assert_eq!(net.stations[0].waiting[0].itinerary, ids(&[0, 3, 4, 2]));
    }

    #[test]
    fn unaffected_passengers_are_left_alone() {
        let mut net = detour_network();
        let mut pf = Pathfinder::default();
        net.stations[0].waiting.push(waiting_passenger(0, 0, 1, &[0, 1]));
        let report = refresh_itineraries(&mut net, &mut pf, &ids(&[4]));
        assert_eq!(report.rerouted, 0);
        assert_eq!(net.stations[0].waiting[0].itinerary, ids(&[0, 1]));
    }

    #[test]
    fn empty_itineraries_are_retried() {
        let mut net = network(3, &[(0, 1)]);
        let mut pf = Pathfinder::default();
        net.stations[0].waiting.push(waiting_passenger(0, 0, 2, &[]));

        net.connect(StationId(1), StationId(2)).unwrap();
        pf.link_added(StationId(1), StationId(2));
        refresh_itineraries(&mut net, &mut pf, &ids(&[1, 2]));

        assert_eq!(net.stations[0].waiting[0].itinerary, ids(&[0, 1, 2]));
    }

    #[test]
    fn unreachable_pair_reported_once() {
        let mut net = network(3, &[(0, 1)]);
        let mut pf = Pathfinder::default();
        net.stations[0].waiting.push(waiting_passenger(0, 0, 2, &[]));
        net.stations[0].waiting.push(waiting_passenger(1, 0, 2, &[]));

        let report = refresh_itineraries(&mut net, &mut pf, &[]);
        assert_eq!(report.unreachable, vec![(StationId(0), StationId(2))]);
        assert_eq!(report.rerouted, 1);
        assert!(net.stations[0].waiting.iter().all(|p| p.itinerary.is_empty()));
    }

    #[test]
    fn reroutes_from_where_the_passenger_waits() {
        let mut net = detour_network();
        let mut pf = Pathfinder::default();
        // Created at 0 but now waiting at 3, with a stale itinerary.
        net.stations[3].waiting.push(waiting_passenger(0, 0, 2, &[0, 1, 2]));
        refresh_itineraries(&mut net, &mut pf, &[]);
        assert_eq!(net.stations[3].waiting[0].itinerary, ids(&[3, 4, 2]));
    }

    #[test]
    fn stranded_passengers_only() {
        let mut net = detour_network();
        let mut pf = Pathfinder::default();
        net.stations[1].waiting.push(waiting_passenger(0, 0, 4, &[0, 3, 4]));
        net.stations[1].waiting.push(waiting_passenger(1, 0, 2, &[0, 1, 2]));

        assert_eq!(reroute_stranded(&mut net, &mut pf, StationId(1)), 1);
        let w = &net.stations[1].waiting;
        assert_eq!(w[0].itinerary.first(), Some(&StationId(1)));
        assert_eq!(w[0].itinerary.last(), Some(&StationId(4)));
        assert_eq!(w[1].itinerary, ids(&[0, 1, 2]));
        assert_eq!(reroute_stranded(&mut net, &mut pf, StationId(99)), 0);
    }
}
