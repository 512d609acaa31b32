//! Station activation and passenger arrival.

use log::{debug, info};

use ts_core::{Economy, Passenger, Settings, SimRng, StationId};
use ts_network::{Network, OvercrowdingChange, Pathfinder, Router};

/// What the generator did during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneratorReport {
    /// Stations brought into play, in activation order.
    pub activated:    Vec<StationId>,
    /// Passengers enqueued.
    pub created:      usize,
    /// Created passengers for whom no path existed.
    pub unroutable:   usize,
    /// Stations whose queue crossed the overcrowded threshold.
    pub overcrowding: Vec<OvercrowdingChange>,
}

/// Drives station activation and per-station passenger arrivals.
///
/// Owns the activation countdown; the per-station arrival countdowns live on
/// [`Station::next_arrival`](ts_network::Station::next_arrival).
#[derive(Clone, Debug)]
pub struct PassengerGenerator {
    pub settings: Settings,

    /// Simulated seconds until the next station activates.  A fresh game
    /// starts at 0, so the opening burst fires on the first tick.
    pub next_station_spawn: f64,
}

impl PassengerGenerator {
    pub fn new(settings: Settings) -> Self {
        Self { settings, next_station_spawn: 0.0 }
    }

    /// Resume with a persisted activation countdown.
    pub fn with_countdown(settings: Settings, next_station_spawn: f64) -> Self {
        Self { settings, next_station_spawn }
    }

    /// Advance both countdowns by `elapsed_s` simulated seconds.
    ///
    /// `now` stamps new passengers.  Passenger ids and the created counter
    /// come from `economy`.
    pub fn tick<R: Router>(
        &mut self,
        elapsed_s:  f64,
        now:        f64,
        network:    &mut Network,
        pathfinder: &mut Pathfinder<R>,
        rng:        &mut SimRng,
        economy:    &mut Economy,
    ) -> GeneratorReport {
        let mut report = GeneratorReport::default();
        self.activate_stations(elapsed_s, network, rng, &mut report);
        self.spawn_passengers(elapsed_s, now, network, pathfinder, rng, economy, &mut report);
        report
    }

    // ── Station activation ────────────────────────────────────────────────

    fn activate_stations(
        &mut self,
        elapsed_s: f64,
        network:   &mut Network,
        rng:       &mut SimRng,
        report:    &mut GeneratorReport,
    ) {
        if self.next_station_spawn > 0.0 {
            self.next_station_spawn -= elapsed_s;
            return;
        }

        let s = &self.settings;
        loop {
            self.next_station_spawn = s.station_spawn_time + rng.jitter(s.station_spawn_time_variation);

            // Dormant stations wake in definition order.
            let Some(i) = network.stations.iter().position(|st| !st.spawned) else {
                return;
            };
            let next_arrival =
                s.passenger_arrival_interval + rng.jitter(s.passenger_arrival_interval_variation);
            let station = &mut network.stations[i];
            station.activate(s.waiting_passengers_max, s.passenger_arrival_rate, next_arrival);
            report.activated.push(station.id);
            info!("station {} ({}) activated", station.id, station.name);

            // The first `station_start_number` stations come in as one burst.
            if i + 1 >= s.station_start_number {
                return;
            }
            self.next_station_spawn = 0.0;
        }
    }

    // ── Passenger arrival ─────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn spawn_passengers<R: Router>(
        &self,
        elapsed_s:  f64,
        now:        f64,
        network:    &mut Network,
        pathfinder: &mut Pathfinder<R>,
        rng:        &mut SimRng,
        economy:    &mut Economy,
        report:     &mut GeneratorReport,
    ) {
        let s = &self.settings;
        let spawned = network.spawned_ids();

        for &origin in &spawned {
            let station = &mut network.stations[origin.index()];
            if station.next_arrival > 0.0 {
                station.next_arrival -= elapsed_s;
                continue;
            }

            let others: Vec<StationId> = spawned.iter().copied().filter(|&d| d != origin).collect();
            // Countdown stays expired so the station retries next tick.
            let Some(&destination) = rng.choose(&others) else {
                continue;
            };
            station.next_arrival = (s.passenger_arrival_interval
                + rng.jitter(s.passenger_arrival_interval_variation))
                / station.arrival_rate;

            let itinerary = pathfinder.find_path(network, origin, destination);
            if itinerary.is_empty() {
                report.unroutable += 1;
                debug!("no path {origin} -> {destination}; passenger waits unrouted");
            }

            let id = economy.next_passenger_id();
            let station = &mut network.stations[origin.index()];
            let prev_len = station.waiting.len();
            station.waiting.push(Passenger::new(id, origin, destination, itinerary, now));
            report.created += 1;
            if let Some(change) = station.overcrowding_change(prev_len) {
                report.overcrowding.push(change);
            }
        }
    }
}
