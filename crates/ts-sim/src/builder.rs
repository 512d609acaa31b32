//! Fluent builder for constructing a [`World`].

use log::info;

use ts_core::{CoreError, Economy, SimClock, SimConfig, SimRng};
use ts_demand::PassengerGenerator;
use ts_fleet::Fleet;
use ts_network::{HopRouter, Network, Pathfinder, Router};

use crate::{SimResult, World};

/// Fluent builder for [`World<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                              |
/// |------------------------------|--------------------------------------|
/// | `.network(n)`                | `Network::empty()`                   |
/// | `.fleet(f)`                  | no lines, no vehicle types           |
/// | `.router(r)`                 | `HopRouter::new()` (insertion order) |
/// | `.economy(e)`                | `config.starting_money`, zero stats  |
/// | `.clock(c)`                  | `config.make_clock()`                |
/// | `.station_spawn_countdown(s)`| 0 (opening burst on the first tick)  |
/// | `.rng(r)`                    | seeded from `config.seed`            |
///
/// The last four exist to resume a persisted game.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config)
///     .network(network)
///     .router(HopRouter::lowest_id())
///     .build()?;
/// let line = world.add_line("RER A", "#da291c", stations, Schedule::default())?;
/// ```
pub struct WorldBuilder<R: Router = HopRouter> {
    config:    SimConfig,
    router:    R,
    network:   Option<Network>,
    fleet:     Option<Fleet>,
    economy:   Option<Economy>,
    clock:     Option<SimClock>,
    countdown: Option<f64>,
    rng:       Option<SimRng>,
}

impl WorldBuilder<HopRouter> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            router:    HopRouter::new(),
            network:   None,
            fleet:     None,
            economy:   None,
            clock:     None,
            countdown: None,
            rng:       None,
        }
    }
}

impl<R: Router> WorldBuilder<R> {
    /// Swap the routing algorithm.
    pub fn router<R2: Router>(self, router: R2) -> WorldBuilder<R2> {
        WorldBuilder {
            config:    self.config,
            router,
            network:   self.network,
            fleet:     self.fleet,
            economy:   self.economy,
            clock:     self.clock,
            countdown: self.countdown,
            rng:       self.rng,
        }
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Supply existing lines, schedules, vehicle types and vehicles.
    ///
    /// Every line's stations must exist in the network.
    pub fn fleet(mut self, fleet: Fleet) -> Self {
        self.fleet = Some(fleet);
        self
    }

    pub fn economy(mut self, economy: Economy) -> Self {
        self.economy = Some(economy);
        self
    }

    pub fn clock(mut self, clock: SimClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Seconds until the next station activation.
    pub fn station_spawn_countdown(mut self, secs: f64) -> Self {
        self.countdown = Some(secs);
        self
    }

    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate inputs and return a ready-to-run [`World`].
    pub fn build(self) -> SimResult<World<R>> {
        validate_config(&self.config)?;

        let mut network = self.network.unwrap_or_else(Network::empty);
        let fleet = self.fleet.unwrap_or_default();

        // ── Cross-check fleet against network ─────────────────────────────
        for line in &fleet.lines {
            if let Some(&s) = line.station_ids.iter().find(|&&s| !network.contains(s)) {
                return Err(CoreError::StationNotFound(s).into());
            }
        }
        for v in fleet.iter_vehicles() {
            if fleet.line(v.line).is_none() {
                return Err(CoreError::LineNotFound(v.line).into());
            }
        }
        for line in &fleet.lines {
            for &s in &line.station_ids {
                if let Some(st) = network.station_mut(s) {
                    st.add_line(line.id);
                }
            }
        }

        let generator = PassengerGenerator::with_countdown(
            self.config.settings.clone(),
            self.countdown.unwrap_or(0.0),
        );
        let world = World {
            clock:      self.clock.unwrap_or_else(|| self.config.make_clock()),
            ticks:      0,
            economy:    self.economy.unwrap_or_else(|| Economy::new(self.config.starting_money)),
            pathfinder: Pathfinder::new(self.router),
            rng:        self.rng.unwrap_or_else(|| SimRng::from_seed_option(self.config.seed)),
            config:     self.config,
            network,
            generator,
            fleet,
        };
        info!(
            "world ready at {}: {} stations, {} lines, {} vehicles, money {:.0}",
            world.clock,
            world.network.station_count(),
            world.fleet.lines.len(),
            world.fleet.vehicle_count(),
            world.economy.money,
        );
        Ok(world)
    }
}

/// Reject settings the tick cannot run with.
///
/// Timings must be finite and non-negative; the arrival rate must be
/// finite and positive.
pub fn validate_config(config: &SimConfig) -> SimResult<()> {
    let s = &config.settings;
    let non_negative = |x: f64| x.is_finite() && x >= 0.0;
    let checks = [
        (non_negative(config.multiplier), "multiplier must be finite and non-negative"),
        (non_negative(s.station_spawn_time), "station spawn time must be finite and non-negative"),
        (
            non_negative(s.station_spawn_time_variation),
            "station spawn variation must be finite and non-negative",
        ),
        (
            non_negative(s.passenger_arrival_interval),
            "arrival interval must be finite and non-negative",
        ),
        (
            non_negative(s.passenger_arrival_interval_variation),
            "arrival variation must be finite and non-negative",
        ),
        (
            s.passenger_arrival_rate.is_finite() && s.passenger_arrival_rate > 0.0,
            "arrival rate must be finite and positive",
        ),
    ];
    match checks.iter().find(|(ok, _)| !ok) {
        Some((_, msg)) => Err(CoreError::Config((*msg).to_string()).into()),
        None => Ok(()),
    }
}
