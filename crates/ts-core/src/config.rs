//! Top-level simulation configuration.
//!
//! Typically loaded from a JSON file by `ts-store::load_config` and passed to
//! the world builder.  Every field has a default matching a fresh game, and
//! with the `serde` feature absent fields in a config file fall back to it.

use crate::time::DEFAULT_START_SECS;

// ── Settings ──────────────────────────────────────────────────────────────────

/// Passenger-generation and station-activation tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Settings {
    /// Stations activated back-to-back, with no spawn delay, at game start.
    pub station_start_number: usize,
    /// Base delay between two station activations, in simulated seconds.
    pub station_spawn_time: f64,
    /// Upper bound of the uniform jitter added to `station_spawn_time`.
    pub station_spawn_time_variation: f64,
    /// Base delay between two passenger arrivals at one station.
    pub passenger_arrival_interval: f64,
    /// Upper bound of the uniform jitter added to `passenger_arrival_interval`.
    pub passenger_arrival_interval_variation: f64,
    /// Nominal waiting capacity given to a station when it activates.
    pub waiting_passengers_max: usize,
    /// Arrival-rate divisor given to a station when it activates.
    pub passenger_arrival_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            station_start_number:                 3,
            station_spawn_time:                   600.0,
            station_spawn_time_variation:         120.0,
            passenger_arrival_interval:           60.0,
            passenger_arrival_interval_variation: 30.0,
            waiting_passengers_max:               100,
            passenger_arrival_rate:               1.0,
        }
    }
}

// ── Prices ────────────────────────────────────────────────────────────────────

/// Purchase price and hourly maintenance of one directed link record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkPrices {
    pub buy:      f64,
    pub maintain: f64,
}

/// Purchase price and hourly maintenance of one vehicle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehiclePrices {
    pub buy:      f64,
    pub maintain: f64,
}

/// The price schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Prices {
    pub link:   LinkPrices,
    #[cfg_attr(feature = "serde", serde(rename = "train"))]
    pub vehicle: VehiclePrices,
    /// Revenue credited per boarding.
    pub ticket: f64,
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            link:    LinkPrices { buy: 100.0, maintain: 10.0 },
            vehicle: VehiclePrices { buy: 1_000.0, maintain: 100.0 },
            ticket:  2.0,
        }
    }
}

// ── CapacityPolicy ────────────────────────────────────────────────────────────

/// Whether vehicle capacity limits boarding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CapacityPolicy {
    /// Capacity only drives the overcrowded indicator; everyone who can
    /// board does.
    #[default]
    Advisory,
    /// Boarding stops once the manifest reaches capacity.
    Enforced,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Everything needed to start a new world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SimConfig {
    /// RNG seed.  `None` seeds from OS entropy (non-reproducible).
    pub seed: Option<u64>,
    /// Clock value at game start, in simulated seconds.
    pub start_secs: f64,
    /// Initial speed multiplier.
    pub multiplier: f64,
    /// Opening money balance.
    pub starting_money: f64,
    pub settings: Settings,
    pub prices: Prices,
    pub capacity_policy: CapacityPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:            None,
            start_secs:      DEFAULT_START_SECS,
            multiplier:      1.0,
            starting_money:  2_000.0,
            settings:        Settings::default(),
            prices:          Prices::default(),
            capacity_policy: CapacityPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.start_secs, self.multiplier)
    }
}
