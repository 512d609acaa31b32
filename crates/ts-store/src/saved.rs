//! Whole-world save and restore over a [`KeyValueStore`].
//!
//! # Layout
//!
//! | Key              | Value                                   |
//! |------------------|-----------------------------------------|
//! | `stations`       | `[Station]` with their waiting queues   |
//! | `links`          | `[[Link]]`, outgoing records per station |
//! | `lines`          | `[Line]`                                |
//! | `trains`         | `[[Vehicle]]`, vehicles per line        |
//! | `trainTypes`     | `[VehicleType]`                         |
//! | `trainSchedules` | `[Schedule]`, one per line              |
//! | `gamedata`       | [`GameData`]                            |
//!
//! Each key is restored on its own.  A key that is absent, `null`, or fails
//! to parse falls back to the caller's base collection; only a store that
//! cannot be read at all is an error.  The path cache is never stored.

use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use ts_core::SimConfig;
use ts_fleet::{Fleet, Line, Schedule, Vehicle, VehicleType};
use ts_network::{HopRouter, Link, Network, Router, Station};
use ts_sim::{validate_config, World, WorldBuilder};

use crate::{GameData, KeyValueStore, StoreError, StoreResult};

/// Storage keys.
pub mod keys {
    pub const STATIONS:        &str = "stations";
    pub const LINKS:           &str = "links";
    pub const LINES:           &str = "lines";
    pub const TRAINS:          &str = "trains";
    pub const TRAIN_TYPES:     &str = "trainTypes";
    pub const TRAIN_SCHEDULES: &str = "trainSchedules";
    pub const GAMEDATA:        &str = "gamedata";

    /// Keys rewritten by [`save_dynamic`](crate::save_dynamic).
    pub const DYNAMIC: [&str; 4] = [LINES, TRAINS, TRAIN_SCHEDULES, GAMEDATA];
}

// ── SavedWorld ────────────────────────────────────────────────────────────────

/// Every persisted collection, detached from a live world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavedWorld {
    pub stations:      Vec<Station>,
    pub links:         Vec<Vec<Link>>,
    pub lines:         Vec<Line>,
    pub vehicles:      Vec<Vec<Vehicle>>,
    pub vehicle_types: Vec<VehicleType>,
    pub schedules:     Vec<Schedule>,
    /// `None` starts a fresh game from the config.
    pub game:          Option<GameData>,
}

impl SavedWorld {
    /// Clone every collection out of `world`.
    pub fn capture<R: Router>(world: &World<R>) -> Self {
        Self {
            stations:      world.network.stations.clone(),
            links:         world.network.links.clone(),
            vehicle_types: world.fleet.vehicle_types.clone(),
            ..Self::capture_dynamic(world)
        }
    }

    /// Clone only what [`write_dynamic`](Self::write_dynamic) stores; the
    /// static collections are left empty.
    pub fn capture_dynamic<R: Router>(world: &World<R>) -> Self {
        Self {
            lines:     world.fleet.lines.clone(),
            vehicles:  world.fleet.vehicles.clone(),
            schedules: world.fleet.schedules.clone(),
            game:      Some(GameData::from_world(world)),
            ..Self::default()
        }
    }

    /// Read every key from `store`, keeping `base`'s collection for any key
    /// that is absent or corrupt.
    pub fn read<S: KeyValueStore + ?Sized>(store: &S, base: SavedWorld) -> StoreResult<Self> {
        Ok(Self {
            stations:      read_key(store, keys::STATIONS, base.stations)?,
            links:         read_key(store, keys::LINKS, base.links)?,
            lines:         read_key(store, keys::LINES, base.lines)?,
            vehicles:      read_key(store, keys::TRAINS, base.vehicles)?,
            vehicle_types: read_key(store, keys::TRAIN_TYPES, base.vehicle_types)?,
            schedules:     read_key(store, keys::TRAIN_SCHEDULES, base.schedules)?,
            game:          read_key(store, keys::GAMEDATA, base.game)?,
        })
    }

    /// Write every key.
    pub fn write<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> StoreResult<()> {
        write_key(store, keys::STATIONS, &self.stations)?;
        write_key(store, keys::LINKS, &self.links)?;
        write_key(store, keys::TRAIN_TYPES, &self.vehicle_types)?;
        self.write_dynamic(store)
    }

    /// Write only the keys that change during play.
    pub fn write_dynamic<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> StoreResult<()> {
        write_key(store, keys::LINES, &self.lines)?;
        write_key(store, keys::TRAINS, &self.vehicles)?;
        write_key(store, keys::TRAIN_SCHEDULES, &self.schedules)?;
        match &self.game {
            Some(game) => write_key(store, keys::GAMEDATA, game),
            None => store.remove(keys::GAMEDATA),
        }
    }

    /// Rebuild a live world.
    ///
    /// With saved game data, its prices, settings and capacity policy
    /// override `config`, and clock, money, stats and the activation
    /// countdown resume where they were.
    ///
    /// Collections restored from different sources may disagree.  Lines
    /// lose the stations the network does not have, and the passenger
    /// counters are reconciled with the passengers actually present; both
    /// are logged.  Saved settings that would not validate are ignored in
    /// favour of `config`'s.
    pub fn into_world<R: Router>(self, mut config: SimConfig, router: R) -> StoreResult<World<R>> {
        if let Some(game) = &self.game {
            let mut restored = config.clone();
            restored.prices = game.prices.clone();
            restored.settings = game.settings.clone();
            restored.capacity_policy = game.capacity_policy;
            match validate_config(&restored) {
                Ok(()) => config = restored,
                Err(e) => warn!("saved settings rejected ({e}); keeping configured ones"),
            }
        }
        let network = Network::from_parts(self.stations, self.links);
        let mut fleet = Fleet::from_parts(self.lines, self.schedules, self.vehicles, self.vehicle_types);
        drop_missing_stations(&mut fleet, &network);

        let mut builder = WorldBuilder::new(config).router(router).network(network).fleet(fleet);
        if let Some(game) = &self.game {
            builder = builder
                .clock(game.clock())
                .economy(game.economy())
                .station_spawn_countdown(game.time.next_station_spawn);
        }
        let mut world = builder.build()?;
        world.reconcile_passenger_stats();
        Ok(world)
    }
}

/// Remove from every line the stations `network` does not have.
///
/// Vehicles on a shortened line go back to idle at its origin and lose
/// their passengers, whose itineraries may run through the missing stations.
fn drop_missing_stations(fleet: &mut Fleet, network: &Network) {
    for (line, vehicles) in fleet.lines.iter_mut().zip(fleet.vehicles.iter_mut()) {
        let before = line.len();
        line.station_ids.retain(|&s| network.contains(s));
        if line.len() == before {
            continue;
        }
        let dropped: usize = vehicles.iter().map(|v| v.passengers.len()).sum();
        warn!(
            "line {} lost {} unknown stations; {} vehicles reset, {dropped} passengers dropped",
            line.id,
            before - line.len(),
            vehicles.len(),
        );
        for v in vehicles.iter_mut() {
            v.reset_to_idle();
            v.passengers.clear();
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Persist every collection of `world`.
pub fn save_world<S: KeyValueStore + ?Sized, R: Router>(store: &mut S, world: &World<R>) -> StoreResult<()> {
    SavedWorld::capture(world).write(store)?;
    info!("world saved at {}", world.clock);
    Ok(())
}

/// Persist lines, vehicles, schedules and game data; stations, links and
/// vehicle types are left as last saved.
///
/// Waiting queues live on the stations, so they are only captured by
/// [`save_world`].
pub fn save_dynamic<S: KeyValueStore + ?Sized, R: Router>(store: &mut S, world: &World<R>) -> StoreResult<()> {
    SavedWorld::capture_dynamic(world).write_dynamic(store)?;
    debug!("dynamic state saved at {}", world.clock);
    Ok(())
}

/// Restore a world from `store` with the default router.
pub fn load_world<S: KeyValueStore + ?Sized>(
    store:  &S,
    config: SimConfig,
    base:   SavedWorld,
) -> StoreResult<World<HopRouter>> {
    load_world_with(store, config, base, HopRouter::new())
}

/// Restore a world from `store` with `router`.
pub fn load_world_with<S: KeyValueStore + ?Sized, R: Router>(
    store:  &S,
    config: SimConfig,
    base:   SavedWorld,
    router: R,
) -> StoreResult<World<R>> {
    let saved = SavedWorld::read(store, base)?;
    let world = saved.into_world(config, router)?;
    info!("world loaded at {}", world.clock);
    Ok(world)
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

fn write_key<S: KeyValueStore + ?Sized, T: Serialize + ?Sized>(
    store: &mut S,
    key:   &str,
    value: &T,
) -> StoreResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|source| StoreError::Json { key: key.to_owned(), source })?;
    store.set(key, json)
}

fn read_key<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store:    &S,
    key:      &str,
    fallback: T,
) -> StoreResult<T> {
    let Some(raw) = store.get(key)? else {
        debug!("`{key}` not stored; using base");
        return Ok(fallback);
    };
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => {
            debug!("`{key}` is null; using base");
            Ok(fallback)
        }
        Err(e) => {
            warn!("stored `{key}` is unreadable ({e}); using base");
            Ok(fallback)
        }
    }
}
