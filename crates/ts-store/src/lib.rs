//! `ts-store`: persistence for the transit network simulator.
//!
//! A world is stored as one JSON blob per logical collection in any
//! [`KeyValueStore`]:
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`kv`]       | `KeyValueStore` trait, `MemoryStore`, `FileStore`         |
//! | [`game`]     | `GameData`: clock, money, prices, settings, stats         |
//! | [`saved`]    | `SavedWorld`, `save_world`, `save_dynamic`, `load_world`  |
//! | [`config`]   | `load_config` for `SimConfig` JSON files                  |
//! | [`error`]    | `StoreError`, `StoreResult`                               |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut store = FileStore::open("./save")?;
//! save_world(&mut store, &world)?;
//!
//! // Later: keys that are missing fall back to the base network.
//! let base = SavedWorld { stations: paris_stations(), ..SavedWorld::default() };
//! let world = load_world(&store, config, base)?;
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod kv;
pub mod saved;


pub use config::{load_config, parse_config};
pub use error::{StoreError, StoreResult};
pub use game::{GameData, MoneyData, TimeData};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use saved::{keys, load_world, load_world_with, save_dynamic, save_world, SavedWorld};
