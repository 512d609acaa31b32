//! `ts-core`: foundational types for the transit network simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `StationId`, `LineId`, `VehicleId`, `VehicleTypeId`, `PassengerId` |
//! | [`geo`]         | `GeoPoint`, `Position`, `MapProjection`                    |
//! | [`time`]        | `SimClock` (simulated seconds + speed multiplier)          |
//! | [`rng`]         | `SimRng` (single shared, seedable)                         |
//! | [`config`]      | `SimConfig`, `Settings`, `Prices`, `CapacityPolicy`        |
//! | [`economy`]     | `Economy` ledger and cumulative `Stats`                    |
//! | [`passenger`]   | `Passenger` and itinerary helpers                          |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `ts-store`.                                    |

pub mod config;
pub mod economy;
pub mod error;
pub mod geo;
pub mod ids;
pub mod passenger;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CapacityPolicy, LinkPrices, Prices, Settings, SimConfig, VehiclePrices};
pub use economy::{Economy, Stats};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, MapProjection, Position, METRES_PER_UNIT};
pub use ids::{LineId, PassengerId, StationId, VehicleId, VehicleTypeId};
pub use passenger::Passenger;
pub use rng::SimRng;
pub use time::SimClock;
