//! `ts-sim`: the world controller for the transit network simulator.
//!
//! # Tick
//!
//! ```text
//! advance(elapsed_ms):
//!   ① Clock       : elapsed_s = elapsed_ms / 1000 · multiplier
//!   ② Maintenance : debit (link records · link.maintain
//!                         + vehicles · vehicle.maintain) / 3600 · elapsed_s
//!   ③ Demand      : station activation, passenger arrivals (ts-demand)
//!   ④ Vehicles    : departure / motion / arrival / dwell (ts-fleet)
//!   ⑤ Settlement  : ticket revenue, served counter, re-route dropped-off
//!                   passengers
//! ```
//!
//! Everything the tick changed comes back in a [`TickReport`]; there are no
//! subscriptions.
//!
//! # Mutations
//!
//! Purchases (`create_link`, `add_vehicle`, and any line edit that needs new
//! links) are all-or-nothing: an unaffordable purchase returns
//! [`SimError::InsufficientFunds`] and changes nothing.  Every edit of the
//! graph or of a line's sequence refreshes the itineraries of the waiting
//! passengers it touches.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::SimConfig;
//! use ts_fleet::{Schedule, VehicleInfo};
//! use ts_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(SimConfig::default()).network(network).build()?;
//! let line = world.add_line("A", "#da291c", stations, Schedule::default())?;
//! let mi09 = world.add_vehicle_type(VehicleInfo::new("Mi09", 140.0, 1300));
//! world.add_vehicle(mi09, line)?;
//! world.run_ticks(60 * 60, 1_000.0, 60, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod world;


pub use builder::{validate_config, WorldBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::TickReport;
pub use world::World;
