//! `ts-fleet`: lines, vehicles, and the vehicle state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`line`]      | `Line`, `Schedule`                                            |
//! | [`vehicle`]   | `VehicleInfo`, `VehicleType`, `Location`, `Vehicle`, `VehicleState` |
//! | [`boarding`]  | `disembark`, `board`: passenger transfer rules               |
//! | [`scheduler`] | `TickContext`, `VehicleUpdate`, `advance_vehicle`             |
//! | [`fleet`]     | `Fleet`: every line, schedule, type and vehicle; `FleetReport` |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                                |
//!
//! # Vehicle state machine
//!
//! ```text
//!            departure gate               percent > 100
//!   Idle ───────────────────▶ EnRoute ───────────────────▶ Dwelling
//!    ▲                          ▲                              │
//!    │ stall                    └──── dwell timer elapsed ─────┘
//!    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The line-level departure interval gates only the first departure from
//! the origin; after that each vehicle shuttles end to end, gated by its
//! own dwell timer.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod boarding;
pub mod error;
pub mod fleet;
pub mod line;
pub mod scheduler;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use boarding::{board, disembark, Disembarked};
pub use error::{FleetError, FleetResult};
pub use fleet::{Fleet, FleetReport};
pub use line::{Line, Schedule};
pub use scheduler::{advance_vehicle, StallReason, TickContext, VehicleUpdate};
pub use vehicle::{Location, Vehicle, VehicleInfo, VehicleState, VehicleType};
