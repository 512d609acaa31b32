//! `ts-demand`: where passengers come from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`generator`] | `PassengerGenerator`, `GeneratorReport`                     |
//! | [`itinerary`] | `refresh_itineraries`, `reroute_stranded`, `RefreshReport`  |
//!
//! # Countdown model
//!
//! Both station activation and passenger arrival are countdowns in simulated
//! seconds.  Each tick a countdown that is already `<= 0` fires and is reset;
//! otherwise it is decremented by the tick's elapsed seconds:
//!
//! ```text
//! if countdown <= 0 { fire(); countdown = base + jitter }
//! else              { countdown -= elapsed }
//! ```
//!
//! A countdown therefore fires on the tick *after* it crosses zero.

pub mod generator;
pub mod itinerary;

#[cfg(test)]
mod tests;

pub use generator::{GeneratorReport, PassengerGenerator};
pub use itinerary::{refresh_itineraries, reroute_stranded, RefreshReport};
