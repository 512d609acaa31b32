//! `ts-network`: the graph store and the pathfinder.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`station`]    | `Station`, `OvercrowdingChange`                              |
//! | [`link`]       | `Link`: one directed record of a track connection           |
//! | [`network`]    | `Network` (adjacency + R-tree), `NetworkBuilder`             |
//! | [`router`]     | `Router` trait, `Route`, `HopRouter`, `DepthFirstRouter`     |
//! | [`paths`]      | `PathCache`: sparse (from, to) → path memo table            |
//! | [`pathfinder`] | `Pathfinder<R>`: router + cache, the engine's path service  |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Symmetry
//!
//! Every undirected connection is stored twice: a `Link` record in each
//! endpoint's adjacency list and each endpoint in the other's `linked_to`.
//! [`Network::connect`] and [`Network::disconnect`] are the only mutators and
//! always touch both sides.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod link;
pub mod network;
pub mod pathfinder;
pub mod paths;
pub mod router;
pub mod station;


pub use error::{NetworkError, NetworkResult};
pub use link::Link;
pub use network::{Network, NetworkBuilder};
pub use pathfinder::Pathfinder;
pub use paths::PathCache;
pub use router::{DepthFirstRouter, HopRouter, Route, Router, TieBreak};
pub use station::{OvercrowdingChange, Station};
