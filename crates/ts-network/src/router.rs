//! Routing trait and the fewest-hops implementations.
//!
//! # Pluggability
//!
//! The [`Pathfinder`][crate::Pathfinder] calls routing via the [`Router`]
//! trait.  Two implementations ship:
//!
//! - [`HopRouter`]: breadth-first search, O(V + E) per query.  The default.
//! - [`DepthFirstRouter`]: exhaustive depth-first search with a per-branch
//!   visited set.  Exponential on dense cyclic graphs; kept for small maps
//!   and as a cross-check in tests.
//!
//! # Cost model
//!
//! Every link costs one hop.  Among equally short paths the winner depends on
//! neighbour iteration order, which is link-insertion order unless
//! [`TieBreak::LowestId`] is selected.

use std::collections::VecDeque;

use ts_core::StationId;

use crate::{Network, NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A routing result: station ids from source to destination inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub stations: Vec<StationId>,
}

impl Route {
    /// Number of links traversed.
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path search.
pub trait Router: Send + Sync {
    /// Compute a fewest-hops route from `from` to `to`.
    ///
    /// `from == to` yields a single-station route.  Unknown stations and
    /// disconnected pairs are errors.
    fn route(&self, network: &Network, from: StationId, to: StationId) -> NetworkResult<Route>;
}

/// How equally short candidates are ranked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First found in link-insertion order.
    #[default]
    InsertionOrder,
    /// Neighbours are explored in ascending id order.
    LowestId,
}

fn ordered_neighbors(network: &Network, id: StationId, tie_break: TieBreak) -> Vec<StationId> {
    let mut n = network.neighbors(id).to_vec();
    if tie_break == TieBreak::LowestId {
        n.sort_unstable();
    }
    n
}

fn check_endpoints(network: &Network, from: StationId, to: StationId) -> NetworkResult<()> {
    if !network.contains(from) {
        return Err(NetworkError::StationNotFound(from));
    }
    if !network.contains(to) {
        return Err(NetworkError::StationNotFound(to));
    }
    Ok(())
}

// ── HopRouter ─────────────────────────────────────────────────────────────────

/// Breadth-first fewest-hops search.
#[derive(Copy, Clone, Debug, Default)]
pub struct HopRouter {
    pub tie_break: TieBreak,
}

impl HopRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Break ties by lowest station id for fully deterministic routes.
    pub fn lowest_id() -> Self {
        Self { tie_break: TieBreak::LowestId }
    }
}

impl Router for HopRouter {
    fn route(&self, network: &Network, from: StationId, to: StationId) -> NetworkResult<Route> {
        check_endpoints(network, from, to)?;
        if from == to {
            return Ok(Route { stations: vec![from] });
        }

        let n = network.station_count();
        // prev[v] = station that discovered v; INVALID for undiscovered.
        let mut prev = vec![StationId::INVALID; n];
        let mut seen = vec![false; n];
        seen[from.index()] = true;

        let mut queue = VecDeque::from([from]);
        while let Some(cur) = queue.pop_front() {
            for next in ordered_neighbors(network, cur, self.tie_break) {
                // Dangling neighbour ids are skipped rather than trusted.
                if !network.contains(next) || seen[next.index()] {
                    continue;
                }
                seen[next.index()] = true;
                prev[next.index()] = cur;
                if next == to {
                    return Ok(Route { stations: reconstruct(&prev, from, to) });
                }
                queue.push_back(next);
            }
        }

        Err(NetworkError::NoRoute { from, to })
    }
}

fn reconstruct(prev: &[StationId], from: StationId, to: StationId) -> Vec<StationId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}

// ── DepthFirstRouter ──────────────────────────────────────────────────────────

/// Exhaustive depth-first search.
///
/// From each station, every unvisited neighbour is explored recursively and
/// the shortest continuation kept.  A neighbour equal to the destination is
/// a one-hop continuation, which nothing can beat, so the remaining siblings
/// are skipped.
#[derive(Copy, Clone, Debug, Default)]
pub struct DepthFirstRouter {
    pub tie_break: TieBreak,
}

impl Router for DepthFirstRouter {
    fn route(&self, network: &Network, from: StationId, to: StationId) -> NetworkResult<Route> {
        check_endpoints(network, from, to)?;
        if from == to {
            return Ok(Route { stations: vec![from] });
        }

        let mut visited = vec![false; network.station_count()];
        match self.search(network, from, to, &mut visited) {
            Some(stations) => Ok(Route { stations }),
            None => Err(NetworkError::NoRoute { from, to }),
        }
    }
}

impl DepthFirstRouter {
    /// Shortest path `from → to` avoiding `visited`, inclusive of both ends.
    fn search(
        &self,
        network: &Network,
        from:    StationId,
        to:      StationId,
        visited: &mut [bool],
    ) -> Option<Vec<StationId>> {
        visited[from.index()] = true;

        let mut best: Option<Vec<StationId>> = None;
        for next in ordered_neighbors(network, from, self.tie_break) {
            if !network.contains(next) || visited[next.index()] {
                continue;
            }
            if next == to {
                best = Some(vec![to]);
                break;
            }
            if let Some(tail) = self.search(network, next, to, visited) {
                if best.as_ref().is_none_or(|b| tail.len() < b.len()) {
                    best = Some(tail);
                }
            }
        }

        // Visited is per-branch: other branches may still route through here.
        visited[from.index()] = false;

        best.map(|tail| {
            let mut path = Vec::with_capacity(tail.len() + 1);
            path.push(from);
            path.extend(tail);
            path
        })
    }
}
