//! The engine's path service: a [`Router`] behind a [`PathCache`].

use log::debug;

use ts_core::StationId;

use crate::{HopRouter, Network, PathCache, Router};

/// Router plus memo table.
///
/// Cache coherence is the caller's side of the contract: report every graph
/// edit through [`link_added`](Self::link_added) /
/// [`link_removed`](Self::link_removed) before the next query.
pub struct Pathfinder<R: Router = HopRouter> {
    pub router: R,
    pub cache:  PathCache,
}

impl<R: Router> Pathfinder<R> {
    pub fn new(router: R) -> Self {
        Self { router, cache: PathCache::new() }
    }

    /// Shortest station sequence from `from` to `to`, inclusive.
    ///
    /// Returns an empty sequence when either station is unknown or no path
    /// exists.
    pub fn find_path(&mut self, network: &Network, from: StationId, to: StationId) -> Vec<StationId> {
        if !network.contains(from) || !network.contains(to) {
            return Vec::new();
        }
        if let Some(path) = self.cache.get(from, to) {
            return path.to_vec();
        }
        match self.router.route(network, from, to) {
            Ok(route) => {
                self.cache.insert(&route.stations);
                route.stations
            }
            Err(e) => {
                debug!("{e}");
                Vec::new()
            }
        }
    }

    /// A new edge can shorten any path, so every entry is dropped.
    pub fn link_added(&mut self, _a: StationId, _b: StationId) {
        self.cache.clear();
    }

    /// Drop entries that traverse the removed edge.
    pub fn link_removed(&mut self, a: StationId, b: StationId) {
        self.cache.invalidate_link(a, b);
    }

    /// Drop entries passing through any of `stations`.
    pub fn invalidate(&mut self, stations: &[StationId]) {
        self.cache.invalidate_stations(stations);
    }
}

impl Default for Pathfinder<HopRouter> {
    fn default() -> Self {
        Self::new(HopRouter::default())
    }
}
