//! Itinerary maintenance after the network or a line changes.
//!
//! Passengers keep the itinerary they were given at creation until an edit
//! touches it.  A refresh re-routes from the station the passenger is
//! waiting at, not from its original origin, so a passenger who already
//! made part of the trip keeps its progress.

use log::warn;
use rustc_hash::FxHashSet;

use ts_core::{Passenger, StationId};
use ts_network::{Network, Pathfinder, Router};

/// Outcome of [`refresh_itineraries`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefreshReport {
    /// Passengers given a new itinerary (possibly empty).
    pub rerouted:    usize,
    /// `(from, to)` pairs with no path, each reported once.
    pub unreachable: Vec<(StationId, StationId)>,
}

fn needs_refresh(p: &Passenger, here: StationId, affected: &[StationId]) -> bool {
    p.itinerary.is_empty() || p.passes_through(affected) || !p.itinerary.contains(&here)
}

/// Re-route every waiting passenger whose itinerary is empty, passes
/// through one of `affected`, or no longer contains the station it waits at.
///
/// Cached paths through `affected` are dropped first.  Once a pair is found
/// unreachable it is not searched again during this refresh; later
/// passengers on that pair get an empty itinerary directly.
pub fn refresh_itineraries<R: Router>(
    network:    &mut Network,
    pathfinder: &mut Pathfinder<R>,
    affected:   &[StationId],
) -> RefreshReport {
    pathfinder.invalidate(affected);

    let mut report = RefreshReport::default();
    let mut dead: FxHashSet<(StationId, StationId)> = FxHashSet::default();

    for idx in 0..network.stations.len() {
        let here = network.stations[idx].id;
        let mut waiting = std::mem::take(&mut network.stations[idx].waiting);

        for p in waiting.iter_mut().filter(|p| needs_refresh(p, here, affected)) {
            if dead.contains(&(here, p.destination)) {
                p.itinerary.clear();
                continue;
            }
            p.itinerary = pathfinder.find_path(network, here, p.destination);
            report.rerouted += 1;
            if p.itinerary.is_empty() {
                warn!(
                    "no path for {}: {} -> {}",
                    p.name,
                    network.stations[here.index()].name,
                    network.station(p.destination).map_or("?", |s| s.name.as_str()),
                );
                dead.insert((here, p.destination));
                dead.insert((p.destination, here));
                report.unreachable.push((here, p.destination));
            }
        }

        network.stations[idx].waiting = waiting;
    }
    report
}

/// Re-route the passengers waiting at `station` whose itinerary does not
/// pass through it, typically after being dropped off mid-journey.
///
/// Returns the number of passengers re-routed.
pub fn reroute_stranded<R: Router>(
    network:    &mut Network,
    pathfinder: &mut Pathfinder<R>,
    station:    StationId,
) -> usize {
    let Some(st) = network.station_mut(station) else {
        return 0;
    };
    let mut waiting = std::mem::take(&mut st.waiting);

    let mut count = 0;
    for p in waiting.iter_mut().filter(|p| !p.itinerary.contains(&station)) {
        p.itinerary = pathfinder.find_path(network, station, p.destination);
        count += 1;
    }

    network.stations[station.index()].waiting = waiting;
    count
}
