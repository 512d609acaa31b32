//! The graph store and its builder.
//!
//! # Data layout
//!
//! Stations live in a `Vec<Station>` indexed by `StationId`.  Links are an
//! adjacency list: `links[n]` holds the outgoing `Link` records of station
//! `n` in insertion order, mirroring `stations[n].linked_to`.  Unlike a CSR
//! layout the lists are individually growable, because players lay and
//! remove track during play.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps planar `(x, y)` to the nearest `StationId`.
//! Station positions never change after init, so the tree is bulk-loaded
//! once in [`NetworkBuilder::build`] / [`Network::from_parts`].

use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ts_core::{GeoPoint, MapProjection, Position, StationId};

use crate::{Link, NetworkError, NetworkResult, Station};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StationEntry {
    point: [f64; 2], // [x, y]
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

fn build_index(stations: &[Station]) -> RTree<StationEntry> {
    let entries: Vec<StationEntry> = stations
        .iter()
        .map(|s| StationEntry { point: [s.position.x, s.position.y], id: s.id })
        .collect();
    RTree::bulk_load(entries)
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Stations plus bidirectional adjacency.
///
/// Fields are `pub` for read access from the scheduler and renderer.  Mutate
/// adjacency only through [`connect`](Self::connect) and
/// [`disconnect`](Self::disconnect), which keep both directions in step.
pub struct Network {
    /// Indexed by `StationId`.
    pub stations: Vec<Station>,

    /// Outgoing link records per station, indexed by `StationId`.
    pub links: Vec<Vec<Link>>,

    spatial_idx: RTree<StationEntry>,
}

impl Network {
    /// A network with no stations.
    pub fn empty() -> Self {
        Self { stations: Vec::new(), links: Vec::new(), spatial_idx: RTree::new() }
    }

    /// Reassemble a network from persisted stations and link records.
    ///
    /// When `links` does not have one list per station (for example the
    /// links key was missing from storage) the adjacency is rebuilt from
    /// each station's `linked_to`.
    pub fn from_parts(stations: Vec<Station>, links: Vec<Vec<Link>>) -> Self {
        let links = if links.len() == stations.len() {
            links
        } else {
            stations
                .iter()
                .map(|s| s.linked_to.iter().map(|&to| Link::new(s.id, to)).collect())
                .collect()
        };
        let spatial_idx = build_index(&stations);
        Self { stations, links, spatial_idx }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of directed link records (twice the number of connections).
    pub fn link_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: StationId) -> bool {
        id.index() < self.stations.len()
    }

    #[inline]
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    #[inline]
    pub fn station_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id.index())
    }

    /// Neighbours of `id` in link-insertion order.  Empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, id: StationId) -> &[StationId] {
        self.station(id).map(|s| s.linked_to.as_slice()).unwrap_or(&[])
    }

    /// The outgoing record `from → to`, if any.
    pub fn link(&self, from: StationId, to: StationId) -> Option<&Link> {
        self.links.get(from.index())?.iter().find(|l| l.to == to)
    }

    pub fn has_link(&self, a: StationId, b: StationId) -> bool {
        self.link(a, b).is_some()
    }

    /// Ids of every station currently in play, in definition order.
    pub fn spawned_ids(&self) -> Vec<StationId> {
        self.stations.iter().filter(|s| s.spawned).map(|s| s.id).collect()
    }

    /// Total passengers waiting across all stations.
    pub fn waiting_count(&self) -> usize {
        self.stations.iter().map(|s| s.waiting.len()).sum()
    }

    /// `true` when every `linked_to` entry and every link record has its
    /// mirror on the other side.
    pub fn is_symmetric(&self) -> bool {
        let adjacency_ok = self.stations.iter().all(|s| {
            s.linked_to.iter().all(|&n| self.station(n).is_some_and(|o| o.is_linked_to(s.id)))
        });
        let records_ok = self
            .links
            .iter()
            .flatten()
            .all(|l| self.has_link(l.to, l.from));
        adjacency_ok && records_ok
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert both link records between `a` and `b` and append each to the
    /// other's `linked_to`.
    ///
    /// Does not check for an existing connection: calling it twice for the
    /// same pair produces duplicate edges.  Callers check [`has_link`]
    /// first.
    ///
    /// [`has_link`]: Self::has_link
    pub fn connect(&mut self, a: StationId, b: StationId) -> NetworkResult<()> {
        if !self.contains(a) {
            return Err(NetworkError::StationNotFound(a));
        }
        if !self.contains(b) {
            return Err(NetworkError::StationNotFound(b));
        }
        if a == b {
            return Err(NetworkError::SelfLink(a));
        }

        self.links[b.index()].push(Link::new(b, a));
        self.links[a.index()].push(Link::new(a, b));
        self.stations[b.index()].linked_to.push(a);
        self.stations[a.index()].linked_to.push(b);

        debug!("linked {a} <-> {b}");
        Ok(())
    }

    /// Remove both link records between `a` and `b` and both adjacency
    /// entries.
    ///
    /// Returns [`NetworkError::LinkNotFound`] and changes nothing when the
    /// pair is not connected.
    pub fn disconnect(&mut self, a: StationId, b: StationId) -> NetworkResult<()> {
        if !self.has_link(a, b) || !self.has_link(b, a) {
            return Err(NetworkError::LinkNotFound { from: a, to: b });
        }

        remove_first(&mut self.links[a.index()], |l| l.to == b);
        remove_first(&mut self.links[b.index()], |l| l.to == a);
        remove_first(&mut self.stations[a.index()].linked_to, |&n| n == b);
        remove_first(&mut self.stations[b.index()].linked_to, |&n| n == a);

        debug!("unlinked {a} <-> {b}");
        Ok(())
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The station nearest to `pos`, or `None` for an empty network.
    pub fn nearest_station(&self, pos: Position) -> Option<StationId> {
        self.spatial_idx.nearest_neighbor(&[pos.x, pos.y]).map(|e| e.id)
    }

    /// Every station within `radius` planar units of `pos`, nearest first.
    pub fn stations_within(&self, pos: Position, radius: f64) -> Vec<StationId> {
        let r2 = radius * radius;
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take_while(|e| e.distance_2(&[pos.x, pos.y]) <= r2)
            .map(|e| e.id)
            .collect()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::empty()
    }
}

fn remove_first<T>(v: &mut Vec<T>, pred: impl Fn(&T) -> bool) {
    if let Some(i) = v.iter().position(pred) {
        v.remove(i);
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] from static geographic data, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ts_core::{GeoPoint, MapProjection};
/// use ts_network::NetworkBuilder;
///
/// let proj = MapProjection::new(GeoPoint::new(48.90, 2.25), GeoPoint::new(48.80, 2.45));
/// let mut b = NetworkBuilder::new(proj);
/// let lyon = b.add_station("Gare de Lyon", GeoPoint::new(48.8443, 2.3744));
/// let chatelet = b.add_station("Chatelet", GeoPoint::new(48.8621, 2.3470));
/// b.add_link(lyon, chatelet);
/// let net = b.build();
/// assert_eq!(net.station_count(), 2);
/// assert_eq!(net.link_count(), 2); // one record per direction
/// ```
pub struct NetworkBuilder {
    projection: MapProjection,
    stations:   Vec<Station>,
}

impl NetworkBuilder {
    pub fn new(projection: MapProjection) -> Self {
        Self { projection, stations: Vec::new() }
    }

    /// Add a dormant station and return its `StationId` (sequential from 0).
    pub fn add_station(&mut self, name: impl Into<String>, geo: GeoPoint) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Station::new(id, name, geo));
        id
    }

    /// Connect `a` and `b` in both directions.  Repeated or self links are
    /// ignored, as are ids that were never added.
    pub fn add_link(&mut self, a: StationId, b: StationId) {
        if a == b || a.index() >= self.stations.len() || b.index() >= self.stations.len() {
            return;
        }
        if !self.stations[a.index()].linked_to.contains(&b) {
            self.stations[a.index()].linked_to.push(b);
        }
        if !self.stations[b.index()].linked_to.contains(&a) {
            self.stations[b.index()].linked_to.push(a);
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Project every station, derive link records from `linked_to`, and
    /// bulk-load the spatial index.
    pub fn build(self) -> Network {
        let projection = self.projection;
        let mut stations = self.stations;
        for s in &mut stations {
            s.position = projection.project(s.geo);
        }
        Network::from_parts(stations, Vec::new())
    }
}
