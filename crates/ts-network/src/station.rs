//! Station vertices.

use ts_core::{GeoPoint, LineId, Passenger, Position, StationId};

/// Default display radius of a station.
pub const DEFAULT_SIZE: f64 = 10.0;

/// A station crossing its overcrowding threshold in either direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OvercrowdingChange {
    pub station:     StationId,
    pub overcrowded: bool,
}

/// A vertex of the network.
///
/// Stations are created at world init from static geographic data and are
/// never destroyed.  They start dormant (`spawned == false`) and are
/// activated one at a time by the passenger generator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Station {
    pub id:   StationId,
    pub name: String,
    pub geo:  GeoPoint,
    /// Planar position, projected once from `geo`.
    pub position: Position,
    /// Lines serving this station.
    pub line_ids: Vec<LineId>,
    /// Neighbours in link-insertion order.  Symmetric across the network.
    pub linked_to: Vec<StationId>,
    pub size: f64,
    pub spawned: bool,
    /// Passengers waiting here, in arrival order.
    #[cfg_attr(feature = "serde", serde(rename = "waitingPassengers"))]
    pub waiting: Vec<Passenger>,
    /// Nominal queue capacity.  Exceeding it flags the station overcrowded
    /// but never drops passengers.
    #[cfg_attr(feature = "serde", serde(rename = "waitingPassengersMax"))]
    pub waiting_max: usize,
    /// Divides the arrival interval: 2.0 means passengers arrive twice as often.
    #[cfg_attr(feature = "serde", serde(rename = "passengersArrivalRate"))]
    pub arrival_rate: f64,
    /// Countdown to the next passenger arrival, in simulated seconds.
    #[cfg_attr(feature = "serde", serde(rename = "nextPassengerArrival"))]
    pub next_arrival: f64,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, geo: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            geo,
            position: Position::default(),
            line_ids: Vec::new(),
            linked_to: Vec::new(),
            size: DEFAULT_SIZE,
            spawned: false,
            waiting: Vec::new(),
            waiting_max: 0,
            arrival_rate: 1.0,
            next_arrival: 0.0,
        }
    }

    /// Bring the station into play with an empty queue.
    pub fn activate(&mut self, waiting_max: usize, arrival_rate: f64, next_arrival: f64) {
        self.spawned = true;
        self.waiting.clear();
        self.waiting_max = waiting_max;
        self.arrival_rate = arrival_rate;
        self.next_arrival = next_arrival;
    }

    #[inline]
    pub fn is_linked_to(&self, other: StationId) -> bool {
        self.linked_to.contains(&other)
    }

    /// More passengers waiting than the nominal capacity.
    #[inline]
    pub fn is_overcrowded(&self) -> bool {
        self.waiting.len() > self.waiting_max
    }

    /// Compare the current queue against a length observed earlier in the
    /// tick.  `Some` only when the overcrowded flag flipped.
    pub fn overcrowding_change(&self, prev_len: usize) -> Option<OvercrowdingChange> {
        let was = prev_len > self.waiting_max;
        let is = self.is_overcrowded();
        (was != is).then_some(OvercrowdingChange { station: self.id, overcrowded: is })
    }

    /// Add `line` to the serving lines if not already present.
    pub fn add_line(&mut self, line: LineId) {
        if !self.line_ids.contains(&line) {
            self.line_ids.push(line);
        }
    }

    pub fn remove_line(&mut self, line: LineId) {
        self.line_ids.retain(|&l| l != line);
    }
}
