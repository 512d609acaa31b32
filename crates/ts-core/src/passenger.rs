//! Passengers and their itineraries.

use crate::{PassengerId, StationId};

/// A traveller from `origin` to `destination`.
///
/// A passenger lives in exactly one collection at a time: a station's
/// waiting queue or a vehicle's manifest.  It is dropped when it disembarks
/// at the last stop of its itinerary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Passenger {
    pub id:          PassengerId,
    pub name:        String,
    #[cfg_attr(feature = "serde", serde(rename = "startStationId"))]
    pub origin:      StationId,
    #[cfg_attr(feature = "serde", serde(rename = "endStationId"))]
    pub destination: StationId,
    /// Station ids from the current origin to `destination`, inclusive.
    /// Empty when no path was found.
    pub itinerary:   Vec<StationId>,
    /// Simulated second the passenger was created.
    #[cfg_attr(feature = "serde", serde(rename = "startTime"))]
    pub created_at:  f64,
    /// Simulated second the passenger reached its destination (0 until then).
    #[cfg_attr(feature = "serde", serde(rename = "endTime"))]
    pub served_at:   f64,
    pub waiting:     bool,
}

impl Passenger {
    pub fn new(
        id:          PassengerId,
        origin:      StationId,
        destination: StationId,
        itinerary:   Vec<StationId>,
        now:         f64,
    ) -> Self {
        Self {
            id,
            name: format!("Passenger {}", id.0 + 1),
            origin,
            destination,
            itinerary,
            created_at: now,
            served_at: 0.0,
            waiting: true,
        }
    }

    /// The stop that follows `station` in the itinerary.
    ///
    /// `None` if `station` is the last stop or not on the itinerary at all.
    pub fn next_after(&self, station: StationId) -> Option<StationId> {
        let pos = self.itinerary.iter().position(|&s| s == station)?;
        self.itinerary.get(pos + 1).copied()
    }

    /// `true` if `station` is the final stop of the itinerary.
    #[inline]
    pub fn ends_at(&self, station: StationId) -> bool {
        self.itinerary.last() == Some(&station)
    }

    /// `true` if the itinerary visits any of `stations`.
    pub fn passes_through(&self, stations: &[StationId]) -> bool {
        self.itinerary.iter().any(|s| stations.contains(s))
    }
}
