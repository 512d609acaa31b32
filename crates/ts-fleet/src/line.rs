//! Lines and their departure schedules.

use ts_core::{LineId, StationId};

/// Departure timing shared by every vehicle on one line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Minimum simulated seconds between two departures from the origin.
    #[cfg_attr(feature = "serde", serde(rename = "intervalSeconds"))]
    pub interval_secs: f64,
    /// Dwell at each station, in simulated seconds.
    #[cfg_attr(feature = "serde", serde(rename = "stoppingTimeSeconds"))]
    pub stopping_time_secs: f64,
    /// Clock value of the last departure from the origin.
    #[cfg_attr(feature = "serde", serde(rename = "previousDepartureTime"))]
    pub previous_departure: f64,
}

impl Schedule {
    pub fn new(interval_secs: f64, stopping_time_secs: f64) -> Self {
        Self { interval_secs, stopping_time_secs, previous_departure: 0.0 }
    }

    /// `true` once more than `interval_secs` have passed since the last
    /// departure.
    #[inline]
    pub fn departure_due(&self, now: f64) -> bool {
        now - self.previous_departure > self.interval_secs
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(300.0, 30.0)
    }
}

/// An ordered path of stations served by vehicles.
///
/// The sequence is a path, not a set: a station may in principle appear
/// twice, and every consecutive pair must be linked in the network.  The
/// world creates missing links when stations are added.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Line {
    pub id:          LineId,
    pub name:        String,
    /// Display colour, e.g. `"#da291c"`.
    pub color:       String,
    pub station_ids: Vec<StationId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden:      bool,
}

impl Line {
    pub fn new(
        id:          LineId,
        name:        impl Into<String>,
        color:       impl Into<String>,
        station_ids: Vec<StationId>,
    ) -> Self {
        Self { id, name: name.into(), color: color.into(), station_ids, hidden: false }
    }

    /// Fewer than two stations: no vehicle can run.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.station_ids.len() < 2
    }

    pub fn len(&self) -> usize {
        self.station_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station_ids.is_empty()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.station_ids.contains(&station)
    }

    /// Consecutive station pairs, each of which needs a link.
    pub fn required_links(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.station_ids.windows(2).map(|w| (w[0], w[1]))
    }

    /// Append `station` to the end of the line.
    pub fn push_station(&mut self, station: StationId) {
        self.station_ids.push(station);
    }

    /// Remove every occurrence of `station`.  Returns `true` if any was removed.
    pub fn remove_station(&mut self, station: StationId) -> bool {
        let before = self.station_ids.len();
        self.station_ids.retain(|&s| s != station);
        self.station_ids.len() != before
    }

    /// Insert `station` so that it ends up at `index`.  `index == len`
    /// appends.  Returns `false` and changes nothing when out of range.
    pub fn insert_station(&mut self, index: usize, station: StationId) -> bool {
        if index > self.station_ids.len() {
            return false;
        }
        self.station_ids.insert(index, station);
        true
    }
}
