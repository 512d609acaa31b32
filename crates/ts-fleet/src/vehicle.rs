//! Vehicle types, per-vehicle location state, and the vehicle itself.

use std::fmt;

use ts_core::{LineId, Passenger, Position, StationId, VehicleId, VehicleTypeId};
use ts_network::{Link, Network};

/// Static characteristics of a vehicle, copied from its type at purchase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleInfo {
    pub name:      String,
    /// Top speed in km/h.  Vehicles always run at top speed.
    pub max_speed: f64,
    /// Nominal passenger capacity.
    pub capacity:  usize,
}

impl VehicleInfo {
    pub fn new(name: impl Into<String>, max_speed: f64, capacity: usize) -> Self {
        Self { name: name.into(), max_speed, capacity }
    }

    /// Top speed in metres per millisecond.
    #[inline]
    pub fn metres_per_ms(&self) -> f64 {
        self.max_speed / 3_600.0
    }
}

/// A purchasable template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleType {
    pub id:   VehicleTypeId,
    pub info: VehicleInfo,
}

// ── Location ──────────────────────────────────────────────────────────────────

/// Where a vehicle is along its line.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Location {
    /// The link record being traversed.  `None` while idle at the origin.
    pub current_link:     Option<Link>,
    /// Progress across `current_link`, 0 to 100.
    pub percent:          f64,
    /// `true` when travelling `current_link.from → to`, `false` when the
    /// record was found in the opposite direction.
    pub track_is_forward: bool,
    /// Index into the line's station sequence of the station being
    /// approached.
    pub station_index:    usize,
    /// Travelling towards index 0.
    pub reverse_trip:     bool,
    pub stopped:          bool,
    /// Clock value at which the current dwell started.
    #[cfg_attr(feature = "serde", serde(rename = "stoppedTime"))]
    pub stopped_at:       f64,
}

impl Location {
    /// Idle at the origin.
    pub fn idle() -> Self {
        Self { track_is_forward: true, ..Self::default() }
    }

    /// The endpoints of the current link in travel order.
    pub fn travel_endpoints(&self) -> Option<(StationId, StationId)> {
        self.current_link.as_ref().map(|l| {
            if self.track_is_forward { (l.from, l.to) } else { (l.to, l.from) }
        })
    }
}

// ── VehicleState ──────────────────────────────────────────────────────────────

/// Coarse view of the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VehicleState {
    /// At the origin, waiting for the departure gate.
    Idle,
    EnRoute,
    Dwelling,
}

impl VehicleState {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::Idle     => "idle",
            VehicleState::EnRoute  => "en_route",
            VehicleState::Dwelling => "dwelling",
        }
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One vehicle running on one line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:         VehicleId,
    pub line:       LineId,
    pub info:       VehicleInfo,
    pub location:   Location,
    /// Passengers aboard, in boarding order.
    pub passengers: Vec<Passenger>,
}

impl Vehicle {
    /// A new, empty vehicle idle at the origin of `line`.
    pub fn from_type(id: VehicleId, line: LineId, vehicle_type: &VehicleType) -> Self {
        Self {
            id,
            line,
            info: vehicle_type.info.clone(),
            location: Location::idle(),
            passengers: Vec::new(),
        }
    }

    pub fn state(&self) -> VehicleState {
        if self.location.stopped {
            VehicleState::Dwelling
        } else if self.location.current_link.is_some() {
            VehicleState::EnRoute
        } else {
            VehicleState::Idle
        }
    }

    /// More passengers aboard than the nominal capacity.
    #[inline]
    pub fn is_overcrowded(&self) -> bool {
        self.passengers.len() > self.info.capacity
    }

    /// Planar position, interpolated along the current link.
    ///
    /// `None` while idle (the renderer places idle vehicles at the line's
    /// origin) or when the link references an unknown station.
    pub fn position(&self, network: &Network) -> Option<Position> {
        let (a, b) = self.location.travel_endpoints()?;
        let from = network.station(a)?.position;
        let to = network.station(b)?.position;
        Some(from.lerp(to, self.location.percent / 100.0))
    }

    /// Drop the current trip and return to idle at the origin.
    pub fn reset_to_idle(&mut self) {
        self.location = Location::idle();
    }
}
