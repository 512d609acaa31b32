//! Directed link records.

use ts_core::StationId;

/// Default number of parallel tracks laid for a new link.
pub const DEFAULT_TRACKS: u8 = 2;

/// One direction of a track connection between two stations.
///
/// `drawn` belongs to the renderer; the engine never reads it but keeps it
/// so it survives a save/load cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub from:   StationId,
    pub to:     StationId,
    pub tracks: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drawn:  bool,
}

impl Link {
    pub fn new(from: StationId, to: StationId) -> Self {
        Self { from, to, tracks: DEFAULT_TRACKS, drawn: false }
    }

    /// The record for the opposite direction.
    pub fn reversed(&self) -> Link {
        Link { from: self.to, to: self.from, tracks: self.tracks, drawn: self.drawn }
    }
}
