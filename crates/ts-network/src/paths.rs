//! The sparse path memo table.
//!
//! Keys are `(from, to)` pairs; values are full station sequences.  A path
//! is always stored together with its reverse, so a lookup in either
//! direction hits after one search.

use rustc_hash::FxHashMap;

use ts_core::StationId;

/// Memoized shortest paths.
#[derive(Default, Debug, Clone)]
pub struct PathCache {
    inner: FxHashMap<(StationId, StationId), Vec<StationId>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, from: StationId, to: StationId) -> Option<&[StationId]> {
        self.inner.get(&(from, to)).map(Vec::as_slice)
    }

    /// Store `path` under `(first, last)` and its reverse under
    /// `(last, first)`.  Paths shorter than two stations are not cached.
    pub fn insert(&mut self, path: &[StationId]) {
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            return;
        };
        if path.len() < 2 {
            return;
        }
        let mut reversed = path.to_vec();
        reversed.reverse();
        self.inner.insert((first, last), path.to_vec());
        self.inner.insert((last, first), reversed);
    }

    /// Drop every entry whose path visits any of `stations`.
    /// Returns the number of entries removed.
    pub fn invalidate_stations(&mut self, stations: &[StationId]) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, path| !path.iter().any(|s| stations.contains(s)));
        before - self.inner.len()
    }

    /// Drop every entry whose path traverses the edge `a – b` in either
    /// direction.  Returns the number of entries removed.
    pub fn invalidate_link(&mut self, a: StationId, b: StationId) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, path| {
            !path
                .windows(2)
                .any(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
        });
        before - self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Number of directed entries (twice the number of distinct paths).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
