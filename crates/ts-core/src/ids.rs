//! Strongly typed, zero-cost identifier wrappers.
//!
//! Stations, lines, vehicle types and vehicles are stored in `Vec`s and never
//! destroyed during a session, so their ids double as indices.  The inner
//! integer is `pub`, but callers should prefer `.index()` for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a station in the network.
    pub struct StationId(u32);
}

typed_id! {
    /// Index of a line.  Also indexes the per-line vehicle lists.
    pub struct LineId(u32);
}

typed_id! {
    /// Position of a vehicle within its line's vehicle list.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a vehicle type in the catalogue.
    pub struct VehicleTypeId(u32);
}

typed_id! {
    /// Sequential passenger number, taken from the "passengers created" counter.
    pub struct PassengerId(u64);
}
