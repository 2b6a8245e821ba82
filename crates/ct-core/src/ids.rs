//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and as the
//! payload of grid entity references without ceremony.  Static map entities
//! are numbered in load order; cars are numbered in creation order and their
//! IDs are never reused, so a `CarId` doubles as a stable ordering key.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Short external label, e.g. `car_12`.  Used by snapshot output.
            pub fn label(self) -> String {
                format!(concat!($prefix, "_{}"), self.0)
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
    /// A car, numbered in creation order.
    pub struct CarId(u32) = "car";
}

typed_id! {
    /// A road cell.
    pub struct RoadId(u32) = "r";
}

typed_id! {
    /// A traffic light; also the index into the signal controller.
    pub struct LightId(u32) = "tl";
}

typed_id! {
    /// A destination cell.
    pub struct DestinationId(u32) = "d";
}

typed_id! {
    /// An obstacle (building) cell.
    pub struct ObstacleId(u32) = "ob";
}
