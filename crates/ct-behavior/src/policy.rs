//! Destination selection.

use ct_core::{CarRng, Coord, DestinationPolicy};

/// Pick a destination for a car at `from`.  `None` if there are none.
///
/// `Nearest` breaks distance ties in favour of the earlier entry of
/// `destinations`; `Random` draws from the car's own RNG.
pub fn choose_destination(
    policy:       DestinationPolicy,
    from:         Coord,
    destinations: &[Coord],
    rng:          &mut CarRng,
) -> Option<Coord> {
    match policy {
        DestinationPolicy::Nearest => destinations
            .iter()
            .copied()
            .min_by_key(|d| from.distance_sq(*d)),
        DestinationPolicy::Random => rng.choose(destinations).copied(),
    }
}

/// Every destination except `current`, nearest to `from` first.
pub fn alternatives_by_distance(from: Coord, current: Option<Coord>, destinations: &[Coord]) -> Vec<Coord> {
    let mut others: Vec<Coord> = destinations
        .iter()
        .copied()
        .filter(|d| Some(*d) != current)
        .collect();
    // Stable: equal distances keep enumeration order.
    others.sort_by_key(|d| from.distance_sq(*d));
    others
}
