//! A no-op behavior model — cars never move.

use ct_agent::CarState;
use ct_core::CarRng;

use crate::{BehaviorModel, CarUpdate, SimContext};

/// A [`BehaviorModel`] that leaves every car where it is.
///
/// Useful in tests as immovable traffic, or to inspect initial placement.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(&self, car: &CarState, _ctx: &SimContext<'_>, _rng: &mut CarRng) -> CarUpdate {
        CarUpdate::unchanged(car)
    }
}
