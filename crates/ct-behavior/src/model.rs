//! The `BehaviorModel` trait — the extension point for car decision logic.

use ct_agent::CarState;
use ct_core::CarRng;

use crate::{Intent, SimContext};

/// The outcome of one car's decision: its next state plus the grid changes
/// it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarUpdate {
    pub state:   CarState,
    pub intents: Vec<Intent>,
}

impl CarUpdate {
    /// Stay put with no changes.
    pub fn unchanged(car: &CarState) -> Self {
        Self { state: car.clone(), intents: Vec::new() }
    }
}

/// Pluggable car behavior.
///
/// `decide` is pure: it reads the car's current state and the world through
/// [`SimContext`] and returns the car's next state.  Grid mutation happens
/// only when the scheduler applies the returned [`Intent`]s, so a model can
/// be tested without a running simulation.
///
/// # Example
///
/// ```rust,ignore
/// struct Parked;
///
/// impl BehaviorModel for Parked {
///     fn decide(&self, car: &CarState, _ctx: &SimContext<'_>, _rng: &mut CarRng) -> CarUpdate {
///         CarUpdate::unchanged(car)
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per live car per tick, in creation order.
    fn decide(&self, car: &CarState, ctx: &SimContext<'_>, rng: &mut CarRng) -> CarUpdate;
}
