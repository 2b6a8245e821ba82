//! Car intents: the grid changes a car asks for during its decision.

use ct_agent::RetireReason;
use ct_core::Coord;

/// An action that a car wants applied to the world this tick.
///
/// Intents are produced by [`BehaviorModel::decide`][crate::BehaviorModel::decide]
/// and applied by the scheduler (ct-sim) before the next car decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move into the adjacent cell `Coord`.
    MoveTo(Coord),

    /// Leave the simulation at the end of the tick.
    Retire(RetireReason),
}
