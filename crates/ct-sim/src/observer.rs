//! Simulation observer trait for progress reporting and data collection.

use ct_agent::CarState;
use ct_core::Tick;

use crate::Metrics;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, metrics: &Metrics) {
///         if tick.is_due(self.interval) {
///             println!("{tick}: {} cars on the road", metrics.current_count);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each tick is processed, with the tick about to run.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick is complete, retired cars already swept.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with every live car in creation order.
    fn on_snapshot(&mut self, _tick: Tick, _cars: &[CarState]) {}

    /// Called once when the run ends, by saturation or by the tick limit.
    fn on_sim_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
