//! The layered car driver.
//!
//! # Layers
//!
//! Each tick a car runs these layers in order.  A layer that ends the
//! decision leaves the car where it is for the rest of the tick.
//!
//! | # | Layer              | Ends the tick when                              |
//! |---|--------------------|-------------------------------------------------|
//! | 1 | stuck detection    | never; may replace the path                     |
//! | 2 | destination        | no destination and no path to continue          |
//! | 3 | arrival            | the car is on its destination (retires)         |
//! | 4 | path maintenance   | the search failed, or nothing is reachable      |
//! | 5 | step               | the next cell holds a car or a red light        |
//!
//! After a successful step the arrival check runs once more, so a car that
//! drives onto its destination retires in the same tick.

use log::debug;

use ct_agent::{CarState, RetireReason};
use ct_core::{CarRng, Coord, DestinationPolicy, Direction, DriverConfig};
use ct_grid::{BfsRouter, GridResult, Route, RouteQuery, Router};

use crate::policy::{alternatives_by_distance, choose_destination};
use crate::{BehaviorError, BehaviorModel, BehaviorResult, CarUpdate, Intent, SimContext};

/// The default [`BehaviorModel`]: route-following with lane discipline,
/// red-light stops, stuck rerouting and destination fallback.
pub struct LayeredDriver<R: Router = BfsRouter> {
    router: R,
    config: DriverConfig,
    policy: DestinationPolicy,
}

impl LayeredDriver<BfsRouter> {
    pub fn new(config: DriverConfig, policy: DestinationPolicy) -> BehaviorResult<Self> {
        Self::with_router(BfsRouter, config, policy)
    }
}

impl<R: Router> LayeredDriver<R> {
    /// Use a custom router in place of breadth-first search.
    pub fn with_router(router: R, config: DriverConfig, policy: DestinationPolicy) -> BehaviorResult<Self> {
        if config.stuck_threshold == 0 {
            return Err(BehaviorError::Config("stuck_threshold must be at least 1".into()));
        }
        if config.max_path_failures == 0 {
            return Err(BehaviorError::Config("max_path_failures must be at least 1".into()));
        }
        if config.max_search_expansions == 0 {
            return Err(BehaviorError::Config("max_search_expansions must be at least 1".into()));
        }
        Ok(Self { router, config, policy })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn policy(&self) -> DestinationPolicy {
        self.policy
    }

    fn search(&self, ctx: &SimContext<'_>, car: &CarState, goal: Coord, avoid_cars: bool) -> GridResult<Route> {
        let query = RouteQuery::new(car.position, goal, car.id)
            .avoiding_cars(avoid_cars)
            .max_expansions(self.config.max_search_expansions);
        self.router.route(ctx.grid, &query)
    }

    // ── Layers ────────────────────────────────────────────────────────────

    /// Layer 1.
    fn detect_stuck(&self, car: &mut CarState, ctx: &SimContext<'_>) {
        if car.position == car.last_position {
            car.wait_ticks += 1;
        } else {
            car.wait_ticks = 0;
        }
        car.last_position = car.position;

        if car.wait_ticks < self.config.stuck_threshold {
            return;
        }
        car.wait_ticks = 0;
        let Some(goal) = car.destination else { return };
        match self.search(ctx, car, goal, true) {
            Ok(route) if !route.is_trivial() => {
                debug!("{} stuck at {}; rerouting around traffic", car.id.label(), car.position);
                car.set_path(route.into_cells());
            }
            Ok(_) => {}
            Err(e) => debug!("{} stuck at {}; keeping old path ({e})", car.id.label(), car.position),
        }
    }

    /// Layer 4.  Returns `false` if the car cannot move this tick.
    fn maintain_path(&self, car: &mut CarState, goal: Coord, ctx: &SimContext<'_>, intents: &mut Vec<Intent>) -> bool {
        if car.has_path() {
            return true;
        }
        match self.search(ctx, car, goal, false) {
            Ok(route) => {
                car.path_failures = 0;
                car.set_path(route.into_cells());
                return car.has_path();
            }
            Err(_) => car.path_failures += 1,
        }
        if car.path_failures < self.config.max_path_failures {
            return false;
        }

        for candidate in alternatives_by_distance(car.position, car.destination, ctx.destinations) {
            if let Ok(route) = self.search(ctx, car, candidate, false) {
                debug!("{} giving up on {goal}; heading to {candidate}", car.id.label());
                car.destination = Some(candidate);
                car.path_failures = 0;
                car.set_path(route.into_cells());
                return car.has_path();
            }
        }

        debug!("{} at {} cannot reach any destination", car.id.label(), car.position);
        retire(car, RetireReason::Unreachable, intents);
        false
    }

    /// Layer 5.
    fn step(&self, car: &mut CarState, ctx: &SimContext<'_>, intents: &mut Vec<Intent>) {
        let Some(&next) = car.path.front() else { return };
        if ctx.grid.has_other_car(next, car.id) || ctx.red_light_at(next) {
            return;
        }
        let (dx, dy) = car.position.delta_to(next);
        car.path.pop_front();
        car.facing = ctx
            .grid
            .road_direction(next)
            .or_else(|| Direction::from_delta(dx, dy))
            .unwrap_or(car.facing);
        car.position = next;
        intents.push(Intent::MoveTo(next));

        if car.has_arrived() {
            retire(car, RetireReason::Arrived, intents);
        }
    }
}

impl<R: Router + Send + Sync + 'static> BehaviorModel for LayeredDriver<R> {
    fn decide(&self, car: &CarState, ctx: &SimContext<'_>, rng: &mut CarRng) -> CarUpdate {
        let mut state = car.clone();
        let mut intents = Vec::new();
        if state.is_retired() {
            return CarUpdate { state, intents };
        }

        self.detect_stuck(&mut state, ctx);

        if state.destination.is_none() {
            state.destination = choose_destination(self.policy, state.position, ctx.destinations, rng);
        }
        let Some(goal) = state.destination else {
            // Nowhere to go; only an already computed path keeps the car moving.
            self.step(&mut state, ctx, &mut intents);
            return CarUpdate { state, intents };
        };

        if state.has_arrived() {
            retire(&mut state, RetireReason::Arrived, &mut intents);
            return CarUpdate { state, intents };
        }

        if self.maintain_path(&mut state, goal, ctx, &mut intents) {
            self.step(&mut state, ctx, &mut intents);
        }
        CarUpdate { state, intents }
    }
}

fn retire(car: &mut CarState, reason: RetireReason, intents: &mut Vec<Intent>) {
    car.retired = Some(reason);
    car.path.clear();
    intents.push(Intent::Retire(reason));
}
