//! The `Sim` struct and its tick loop.

use std::path::Path;

use log::{debug, info, warn};

use ct_agent::{CarState, CarStore, RetireReason};
use ct_behavior::{choose_destination, BehaviorModel, Intent, LayeredDriver, SimContext};
use ct_core::{CarId, Coord, Direction, SimConfig, SimRng, SpawnPoints, Tick};
use ct_grid::{Entity, EntityKind, Grid, Signals};
use ct_map::{load_map, CityMap, Legend};

use crate::{EntityView, Metrics, SimBuilder, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation scheduler.
///
/// `Sim<B>` owns the grid, the light controller and every car, and drives
/// the tick loop.  Each [`step`](Self::step):
///
/// 1. **Advance**: increment the tick counter.
/// 2. **Spawn**: if the cadence is due, run a spawn wave.  A streak of
///    `saturation_waves` waves that place no car halts the simulation for
///    good; the halting tick still completes.
/// 3. **Lights**: toggle every light whose period has elapsed.
/// 4. **Cars** (creation order): call [`BehaviorModel::decide`] and apply the
///    returned intents to the grid before the next car decides, so an
///    earlier car always wins a contested cell.
/// 5. **Sweep**: drop retired cars from the grid and the live set.
///
/// Create via [`SimBuilder`] or [`Sim::initialize`].
pub struct Sim<B: BehaviorModel> {
    pub(crate) config:  SimConfig,
    pub(crate) tick:    Tick,
    pub(crate) grid:    Grid,
    pub(crate) signals: Signals,

    /// Destination cells in grid enumeration order.
    pub(crate) destinations: Vec<Coord>,

    /// Road cells in grid enumeration order; random placement draws from it.
    pub(crate) road_cells: Vec<Coord>,

    /// Map corners holding a road, used by [`SpawnPoints::Corners`].
    pub(crate) corners: Vec<Coord>,

    pub(crate) cars:     CarStore,
    pub(crate) behavior: B,
    pub(crate) rng:      SimRng,
    pub(crate) running:  bool,

    /// `false` while cars wait for the first successful corner spawn.
    pub(crate) cars_released: bool,

    /// Consecutive due spawn waves that placed no car.
    pub(crate) empty_waves: u32,

    pub(crate) total_arrived:     u64,
    pub(crate) total_unreachable: u64,
}

impl Sim<LayeredDriver> {
    /// Build a simulation over `map` driven by the default [`LayeredDriver`],
    /// tuned by `config.driver` and `config.destination_policy`.
    pub fn initialize(config: SimConfig, map: &CityMap) -> SimResult<Self> {
        let driver = LayeredDriver::new(config.driver.clone(), config.destination_policy)?;
        SimBuilder::new(config, map, driver).build()
    }

    /// [`initialize`](Self::initialize) from a map file.
    pub fn initialize_from_file(config: SimConfig, path: &Path, legend: &Legend) -> SimResult<Self> {
        let map = load_map(path, legend)?;
        Self::initialize(config, &map)
    }
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until the simulation halts or `max_ticks` ticks have run.
    ///
    /// Calls observer hooks at every tick boundary and returns the number of
    /// ticks processed.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && self.running {
            observer.on_tick_start(self.tick.next());
            self.step();
            ran += 1;

            let now = self.tick;
            observer.on_tick_end(now, &self.metrics());
            if now.is_due(self.config.output_interval_ticks) {
                observer.on_snapshot(now, self.cars.as_slice());
            }
        }
        observer.on_sim_end(self.tick, &self.metrics());
        ran
    }

    /// Advance one tick.  Does nothing once the simulation has halted.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        self.tick = self.tick.next();
        let now = self.tick;

        if now.is_due(self.config.spawn_interval) {
            self.spawn_wave(now);
        }

        let toggled = self.signals.update(now);
        if toggled > 0 {
            debug!("{now}: {toggled} lights toggled");
        }

        if self.cars_released {
            self.drive_cars(now);
        }
        self.sweep(now);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks processed so far.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Every entity of `kind`, in grid enumeration order.
    pub fn enumerate(&self, kind: EntityKind) -> Vec<EntityView> {
        self.grid
            .all_of_kind(kind)
            .into_iter()
            .map(|(entity, coord)| match entity {
                Entity::Road(id, direction) => EntityView::Road { id, coord, direction },
                Entity::TrafficLight(id) => EntityView::TrafficLight {
                    id,
                    coord,
                    is_green: self.signals.is_green(id),
                },
                Entity::Car(id) => EntityView::Car { id, coord },
                Entity::Destination(id) => EntityView::Destination { id, coord },
                Entity::Obstacle(id) => EntityView::Obstacle { id, coord },
            })
            .collect()
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            total_spawned:     self.cars.created(),
            total_arrived:     self.total_arrived,
            total_unreachable: self.total_unreachable,
            current_count:     self.cars.len(),
            tick_count:        self.tick,
            running:           self.running,
        }
    }

    /// Change the spawn cadence, effective from the next tick.
    pub fn set_spawn_interval(&mut self, interval: u64) -> SimResult<()> {
        if interval == 0 {
            return Err(SimError::Config("spawn_interval must be at least 1".into()));
        }
        self.config.spawn_interval = interval;
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    /// Live cars in creation order.
    pub fn cars(&self) -> &[CarState] {
        self.cars.as_slice()
    }

    pub fn car(&self, id: CarId) -> Option<&CarState> {
        self.cars.get(id)
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    fn spawn_wave(&mut self, now: Tick) {
        let points: Vec<Coord> = match &self.config.spawn_points {
            SpawnPoints::Corners => self.corners.clone(),
            SpawnPoints::RandomRoads { per_wave } => {
                let mut free: Vec<Coord> = self
                    .road_cells
                    .iter()
                    .copied()
                    .filter(|&c| self.grid.car_at(c).is_none())
                    .collect();
                self.rng.shuffle(&mut free);
                free.truncate(*per_wave);
                free
            }
            SpawnPoints::Fixed(points) => points.clone(),
        };

        let spawned = points.into_iter().filter_map(|p| self.spawn_car(p)).count();
        if spawned > 0 {
            debug!("{now}: spawn wave placed {spawned} cars");
            self.empty_waves = 0;
            self.cars_released = true;
            return;
        }

        self.empty_waves += 1;
        debug!("{now}: spawn wave placed no car ({} in a row)", self.empty_waves);
        if self.empty_waves >= self.config.saturation_waves {
            info!(
                "{now}: saturated after {} empty spawn waves; halting with {} cars",
                self.empty_waves,
                self.cars.len()
            );
            self.running = false;
        }
    }

    /// Create a car at `at` unless another car is already there.  The new car
    /// faces the road direction and gets a destination by policy.
    pub(crate) fn spawn_car(&mut self, at: Coord) -> Option<CarId> {
        if self.grid.car_at(at).is_some() {
            return None;
        }
        if let Err(e) = self.grid.place(Entity::Car(self.cars.next_id()), at) {
            warn!("cannot place a car at {at}: {e}");
            return None;
        }
        let facing = self.grid.road_direction(at).unwrap_or(Direction::Right);
        let id = self.cars.spawn(at, facing);

        let (state, rng) = self.cars.split_mut(self.cars.len() - 1);
        state.destination = choose_destination(
            self.config.destination_policy,
            at,
            &self.destinations,
            rng,
        );
        debug!("spawned {} at {at} heading for {:?}", id.label(), state.destination);
        Some(id)
    }

    // ── Driving ───────────────────────────────────────────────────────────

    fn drive_cars(&mut self, now: Tick) {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid         = &mut self.grid;
        let signals      = &self.signals;
        let destinations = self.destinations.as_slice();
        let behavior     = &self.behavior;
        let cars         = &mut self.cars;

        for i in 0..cars.len() {
            let (state, rng) = cars.split_mut(i);
            if state.is_retired() {
                continue;
            }
            let update = {
                let ctx = SimContext::new(now, grid, signals, destinations);
                behavior.decide(state, &ctx, rng)
            };

            let entity = Entity::Car(state.id);
            let mut next = update.state;
            for intent in update.intents {
                match intent {
                    Intent::MoveTo(to) => {
                        if let Err(e) = grid.move_to(entity, to) {
                            warn!("{now}: dropping move of {} to {to}: {e}", state.id.label());
                            next.path.clear();
                        }
                    }
                    Intent::Retire(reason) => next.retired = Some(reason),
                }
            }
            // The grid is authoritative for where the car actually is.
            if let Some(at) = grid.position_of(entity) {
                next.position = at;
            }
            *state = next;
        }
    }

    fn sweep(&mut self, now: Tick) {
        for car in self.cars.sweep_retired() {
            self.grid.remove(Entity::Car(car.id));
            match car.retired {
                Some(RetireReason::Arrived) => {
                    self.total_arrived += 1;
                    debug!("{now}: {} arrived at {}", car.id.label(), car.position);
                }
                Some(RetireReason::Unreachable) => {
                    self.total_unreachable += 1;
                    debug!("{now}: {} retired at {}; nothing reachable", car.id.label(), car.position);
                }
                None => {}
            }
        }
    }
}
