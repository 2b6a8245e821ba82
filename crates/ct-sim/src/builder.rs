//! Fluent builder for constructing a [`Sim`].

use log::{debug, warn};

use ct_agent::CarStore;
use ct_behavior::BehaviorModel;
use ct_core::{Coord, DestinationId, ObstacleId, RoadId, SimConfig, SimRng, SpawnPoints, Tick};
use ct_grid::{Entity, EntityKind, Grid, Signals};
use ct_map::{CityMap, MapCell};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — spawn cadence, initial car count, seed, …
/// - [`CityMap`] — the parsed city, from [`ct_map::load_map`]
/// - `B: BehaviorModel` — the car behavior (e.g. [`ct_behavior::LayeredDriver`])
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                       |
/// |--------------------------|-----------------------------------------------|
/// | `.initial_positions(v)`  | `initial_car_count` random distinct road cells |
///
/// # Example
///
/// ```rust,ignore
/// let map = load_map(Path::new("maps/base.txt"), &Legend::default())?;
/// let driver = LayeredDriver::new(config.driver.clone(), config.destination_policy)?;
/// let mut sim = SimBuilder::new(config, &map, driver).build()?;
/// sim.run(1_000, &mut NoopObserver);
/// ```
pub struct SimBuilder<'m, B: BehaviorModel> {
    config:    SimConfig,
    map:       &'m CityMap,
    behavior:  B,
    positions: Option<Vec<Coord>>,
}

impl<'m, B: BehaviorModel> SimBuilder<'m, B> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, map: &'m CityMap, behavior: B) -> Self {
        Self { config, map, behavior, positions: None }
    }

    /// Place the initial cars on exactly these cells, in this order, instead
    /// of `initial_car_count` random road cells.
    pub fn initial_positions(mut self, positions: Vec<Coord>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, build the grid and lights, place the initial cars,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;

        // ── Static entities ───────────────────────────────────────────────
        let (grid, signals) = populate(self.map)?;
        let destinations: Vec<Coord> = coords_of(&grid, EntityKind::Destination);
        let road_cells: Vec<Coord> = coords_of(&grid, EntityKind::Road);

        if let SpawnPoints::Fixed(points) = &self.config.spawn_points {
            for &p in points {
                check_car_cell(&grid, p, "spawn point")?;
            }
        }
        // A one-cell-wide map repeats corners.
        let mut corners: Vec<Coord> = Vec::with_capacity(4);
        for c in grid.corners() {
            if grid.has_road(c) && !corners.contains(&c) {
                corners.push(c);
            }
        }

        // ── Initial cars ──────────────────────────────────────────────────
        let mut rng = SimRng::new(self.config.seed);
        let initial = match self.positions {
            Some(positions) => {
                for (i, &p) in positions.iter().enumerate() {
                    check_car_cell(&grid, p, "initial position")?;
                    if positions[..i].contains(&p) {
                        return Err(SimError::Config(format!("two initial cars share {p}")));
                    }
                }
                positions
            }
            None => {
                let requested = self.config.initial_car_count;
                if requested > 0 && road_cells.is_empty() {
                    return Err(SimError::NoRoads { requested });
                }
                if requested > road_cells.len() {
                    warn!(
                        "{requested} initial cars requested but the map has {} road cells",
                        road_cells.len()
                    );
                }
                let mut shuffled = road_cells.clone();
                rng.shuffle(&mut shuffled);
                shuffled.truncate(requested);
                shuffled
            }
        };

        let cars_released = !self.config.holds_until_first_spawn();
        let mut sim = Sim {
            cars: CarStore::new(self.config.seed),
            config: self.config,
            tick: Tick::ZERO,
            grid,
            signals,
            destinations,
            road_cells,
            corners,
            behavior: self.behavior,
            rng,
            running: true,
            cars_released,
            empty_waves: 0,
            total_arrived: 0,
            total_unreachable: 0,
        };
        for p in initial {
            sim.spawn_car(p);
        }
        debug!(
            "initialised {}x{} grid: {} roads, {} lights, {} destinations, {} cars",
            sim.grid.width(),
            sim.grid.height(),
            sim.road_cells.len(),
            sim.signals.len(),
            sim.destinations.len(),
            sim.cars.len(),
        );
        Ok(sim)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Create the grid, every static entity, and the light controller.
fn populate(map: &CityMap) -> SimResult<(Grid, Signals)> {
    let mut grid = Grid::new(map.width(), map.height())?;
    let mut signals = Signals::new();
    let (mut roads, mut obstacles, mut dests) = (0u32, 0u32, 0u32);

    for (coord, cell) in map.iter() {
        match cell {
            MapCell::Empty => {}
            MapCell::Road(dir) => {
                grid.place(Entity::Road(RoadId(next(&mut roads)), dir), coord)?;
            }
            MapCell::Light { road, light } => {
                grid.place(Entity::Road(RoadId(next(&mut roads)), road), coord)?;
                let id = signals.add(coord, light.starts_green, light.period);
                grid.place(Entity::TrafficLight(id), coord)?;
            }
            MapCell::Obstacle => {
                grid.place(Entity::Obstacle(ObstacleId(next(&mut obstacles))), coord)?;
            }
            MapCell::Destination => {
                grid.place(Entity::Destination(DestinationId(next(&mut dests))), coord)?;
            }
        }
    }
    Ok((grid, signals))
}

/// Post-increment a load-order counter.
fn next(n: &mut u32) -> u32 {
    *n += 1;
    *n - 1
}

fn coords_of(grid: &Grid, kind: EntityKind) -> Vec<Coord> {
    grid.all_of_kind(kind).into_iter().map(|(_, c)| c).collect()
}

/// A car may only start on a road cell that is not a destination.
fn check_car_cell(grid: &Grid, at: Coord, what: &str) -> SimResult<()> {
    if !grid.in_bounds(at) {
        return Err(SimError::Config(format!("{what} {at} is outside the map")));
    }
    if grid.has_obstacle(at) {
        return Err(SimError::Config(format!("{what} {at} is an obstacle")));
    }
    if grid.destination_at(at).is_some() {
        return Err(SimError::Config(format!("{what} {at} is a destination")));
    }
    if !grid.has_road(at) {
        return Err(SimError::Config(format!("{what} {at} is not a road")));
    }
    Ok(())
}
