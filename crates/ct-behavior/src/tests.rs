//! Unit tests for ct-behavior.

use ct_agent::CarState;
use ct_core::{
    CarId, CarRng, Coord, DestinationId, DestinationPolicy, Direction, DriverConfig, LightId,
    ObstacleId, RoadId, Tick,
};
use ct_grid::{Entity, EntityKind, Grid, Signals};

use crate::{BehaviorModel, Intent, LayeredDriver, SimContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A grid, its lights, and its destinations: everything a `SimContext` needs.
struct World {
    grid:         Grid,
    signals:      Signals,
    destinations: Vec<Coord>,
}

impl World {
    /// Rows top first: `> < ^ v` roads, `#` obstacle, `D` destination.
    fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows[0].chars().count() as i32;
        let mut grid = Grid::new(width, height).unwrap();
        let mut n = 0u32;
        for (row, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let at = Coord::new(x as i32, height - row as i32 - 1);
                n += 1;
                let entity = match ch {
                    '>' => Entity::Road(RoadId(n), Direction::Right),
                    '<' => Entity::Road(RoadId(n), Direction::Left),
                    '^' => Entity::Road(RoadId(n), Direction::Up),
                    'v' => Entity::Road(RoadId(n), Direction::Down),
                    '#' => Entity::Obstacle(ObstacleId(n)),
                    'D' => Entity::Destination(DestinationId(n)),
                    _ => continue,
                };
                grid.place(entity, at).unwrap();
            }
        }
        let destinations = grid
            .all_of_kind(EntityKind::Destination)
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        Self { grid, signals: Signals::new(), destinations }
    }

    fn ctx(&self) -> SimContext<'_> {
        SimContext::new(Tick(1), &self.grid, &self.signals, &self.destinations)
    }

    fn add_light(&mut self, at: Coord, green: bool) -> LightId {
        let id = self.signals.add(at, green, 100);
        self.grid.place(Entity::TrafficLight(id), at).unwrap();
        id
    }

    /// Put a car on the grid and return its fresh state.
    fn car(&mut self, id: u32, at: Coord) -> CarState {
        let id = CarId(id);
        self.grid.place(Entity::Car(id), at).unwrap();
        let facing = self.grid.road_direction(at).unwrap_or(Direction::Right);
        CarState::new(id, at, facing)
    }

    /// Run `n` decisions for one car, applying its moves to the grid.
    fn drive(
        &mut self,
        model: &impl BehaviorModel,
        car: &mut CarState,
        rng: &mut CarRng,
        n: usize,
    ) -> Vec<Vec<Intent>> {
        let mut all = Vec::new();
        for _ in 0..n {
            if car.is_retired() {
                break;
            }
            let update = model.decide(car, &self.ctx(), rng);
            for intent in &update.intents {
                if let Intent::MoveTo(to) = intent {
                    self.grid.move_to(Entity::Car(car.id), *to).unwrap();
                }
            }
            *car = update.state;
            all.push(update.intents);
        }
        all
    }
}

fn nearest_driver() -> LayeredDriver {
    LayeredDriver::new(DriverConfig::default(), DestinationPolicy::Nearest).unwrap()
}

fn rng() -> CarRng {
    CarRng::new(0, CarId(0))
}

// ── Intent & CarUpdate ────────────────────────────────────────────────────────

#[cfg(test)]
mod intent_tests {
    use ct_agent::RetireReason;

    use super::*;

    #[test]
    fn intents_compare_by_value() {
        assert_eq!(Intent::MoveTo(Coord::new(1, 2)), Intent::MoveTo(Coord::new(1, 2)));
        assert_ne!(
            Intent::Retire(RetireReason::Arrived),
            Intent::Retire(RetireReason::Unreachable)
        );
    }
}

// ── SimContext ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn red_light_lookup() {
        let mut world = World::from_rows(&[">>>D"]);
        let light = world.add_light(Coord::new(1, 0), false);
        assert!(world.ctx().red_light_at(Coord::new(1, 0)));
        assert!(!world.ctx().red_light_at(Coord::new(2, 0)), "no light, never red");
        world.signals.update(Tick(100));
        assert!(world.signals.is_green(light));
        assert!(!world.ctx().red_light_at(Coord::new(1, 0)));
    }
}

// ── NoopBehavior ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod noop_tests {
    use crate::NoopBehavior;

    use super::*;

    #[test]
    fn parks_the_car() {
        let mut world = World::from_rows(&[">>>D"]);
        let mut car = world.car(0, Coord::new(0, 0));
        let before = car.clone();
        let log = world.drive(&NoopBehavior, &mut car, &mut rng(), 5);
        assert!(log.iter().all(Vec::is_empty));
        assert_eq!(car, before);
    }
}

// ── Destination policy ────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use crate::{alternatives_by_distance, choose_destination};

    use super::*;

    #[test]
    fn nearest_breaks_ties_by_order() {
        let dests = [Coord::new(0, 2), Coord::new(2, 0), Coord::new(5, 5)];
        let pick = choose_destination(DestinationPolicy::Nearest, Coord::new(0, 0), &dests, &mut rng());
        assert_eq!(pick, Some(Coord::new(0, 2)));
    }

    #[test]
    fn random_is_deterministic_per_car() {
        let dests: Vec<Coord> = (0..10).map(|x| Coord::new(x, 0)).collect();
        let pick = |car| {
            let mut r = CarRng::new(99, CarId(car));
            choose_destination(DestinationPolicy::Random, Coord::new(0, 0), &dests, &mut r)
        };
        assert_eq!(pick(3), pick(3));
        assert!(pick(3).is_some_and(|d| dests.contains(&d)));
    }

    #[test]
    fn no_destinations() {
        for policy in [DestinationPolicy::Nearest, DestinationPolicy::Random] {
            assert_eq!(choose_destination(policy, Coord::new(0, 0), &[], &mut rng()), None);
        }
    }

    #[test]
    fn alternatives_exclude_current() {
        let dests = [Coord::new(9, 0), Coord::new(1, 0), Coord::new(0, 3)];
        let alts = alternatives_by_distance(Coord::new(0, 0), Some(Coord::new(1, 0)), &dests);
        assert_eq!(alts, vec![Coord::new(0, 3), Coord::new(9, 0)]);
    }
}

// ── LayeredDriver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use ct_agent::RetireReason;

    use super::*;

    #[test]
    fn rejects_zero_thresholds() {
        let cfg = DriverConfig { stuck_threshold: 0, ..DriverConfig::default() };
        assert!(LayeredDriver::new(cfg, DestinationPolicy::Nearest).is_err());
        let cfg = DriverConfig { max_path_failures: 0, ..DriverConfig::default() };
        assert!(LayeredDriver::new(cfg, DestinationPolicy::Random).is_err());
    }

    #[test]
    fn first_decision_plans_and_steps() {
        let mut world = World::from_rows(&[">>>D"]);
        let car = world.car(0, Coord::new(0, 0));
        let update = nearest_driver().decide(&car, &world.ctx(), &mut rng());

        assert_eq!(update.intents, vec![Intent::MoveTo(Coord::new(1, 0))]);
        assert_eq!(update.state.destination, Some(Coord::new(3, 0)));
        assert_eq!(update.state.position, Coord::new(1, 0));
        assert_eq!(update.state.path, [Coord::new(2, 0), Coord::new(3, 0)]);
        assert_eq!(update.state.facing, Direction::Right);
        assert_eq!(car.position, Coord::new(0, 0), "input state untouched");
    }

    #[test]
    fn drives_to_destination_and_retires() {
        let mut world = World::from_rows(&[">>>D"]);
        let mut car = world.car(0, Coord::new(0, 0));
        let log = world.drive(&nearest_driver(), &mut car, &mut rng(), 10);

        assert_eq!(log.len(), 3, "three moves, retiring on the last");
        assert_eq!(
            log[2],
            vec![Intent::MoveTo(Coord::new(3, 0)), Intent::Retire(RetireReason::Arrived)]
        );
        assert_eq!(car.retired, Some(RetireReason::Arrived));
        assert_eq!(car.facing, Direction::Right, "movement direction on a road-less cell");
    }

    #[test]
    fn blocked_car_waits_and_keeps_path() {
        let mut world = World::from_rows(&[">>>D"]);
        world.car(7, Coord::new(1, 0));
        let car = world.car(0, Coord::new(0, 0));

        let update = nearest_driver().decide(&car, &world.ctx(), &mut rng());
        assert!(update.intents.is_empty());
        assert_eq!(update.state.position, Coord::new(0, 0));
        assert_eq!(update.state.path.len(), 3, "path retained while waiting");
    }

    #[test]
    fn red_light_holds_until_green() {
        let mut world = World::from_rows(&[">>>D"]);
        let light = world.add_light(Coord::new(1, 0), false);
        let mut car = world.car(0, Coord::new(0, 0));
        let driver = nearest_driver();
        let mut rng = rng();

        let log = world.drive(&driver, &mut car, &mut rng, 3);
        assert!(log.iter().all(Vec::is_empty), "no advance while red");
        assert_eq!(car.path.len(), 3);

        world.signals.update(Tick(100));
        assert!(world.signals.is_green(light));
        let log = world.drive(&driver, &mut car, &mut rng, 1);
        assert_eq!(log[0], vec![Intent::MoveTo(Coord::new(1, 0))]);
    }

    #[test]
    fn stuck_car_reroutes_around_traffic() {
        let mut world = World::from_rows(&[
            ">>>>>",
            ">>>>D",
        ]);
        world.car(9, Coord::new(2, 0));
        let mut car = world.car(0, Coord::new(0, 0));
        let driver = nearest_driver();
        let mut rng = rng();

        world.drive(&driver, &mut car, &mut rng, 11);
        assert_eq!(car.position, Coord::new(1, 0), "queued behind the parked car");

        world.drive(&driver, &mut car, &mut rng, 1);
        assert_eq!(car.position, Coord::new(2, 1), "took the free lane");
        assert_eq!(car.wait_ticks, 0);

        world.drive(&driver, &mut car, &mut rng, 5);
        assert_eq!(car.retired, Some(RetireReason::Arrived));
    }

    #[test]
    fn failed_reroute_keeps_old_path() {
        let mut world = World::from_rows(&[">>>D"]);
        world.car(9, Coord::new(2, 0));
        let mut car = world.car(0, Coord::new(0, 0));
        let driver = nearest_driver();
        let mut rng = rng();

        world.drive(&driver, &mut car, &mut rng, 12);
        assert_eq!(car.position, Coord::new(1, 0));
        assert_eq!(car.path, [Coord::new(2, 0), Coord::new(3, 0)]);
        assert_eq!(car.wait_ticks, 0, "counter resets even when the reroute fails");
    }

    #[test]
    fn unreachable_after_repeated_failures() {
        let mut world = World::from_rows(&["<<D"]);
        let mut car = world.car(0, Coord::new(0, 0));
        let log = world.drive(&nearest_driver(), &mut car, &mut rng(), 10);

        assert_eq!(log.len(), 5);
        assert!(log[..4].iter().all(Vec::is_empty));
        assert_eq!(log[4], vec![Intent::Retire(RetireReason::Unreachable)]);
        assert_eq!(car.retired, Some(RetireReason::Unreachable));
    }

    #[test]
    fn switches_to_reachable_destination() {
        let mut world = World::from_rows(&["D#>>>D"]);
        let mut car = world.car(0, Coord::new(2, 0));
        let driver = nearest_driver();
        let mut rng = rng();

        world.drive(&driver, &mut car, &mut rng, 4);
        assert_eq!(car.destination, Some(Coord::new(0, 0)), "nearest first");
        assert_eq!(car.path_failures, 4);

        let log = world.drive(&driver, &mut car, &mut rng, 1);
        assert_eq!(car.destination, Some(Coord::new(5, 0)));
        assert_eq!(car.path_failures, 0);
        assert_eq!(log[0], vec![Intent::MoveTo(Coord::new(3, 0))]);
    }

    #[test]
    fn no_destinations_means_no_movement() {
        let mut world = World::from_rows(&[">>>>"]);
        let mut car = world.car(0, Coord::new(0, 0));
        let log = world.drive(&nearest_driver(), &mut car, &mut rng(), 3);
        assert!(log.iter().all(Vec::is_empty));
        assert!(car.destination.is_none());
    }

    #[test]
    fn never_enters_obstacle_or_foreign_destination() {
        let mut world = World::from_rows(&[
            ">>>>>",
            ">>D#D",
        ]);
        let mut car = world.car(0, Coord::new(0, 1));
        car.destination = Some(Coord::new(4, 0));
        let mut rng = rng();
        for _ in 0..10 {
            world.drive(&nearest_driver(), &mut car, &mut rng, 1);
            assert_ne!(car.position, Coord::new(2, 0));
            assert_ne!(car.position, Coord::new(3, 0));
        }
        assert_eq!(car.retired, Some(RetireReason::Arrived));
    }

    #[test]
    fn idempotent_on_unchanged_world() {
        let mut world = World::from_rows(&[
            ">>>>>",
            ">>>>D",
        ]);
        let car = world.car(0, Coord::new(0, 1));
        let driver = nearest_driver();
        let a = driver.decide(&car, &world.ctx(), &mut rng());
        let b = driver.decide(&car, &world.ctx(), &mut rng());
        assert_eq!(a, b);
    }
}
