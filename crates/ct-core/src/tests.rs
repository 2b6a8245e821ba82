//! Unit tests for ct-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, LightId, RoadId};

    #[test]
    fn index_roundtrip() {
        let id = CarId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CarId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CarId(0) < CarId(1));
        assert!(RoadId(100) > RoadId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CarId::INVALID.0, u32::MAX);
        assert_eq!(LightId::INVALID.0, u32::MAX);
        assert_eq!(CarId::default(), CarId::INVALID);
    }

    #[test]
    fn display_and_label() {
        assert_eq!(CarId(7).to_string(), "CarId(7)");
        assert_eq!(CarId(7).label(), "car_7");
        assert_eq!(LightId(3).label(), "tl_3");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Coord, Direction};

    #[test]
    fn up_is_positive_y() {
        let c = Coord::new(2, 2);
        assert_eq!(c.step(Direction::Up), Coord::new(2, 3));
        assert_eq!(c.step(Direction::Down), Coord::new(2, 1));
        assert_eq!(c.step(Direction::Right), Coord::new(3, 2));
        assert_eq!(c.step(Direction::Left), Coord::new(1, 2));
    }

    #[test]
    fn step_can_leave_the_grid() {
        assert_eq!(Coord::new(0, 0).step(Direction::Left), Coord::new(-1, 0));
    }

    #[test]
    fn rotations() {
        for dir in Direction::SEARCH_ORDER {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.right_of().left_of(), dir);
            assert_eq!(dir.right_of().right_of(), dir.opposite());
        }
        assert_eq!(Direction::Up.right_of(), Direction::Right);
        assert_eq!(Direction::Up.left_of(), Direction::Left);
        assert_eq!(Direction::Right.right_of(), Direction::Down);
    }

    #[test]
    fn delta_roundtrip() {
        for dir in Direction::SEARCH_ORDER {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn distance_and_delta() {
        let a = Coord::new(0, 0);
        assert_eq!(a.distance_sq(Coord::new(3, 4)), 25);
        assert_eq!(a.delta_to(Coord::new(-1, 2)), (-1, 2));
        assert_eq!(a.offset(1, -1), Coord::new(1, -1));
    }

    #[test]
    fn parse_direction() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" Left ".parse::<Direction>(), Ok(Direction::Left));
        assert!("North".parse::<Direction>().is_err());
        assert_eq!(Direction::Down.to_string(), "Down");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_advances() {
        assert_eq!(Tick(10).next(), Tick(11));
        assert_eq!(Tick::ZERO.next().to_string(), "T1");
    }

    #[test]
    fn cadence() {
        assert!(Tick(10).is_due(5));
        assert!(!Tick(11).is_due(5));
        assert!(Tick(0).is_due(3));
        assert!(!Tick(10).is_due(0), "a zero period never fires");
    }
}

#[cfg(test)]
mod rng {
    use crate::{CarId, CarRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = CarRng::new(12345, CarId(0));
        let mut r2 = CarRng::new(12345, CarId(0));
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1000);
            let b: u32 = r2.gen_range(0..1000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_cars_differ() {
        let mut r0 = CarRng::new(1, CarId(0));
        let mut r1 = CarRng::new(1, CarId(1));
        let a: Vec<u64> = (0..8).map(|_| r0.gen_range(0..u64::MAX)).collect();
        let b: Vec<u64> = (0..8).map(|_| r1.gen_range(0..u64::MAX)).collect();
        assert_ne!(a, b, "seeds for adjacent cars should diverge");
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = CarRng::new(0, CarId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SimRng::new(7);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod config {
    use crate::{SimConfig, SpawnPoints};

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.driver.stuck_threshold, 10);
        assert_eq!(cfg.driver.max_path_failures, 5);
        assert_eq!(cfg.saturation_waves, 5);
        assert!(cfg.holds_until_first_spawn());
    }

    #[test]
    fn zero_spawn_interval_rejected() {
        let cfg = SimConfig { spawn_interval: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_random_wave_rejected() {
        let cfg = SimConfig {
            spawn_points: SpawnPoints::RandomRoads { per_wave: 0 },
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn fixed_points_do_not_hold_cars() {
        let cfg = SimConfig {
            spawn_points: SpawnPoints::Fixed(vec![]),
            ..SimConfig::default()
        };
        assert!(!cfg.holds_until_first_spawn());
    }
}
