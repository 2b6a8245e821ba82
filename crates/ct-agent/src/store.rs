//! Car storage: `CarStore` (live car states) and the per-car RNGs beside it.
//!
//! # Ordering
//!
//! Cars are stored in creation order and IDs are handed out in increasing
//! order and never reused, so the live list is always sorted by ID.  The
//! scheduler walks it front to back each tick, which makes "earlier car
//! wins" deterministic.
//!
//! # Why RNGs are stored apart
//!
//! A behavior model reads a car's state while drawing from that car's RNG.
//! Keeping the RNGs in a parallel `Vec` lets the scheduler hand out
//! `&CarState` and `&mut CarRng` for the same car at once:
//!
//! ```ignore
//! let (state, rng) = store.split_mut(i);
//! let update = behavior.decide(state, &ctx, rng);
//! ```

use ct_core::{CarId, CarRng, Coord, Direction};

use crate::CarState;

/// Live cars in creation order, each with its own deterministic RNG.
pub struct CarStore {
    cars:        Vec<CarState>,
    rngs:        Vec<CarRng>,
    next_id:     u32,
    global_seed: u64,
}

impl CarStore {
    pub fn new(global_seed: u64) -> Self {
        Self { cars: Vec::new(), rngs: Vec::new(), next_id: 0, global_seed }
    }

    /// Create a car at `position` and return its ID.
    pub fn spawn(&mut self, position: Coord, facing: Direction) -> CarId {
        let id = CarId(self.next_id);
        self.next_id += 1;
        self.cars.push(CarState::new(id, position, facing));
        self.rngs.push(CarRng::new(self.global_seed, id));
        id
    }

    /// The ID the next [`spawn`](Self::spawn) will hand out.
    #[inline]
    pub fn next_id(&self) -> CarId {
        CarId(self.next_id)
    }

    /// Total cars ever created.
    #[inline]
    pub fn created(&self) -> u64 {
        self.next_id as u64
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn get(&self, id: CarId) -> Option<&CarState> {
        let i = self.find(id)?;
        Some(&self.cars[i])
    }

    /// State and RNG of the car at `index`, borrowed together.
    #[inline]
    pub fn split_mut(&mut self, index: usize) -> (&mut CarState, &mut CarRng) {
        (&mut self.cars[index], &mut self.rngs[index])
    }

    /// Live cars in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &CarState> {
        self.cars.iter()
    }

    pub fn as_slice(&self) -> &[CarState] {
        &self.cars
    }

    /// Remove every retired car, returning them in creation order.
    pub fn sweep_retired(&mut self) -> Vec<CarState> {
        if !self.cars.iter().any(CarState::is_retired) {
            return Vec::new();
        }
        let mut retired = Vec::new();
        let mut kept_cars = Vec::with_capacity(self.cars.len());
        let mut kept_rngs = Vec::with_capacity(self.rngs.len());
        for (car, rng) in self.cars.drain(..).zip(self.rngs.drain(..)) {
            if car.is_retired() {
                retired.push(car);
            } else {
                kept_cars.push(car);
                kept_rngs.push(rng);
            }
        }
        self.cars = kept_cars;
        self.rngs = kept_rngs;
        retired
    }

    fn find(&self, id: CarId) -> Option<usize> {
        self.cars.binary_search_by_key(&id, |c| c.id).ok()
    }
}
