//! Movement rules: which single-cell moves a car may make.
//!
//! The rules are evaluated against the static map (roads, obstacles,
//! destinations) and, in avoid-cars mode, against current car positions.
//! Traffic-light phase is deliberately not a movement rule: a red light
//! blocks a step, never a route.
//!
//! # Turns and lanes
//!
//! Let `D` be the road direction at the departure cell and `D2` the road
//! direction at the target.  When they differ the car is turning, and it must
//! be in the lane-correct position: the cell one step behind it (along
//! `-D`) shifted one lane towards the turn (along `D2`) must itself be a road
//! with direction `D`.  `D2 == -D` is a U-turn and never allowed.

use ct_core::{CarId, Coord, Direction};

use crate::Grid;

/// Diagonal offsets in search order: up-right, up-left, down-right, down-left.
pub const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// The move rules for one search: a grid view plus who is moving where.
#[derive(Copy, Clone, Debug)]
pub struct MoveRules<'a> {
    pub grid:       &'a Grid,
    pub goal:       Coord,
    pub car:        CarId,
    pub avoid_cars: bool,
}

impl<'a> MoveRules<'a> {
    pub fn new(grid: &'a Grid, goal: Coord, car: CarId) -> Self {
        Self { grid, goal, car, avoid_cars: false }
    }

    pub fn avoiding_cars(mut self, avoid: bool) -> Self {
        self.avoid_cars = avoid;
        self
    }

    /// Whether `to` may be entered at all, travelling in `travel` (if known).
    pub fn cell_admits(&self, to: Coord, travel: Option<Direction>) -> bool {
        let grid = self.grid;
        if !grid.in_bounds(to) || grid.has_obstacle(to) {
            return false;
        }
        let is_goal = to == self.goal;
        if !is_goal && grid.destination_at(to).is_some() {
            return false;
        }
        match grid.road_direction(to) {
            None if !is_goal => return false,
            Some(road) if travel == Some(road.opposite()) => return false,
            _ => {}
        }
        !(self.avoid_cars && grid.has_other_car(to, self.car))
    }

    /// Lane discipline for a transition between two road cells.
    pub fn turn_allowed(&self, from: Coord, to: Coord) -> bool {
        let (Some(d), Some(d2)) = (self.grid.road_direction(from), self.grid.road_direction(to))
        else {
            return true;
        };
        if d == d2 {
            return true;
        }
        if d2 == d.opposite() {
            return false;
        }
        let lane = from.step(d.opposite()).step(d2);
        self.grid.road_direction(lane) == Some(d)
    }

    /// A one-cell move along `dir`.
    pub fn orthogonal_ok(&self, from: Coord, dir: Direction) -> bool {
        let to = from.step(dir);
        self.cell_admits(to, Some(dir)) && self.turn_allowed(from, to)
    }

    /// A diagonal move by `(dx, dy)`, each component ±1.
    pub fn diagonal_ok(&self, from: Coord, dx: i32, dy: i32) -> bool {
        let to = from.offset(dx, dy);
        if to == self.goal {
            return false;
        }
        let road = match (self.grid.road_direction(from), self.grid.road_direction(to)) {
            (Some(a), Some(b)) if a == b => a,
            _ => return false,
        };
        let horizontal = if dx > 0 { Direction::Right } else { Direction::Left };
        let vertical   = if dy > 0 { Direction::Up } else { Direction::Down };
        // The along-road component must go with traffic.
        let along = if road.is_horizontal() { horizontal } else { vertical };
        if along != road || !self.cell_admits(to, Some(along)) {
            return false;
        }
        self.orthogonal_ok(from, horizontal) || self.orthogonal_ok(from, vertical)
    }

    /// Every legal successor of `from`, in search order.
    pub fn successors(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        let straight = Direction::SEARCH_ORDER
            .into_iter()
            .filter(move |&dir| self.orthogonal_ok(from, dir))
            .map(move |dir| from.step(dir));
        let diagonal = DIAGONALS
            .into_iter()
            .filter(move |&(dx, dy)| self.diagonal_ok(from, dx, dy))
            .map(move |(dx, dy)| from.offset(dx, dy));
        straight.chain(diagonal)
    }
}
