//! Routing trait and the default breadth-first router.
//!
//! # Pluggability
//!
//! The car driver calls routing via the [`Router`] trait, so applications can
//! swap in other searches (A*, congestion-weighted) without touching the
//! decision layers.  The default [`BfsRouter`] finds the route with the
//! fewest moves under the [`MoveRules`].
//!
//! # Route shape
//!
//! A [`Route`] lists the cells to enter, in order, excluding the start and
//! ending with the goal.  `from == goal` yields an empty route.

use std::collections::VecDeque;

use ct_core::{CarId, Coord};

use crate::rules::MoveRules;
use crate::{Grid, GridError, GridResult};

/// Default bound on node expansions per search.
pub const DEFAULT_MAX_EXPANSIONS: usize = 10_000;

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    /// Cells to enter, from the first step to the goal.
    pub cells: Vec<Coord>,
}

impl Route {
    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the start already was the goal.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<Coord> {
        self.cells
    }
}

// ── RouteQuery ────────────────────────────────────────────────────────────────

/// One routing request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RouteQuery {
    pub from:           Coord,
    pub goal:           Coord,
    /// The car asking; its own cell never counts as occupied.
    pub car:            CarId,
    /// Treat cells holding other cars as temporary obstacles.
    pub avoid_cars:     bool,
    pub max_expansions: usize,
}

impl RouteQuery {
    pub fn new(from: Coord, goal: Coord, car: CarId) -> Self {
        Self { from, goal, car, avoid_cars: false, max_expansions: DEFAULT_MAX_EXPANSIONS }
    }

    pub fn avoiding_cars(mut self, avoid: bool) -> Self {
        self.avoid_cars = avoid;
        self
    }

    pub fn max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }

    pub fn rules<'a>(&self, grid: &'a Grid) -> MoveRules<'a> {
        MoveRules::new(grid, self.goal, self.car).avoiding_cars(self.avoid_cars)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be deterministic: the same grid and query always
/// produce the same route.
pub trait Router {
    /// Compute a route for `query` on the current grid.
    ///
    /// Returns [`GridError::NoRoute`] if the goal is unreachable and
    /// [`GridError::SearchExhausted`] if the expansion bound was hit first.
    fn route(&self, grid: &Grid, query: &RouteQuery) -> GridResult<Route>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Breadth-first search over grid cells.
///
/// Successors are generated in the fixed order of
/// [`MoveRules::successors`], and the goal is tested when a cell is first
/// discovered, so among equally short routes the result is always the same.
#[derive(Copy, Clone, Debug, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, grid: &Grid, query: &RouteQuery) -> GridResult<Route> {
        bfs(grid, query)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

fn bfs(grid: &Grid, query: &RouteQuery) -> GridResult<Route> {
    let RouteQuery { from, goal, .. } = *query;
    if from == goal {
        return Ok(Route::default());
    }
    if !grid.in_bounds(from) || !grid.in_bounds(goal) {
        return Err(GridError::NoRoute { from, to: goal });
    }

    let width = grid.width() as usize;
    let slot = |c: Coord| c.y as usize * width + c.x as usize;

    // parent[v] = cell v was discovered from; the start points at itself.
    let mut parent: Vec<Option<Coord>> = vec![None; width * grid.height() as usize];
    parent[slot(from)] = Some(from);

    let rules = query.rules(grid);
    let mut queue = VecDeque::from([from]);
    let mut expansions = 0usize;

    while let Some(cell) = queue.pop_front() {
        if expansions >= query.max_expansions {
            return Err(GridError::SearchExhausted { from, to: goal, expansions });
        }
        expansions += 1;

        for next in rules.successors(cell) {
            let s = slot(next);
            if parent[s].is_some() {
                continue;
            }
            parent[s] = Some(cell);
            if next == goal {
                return Ok(reconstruct(&parent, slot, from, goal));
            }
            queue.push_back(next);
        }
    }

    Err(GridError::NoRoute { from, to: goal })
}

fn reconstruct(
    parent: &[Option<Coord>],
    slot: impl Fn(Coord) -> usize,
    from: Coord,
    goal: Coord,
) -> Route {
    let mut cells = vec![goal];
    let mut cur = goal;
    while let Some(prev) = parent[slot(cur)] {
        if prev == from {
            break;
        }
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    Route { cells }
}
