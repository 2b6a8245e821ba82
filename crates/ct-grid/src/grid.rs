//! Bounded multi-occupancy grid.
//!
//! # Data layout
//!
//! Cells are stored densely in a `Vec<Vec<Entity>>` indexed by
//! `y * width + x`; each cell keeps its occupants in insertion order.  A
//! reverse index (`FxHashMap<Entity, Coord>`) records where every entity
//! lives, so "where is car 7?" is O(1) and every mutation updates both views
//! together.  The two can never disagree because nothing outside this module
//! can touch either.
//!
//! # Enumeration order
//!
//! [`Grid::all_of_kind`] walks columns left to right and each column bottom to
//! top (x outer, y inner), then cell insertion order.  Destination choice and
//! corner spawning rely on this order being stable.

use rustc_hash::FxHashMap;

use ct_core::{CarId, Coord, DestinationId, Direction, LightId};

use crate::{Entity, EntityKind, GridError, GridResult};

/// The city grid: coordinate → ordered occupants, plus entity → coordinate.
#[derive(Clone, Debug)]
pub struct Grid {
    width:  i32,
    height: i32,
    cells:  Vec<Vec<Entity>>,
    index:  FxHashMap<Entity, Coord>,
}

impl Grid {
    /// Create an empty `width` × `height` grid.
    pub fn new(width: i32, height: i32) -> GridResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let cell_count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![Vec::new(); cell_count],
            index: FxHashMap::default(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Number of entities currently on the grid.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All coordinates in enumeration order (x outer, y inner).
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// The four corner cells: bottom-left, top-left, bottom-right, top-right.
    pub fn corners(&self) -> [Coord; 4] {
        let (w, h) = (self.width - 1, self.height - 1);
        [Coord::new(0, 0), Coord::new(0, h), Coord::new(w, 0), Coord::new(w, h)]
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Put `entity` into the cell at `coord`.
    ///
    /// Fails if `coord` is out of bounds or the entity is already somewhere
    /// on the grid.
    pub fn place(&mut self, entity: Entity, coord: Coord) -> GridResult<()> {
        let slot = self.slot(coord)?;
        if let Some(&at) = self.index.get(&entity) {
            return Err(GridError::AlreadyPlaced { entity, at });
        }
        self.cells[slot].push(entity);
        self.index.insert(entity, coord);
        Ok(())
    }

    /// Take `entity` off the grid, returning where it was.
    ///
    /// A no-op returning `None` if the entity is not on the grid.
    pub fn remove(&mut self, entity: Entity) -> Option<Coord> {
        let coord = self.index.remove(&entity)?;
        let slot = self.slot_unchecked(coord);
        let cell = &mut self.cells[slot];
        if let Some(pos) = cell.iter().position(|e| *e == entity) {
            cell.remove(pos);
        }
        Some(coord)
    }

    /// Move `entity` to `new_coord` as one step.
    ///
    /// On error the grid is left untouched.  Moving to the current cell is a
    /// no-op and keeps the entity's place in the cell order.
    pub fn move_to(&mut self, entity: Entity, new_coord: Coord) -> GridResult<()> {
        let new_slot = self.slot(new_coord)?;
        let old = *self.index.get(&entity).ok_or(GridError::NotPlaced(entity))?;
        if old == new_coord {
            return Ok(());
        }
        let old_slot = self.slot_unchecked(old);
        if let Some(pos) = self.cells[old_slot].iter().position(|e| *e == entity) {
            self.cells[old_slot].remove(pos);
        }
        self.cells[new_slot].push(entity);
        self.index.insert(entity, new_coord);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Occupants of `coord` in insertion order; empty when out of bounds.
    pub fn contents(&self, coord: Coord) -> &[Entity] {
        match self.slot(coord) {
            Ok(slot) => &self.cells[slot],
            Err(_)   => &[],
        }
    }

    /// Where `entity` is, if it is on the grid.
    #[inline]
    pub fn position_of(&self, entity: Entity) -> Option<Coord> {
        self.index.get(&entity).copied()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Every entity of `kind` with its coordinate, in enumeration order.
    pub fn all_of_kind(&self, kind: EntityKind) -> Vec<(Entity, Coord)> {
        self.coords()
            .flat_map(|coord| {
                self.contents(coord)
                    .iter()
                    .filter(move |e| e.kind() == kind)
                    .map(move |&e| (e, coord))
            })
            .collect()
    }

    /// Direction of the road at `coord`, if there is one.
    pub fn road_direction(&self, coord: Coord) -> Option<Direction> {
        self.contents(coord).iter().find_map(|e| match e {
            Entity::Road(_, dir) => Some(*dir),
            _ => None,
        })
    }

    #[inline]
    pub fn has_road(&self, coord: Coord) -> bool {
        self.road_direction(coord).is_some()
    }

    pub fn has_obstacle(&self, coord: Coord) -> bool {
        self.contents(coord).iter().any(|e| e.kind() == EntityKind::Obstacle)
    }

    pub fn destination_at(&self, coord: Coord) -> Option<DestinationId> {
        self.contents(coord).iter().find_map(|e| match e {
            Entity::Destination(id) => Some(*id),
            _ => None,
        })
    }

    pub fn light_at(&self, coord: Coord) -> Option<LightId> {
        self.contents(coord).iter().find_map(|e| match e {
            Entity::TrafficLight(id) => Some(*id),
            _ => None,
        })
    }

    /// The first car in the cell, if any.
    pub fn car_at(&self, coord: Coord) -> Option<CarId> {
        self.contents(coord).iter().find_map(|e| match e {
            Entity::Car(id) => Some(*id),
            _ => None,
        })
    }

    /// `true` if a car other than `me` is in the cell.
    pub fn has_other_car(&self, coord: Coord, me: CarId) -> bool {
        self.contents(coord)
            .iter()
            .any(|e| matches!(e, Entity::Car(id) if *id != me))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn slot(&self, coord: Coord) -> GridResult<usize> {
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(self.slot_unchecked(coord))
    }

    #[inline]
    fn slot_unchecked(&self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }
}
