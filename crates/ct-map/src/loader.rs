//! Text city-map loader.
//!
//! # Map format
//!
//! One line per grid row, one character per cell, every line the same
//! length.  The first line is the top of the map:
//!
//! ```text
//! y = height - row_index - 1
//! ```
//!
//! Trailing `\r` on each line and trailing blank lines are ignored.
//!
//! # Traffic-light cells
//!
//! A light symbol also puts a road under the light so cars can drive through
//! it.  The road direction is taken from the neighbouring road symbols,
//! checked left, right, top, bottom: a horizontal neighbour pointing left or
//! right, or a vertical neighbour pointing up or down, donates its direction.
//! A light with no such neighbour defaults to `Right`.

use std::io::Read;
use std::path::Path;

use log::warn;

use ct_core::{Coord, Direction};

use crate::legend::{Legend, LightSymbol, Symbol};
use crate::{MapError, MapResult};

/// One parsed map cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Road(Direction),
    /// A light on top of a road travelling in `road`.
    Light { road: Direction, light: LightSymbol },
    Obstacle,
    Destination,
}

impl MapCell {
    /// Direction of the road in this cell, including the road under a light.
    pub fn road(self) -> Option<Direction> {
        match self {
            MapCell::Road(dir) | MapCell::Light { road: dir, .. } => Some(dir),
            _ => None,
        }
    }
}

/// A parsed, rectangular city map in grid coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CityMap {
    width:  i32,
    height: i32,
    /// Indexed `y * width + x`.
    cells:  Vec<MapCell>,
}

impl CityMap {
    /// Parse map text with `legend`.
    pub fn parse(text: &str, legend: &Legend) -> MapResult<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(MapError::Empty);
        }
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != width {
                return Err(MapError::Ragged { row, expected: width, found: chars.len() });
            }
        }

        let height = rows.len();
        let mut cells = vec![MapCell::Empty; width * height];
        for (row, chars) in rows.iter().enumerate() {
            let y = height - row - 1;
            for (col, &ch) in chars.iter().enumerate() {
                let symbol = legend
                    .classify(ch)
                    .ok_or(MapError::UnknownSymbol { ch, row, col })?;
                cells[y * width + col] = match symbol {
                    Symbol::Empty       => MapCell::Empty,
                    Symbol::Road(dir)   => MapCell::Road(dir),
                    Symbol::Obstacle    => MapCell::Obstacle,
                    Symbol::Destination => MapCell::Destination,
                    Symbol::Light(light) => MapCell::Light {
                        road: light_road_direction(&rows, row, col, legend),
                        light,
                    },
                };
            }
        }

        Ok(Self { width: width as i32, height: height as i32, cells })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The cell at `coord`; `Empty` outside the map.
    pub fn cell(&self, coord: Coord) -> MapCell {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return MapCell::Empty;
        }
        self.cells[coord.y as usize * self.width as usize + coord.x as usize]
    }

    /// Every cell with its coordinate, x outer and y inner.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, MapCell)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| {
                let c = Coord::new(x, y);
                (c, self.cell(c))
            })
        })
    }

    /// Number of drivable cells (roads, including those under lights).
    pub fn road_count(&self) -> usize {
        self.cells.iter().filter(|c| c.road().is_some()).count()
    }
}

/// Load a map file with `legend`.
pub fn load_map(path: &Path, legend: &Legend) -> MapResult<CityMap> {
    let file = std::fs::File::open(path)?;
    load_map_reader(file, legend)
}

/// Like [`load_map`] but accepts any `Read` source.
pub fn load_map_reader<R: Read>(mut reader: R, legend: &Legend) -> MapResult<CityMap> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    CityMap::parse(&text, legend)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn light_road_direction(rows: &[Vec<char>], row: usize, col: usize, legend: &Legend) -> Direction {
    let at = |r: Option<usize>, c: Option<usize>| -> Option<Direction> {
        let ch = *rows.get(r?)?.get(c?)?;
        legend.road(ch)
    };
    let left   = at(Some(row), col.checked_sub(1));
    let right  = at(Some(row), col.checked_add(1));
    let top    = at(row.checked_sub(1), Some(col));
    let bottom = at(row.checked_add(1), Some(col));

    let horizontal = |d: Option<Direction>| d.filter(|d| d.is_horizontal());
    let vertical   = |d: Option<Direction>| d.filter(|d| !d.is_horizontal());

    horizontal(left)
        .or_else(|| horizontal(right))
        .or_else(|| vertical(top))
        .or_else(|| vertical(bottom))
        .unwrap_or_else(|| {
            warn!("light at row {row}, column {col} has no road neighbour; defaulting to Right");
            Direction::Right
        })
}
