//! Map symbol legend.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "roads":  { ">": "Right", "<": "Left", "^": "Up", "v": "Down" },
//!   "lights": { "S": { "starts_green": false, "period": 15 },
//!               "s": { "starts_green": true,  "period": 7 } },
//!   "obstacle":    "#",
//!   "destination": "D",
//!   "empty":       "."
//! }
//! ```
//!
//! Every field is optional; missing fields keep the default legend's value.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ct_core::Direction;

use crate::{MapError, MapResult};

/// Initial phase and toggle period of a traffic-light symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSymbol {
    pub starts_green: bool,
    pub period:       u64,
}

/// What one map character stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Empty,
    Road(Direction),
    Light(LightSymbol),
    Obstacle,
    Destination,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legend {
    pub roads:       BTreeMap<char, Direction>,
    pub lights:      BTreeMap<char, LightSymbol>,
    pub obstacle:    char,
    pub destination: char,
    pub empty:       char,
}

impl Default for Legend {
    fn default() -> Self {
        let roads = BTreeMap::from([
            ('>', Direction::Right),
            ('<', Direction::Left),
            ('^', Direction::Up),
            ('v', Direction::Down),
        ]);
        let lights = BTreeMap::from([
            ('S', LightSymbol { starts_green: false, period: 15 }),
            ('s', LightSymbol { starts_green: true,  period: 7 }),
        ]);
        Self { roads, lights, obstacle: '#', destination: 'D', empty: '.' }
    }
}

impl Legend {
    /// Load and validate a legend from a JSON file.
    pub fn from_json_file(path: &Path) -> MapResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Like [`Legend::from_json_file`] but accepts any `Read` source.
    pub fn from_json_reader<R: Read>(reader: R) -> MapResult<Self> {
        let legend: Legend = serde_json::from_reader(reader)?;
        legend.validate()?;
        Ok(legend)
    }

    /// Reject legends where one character means two things, or a light
    /// never toggles.
    pub fn validate(&self) -> MapResult<()> {
        let mut claimed: BTreeMap<char, &'static str> = BTreeMap::new();
        let mut claim = |ch: char, what: &'static str| -> MapResult<()> {
            match claimed.insert(ch, what) {
                Some(prev) => Err(MapError::Legend(format!(
                    "symbol {ch:?} is both {prev} and {what}"
                ))),
                None => Ok(()),
            }
        };
        for &ch in self.roads.keys() {
            claim(ch, "a road")?;
        }
        for (&ch, light) in &self.lights {
            claim(ch, "a traffic light")?;
            if light.period == 0 {
                return Err(MapError::Legend(format!("light {ch:?} has a zero period")));
            }
        }
        claim(self.obstacle, "the obstacle")?;
        claim(self.destination, "the destination")?;
        claim(self.empty, "the empty cell")?;
        Ok(())
    }

    /// Look up a map character.  `None` for characters the legend does not
    /// mention.
    pub fn classify(&self, ch: char) -> Option<Symbol> {
        if let Some(&dir) = self.roads.get(&ch) {
            return Some(Symbol::Road(dir));
        }
        if let Some(&light) = self.lights.get(&ch) {
            return Some(Symbol::Light(light));
        }
        match ch {
            c if c == self.obstacle    => Some(Symbol::Obstacle),
            c if c == self.destination => Some(Symbol::Destination),
            c if c == self.empty       => Some(Symbol::Empty),
            _ => None,
        }
    }

    /// Road direction of a map character, ignoring every other symbol kind.
    #[inline]
    pub fn road(&self, ch: char) -> Option<Direction> {
        self.roads.get(&ch).copied()
    }
}
