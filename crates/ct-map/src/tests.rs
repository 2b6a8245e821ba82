//! Unit tests for ct-map.

use std::io::Cursor;

use ct_core::{Coord, Direction};

use crate::{load_map_reader, CityMap, Legend, LightSymbol, MapCell, MapError, Symbol};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse(text: &str) -> CityMap {
    CityMap::parse(text, &Legend::default()).unwrap()
}

// ── Legend ────────────────────────────────────────────────────────────────────

#[test]
fn default_legend_symbols() {
    let legend = Legend::default();
    assert_eq!(legend.classify('>'), Some(Symbol::Road(Direction::Right)));
    assert_eq!(legend.classify('v'), Some(Symbol::Road(Direction::Down)));
    assert_eq!(
        legend.classify('S'),
        Some(Symbol::Light(LightSymbol { starts_green: false, period: 15 }))
    );
    assert_eq!(
        legend.classify('s'),
        Some(Symbol::Light(LightSymbol { starts_green: true, period: 7 }))
    );
    assert_eq!(legend.classify('#'), Some(Symbol::Obstacle));
    assert_eq!(legend.classify('D'), Some(Symbol::Destination));
    assert_eq!(legend.classify('.'), Some(Symbol::Empty));
    assert_eq!(legend.classify('?'), None);
    assert!(legend.validate().is_ok());
}

#[test]
fn legend_from_json_overrides_fields() {
    let json = r#"{
        "roads":  { "R": "Right", "L": "Left", "U": "Up", "W": "Down" },
        "lights": { "G": { "starts_green": true, "period": 4 } },
        "empty":  " "
    }"#;
    let legend = Legend::from_json_reader(Cursor::new(json)).unwrap();
    assert_eq!(legend.classify('R'), Some(Symbol::Road(Direction::Right)));
    assert_eq!(legend.classify('>'), None, "roads table replaced, not merged");
    assert_eq!(legend.classify(' '), Some(Symbol::Empty));
    assert_eq!(legend.classify('#'), Some(Symbol::Obstacle), "unset fields keep defaults");
}

#[test]
fn legend_rejects_conflicts() {
    let json = r##"{ "obstacle": ">" }"##;
    let err = Legend::from_json_reader(Cursor::new(json)).unwrap_err();
    assert!(matches!(err, MapError::Legend(_)));

    let mut legend = Legend::default();
    legend.lights.insert('S', LightSymbol { starts_green: false, period: 0 });
    assert!(legend.validate().is_err());
}

#[test]
fn legend_bad_json() {
    let err = Legend::from_json_reader(Cursor::new("{ not json")).unwrap_err();
    assert!(matches!(err, MapError::Json(_)));
}

// ── Map parsing ───────────────────────────────────────────────────────────────

#[test]
fn first_row_is_top() {
    let map = parse("D#\n>^\n");
    assert_eq!((map.width(), map.height()), (2, 2));
    assert_eq!(map.cell(Coord::new(0, 1)), MapCell::Destination);
    assert_eq!(map.cell(Coord::new(1, 1)), MapCell::Obstacle);
    assert_eq!(map.cell(Coord::new(0, 0)), MapCell::Road(Direction::Right));
    assert_eq!(map.cell(Coord::new(1, 0)), MapCell::Road(Direction::Up));
    assert_eq!(map.cell(Coord::new(5, 5)), MapCell::Empty);
}

#[test]
fn crlf_and_trailing_blank_lines_ignored() {
    let map = parse(">>\r\n..\r\n\r\n\n");
    assert_eq!((map.width(), map.height()), (2, 2));
    assert_eq!(map.road_count(), 2);
}

#[test]
fn empty_map_rejected() {
    assert!(matches!(CityMap::parse("", &Legend::default()), Err(MapError::Empty)));
    assert!(matches!(CityMap::parse("\n\n", &Legend::default()), Err(MapError::Empty)));
}

#[test]
fn ragged_map_rejected() {
    let err = CityMap::parse(">>>\n>>\n", &Legend::default()).unwrap_err();
    assert!(matches!(err, MapError::Ragged { row: 1, expected: 3, found: 2 }));
}

#[test]
fn unknown_symbol_reports_position() {
    let err = CityMap::parse("...\n.x.\n", &Legend::default()).unwrap_err();
    assert!(matches!(err, MapError::UnknownSymbol { ch: 'x', row: 1, col: 1 }));
}

#[test]
fn iteration_is_column_major() {
    let map = parse("><");
    let coords: Vec<Coord> = map.iter().map(|(c, _)| c).collect();
    assert_eq!(coords, vec![Coord::new(0, 0), Coord::new(1, 0)]);

    let tall = parse(">\n<\n");
    let cells: Vec<MapCell> = tall.iter().map(|(_, c)| c).collect();
    assert_eq!(
        cells,
        vec![MapCell::Road(Direction::Left), MapCell::Road(Direction::Right)],
        "y = 0 is the bottom row"
    );
}

#[test]
fn reader_loading() {
    let map = load_map_reader(Cursor::new("v.\nD#\n"), &Legend::default()).unwrap();
    assert_eq!(map.cell(Coord::new(0, 1)), MapCell::Road(Direction::Down));
}

// ── Traffic-light road inference ──────────────────────────────────────────────

fn light_road(text: &str, at: Coord) -> Direction {
    match parse(text).cell(at) {
        MapCell::Light { road, .. } => road,
        other => panic!("expected a light at {at}, got {other:?}"),
    }
}

#[test]
fn light_takes_horizontal_neighbour() {
    assert_eq!(light_road(">S.", Coord::new(1, 0)), Direction::Right);
    assert_eq!(light_road(".s<", Coord::new(1, 0)), Direction::Left);
}

#[test]
fn left_neighbour_wins_over_right() {
    assert_eq!(light_road("<S>", Coord::new(1, 0)), Direction::Left);
}

#[test]
fn light_takes_vertical_neighbour() {
    assert_eq!(light_road("v\nS\n.", Coord::new(0, 1)), Direction::Down);
    assert_eq!(light_road(".\nS\n^", Coord::new(0, 1)), Direction::Up);
}

#[test]
fn misaligned_neighbours_do_not_count() {
    // A vertical road beside the light says nothing about its direction.
    assert_eq!(light_road("^S.\n...", Coord::new(1, 1)), Direction::Right);
    assert_eq!(light_road("^S.\n.v.", Coord::new(1, 1)), Direction::Down);
}

#[test]
fn isolated_light_defaults_right() {
    assert_eq!(light_road("...\n.S.\n...", Coord::new(1, 1)), Direction::Right);
}

#[test]
fn light_cell_carries_phase_and_road() {
    let map = parse(">s>");
    match map.cell(Coord::new(1, 0)) {
        MapCell::Light { road, light } => {
            assert_eq!(road, Direction::Right);
            assert!(light.starts_green);
            assert_eq!(light.period, 7);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(map.road_count(), 3);
}
