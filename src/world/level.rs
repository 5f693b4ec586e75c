//! Level maps loaded from character grids
//!
//! `.` is an empty cell, any other glyph is a wall. Ragged rows are
//! right-padded with wall to the longest row's width, so the map's own
//! border defines the playable bounds.

use std::path::Path;

use crate::core::error::{GridError, Result};
use crate::world::cell::Cell;

/// Wall layout parsed from a character grid
#[derive(Debug, Clone)]
pub struct LevelMap {
    pub size_x: i32,
    pub size_y: i32,
    /// Row-major, `size_x * size_y` cells, walls and empties only
    pub cells: Vec<Cell>,
}

/// Parse a level map from text
///
/// Blank lines are skipped. Fails on maps too small to hold any interior.
pub fn parse(text: &str) -> Result<LevelMap> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        rows.push(
            line.chars()
                .map(|c| if c == '.' { Cell::Empty } else { Cell::Wall })
                .collect(),
        );
    }

    let size_x = rows.iter().map(Vec::len).max().unwrap_or(0);
    let size_y = rows.len();
    if size_x < 3 || size_y < 3 {
        return Err(GridError::LevelLoad(format!(
            "map {size_x}x{size_y} leaves no interior"
        )));
    }

    let mut cells = Vec::with_capacity(size_x * size_y);
    for mut row in rows {
        row.resize(size_x, Cell::Wall);
        cells.extend(row);
    }

    Ok(LevelMap {
        size_x: size_x as i32,
        size_y: size_y as i32,
        cells,
    })
}

/// Read and parse a level map file
pub fn load(path: &Path) -> Result<LevelMap> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_map() {
        let map = parse("####\n#..#\n####\n").unwrap();
        assert_eq!(map.size_x, 4);
        assert_eq!(map.size_y, 3);
        assert_eq!(map.cells[0], Cell::Wall);
        assert_eq!(map.cells[5], Cell::Empty);
    }

    #[test]
    fn test_ragged_rows_padded_with_wall() {
        let map = parse("#####\n#..\n#####\n").unwrap();
        assert_eq!(map.size_x, 5);
        // the short row's missing tail is wall
        assert_eq!(map.cells[(map.size_x + 3) as usize], Cell::Wall);
        assert_eq!(map.cells[(map.size_x + 4) as usize], Cell::Wall);
        assert_eq!(map.cells[(map.size_x + 1) as usize], Cell::Empty);
    }

    #[test]
    fn test_any_non_dot_glyph_is_wall() {
        let map = parse("xyz\n.a.\n###\n").unwrap();
        assert_eq!(map.cells[0], Cell::Wall);
        assert_eq!(map.cells[3], Cell::Empty);
        assert_eq!(map.cells[4], Cell::Wall);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let map = parse("\n###\n#.#\n\n###\n").unwrap();
        assert_eq!(map.size_y, 3);
    }

    #[test]
    fn test_empty_or_degenerate_map_rejected() {
        assert!(parse("").is_err());
        assert!(parse("##\n##\n").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load(Path::new("/nonexistent/level.txt")).is_err());
    }
}
