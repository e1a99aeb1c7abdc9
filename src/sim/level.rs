//! Brick layouts
//!
//! A level is built from a rectangular grid of tile codes:
//! - `0`: empty
//! - `1`: solid (indestructible, never spawns power-ups)
//! - `2..=5`: destructible, one color each
//!
//! Anything above 5 is a plain white destructible brick.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::GameObject;
use crate::resources::Textures;

/// Rejected level definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level has no tiles")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid tile code {token:?}")]
    InvalidTile { line: usize, token: String },
}

/// Rectangular grid of tile codes, row-major, top row first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct TileGrid {
    rows: Vec<Vec<u8>>,
}

impl TryFrom<Vec<Vec<u8>>> for TileGrid {
    type Error = LevelError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<TileGrid> for Vec<Vec<u8>> {
    fn from(grid: TileGrid) -> Self {
        grid.rows
    }
}

impl TileGrid {
    /// Validate that the grid is non-empty and rectangular
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, LevelError> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LevelError::Empty),
        };
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(LevelError::Ragged {
                row,
                expected,
                found: r.len(),
            });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Parse whitespace-separated tile codes, one row per non-blank line
pub fn parse_tiles(text: &str) -> Result<TileGrid, LevelError> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u8>().map_err(|_| LevelError::InvalidTile {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    TileGrid::new(rows)
}

/// Color for a destructible tile code
fn brick_color(code: u8) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// One playable layout and its live bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    definition: TileGrid,
    width: f32,
    height: f32,
    textures: Textures,
    bricks: Vec<GameObject>,
}

impl Level {
    /// Build a level scaled to `width` x `height` pixels
    pub fn new(definition: TileGrid, width: f32, height: f32, textures: &Textures) -> Self {
        let mut level = Self {
            definition,
            width,
            height,
            textures: *textures,
            bricks: Vec::new(),
        };
        level.reload();
        level
    }

    /// Discard all bricks and rebuild them from the stored definition
    pub fn reload(&mut self) {
        self.bricks.clear();

        let columns = self.definition.width();
        let rows = self.definition.height();
        let unit = Vec2::new(self.width / columns as f32, self.height / rows as f32);

        for (y, row) in self.definition.rows().iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let pos = unit * Vec2::new(x as f32, y as f32);
                match code {
                    0 => {}
                    1 => {
                        let mut brick = GameObject::new(
                            pos,
                            unit,
                            self.textures.block_solid,
                            SOLID_COLOR,
                            Vec2::ZERO,
                        );
                        brick.solid = true;
                        self.bricks.push(brick);
                    }
                    _ => self.bricks.push(GameObject::new(
                        pos,
                        unit,
                        self.textures.block,
                        brick_color(code),
                        Vec2::ZERO,
                    )),
                }
            }
        }

        log::debug!(
            "Level built: {}x{} tiles, {} bricks ({} breakable)",
            columns,
            rows,
            self.bricks.len(),
            self.remaining()
        );
    }

    /// True once every non-solid brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Breakable bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    }

    pub fn bricks(&self) -> &[GameObject] {
        &self.bricks
    }

    /// Mutable access to existing bricks; the set itself only changes on reload
    pub fn bricks_mut(&mut self) -> &mut [GameObject] {
        &mut self.bricks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TextureRegistry;

    fn textures() -> Textures {
        Textures::resolve(&mut TextureRegistry::new())
    }

    #[test]
    fn test_parse_tiles() {
        let grid = parse_tiles("1 0 2\n\n3 4 5\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows()[1], vec![3, 4, 5]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_tiles("  \n\n"), Err(LevelError::Empty));
        assert_eq!(
            parse_tiles("1 1\n1 1 1"),
            Err(LevelError::Ragged {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert!(matches!(
            parse_tiles("1 x"),
            Err(LevelError::InvalidTile { line: 1, .. })
        ));
    }

    #[test]
    fn test_level_layout() {
        let grid = parse_tiles("1 0 2 3\n4 5 0 9").unwrap();
        let level = Level::new(grid, 800.0, 300.0, &textures());

        assert_eq!(level.bricks().len(), 6);
        let solid = &level.bricks()[0];
        assert!(solid.solid);
        assert_eq!(solid.pos, Vec2::ZERO);
        assert_eq!(solid.size, Vec2::new(200.0, 150.0));

        let last = level.bricks().last().unwrap();
        assert_eq!(last.pos, Vec2::new(600.0, 150.0));
        assert_eq!(last.color, Vec3::ONE);
        assert_eq!(level.remaining(), 5);
    }

    #[test]
    fn test_completion_ignores_solid_bricks() {
        let grid = parse_tiles("1 2\n1 3").unwrap();
        let mut level = Level::new(grid, 100.0, 100.0, &textures());
        assert!(!level.is_completed());

        for brick in level.bricks_mut().iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());

        level.reload();
        assert!(!level.is_completed());
        assert_eq!(level.remaining(), 2);
    }

    #[test]
    fn test_grid_json_is_validated() {
        let grid: TileGrid = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[[1,2],[3,4]]");
        assert!(serde_json::from_str::<TileGrid>("[[1, 2], [3]]").is_err());
        assert!(serde_json::from_str::<TileGrid>("[]").is_err());
    }

    #[test]
    fn test_all_solid_level_is_complete() {
        let grid = parse_tiles("1 1 1").unwrap();
        let level = Level::new(grid, 300.0, 50.0, &textures());
        assert!(level.is_completed());
    }
}
