//! Level layouts
//!
//! A level file is a grid of whitespace-separated tile codes, one row per
//! line:
//! - `0`: empty
//! - `1`: solid, indestructible brick
//! - `2..`: destructible brick, colored by code

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::error::Error;
use crate::render::{Renderer, Sprite};

/// Rows of tile codes
pub type TileGrid = Vec<Vec<u32>>;

const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Color of a destructible brick
pub fn brick_color(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Parse level text into a rectangular tile grid.
///
/// Blank lines are skipped. Empty input yields an empty grid.
pub fn parse(text: &str) -> Result<TileGrid, Error> {
    let mut grid: TileGrid = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| Error::Parse {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if row.is_empty() {
            continue;
        }
        let expected = grid.first().map_or(row.len(), Vec::len);
        if expected != row.len() {
            return Err(Error::RaggedRow {
                line: line_no,
                expected,
                found: row.len(),
            });
        }
        grid.push(row);
    }
    Ok(grid)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Entity>,
    /// Source layout, kept so the level can be rebuilt
    tiles: TileGrid,
    /// Area the grid is stretched over
    extent: Vec2,
}

impl Level {
    /// Build bricks from a tile grid stretched over `width` x `height`
    pub fn from_tiles(tiles: TileGrid, width: f32, height: f32) -> Self {
        let mut level = Self {
            bricks: Vec::new(),
            tiles,
            extent: Vec2::new(width, height),
        };
        level.build();
        level
    }

    /// Parse level text; malformed text yields an empty level
    pub fn from_text(text: &str, width: f32, height: f32) -> Self {
        match parse(text) {
            Ok(tiles) => Self::from_tiles(tiles, width, height),
            Err(err) => {
                log::warn!("Discarding malformed level: {err}");
                Self::from_tiles(Vec::new(), width, height)
            }
        }
    }

    /// Load a level file; a missing or malformed file yields an empty level
    pub fn load(path: &Path, width: f32, height: f32) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let level = Self::from_text(&text, width, height);
                log::info!(
                    "Loaded level {} ({} bricks, {} destructible)",
                    path.display(),
                    level.bricks.len(),
                    level.destructible_count()
                );
                level
            }
            Err(source) => {
                let err = Error::Io {
                    path: path.to_path_buf(),
                    source,
                };
                log::warn!("{err}");
                Self::from_tiles(Vec::new(), width, height)
            }
        }
    }

    fn build(&mut self) {
        self.bricks.clear();
        let rows = self.tiles.len();
        let Some(cols) = self.tiles.first().map(Vec::len) else {
            return;
        };
        if cols == 0 {
            return;
        }
        let unit = Vec2::new(self.extent.x / cols as f32, self.extent.y / rows as f32);

        for (y, row) in self.tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let position = unit * Vec2::new(x as f32, y as f32);
                match code {
                    0 => {}
                    1 => {
                        let mut brick = Entity::new(Sprite::BlockSolid, position, unit, SOLID_COLOR);
                        brick.solid = true;
                        self.bricks.push(brick);
                    }
                    _ => self
                        .bricks
                        .push(Entity::new(Sprite::Block, position, unit, brick_color(code))),
                }
            }
        }
    }

    /// Rebuild every brick from the source layout
    pub fn reset(&mut self) {
        self.build();
    }

    /// All destructible bricks are gone (solid bricks never count)
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    pub fn destructible_count(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid).count()
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for brick in self.bricks.iter().filter(|b| !b.destroyed) {
            brick.draw(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    const SMALL: &str = "1 0 2\n3 4 9\n";

    #[test]
    fn test_parse_grid() {
        let grid = parse(SMALL).unwrap();
        assert_eq!(grid, vec![vec![1, 0, 2], vec![3, 4, 9]]);
        assert!(parse("").unwrap().is_empty());
        assert_eq!(parse("\n 2 2 \n\n2 2\n").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_ragged_and_garbage() {
        assert!(matches!(
            parse("1 1 1\n1 1\n"),
            Err(Error::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(parse("1 -2 1\n"), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(parse("1 x\n"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_bricks_laid_out_over_extent() {
        let level = Level::from_text(SMALL, 300.0, 100.0);
        // Five non-empty tiles
        assert_eq!(level.bricks.len(), 5);
        let solid = &level.bricks[0];
        assert!(solid.solid);
        assert_eq!(solid.sprite, Sprite::BlockSolid);
        assert_eq!(solid.size, Vec2::new(100.0, 50.0));

        let last = level.bricks.last().unwrap();
        assert_eq!(last.position, Vec2::new(200.0, 50.0));
        assert_eq!(last.color, Vec3::ONE);
        assert_eq!(level.bricks[1].color, brick_color(2));
        assert_eq!(level.destructible_count(), 4);
    }

    #[test]
    fn test_completion_ignores_solid_bricks() {
        let mut level = Level::from_text(SMALL, 300.0, 100.0);
        assert!(!level.is_completed());
        for brick in level.bricks.iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());
        assert_eq!(level.remaining(), 0);

        level.reset();
        assert!(!level.is_completed());
        assert_eq!(level.remaining(), 4);
    }

    #[test]
    fn test_malformed_level_is_empty() {
        let level = Level::from_text("2 2\n2\n", 800.0, 300.0);
        assert!(level.bricks.is_empty());
        // Vacuously complete
        assert!(level.is_completed());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let level = Level::load(Path::new("/nonexistent/level.lvl"), 800.0, 300.0);
        assert!(level.bricks.is_empty());
    }

    #[test]
    fn test_draw_skips_destroyed() {
        let mut level = Level::from_text(SMALL, 300.0, 100.0);
        level.bricks[1].destroyed = true;
        let mut list = DrawList::new();
        level.draw(&mut list);
        assert_eq!(list.commands.len(), 4);
    }
}
