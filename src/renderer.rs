//! Text rendering of maze grids

use itertools::Itertools;

use crate::{Cell, Maze};

/// Maze-to-text renderer with configurable glyphs.
///
/// Every cell becomes two display characters so the output is roughly square
/// in a terminal. Cells on a solved path are drawn with box-drawing
/// connectors picked from the neighbouring path cells.
pub struct TextRenderer {
    wall: char,
    path: char,
    step: char,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new('#', ' ', '●')
    }
}

impl TextRenderer {
    pub fn new(wall: char, path: char, step: char) -> Self {
        Self { wall, path, step }
    }

    /// Render the grid, one text line per row.
    ///
    /// Rendering never touches grid state; the same maze always renders to
    /// the same string.
    pub fn render(&self, maze: &Maze) -> String {
        (0..maze.height())
            .map(|y| {
                (0..maze.width())
                    .map(|x| match maze.get(x, y) {
                        Some(Cell::Wall) => doubled(self.wall),
                        Some(Cell::Step) => self.step_connector(maze, x, y),
                        _ => doubled(self.path),
                    })
                    .collect::<String>()
            })
            .join("\n")
    }

    /// Connector glyphs for a path cell, picked from which orthogonal
    /// neighbours are also on the path.
    fn step_connector(&self, maze: &Maze, x: usize, y: usize) -> String {
        let left = x > 0 && maze.get(x - 1, y) == Some(Cell::Step);
        let right = maze.get(x + 1, y) == Some(Cell::Step);
        let up = y > 0 && maze.get(x, y - 1) == Some(Cell::Step);
        let down = maze.get(x, y + 1) == Some(Cell::Step);

        if (left || right) && !(up || down) {
            "──".into()
        } else if (up || down) && !(left || right) {
            "│ ".into()
        } else if up && right {
            "└─".into()
        } else if up && left {
            "┘ ".into()
        } else if down && right {
            "┌─".into()
        } else if down && left {
            "┐ ".into()
        } else {
            [self.step, ' '].into_iter().collect()
        }
    }
}

fn doubled(glyph: char) -> String {
    [glyph, glyph].into_iter().collect()
}
