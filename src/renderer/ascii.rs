//! Text rasterizer for terminals and logs

use super::Renderer;
use crate::error::RenderError;
use crate::sim::{DrawCommand, FrameView, Shape};

/// Rasterizes each frame into a character grid
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    last_frame: String,
    presented: u64,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            last_frame: String::new(),
            presented: 0,
        }
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn glyph(shape: Shape) -> char {
        match shape {
            Shape::Ship => 'A',
            Shape::Rect => '#',
            Shape::Circle => 'o',
        }
    }

    /// Cell span [start, end) covered by `[min, max)` on an axis of `extent`
    fn span(min: f32, max: f32, extent: f32, cells: usize) -> (usize, usize) {
        let cells_f = cells as f32;
        let start = (min * cells_f / extent).floor().max(0.0) as usize;
        let end = ((max * cells_f / extent).ceil().max(0.0) as usize).min(cells);
        (start.min(cells), end)
    }

    fn plot(&self, grid: &mut [Vec<char>], cmd: &DrawCommand, view: &FrameView) {
        let max = cmd.bounds.max();
        let (x0, x1) = Self::span(cmd.bounds.pos.x, max.x, view.arena_width, self.cols);
        let (y0, y1) = Self::span(cmd.bounds.pos.y, max.y, view.arena_height, self.rows);
        let glyph = Self::glyph(cmd.shape);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = glyph;
            }
        }
    }
}

impl Renderer for AsciiRenderer {
    fn present(&mut self, view: &FrameView) -> Result<(), RenderError> {
        if !(view.arena_width > 0.0 && view.arena_height > 0.0) {
            return Err(RenderError(format!(
                "degenerate arena {}x{}",
                view.arena_width, view.arena_height
            )));
        }

        let mut grid = vec![vec!['.'; self.cols]; self.rows];
        // Back to front so the player (first command) ends up on top
        for cmd in view.commands.iter().rev() {
            self.plot(&mut grid, cmd, view);
        }

        let mut out = String::with_capacity((self.cols + 1) * (self.rows + 1) + 64);
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(&format!(
            "score {}  best {}  frame {}  {:?}",
            view.hud.score, view.hud.high_score, view.hud.frames, view.hud.phase
        ));

        self.last_frame = out;
        self.presented += 1;
        Ok(())
    }
}
