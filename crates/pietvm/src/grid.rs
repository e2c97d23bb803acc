//! Codel grid construction and passability queries
//!
//! A Piet program is a raster image downsampled to a grid of codels: for a
//! declared codel size `k`, every `k`-th pixel in both axes is classified
//! and the remainder beyond the last full codel is discarded. The builder
//! does not check that each `k`x`k` cell is uniform; a wrong codel size
//! shows up as program-logic bugs, not as a decode error.

use tracing::debug;

use crate::color::Color;
use crate::cursor::{Direction, Position};
use crate::error::{Error, Result};

/// Per-pixel RGB access the grid builder samples from.
///
/// Implemented by the image decoder in the host binary and by in-memory
/// buffers in tests. Alpha, if the source has it, is the implementor's to
/// drop.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> [u8; 3];
}

/// How codels outside the canonical palette behave in passability tests.
///
/// Classification itself is lossless; this only affects whether such a
/// codel reads as white (slide through it) or black (wall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonstandardPolicy {
    #[default]
    White,
    Black,
}

/// The classified program grid. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct CodelGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Color>,
    nonstandard: NonstandardPolicy,
}

impl CodelGrid {
    /// Sample `source` at codel size `codel_size` and classify every cell.
    pub fn from_pixels(
        source: &dyn PixelSource,
        codel_size: u32,
        nonstandard: NonstandardPolicy,
    ) -> Result<CodelGrid> {
        if codel_size == 0 {
            return Err(Error::ZeroCodelSize);
        }
        let (width, height) = (source.width(), source.height());
        let cols = width / codel_size;
        let rows = height / codel_size;
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyProgram {
                width,
                height,
                codel_size,
            });
        }

        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for j in 0..rows {
            for i in 0..cols {
                cells.push(Color::from_rgb(source.pixel(i * codel_size, j * codel_size)));
            }
        }
        debug!(cols, rows, codel_size, "codel grid built");
        Ok(CodelGrid {
            cols,
            rows,
            cells,
            nonstandard,
        })
    }

    /// Build directly from classified rows. Handy for tests and embedders
    /// that already have codels rather than pixels.
    pub fn from_rows(rows: Vec<Vec<Color>>, nonstandard: NonstandardPolicy) -> Result<CodelGrid> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(Error::EmptyProgram {
                width,
                height,
                codel_size: 1,
            });
        }
        if rows.iter().any(|r| r.len() as u32 != width) {
            return Err(Error::UnevenRows);
        }
        Ok(CodelGrid {
            cols: width,
            rows: height,
            cells: rows.into_iter().flatten().collect(),
            nonstandard,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn color_at(&self, pos: Position) -> Color {
        self.cells[pos.y as usize * self.cols as usize + pos.x as usize]
    }

    /// The in-bounds neighbor one codel along `dir`, if any.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.offset();
        let x = pos.x as i64 + dx as i64;
        let y = pos.y as i64 + dy as i64;
        if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.rows as i64 {
            return None;
        }
        Some(Position::new(x as u32, y as u32))
    }

    /// Does this codel act as a wall?
    pub fn is_black(&self, pos: Position) -> bool {
        match self.color_at(pos) {
            Color::Black => true,
            Color::Nonstandard => self.nonstandard == NonstandardPolicy::Black,
            _ => false,
        }
    }

    /// Does this codel slide?
    pub fn is_white(&self, pos: Position) -> bool {
        match self.color_at(pos) {
            Color::White => true,
            Color::Nonstandard => self.nonstandard == NonstandardPolicy::White,
            _ => false,
        }
    }

    /// A codel the cursor may rest on: in-bounds and not a wall.
    pub fn is_passable(&self, pos: Position) -> bool {
        !self.is_black(pos)
    }
}
