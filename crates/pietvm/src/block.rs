//! Color-block resolution
//!
//! A block is the maximal 4-connected region of identically-colored codels
//! containing a given position. Blocks are recomputed from the cursor each
//! step; the fill uses an explicit worklist so a large uniform region cannot
//! overflow the call stack.

use std::collections::HashSet;

use crate::cursor::{Chooser, Direction, Position};
use crate::grid::CodelGrid;

/// One resolved color block.
#[derive(Debug, Clone)]
pub struct Block {
    positions: Vec<Position>,
}

impl Block {
    /// Flood-fill the block containing `origin`. The origin must be a
    /// colored codel; white regions are handled by the slide path and never
    /// resolved as blocks.
    pub fn at(grid: &CodelGrid, origin: Position) -> Block {
        let color = grid.color_at(origin);
        let mut seen = HashSet::new();
        let mut worklist = vec![origin];
        let mut positions = Vec::new();
        seen.insert(origin);
        while let Some(pos) = worklist.pop() {
            positions.push(pos);
            for dir in [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ] {
                if let Some(next) = grid.neighbor(pos, dir) {
                    if grid.color_at(next) == color && seen.insert(next) {
                        worklist.push(next);
                    }
                }
            }
        }
        Block { positions }
    }

    /// Codel count, the value `push` puts on the stack.
    pub fn value(&self) -> i64 {
        self.positions.len() as i64
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// The codel the cursor leaves through for a given (DP, CC).
    ///
    /// First the codels furthest along the DP, then among those the one
    /// furthest toward the chooser's side of the DP. Both extrema are over
    /// a single axis, so the result is unique.
    pub fn exit_codel(&self, dp: Direction, cc: Chooser) -> Position {
        let side = dp.toward(cc);
        *self
            .positions
            .iter()
            .max_by_key(|pos| (project(**pos, dp), project(**pos, side)))
            .expect("a block holds at least its origin codel")
    }
}

/// Signed coordinate along `dir`, increasing in the direction of travel.
fn project(pos: Position, dir: Direction) -> i64 {
    match dir {
        Direction::Right => pos.x as i64,
        Direction::Down => pos.y as i64,
        Direction::Left => -(pos.x as i64),
        Direction::Up => -(pos.y as i64),
    }
}
