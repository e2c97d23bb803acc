//! The traversal engine
//!
//! The machine advances block to block: resolve the cursor's color block,
//! pick the exit codel for the current (DP, CC), and try to move one codel
//! further. A wall or edge bounces (the chooser flips first, then the
//! pointer rotates clockwise) and eight consecutive failures end the
//! program. Moving into white starts a slide; a slide that revisits a
//! (position, DP) pair can never exit and also ends the program. A direct
//! colored-to-colored move decodes and executes one command.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::block::Block;
use crate::color::Color;
use crate::cursor::{Chooser, Direction, Position};
use crate::error::Result;
use crate::grid::CodelGrid;
use crate::io::{Input, Output};
use crate::opcode::Opcode;

mod ops;
#[cfg(test)]
mod tests;

/// Why a program stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Eight consecutive failed moves: every (DP, CC) attempt hit a wall
    /// or the image edge.
    Blocked,
    /// A white slide revisited a (position, DP) pair without finding an
    /// exit.
    WhiteCycle,
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(Halt),
}

/// The Piet virtual machine.
pub struct Machine {
    grid: CodelGrid,
    cursor: Position,
    dp: Direction,
    cc: Chooser,
    stack: Vec<i64>,
    /// Color of the block most recently exited; white after a slide.
    last_color: Color,
    steps: u64,
}

impl Machine {
    /// A fresh machine over `grid`: cursor at the origin, DP right, CC
    /// left, empty stack.
    pub fn new(grid: CodelGrid) -> Machine {
        let origin = Position::new(0, 0);
        let last_color = grid.color_at(origin);
        Machine {
            grid,
            cursor: origin,
            dp: Direction::Right,
            cc: Chooser::Left,
            stack: Vec::new(),
            last_color,
            steps: 0,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn dp(&self) -> Direction {
        self.dp
    }

    pub fn cc(&self) -> Chooser {
        self.cc
    }

    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    pub fn last_color(&self) -> Color {
        self.last_color
    }

    /// Completed moves, slides included.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run until the program terminates.
    #[instrument(level = "debug", skip(self, input, output))]
    pub fn run(&mut self, input: &mut dyn Input, output: &mut dyn Output) -> Result<Halt> {
        if !self.grid.is_passable(self.cursor) {
            debug!("origin codel is a wall, nothing to execute");
            return Ok(Halt::Blocked);
        }
        if self.grid.is_white(self.cursor) {
            // A program may start on white; the cursor slides before the
            // first block is ever resolved.
            if let Status::Halted(halt) = self.slide(self.cursor) {
                debug!(reason = ?halt, "machine halted");
                return Ok(halt);
            }
        }
        loop {
            if let Status::Halted(halt) = self.step(input, output)? {
                debug!(steps = self.steps, reason = ?halt, "machine halted");
                return Ok(halt);
            }
        }
    }

    /// One move of the cursor: at most eight attempts, then termination.
    #[instrument(
        level = "trace",
        skip(self, input, output),
        fields(step = self.steps, x = self.cursor.x, y = self.cursor.y)
    )]
    pub fn step(&mut self, input: &mut dyn Input, output: &mut dyn Output) -> Result<Status> {
        let block = Block::at(&self.grid, self.cursor);
        let value = block.value();
        let mut toggled = false;
        for attempt in 0..8u8 {
            let exit = block.exit_codel(self.dp, self.cc);
            let next = self
                .grid
                .neighbor(exit, self.dp)
                .filter(|n| self.grid.is_passable(*n));
            let Some(next) = next else {
                // Bounce: flip the chooser first, rotate the pointer second.
                if toggled {
                    self.dp = self.dp.clockwise();
                    toggled = false;
                } else {
                    self.cc = self.cc.toggled();
                    toggled = true;
                }
                trace!(attempt = attempt + 1, dp = ?self.dp, cc = ?self.cc, "move blocked");
                continue;
            };

            if self.grid.is_white(next) {
                return Ok(self.slide(next));
            }

            let from = self
                .grid
                .color_at(exit)
                .chroma()
                .expect("the cursor's block is chromatic");
            let to = self
                .grid
                .color_at(next)
                .chroma()
                .expect("a passable non-white codel is chromatic");
            let op = Opcode::decode(from, to);
            self.apply(op, value, input, output)?;
            self.last_color = self.grid.color_at(exit);
            self.cursor = next;
            self.steps += 1;
            trace!(
                step = self.steps,
                x = next.x,
                y = next.y,
                dp = ?self.dp,
                cc = ?self.cc,
                op = ?op,
                value,
                depth = self.stack.len(),
                "command executed"
            );
            return Ok(Status::Running);
        }
        Ok(Status::Halted(Halt::Blocked))
    }

    /// Slide through white codels starting on `start`.
    ///
    /// Obstruction inside white toggles the chooser and rotates the
    /// pointer clockwise together, then the slide continues in the new
    /// direction. Exiting onto a colored codel emits no command.
    fn slide(&mut self, start: Position) -> Status {
        let mut pos = start;
        let mut visited = HashSet::new();
        visited.insert((pos, self.dp));
        loop {
            let next = self
                .grid
                .neighbor(pos, self.dp)
                .filter(|n| self.grid.is_passable(*n));
            match next {
                Some(next) if self.grid.is_white(next) => {
                    pos = next;
                    if !visited.insert((pos, self.dp)) {
                        return Status::Halted(Halt::WhiteCycle);
                    }
                }
                Some(next) => {
                    self.cursor = next;
                    self.last_color = Color::White;
                    self.steps += 1;
                    trace!(x = next.x, y = next.y, dp = ?self.dp, "slide exited");
                    return Status::Running;
                }
                None => {
                    self.cc = self.cc.toggled();
                    self.dp = self.dp.clockwise();
                    if !visited.insert((pos, self.dp)) {
                        return Status::Halted(Halt::WhiteCycle);
                    }
                }
            }
        }
    }
}
