//! Command decoding
//!
//! A move between two chromatic blocks encodes one of eighteen commands by
//! how far the color stepped around the hue cycle and the lightness cycle.

use crate::color::{Hue, Lightness};

/// The Piet instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Noop,
    Push,
    Pop,
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Not,
    Greater,
    Pointer,
    Switch,
    Duplicate,
    Roll,
    InNumber,
    InChar,
    OutNumber,
    OutChar,
}

impl Opcode {
    /// Decode the command for a move from color `from` to color `to`.
    pub fn decode(from: (Hue, Lightness), to: (Hue, Lightness)) -> Opcode {
        let hue_steps = from.0.steps_to(to.0);
        let light_steps = from.1.steps_to(to.1);
        match (hue_steps, light_steps) {
            (0, 0) => Opcode::Noop,
            (0, 1) => Opcode::Push,
            (0, 2) => Opcode::Pop,
            (1, 0) => Opcode::Add,
            (1, 1) => Opcode::Subtract,
            (1, 2) => Opcode::Multiply,
            (2, 0) => Opcode::Divide,
            (2, 1) => Opcode::Mod,
            (2, 2) => Opcode::Not,
            (3, 0) => Opcode::Greater,
            (3, 1) => Opcode::Pointer,
            (3, 2) => Opcode::Switch,
            (4, 0) => Opcode::Duplicate,
            (4, 1) => Opcode::Roll,
            (4, 2) => Opcode::InNumber,
            (5, 0) => Opcode::InChar,
            (5, 1) => Opcode::OutNumber,
            (5, 2) => Opcode::OutChar,
            _ => unreachable!("hue steps are mod 6, lightness steps are mod 3"),
        }
    }
}
