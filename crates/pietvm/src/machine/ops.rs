//! Stack semantics for the eighteen commands
//!
//! Piet has no error channel. Underflow skips the command without
//! restoring values already popped, division and modulo by zero skip with
//! both operands consumed, and I/O failures to parse are skips as well.
//! Arithmetic wraps on two's-complement `i64`.

use crate::error::Result;
use crate::io::{Input, Output};
use crate::opcode::Opcode;

use super::Machine;

impl Machine {
    /// Execute one command. `value` is the codel count of the block being
    /// exited, which is what `push` puts on the stack.
    pub(super) fn apply(
        &mut self,
        op: Opcode,
        value: i64,
        input: &mut dyn Input,
        output: &mut dyn Output,
    ) -> Result<()> {
        match op {
            Opcode::Noop => {}
            Opcode::Push => self.stack.push(value),
            Opcode::Pop => {
                self.stack.pop();
            }
            Opcode::Add => self.binary(|b, a| Some(b.wrapping_add(a))),
            Opcode::Subtract => self.binary(|b, a| Some(b.wrapping_sub(a))),
            Opcode::Multiply => self.binary(|b, a| Some(b.wrapping_mul(a))),
            Opcode::Divide => self.binary(|b, a| (a != 0).then(|| b.wrapping_div(a))),
            Opcode::Mod => self.binary(|b, a| (a != 0).then(|| floor_mod(b, a))),
            Opcode::Not => {
                if let Some(x) = self.stack.pop() {
                    self.stack.push(i64::from(x == 0));
                }
            }
            Opcode::Greater => self.binary(|b, a| Some(i64::from(b > a))),
            Opcode::Pointer => {
                if let Some(x) = self.stack.pop() {
                    self.dp = self.dp.rotated_by(x);
                }
            }
            Opcode::Switch => {
                if let Some(x) = self.stack.pop() {
                    if x % 2 != 0 {
                        self.cc = self.cc.toggled();
                    }
                }
            }
            Opcode::Duplicate => {
                if let Some(&top) = self.stack.last() {
                    self.stack.push(top);
                }
            }
            Opcode::Roll => self.roll(),
            Opcode::InNumber => {
                if let Some(n) = read_number(input)? {
                    self.stack.push(n);
                }
            }
            Opcode::InChar => {
                if let Some(c) = input.read_char()? {
                    self.stack.push(c as i64);
                }
            }
            Opcode::OutNumber => {
                if let Some(x) = self.stack.pop() {
                    output.write_number(x)?;
                }
            }
            Opcode::OutChar => {
                if let Some(x) = self.stack.pop() {
                    // Values outside the Unicode scalar range are dropped
                    // along with the popped operand.
                    if let Some(c) = u32::try_from(x).ok().and_then(char::from_u32) {
                        output.write_char(c)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Pop `a` then `b` and push `f(b, a)`. `None` from `f` skips the push;
    /// in every case both operands stay consumed.
    fn binary(&mut self, f: impl FnOnce(i64, i64) -> Option<i64>) {
        let Some(a) = self.stack.pop() else { return };
        let Some(b) = self.stack.pop() else { return };
        if let Some(result) = f(b, a) {
            self.stack.push(result);
        }
    }

    /// Rotate the top `depth` entries by `rolls`. A positive roll buries
    /// the top entry one slot per roll. Depth zero rolls nothing, and a
    /// negative or oversized depth leaves the stack untouched; the two
    /// operands stay consumed throughout.
    fn roll(&mut self) {
        let Some(rolls) = self.stack.pop() else { return };
        let Some(depth) = self.stack.pop() else { return };
        if depth <= 0 || depth as usize > self.stack.len() {
            return;
        }
        let shift = rolls.rem_euclid(depth) as usize;
        if shift == 0 {
            return;
        }
        let start = self.stack.len() - depth as usize;
        self.stack[start..].rotate_right(shift);
    }
}

/// Mathematical modulo: the result takes the divisor's sign.
fn floor_mod(b: i64, a: i64) -> i64 {
    let r = b.wrapping_rem(a);
    if r != 0 && (r < 0) != (a < 0) {
        r.wrapping_add(a)
    } else {
        r
    }
}

/// `in_number`: skip leading ASCII whitespace, accept an optional minus
/// sign, then a digit run. The first non-digit afterwards is consumed and
/// discarded. An empty digit run, or one that overflows `i64`, reads as a
/// failed parse and the command is skipped.
fn read_number(input: &mut dyn Input) -> Result<Option<i64>> {
    let mut next = loop {
        match input.read_char()? {
            None => return Ok(None),
            Some(c) if c.is_ascii_whitespace() => continue,
            Some(c) => break Some(c),
        }
    };
    let mut negative = false;
    if next == Some('-') {
        negative = true;
        next = input.read_char()?;
    }
    let mut digits = 0u32;
    let mut overflowed = false;
    let mut value: i64 = 0;
    while let Some(c) = next {
        let Some(d) = c.to_digit(10) else { break };
        digits += 1;
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d as i64))
        {
            Some(v) => value = v,
            None => overflowed = true,
        }
        next = input.read_char()?;
    }
    if digits == 0 || overflowed {
        return Ok(None);
    }
    Ok(Some(if negative { -value } else { value }))
}
