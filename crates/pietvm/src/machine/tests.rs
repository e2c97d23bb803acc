use std::collections::VecDeque;

use super::*;
use crate::color::{Color, Hue, Lightness};
use crate::error::Result;
use crate::grid::NonstandardPolicy;

const R: Color = Color::new(Hue::Red, Lightness::Normal);
const LR: Color = Color::new(Hue::Red, Lightness::Light);
const DR: Color = Color::new(Hue::Red, Lightness::Dark);
const G: Color = Color::new(Hue::Green, Lightness::Normal);
const W: Color = Color::White;
const K: Color = Color::Black;

struct Keys(VecDeque<char>);

fn keys(s: &str) -> Keys {
    Keys(s.chars().collect())
}

impl Input for Keys {
    fn read_char(&mut self) -> Result<Option<char>> {
        Ok(self.0.pop_front())
    }
}

#[derive(Default)]
struct Sink(String);

impl Output for Sink {
    fn write_char(&mut self, c: char) -> Result<()> {
        self.0.push(c);
        Ok(())
    }

    fn write_number(&mut self, n: i64) -> Result<()> {
        self.0.push_str(&n.to_string());
        Ok(())
    }
}

fn machine(rows: Vec<Vec<Color>>) -> Machine {
    Machine::new(CodelGrid::from_rows(rows, NonstandardPolicy::White).unwrap())
}

/// A 1x1 machine for exercising commands directly.
fn bare() -> Machine {
    machine(vec![vec![R]])
}

fn apply(m: &mut Machine, op: Opcode) {
    m.apply(op, 0, &mut keys(""), &mut Sink::default()).unwrap();
}

// --- traversal ---

#[test]
fn first_transition_pushes_block_value() {
    let mut m = machine(vec![vec![R, DR]]);
    let status = m.step(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(status, Status::Running);
    assert_eq!(m.stack(), &[1]);
    assert_eq!(m.cursor(), Position::new(1, 0));
    assert_eq!(m.dp(), Direction::Right);
    assert_eq!(m.cc(), Chooser::Left);
    assert_eq!(m.last_color(), R);
}

#[test]
fn lightness_wraps_going_backward() {
    // red red dark dark red light: push 2, then two lightness steps of 2
    // in a row, both decoding as pop.
    let mut m = machine(vec![vec![R, R, DR, DR, R, LR]]);
    let mut sink = Sink::default();
    m.step(&mut keys(""), &mut sink).unwrap();
    assert_eq!(m.stack(), &[2]);
    m.step(&mut keys(""), &mut sink).unwrap();
    assert_eq!(m.stack(), &[] as &[i64]);
    m.step(&mut keys(""), &mut sink).unwrap();
    assert_eq!(m.stack(), &[] as &[i64]);
    assert_eq!(m.cursor(), Position::new(5, 0));
    assert_eq!(sink.0, "");
}

#[test]
fn single_codel_program_bounces_out() {
    let mut m = machine(vec![vec![R]]);
    let mut sink = Sink::default();
    let halt = m.run(&mut keys(""), &mut sink).unwrap();
    assert_eq!(halt, Halt::Blocked);
    assert_eq!(m.stack(), &[] as &[i64]);
    assert_eq!(m.steps(), 0);
    assert_eq!(sink.0, "");
}

#[test]
fn walled_in_origin_halts() {
    let mut m = machine(vec![vec![R, K], vec![K, K]]);
    let halt = m.run(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(halt, Halt::Blocked);
    assert_eq!(m.steps(), 0);
}

#[test]
fn black_origin_halts_before_any_step() {
    let mut m = machine(vec![vec![K, R]]);
    let halt = m.run(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(halt, Halt::Blocked);
    assert_eq!(m.steps(), 0);
}

#[test]
fn all_white_program_halts_via_slide_cycle() {
    let mut m = machine(vec![vec![W, W], vec![W, W]]);
    let halt = m.run(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(halt, Halt::WhiteCycle);
}

#[test]
fn slide_emits_no_command() {
    // Exiting red into white would decode red -> dark red as push if the
    // whites were not there; the slide suppresses it.
    let mut m = machine(vec![vec![R, W, W, DR]]);
    let status = m.step(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(status, Status::Running);
    assert_eq!(m.cursor(), Position::new(3, 0));
    assert_eq!(m.stack(), &[] as &[i64]);
    assert_eq!(m.last_color(), Color::White);
}

#[test]
fn command_after_slide_is_ordinary() {
    // After landing from white, the next colored-to-colored move decodes
    // normally: dark red -> red wraps lightness to pop (skipped, empty).
    let mut m = machine(vec![vec![R, W, DR, R, K]]);
    let mut sink = Sink::default();
    m.step(&mut keys(""), &mut sink).unwrap();
    assert_eq!(m.last_color(), Color::White);
    m.step(&mut keys(""), &mut sink).unwrap();
    assert_eq!(m.cursor(), Position::new(3, 0));
    assert_eq!(m.last_color(), DR);
}

#[test]
fn slide_turns_clockwise_at_walls() {
    let mut m = machine(vec![
        vec![R, W, K],
        vec![K, W, K],
        vec![K, G, K],
    ]);
    let status = m.step(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(status, Status::Running);
    assert_eq!(m.cursor(), Position::new(1, 2));
    assert_eq!(m.dp(), Direction::Down);
    assert_eq!(m.cc(), Chooser::Right);
    assert_eq!(m.stack(), &[] as &[i64]);
}

#[test]
fn trapped_slide_halts() {
    let mut m = machine(vec![
        vec![R, W, K],
        vec![K, W, K],
    ]);
    let halt = m.run(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(halt, Halt::WhiteCycle);
}

#[test]
fn bounce_flips_chooser_before_rotating_pointer() {
    // The chooser-left exit is walled; toggling to chooser-right finds
    // the way out without touching the pointer.
    let mut m = machine(vec![
        vec![R, R, K],
        vec![R, R, G],
    ]);
    let status = m.step(&mut keys(""), &mut Sink::default()).unwrap();
    assert_eq!(status, Status::Running);
    assert_eq!(m.cursor(), Position::new(2, 1));
    assert_eq!(m.dp(), Direction::Right);
    assert_eq!(m.cc(), Chooser::Right);
}

// --- commands ---

#[test]
fn roll_buries_the_top() {
    let mut m = bare();
    m.stack = vec![1, 2, 3, 4, 5, 3, 1];
    apply(&mut m, Opcode::Roll);
    assert_eq!(m.stack(), &[1, 2, 5, 3, 4]);
}

#[test]
fn opposite_rolls_cancel() {
    let mut m = bare();
    m.stack = vec![1, 2, 3, 4, 5];
    m.stack.extend([3, 1]);
    apply(&mut m, Opcode::Roll);
    m.stack.extend([3, -1]);
    apply(&mut m, Opcode::Roll);
    assert_eq!(m.stack(), &[1, 2, 3, 4, 5]);
}

#[test]
fn roll_ignores_invalid_depth() {
    let mut m = bare();
    m.stack = vec![1, 2, 3, 5, 1];
    apply(&mut m, Opcode::Roll);
    assert_eq!(m.stack(), &[1, 2, 3]);

    m.stack = vec![1, 2, 3, -2, 1];
    apply(&mut m, Opcode::Roll);
    assert_eq!(m.stack(), &[1, 2, 3]);

    m.stack = vec![1, 2, 3, 0, 7];
    apply(&mut m, Opcode::Roll);
    assert_eq!(m.stack(), &[1, 2, 3]);
}

#[test]
fn pointer_normalizes_negative_turns() {
    let mut m = bare();
    m.stack = vec![-1];
    apply(&mut m, Opcode::Pointer);
    assert_eq!(m.dp(), Direction::Up);
}

#[test]
fn opposite_pointer_turns_cancel() {
    let mut m = bare();
    m.stack = vec![3];
    apply(&mut m, Opcode::Pointer);
    m.stack = vec![-3];
    apply(&mut m, Opcode::Pointer);
    assert_eq!(m.dp(), Direction::Right);
}

#[test]
fn switch_toggles_on_odd_values_only() {
    let mut m = bare();
    m.stack = vec![2];
    apply(&mut m, Opcode::Switch);
    assert_eq!(m.cc(), Chooser::Left);
    m.stack = vec![3];
    apply(&mut m, Opcode::Switch);
    assert_eq!(m.cc(), Chooser::Right);
    m.stack = vec![-3];
    apply(&mut m, Opcode::Switch);
    assert_eq!(m.cc(), Chooser::Left);
}

#[test]
fn not_normalizes_to_boolean() {
    let mut m = bare();
    m.stack = vec![7];
    apply(&mut m, Opcode::Not);
    assert_eq!(m.stack(), &[0]);
    apply(&mut m, Opcode::Not);
    assert_eq!(m.stack(), &[1]);

    m.stack = vec![0];
    apply(&mut m, Opcode::Not);
    assert_eq!(m.stack(), &[1]);
}

#[test]
fn duplicate_then_pop_is_identity() {
    let mut m = bare();
    m.stack = vec![5];
    apply(&mut m, Opcode::Duplicate);
    assert_eq!(m.stack(), &[5, 5]);
    apply(&mut m, Opcode::Pop);
    assert_eq!(m.stack(), &[5]);
}

#[test]
fn arithmetic_pops_in_order() {
    let mut m = bare();
    m.stack = vec![8, 3];
    apply(&mut m, Opcode::Subtract);
    assert_eq!(m.stack(), &[5]);

    m.stack = vec![1, 2];
    apply(&mut m, Opcode::Greater);
    assert_eq!(m.stack(), &[0]);
    m.stack = vec![5, 3];
    apply(&mut m, Opcode::Greater);
    assert_eq!(m.stack(), &[1]);
}

#[test]
fn divide_truncates_toward_zero() {
    let mut m = bare();
    m.stack = vec![7, 2];
    apply(&mut m, Opcode::Divide);
    assert_eq!(m.stack(), &[3]);

    m.stack = vec![-7, 2];
    apply(&mut m, Opcode::Divide);
    assert_eq!(m.stack(), &[-3]);
}

#[test]
fn divide_by_zero_consumes_and_skips() {
    let mut m = bare();
    m.stack = vec![9, 5, 0];
    apply(&mut m, Opcode::Divide);
    assert_eq!(m.stack(), &[9]);
}

#[test]
fn modulo_takes_the_divisor_sign() {
    let cases = [
        (7, 3, 1),
        (-7, 3, 2),
        (7, -3, -2),
        (-7, -3, -1),
    ];
    for (b, a, expected) in cases {
        let mut m = bare();
        m.stack = vec![b, a];
        apply(&mut m, Opcode::Mod);
        assert_eq!(m.stack(), &[expected], "{b} mod {a}");
    }

    let mut m = bare();
    m.stack = vec![9, 4, 0];
    apply(&mut m, Opcode::Mod);
    assert_eq!(m.stack(), &[9]);
}

#[test]
fn multiplication_wraps() {
    let mut m = bare();
    m.stack = vec![i64::MAX, 2];
    apply(&mut m, Opcode::Multiply);
    assert_eq!(m.stack(), &[-2]);
}

#[test]
fn underflow_skips_without_restoring() {
    // add pops one value, underflows on the second, and the first stays
    // consumed.
    let mut m = bare();
    m.stack = vec![5];
    apply(&mut m, Opcode::Add);
    assert_eq!(m.stack(), &[] as &[i64]);
}

// --- I/O commands ---

#[test]
fn in_number_parses_a_leading_integer() {
    let mut m = bare();
    m.apply(Opcode::InNumber, 0, &mut keys("  42x"), &mut Sink::default())
        .unwrap();
    assert_eq!(m.stack(), &[42]);

    let mut m = bare();
    m.apply(Opcode::InNumber, 0, &mut keys("-7"), &mut Sink::default())
        .unwrap();
    assert_eq!(m.stack(), &[-7]);
}

#[test]
fn in_number_skips_on_bad_input() {
    for input in ["", "abc", "-", "99999999999999999999"] {
        let mut m = bare();
        m.apply(Opcode::InNumber, 0, &mut keys(input), &mut Sink::default())
            .unwrap();
        assert_eq!(m.stack(), &[] as &[i64], "input {input:?}");
    }
}

#[test]
fn in_char_pushes_the_code_point() {
    let mut m = bare();
    m.apply(Opcode::InChar, 0, &mut keys("A"), &mut Sink::default())
        .unwrap();
    assert_eq!(m.stack(), &[65]);

    let mut m = bare();
    m.apply(Opcode::InChar, 0, &mut keys("é"), &mut Sink::default())
        .unwrap();
    assert_eq!(m.stack(), &[0xE9]);

    let mut m = bare();
    m.apply(Opcode::InChar, 0, &mut keys(""), &mut Sink::default())
        .unwrap();
    assert_eq!(m.stack(), &[] as &[i64]);
}

#[test]
fn output_carries_no_separators() {
    let mut m = bare();
    let mut sink = Sink::default();
    m.stack = vec![33, 1, 2];
    m.apply(Opcode::OutNumber, 0, &mut keys(""), &mut sink).unwrap();
    m.apply(Opcode::OutNumber, 0, &mut keys(""), &mut sink).unwrap();
    m.apply(Opcode::OutChar, 0, &mut keys(""), &mut sink).unwrap();
    assert_eq!(sink.0, "21!");
    assert_eq!(m.stack(), &[] as &[i64]);
}

#[test]
fn out_char_skips_invalid_scalars() {
    let mut m = bare();
    let mut sink = Sink::default();
    m.stack = vec![-1, 0xD800, 0x110000];
    for _ in 0..3 {
        m.apply(Opcode::OutChar, 0, &mut keys(""), &mut sink).unwrap();
    }
    assert_eq!(sink.0, "");
    assert_eq!(m.stack(), &[] as &[i64]);
}
