//! Host stream plumbing
//!
//! `in_char` wants one unbuffered keypress, so when stdin is a terminal
//! the reader drops it into raw mode (canonical processing and echo off)
//! for the rest of the run and restores the original attributes on drop.
//! Piped input is read as-is. Program output flushes per write: Piet
//! programs prompt without newlines.

use std::io::{Read, Write};

use pietvm::{Error, Input, Output, Result};

/// Saved terminal attributes, restored on drop.
struct RawMode {
    original: libc::termios,
}

impl RawMode {
    fn engage() -> Option<RawMode> {
        // Safety: plain termios calls on the stdin descriptor; any failure
        // falls back to buffered reads.
        unsafe {
            if libc::isatty(libc::STDIN_FILENO) == 0 {
                return None;
            }
            let mut attrs: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &mut attrs) != 0 {
                return None;
            }
            let original = attrs;
            attrs.c_lflag &= !(libc::ICANON | libc::ECHO);
            attrs.c_cc[libc::VMIN] = 1;
            attrs.c_cc[libc::VTIME] = 0;
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &attrs) != 0 {
                return None;
            }
            Some(RawMode { original })
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &self.original);
        }
    }
}

/// Character reader over stdin. Raw mode engages lazily on the first read
/// so programs that never ask for input leave the terminal alone.
pub struct StdinInput {
    stdin: std::io::Stdin,
    // Held for its Drop: restores the terminal on exit.
    _raw: Option<RawMode>,
    probed: bool,
}

impl StdinInput {
    pub fn new() -> StdinInput {
        StdinInput {
            stdin: std::io::stdin(),
            _raw: None,
            probed: false,
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        let n = self.stdin.read(&mut byte).map_err(Error::Input)?;
        Ok((n == 1).then_some(byte[0]))
    }
}

impl Input for StdinInput {
    fn read_char(&mut self) -> Result<Option<char>> {
        if !self.probed {
            self._raw = RawMode::engage();
            self.probed = true;
        }
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        if first < 0x80 {
            return Ok(Some(first as char));
        }
        // Multibyte UTF-8: collect the continuation bytes. An invalid or
        // truncated sequence degrades to the first byte's value.
        let len = match first {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(Some(char::from(first))),
        };
        let mut buf = [first, 0, 0, 0];
        let mut have = 1;
        while have < len {
            match self.read_byte()? {
                Some(byte) => {
                    buf[have] = byte;
                    have += 1;
                }
                None => break,
            }
        }
        match std::str::from_utf8(&buf[..have]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Ok(Some(char::from(first))),
        }
    }
}

/// Program output on stdout, flushed per write.
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut out = std::io::stdout();
        write!(out, "{c}")
            .and_then(|_| out.flush())
            .map_err(Error::Output)
    }

    fn write_number(&mut self, n: i64) -> Result<()> {
        let mut out = std::io::stdout();
        write!(out, "{n}")
            .and_then(|_| out.flush())
            .map_err(Error::Output)
    }
}
