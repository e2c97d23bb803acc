//! Interpreter errors

use thiserror::Error;

/// Interpreter result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop the interpreter outside of normal Piet termination.
///
/// Piet itself has no error channel: stack underflow, division by zero and
/// friends are silent skips inside the executor. What remains here is the
/// machinery around the program: a raster that cannot produce a grid, and
/// I/O failures on the host streams.
#[derive(Debug, Error)]
pub enum Error {
    #[error("codel size must be at least 1")]
    ZeroCodelSize,

    #[error("raster {width}x{height} holds no complete codel at codel size {codel_size}")]
    EmptyProgram {
        width: u32,
        height: u32,
        codel_size: u32,
    },

    #[error("grid rows must all have the same width")]
    UnevenRows,

    #[error("input stream error: {0}")]
    Input(#[source] std::io::Error),

    #[error("output stream error: {0}")]
    Output(#[source] std::io::Error),
}
