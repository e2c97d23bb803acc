//! Piet virtual machine
//!
//! An interpreter core for Piet, the language whose programs are images.
//! A raster is lifted into a grid of codels, the cursor walks maximal
//! color blocks under the direction pointer and codel chooser, and each
//! colored-to-colored transition decodes one stack command from how far
//! the color moved around the hue and lightness cycles.
//!
//! The crate owns everything between pixels and host streams: palette
//! classification, grid sampling, flood-filled block resolution, the
//! bounce and white-slide traversal rules, and the command executor.
//! Raster decoding and terminal handling stay behind the [`PixelSource`],
//! [`Input`] and [`Output`] traits so hosts and tests can supply their
//! own.
//!
//! ```
//! use pietvm::{CodelGrid, Color, Hue, Lightness, Machine, NonstandardPolicy};
//! use pietvm::{Halt, Input, Output, Result};
//!
//! struct NoInput;
//! impl Input for NoInput {
//!     fn read_char(&mut self) -> Result<Option<char>> {
//!         Ok(None)
//!     }
//! }
//!
//! struct Discard;
//! impl Output for Discard {
//!     fn write_char(&mut self, _: char) -> Result<()> {
//!         Ok(())
//!     }
//!     fn write_number(&mut self, _: i64) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! // A one-codel program: every move is blocked, so it halts at once.
//! let red = Color::new(Hue::Red, Lightness::Normal);
//! let grid = CodelGrid::from_rows(vec![vec![red]], NonstandardPolicy::White)?;
//! let mut machine = Machine::new(grid);
//! assert_eq!(machine.run(&mut NoInput, &mut Discard)?, Halt::Blocked);
//! # Ok::<(), pietvm::Error>(())
//! ```

pub mod block;
pub mod color;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod io;
pub mod machine;
pub mod opcode;

pub use block::Block;
pub use color::{Color, Hue, Lightness};
pub use cursor::{Chooser, Direction, Position};
pub use error::{Error, Result};
pub use grid::{CodelGrid, NonstandardPolicy, PixelSource};
pub use io::{Input, Output};
pub use machine::{Halt, Machine, Status};
pub use opcode::Opcode;
