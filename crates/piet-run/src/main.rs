//! Piet interpreter CLI
//!
//! Decodes a program image, lifts it into a codel grid, and runs the
//! machine against the terminal. Program output goes to stdout;
//! diagnostics go to stderr so the two streams never mix.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pietvm::{CodelGrid, Machine, NonstandardPolicy, PixelSource};

mod term;

#[derive(Parser, Debug)]
#[command(name = "piet-run")]
#[command(about = "Run a Piet program image")]
struct Args {
    /// Path to the program image
    image: PathBuf,

    /// Codel size in pixels
    #[arg(long = "codel-size", default_value_t = 1)]
    codel_size: u32,

    /// How colors outside the Piet palette behave
    #[arg(long, value_enum, default_value = "white")]
    nonstandard: Nonstandard,

    /// Log every executed command to stderr
    #[arg(long)]
    trace: bool,

    /// Log interpreter diagnostics to stderr
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Nonstandard {
    White,
    Black,
}

impl From<Nonstandard> for NonstandardPolicy {
    fn from(value: Nonstandard) -> NonstandardPolicy {
        match value {
            Nonstandard::White => NonstandardPolicy::White,
            Nonstandard::Black => NonstandardPolicy::Black,
        }
    }
}

/// Decoded raster adapted to the grid builder.
struct Raster(image::RgbImage);

impl PixelSource for Raster {
    fn width(&self) -> u32 {
        self.0.width()
    }

    fn height(&self) -> u32 {
        self.0.height()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.0.get_pixel(x, y).0
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.trace {
        "pietvm=trace,piet_run=debug"
    } else if args.debug {
        "pietvm=debug,piet_run=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(&args) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let raster = image::open(&args.image)
        .map_err(|err| format!("cannot read {}: {err}", args.image.display()))?
        .to_rgb8();
    let grid = CodelGrid::from_pixels(&Raster(raster), args.codel_size, args.nonstandard.into())?;

    let mut machine = Machine::new(grid);
    let halt = machine.run(&mut term::StdinInput::new(), &mut term::StdoutOutput)?;
    debug!(reason = ?halt, steps = machine.steps(), "program finished");
    Ok(())
}
