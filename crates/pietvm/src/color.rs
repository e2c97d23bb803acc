//! The Piet palette
//!
//! Piet recognizes exactly twenty colors: six hues at three lightness
//! levels, plus white and black. Classification is by exact hex match,
//! since programs are emitted by assemblers that write the canonical
//! palette and a fuzzy nearest-match would only hide authoring mistakes.
//! Anything else is kept losslessly as [`Color::Nonstandard`] and
//! interpreted as white or black later, depending on configuration.

/// One of the six positions on the hue cycle: R → Y → G → C → B → M → R.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
}

impl Hue {
    /// Index on the hue cycle (red = 0 .. magenta = 5).
    pub fn index(self) -> u8 {
        match self {
            Hue::Red => 0,
            Hue::Yellow => 1,
            Hue::Green => 2,
            Hue::Cyan => 3,
            Hue::Blue => 4,
            Hue::Magenta => 5,
        }
    }

    /// Steps from `self` to `to` going forward around the cycle.
    pub fn steps_to(self, to: Hue) -> u8 {
        (to.index() + 6 - self.index()) % 6
    }
}

/// One of the three positions on the lightness cycle:
/// light → normal → dark → light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lightness {
    Light,
    Normal,
    Dark,
}

impl Lightness {
    /// Index on the lightness cycle (light = 0, normal = 1, dark = 2).
    pub fn index(self) -> u8 {
        match self {
            Lightness::Light => 0,
            Lightness::Normal => 1,
            Lightness::Dark => 2,
        }
    }

    /// Steps from `self` to `to` going forward around the cycle.
    pub fn steps_to(self, to: Lightness) -> u8 {
        (to.index() + 3 - self.index()) % 3
    }
}

/// A classified codel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the eighteen chromatic palette entries.
    Chromatic { hue: Hue, lightness: Lightness },
    White,
    Black,
    /// Any 24-bit value outside the canonical palette.
    Nonstandard,
}

impl Color {
    pub const fn new(hue: Hue, lightness: Lightness) -> Color {
        Color::Chromatic { hue, lightness }
    }

    /// Classify a 24-bit RGB sample. Total: unknown samples come back as
    /// [`Color::Nonstandard`] rather than failing.
    pub fn from_rgb(rgb: [u8; 3]) -> Color {
        use Hue::*;
        use Lightness::*;
        match rgb {
            [0xFF, 0xC0, 0xC0] => Color::new(Red, Light),
            [0xFF, 0xFF, 0xC0] => Color::new(Yellow, Light),
            [0xC0, 0xFF, 0xC0] => Color::new(Green, Light),
            [0xC0, 0xFF, 0xFF] => Color::new(Cyan, Light),
            [0xC0, 0xC0, 0xFF] => Color::new(Blue, Light),
            [0xFF, 0xC0, 0xFF] => Color::new(Magenta, Light),
            [0xFF, 0x00, 0x00] => Color::new(Red, Normal),
            [0xFF, 0xFF, 0x00] => Color::new(Yellow, Normal),
            [0x00, 0xFF, 0x00] => Color::new(Green, Normal),
            [0x00, 0xFF, 0xFF] => Color::new(Cyan, Normal),
            [0x00, 0x00, 0xFF] => Color::new(Blue, Normal),
            [0xFF, 0x00, 0xFF] => Color::new(Magenta, Normal),
            [0xC0, 0x00, 0x00] => Color::new(Red, Dark),
            [0xC0, 0xC0, 0x00] => Color::new(Yellow, Dark),
            [0x00, 0xC0, 0x00] => Color::new(Green, Dark),
            [0x00, 0xC0, 0xC0] => Color::new(Cyan, Dark),
            [0x00, 0x00, 0xC0] => Color::new(Blue, Dark),
            [0xC0, 0x00, 0xC0] => Color::new(Magenta, Dark),
            [0xFF, 0xFF, 0xFF] => Color::White,
            [0x00, 0x00, 0x00] => Color::Black,
            _ => Color::Nonstandard,
        }
    }

    /// Hue and lightness for chromatic colors, `None` otherwise.
    pub fn chroma(self) -> Option<(Hue, Lightness)> {
        match self {
            Color::Chromatic { hue, lightness } => Some((hue, lightness)),
            _ => None,
        }
    }
}
