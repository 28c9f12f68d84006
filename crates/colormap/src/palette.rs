//! Built-in aspect-slope palettes
//!
//! A palette colors the 40 combined codes 10, 12, ..., 88. Codes are laid out
//! as eight aspect bands (N, NE, ..., NW) of five slope shades each, so every
//! palette is a row of eight shade ramps. Directional palettes reuse one grey
//! ramp for every band except the highlighted one, which gets the orange ramp.

use crate::color::Rgba;
use crate::direction::Direction;

/// Lowest combined code (north, 0-5°)
pub const FIRST_CODE: i32 = 10;
/// Highest combined code (north-west, 45-90°)
pub const LAST_CODE: i32 = 88;
/// Distance between consecutive slope classes
pub const CODE_STEP: i32 = 2;
/// Distance between aspect bands
pub const BAND_STEP: i32 = 10;

/// One aspect band: colors for slope classes 0, 2, 4, 6, 8
pub type Shades = [Rgba; 5];

const fn c(r: u8, g: u8, b: u8) -> Rgba {
    Rgba::opaque(r, g, b)
}

/// Band separator shared by every rainbow band: flattest class is neutral grey
const SEPARATOR: Rgba = c(181, 181, 181);

const RAINBOW_N: Shades = [SEPARATOR, c(159, 192, 133), c(157, 221, 94), c(154, 251, 12), c(15, 241, 57)];
const RAINBOW_NE: Shades = [SEPARATOR, c(114, 168, 144), c(61, 171, 113), c(0, 173, 67), c(0, 137, 27)];
const RAINBOW_E: Shades = [SEPARATOR, c(124, 142, 173), c(80, 120, 182), c(0, 104, 192), c(0, 86, 157)];
const RAINBOW_SE: Shades = [SEPARATOR, c(140, 117, 160), c(119, 71, 157), c(108, 0, 163), c(72, 0, 140)];
const RAINBOW_S: Shades = [SEPARATOR, c(180, 123, 161), c(192, 77, 156), c(202, 0, 156), c(154, 0, 121)];
const RAINBOW_SW: Shades = [SEPARATOR, c(203, 139, 143), c(231, 111, 122), c(255, 85, 104), c(255, 51, 75)];
const RAINBOW_W: Shades = [SEPARATOR, c(197, 165, 138), c(226, 166, 108), c(255, 171, 71), c(255, 140, 8)];
const RAINBOW_NW: Shades = [SEPARATOR, c(189, 191, 137), c(214, 219, 94), c(240, 244, 0), c(255, 250, 0)];

/// Suppressed bands in a directional palette
pub const GREY: Shades = [c(33, 33, 33), c(66, 66, 66), c(97, 97, 97), c(117, 117, 117), c(158, 158, 158)];

/// Highlighted band, dark to bright orange
pub const HIGHLIGHT: Shades = [c(191, 54, 12), c(216, 67, 21), c(230, 74, 25), c(244, 81, 30), c(255, 87, 34)];

/// Eight aspect bands in code order (10s band first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub direction: Direction,
    pub bands: [&'static Shades; 8],
}

const G: &Shades = &GREY;
const H: &Shades = &HIGHLIGHT;

/// Indexed by [`Direction::index`].
static PALETTES: [Palette; 9] = [
    Palette {
        direction: Direction::NoPreference,
        bands: [
            &RAINBOW_N, &RAINBOW_NE, &RAINBOW_E, &RAINBOW_SE,
            &RAINBOW_S, &RAINBOW_SW, &RAINBOW_W, &RAINBOW_NW,
        ],
    },
    Palette { direction: Direction::North, bands: [H, G, G, G, G, G, G, G] },
    Palette { direction: Direction::NorthEast, bands: [G, H, G, G, G, G, G, G] },
    Palette { direction: Direction::East, bands: [G, G, H, G, G, G, G, G] },
    Palette { direction: Direction::SouthEast, bands: [G, G, G, H, G, G, G, G] },
    Palette { direction: Direction::South, bands: [G, G, G, G, H, G, G, G] },
    Palette { direction: Direction::SouthWest, bands: [G, G, G, G, G, H, G, G] },
    Palette { direction: Direction::West, bands: [G, G, G, G, G, G, H, G] },
    Palette { direction: Direction::NorthWest, bands: [G, G, G, G, G, G, G, H] },
];

/// The built-in palette for `direction`
pub fn palette(direction: Direction) -> &'static Palette {
    &PALETTES[direction.index()]
}

impl Palette {
    /// `(code, color)` for all 40 codes, ascending
    pub fn entries(&self) -> impl Iterator<Item = (i32, Rgba)> + '_ {
        self.bands.iter().enumerate().flat_map(|(band, shades)| {
            shades.iter().enumerate().map(move |(shade, &color)| {
                let code = FIRST_CODE + band as i32 * BAND_STEP + shade as i32 * CODE_STEP;
                (code, color)
            })
        })
    }

    /// Color of an exact combined code, `None` off the 10..=88 even grid
    pub fn color_of(&self, code: i32) -> Option<Rgba> {
        if !(FIRST_CODE..=LAST_CODE).contains(&code) || code % CODE_STEP != 0 {
            return None;
        }
        let offset = code - FIRST_CODE;
        let band = (offset / BAND_STEP) as usize;
        let shade = ((offset % BAND_STEP) / CODE_STEP) as usize;
        Some(self.bands[band][shade])
    }
}
