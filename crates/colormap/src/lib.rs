//! # Aspect-Slope Colormap
//!
//! Direction-highlight palettes and the color ramps built from them.
//!
//! Each of the nine [`Direction`] choices selects a 40-stop palette over the
//! combined codes `10..=88`. The highlighted direction's decade gets warm
//! orange shades and the other bands stay grey ([`Direction::NoPreference`]
//! uses hue bands instead).
//!
//! ## Usage
//!
//! ```
//! use aspectslope_colormap::{build_ramp, color_at, Direction, Rgba};
//!
//! let ramp = build_ramp(Direction::North);
//! assert_eq!(color_at(&ramp, 10.0), Rgba::opaque(191, 54, 12));
//! ```

mod color;
mod direction;
mod palette;
mod ramp;
mod render;
mod stop_table;

pub use color::Rgba;
pub use direction::Direction;
pub use palette::{palette, Palette, Shades, BAND_STEP, CODE_STEP, FIRST_CODE, GREY, HIGHLIGHT, LAST_CODE};
pub use ramp::{build_ramp, color_at, ColorRamp, ColorStop, Interpolation};
pub use render::{raster_to_rgba, RenderParams};
pub use stop_table::{StopRow, StopTable, HEADER};
