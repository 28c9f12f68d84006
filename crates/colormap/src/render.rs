//! Raster-to-RGBA rendering through a color ramp.

use crate::color::Rgba;
use crate::ramp::ColorRamp;
use aspectslope_core::raster::{Raster, RasterElement};

/// Parameters for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Color for no-data pixels. Default: fully transparent.
    pub nodata_color: Rgba,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            nodata_color: Rgba::TRANSPARENT,
        }
    }
}

impl RenderParams {
    pub fn with_nodata_color(nodata_color: Rgba) -> Self {
        Self { nodata_color }
    }
}

/// Convert a raster to an RGBA pixel buffer.
///
/// Returns a `Vec<u8>` of length `rows * cols * 4` in row-major order.
/// No-data and non-finite cells take `params.nodata_color`; every other cell
/// is colored by `ramp`.
pub fn raster_to_rgba<T: RasterElement>(
    raster: &Raster<T>,
    ramp: &ColorRamp,
    params: &RenderParams,
) -> Vec<u8> {
    let nodata = raster.nodata();
    let mut rgba = Vec::with_capacity(raster.len() * 4);

    for val in raster.data().iter() {
        let color = match val.to_f64() {
            Some(v) if v.is_finite() && !val.is_nodata(nodata) => ramp.color_at(v),
            _ => params.nodata_color,
        };
        rgba.extend_from_slice(&color.to_array());
    }

    rgba
}
