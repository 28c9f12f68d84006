//! # Aspect-Slope Algorithms
//!
//! Classification and encoding behind aspect-slope maps.
//!
//! ## Modules
//!
//! - **reclass**: range tables and the range reclassifier
//! - **encode**: additive aspect + slope code packing with collision checks
//! - **terrain**: the elevation collaborator contract and a Horn implementation
//! - **pipeline**: DEM in, combined code raster plus color ramp out

pub(crate) mod maybe_rayon;

pub mod encode;
pub mod pipeline;
pub mod reclass;
pub mod terrain;

pub use encode::{combine_codes, encode, AspectSlopeEncoder};
pub use pipeline::{aspect_slope_map, AspectSlopeMap, AspectSlopeMapping, AspectSlopeParams, MIN_Z_FACTOR};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::encode::{combine_codes, encode, AspectSlopeEncoder};
    pub use crate::pipeline::{aspect_slope_map, AspectSlopeMap, AspectSlopeMapping, AspectSlopeParams};
    pub use crate::reclass::{classify, reclassify, ReclassRange, ReclassTable, NODATA_CODE};
    pub use crate::terrain::{HornDerivatives, TerrainDerivatives};
    pub use aspectslope_colormap::{build_ramp, color_at, ColorRamp, Direction, Rgba};
    pub use aspectslope_core::prelude::*;
}
