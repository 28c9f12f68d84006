//! Elevation-processing collaborator
//!
//! The mapping pipeline does not care how aspect and slope are derived from
//! elevation. It asks a [`TerrainDerivatives`] implementation for two rasters
//! and relies only on this contract:
//! - output shape and georeferencing equal the DEM's
//! - aspect is in degrees clockwise from north, `0..=360`
//! - slope is in degrees, `0..=90`
//! - cells without a value are NaN or equal the raster's declared no-data
//!
//! [`HornDerivatives`] is the built-in implementation.

mod horn;

pub use horn::{aspect, slope, HornDerivatives};

use aspectslope_core::raster::Raster;
use aspectslope_core::Result;

/// Source of aspect and slope rasters for a DEM.
pub trait TerrainDerivatives {
    /// Aspect in degrees, with elevation differences scaled by `z_factor`
    fn derive_aspect(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>>;

    /// Slope in degrees, with elevation differences scaled by `z_factor`
    fn derive_slope(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>>;
}

impl<T: TerrainDerivatives + ?Sized> TerrainDerivatives for &T {
    fn derive_aspect(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
        (**self).derive_aspect(dem, z_factor)
    }

    fn derive_slope(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
        (**self).derive_slope(dem, z_factor)
    }
}
