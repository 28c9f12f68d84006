//! # Aspect-Slope Core
//!
//! Core types, errors and I/O shared by the aspect-slope mapping crates.
//!
//! This crate provides:
//! - `Raster<T>`: georeferenced 2-D grid with an optional no-data sentinel
//! - `GeoTransform` and `CRS`: georeferencing carried through every derived raster
//! - `Error` / `Result`: the error type used across the workspace
//! - The `Algorithm` trait implemented by the mapping pipeline
//! - Native GeoTIFF reading and writing

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;

pub use crs::CRS;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
    pub use crate::Algorithm;
}

/// A named raster operation with typed input, output and parameters.
///
/// Implementors are stateless; all run-specific configuration travels in `Params`.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
