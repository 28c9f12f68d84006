//! Range reclassification
//!
//! Maps continuous aspect and slope degrees to coarse integer class codes:
//! - `ReclassTable`: ordered half-open ranges, last range closed at its upper bound
//! - `classify`: single value lookup
//! - `reclassify`: cell-for-cell lookup over a whole raster

mod reclassify;
mod table;

pub use reclassify::{classify, reclassify};
pub use table::{ReclassRange, ReclassTable, ASPECT_RANGES, NODATA_CODE, SLOPE_RANGES};
