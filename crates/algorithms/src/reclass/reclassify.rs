//! Value and raster reclassification

use super::table::ReclassTable;
use crate::maybe_rayon::*;
use aspectslope_core::raster::Raster;
use aspectslope_core::Result;

/// Classify one value against `table`.
///
/// Returns the code of the first range holding `value`, or `nodata_code` when
/// the value is NaN or outside every range.
pub fn classify(value: f64, table: &ReclassTable, nodata_code: i32) -> i32 {
    table.lookup(value).unwrap_or(nodata_code)
}

/// Classify every cell of `raster`.
///
/// Cells equal to the raster's own no-data sentinel become `nodata_code`, as do
/// unmatched values. The output has the input's shape and georeferencing and
/// declares `nodata_code` as its no-data value.
///
/// # Example
/// ```
/// use aspectslope_algorithms::reclass::{reclassify, ReclassTable, NODATA_CODE};
/// use aspectslope_core::Raster;
///
/// let slope = Raster::from_vec(vec![3.0, 12.0, 50.0, f64::NAN], 2, 2).unwrap();
/// let codes = reclassify(&slope, &ReclassTable::slope(), NODATA_CODE).unwrap();
/// assert_eq!(codes.get(0, 1).unwrap(), 2);
/// assert_eq!(codes.get(1, 1).unwrap(), NODATA_CODE);
/// ```
pub fn reclassify(raster: &Raster<f64>, table: &ReclassTable, nodata_code: i32) -> Result<Raster<i32>> {
    let (rows, cols) = raster.shape();
    let cells = raster.data();

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![nodata_code; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let val = cells[(row, col)];
                if raster.is_nodata(val) {
                    continue;
                }
                *out = classify(val, table, nodata_code);
            }
            row_data
        })
        .collect();

    raster.derive(data, Some(nodata_code))
}
