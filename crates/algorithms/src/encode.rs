//! Additive aspect-slope encoding
//!
//! Aspect codes occupy the tens (10..=80) and slope codes the even units
//! (0..=8), so `aspect + slope` packs both classifications into one band and
//! every sum decomposes back into exactly one pair. [`AspectSlopeEncoder::new`]
//! refuses tables that would break that property.

use crate::maybe_rayon::*;
use crate::reclass::{classify, reclassify, ReclassTable, NODATA_CODE};
use aspectslope_core::raster::Raster;
use aspectslope_core::{Error, Result};
use std::collections::BTreeMap;

/// Combine two per-cell codes, propagating no-data.
fn add_codes(aspect_code: i32, slope_code: i32, nodata_code: i32) -> i32 {
    if aspect_code == nodata_code || slope_code == nodata_code {
        return nodata_code;
    }
    aspect_code.checked_add(slope_code).unwrap_or(nodata_code)
}

/// Encode aspect and slope degrees with the built-in tables.
///
/// Returns a code in `10..=88`, or [`NODATA_CODE`] when either input is
/// no-data (NaN) or outside its table.
pub fn encode(aspect_degrees: f64, slope_degrees: f64) -> i32 {
    add_codes(
        classify(aspect_degrees, &ReclassTable::aspect(), NODATA_CODE),
        classify(slope_degrees, &ReclassTable::slope(), NODATA_CODE),
        NODATA_CODE,
    )
}

/// Cell-wise sum of two code rasters.
///
/// A cell that is no-data in either input (by that raster's own sentinel or by
/// equalling `nodata_code`) is `nodata_code` in the output. Both inputs must
/// have the same shape; the output takes the first raster's georeferencing.
pub fn combine_codes(
    aspect_codes: &Raster<i32>,
    slope_codes: &Raster<i32>,
    nodata_code: i32,
) -> Result<Raster<i32>> {
    aspect_codes.ensure_same_shape(slope_codes)?;

    let (rows, cols) = aspect_codes.shape();
    let a = aspect_codes.data();
    let b = slope_codes.data();

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![nodata_code; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let va = a[(row, col)];
                let vb = b[(row, col)];
                if aspect_codes.is_nodata(va) || slope_codes.is_nodata(vb) {
                    continue;
                }
                *out = add_codes(va, vb, nodata_code);
            }
            row_data
        })
        .collect();

    aspect_codes.derive(data, Some(nodata_code))
}

/// Two reclassification passes plus an injective additive combination.
#[derive(Debug, Clone)]
pub struct AspectSlopeEncoder {
    aspect: ReclassTable,
    slope: ReclassTable,
    nodata_code: i32,
    /// combined code -> (aspect code, slope code)
    pairs: BTreeMap<i32, (i32, i32)>,
}

impl AspectSlopeEncoder {
    /// Build an encoder over custom tables.
    ///
    /// Fails with [`Error::CodeCollision`] if two distinct code pairs share a
    /// sum, and with [`Error::InvalidTable`] if a table code or a sum equals
    /// `nodata_code`.
    pub fn new(aspect: ReclassTable, slope: ReclassTable, nodata_code: i32) -> Result<Self> {
        let aspect_codes = aspect.codes();
        let slope_codes = slope.codes();

        if let Some(code) = aspect_codes
            .iter()
            .chain(slope_codes.iter())
            .find(|&&c| c == nodata_code)
        {
            return Err(Error::InvalidTable(format!(
                "class code {} is the no-data code",
                code
            )));
        }

        let mut pairs = BTreeMap::new();
        for (sum, (a, s)) in code_pairs(&aspect_codes, &slope_codes) {
            let combined =
                sum.ok_or_else(|| Error::InvalidTable(format!("{} + {} overflows", a, s)))?;
            if combined == nodata_code {
                return Err(Error::InvalidTable(format!(
                    "{} + {} encodes to the no-data code",
                    a, s
                )));
            }
            if let Some(first) = pairs.insert(combined, (a, s)) {
                return Err(Error::CodeCollision {
                    combined,
                    first,
                    second: (a, s),
                });
            }
        }

        Ok(Self {
            aspect,
            slope,
            nodata_code,
            pairs,
        })
    }

    /// Built-in tables with a custom no-data code
    pub fn with_nodata_code(nodata_code: i32) -> Result<Self> {
        Self::new(ReclassTable::aspect(), ReclassTable::slope(), nodata_code)
    }

    pub fn aspect_table(&self) -> &ReclassTable {
        &self.aspect
    }

    pub fn slope_table(&self) -> &ReclassTable {
        &self.slope
    }

    pub fn nodata_code(&self) -> i32 {
        self.nodata_code
    }

    /// Every valid combined code, ascending
    pub fn combined_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.pairs.keys().copied()
    }

    /// Encode one cell from degrees.
    pub fn encode(&self, aspect_degrees: f64, slope_degrees: f64) -> i32 {
        add_codes(
            classify(aspect_degrees, &self.aspect, self.nodata_code),
            classify(slope_degrees, &self.slope, self.nodata_code),
            self.nodata_code,
        )
    }

    /// Split a combined code back into `(aspect code, slope code)`.
    ///
    /// `None` for the no-data code and for any value no pair encodes to.
    pub fn decode(&self, combined: i32) -> Option<(i32, i32)> {
        self.pairs.get(&combined).copied()
    }

    /// Reclassify both rasters and combine them into one code raster.
    pub fn encode_raster(&self, aspect: &Raster<f64>, slope: &Raster<f64>) -> Result<Raster<i32>> {
        aspect.ensure_same_shape(slope)?;
        let aspect_codes = reclassify(aspect, &self.aspect, self.nodata_code)?;
        let slope_codes = reclassify(slope, &self.slope, self.nodata_code)?;
        combine_codes(&aspect_codes, &slope_codes, self.nodata_code)
    }
}

/// Every `(aspect, slope)` code pair with its sum, `None` on overflow.
fn code_pairs<'a>(
    aspect_codes: &'a [i32],
    slope_codes: &'a [i32],
) -> impl Iterator<Item = (Option<i32>, (i32, i32))> + 'a {
    aspect_codes
        .iter()
        .flat_map(move |&a| slope_codes.iter().map(move |&s| (a.checked_add(s), (a, s))))
}

/// Built-in tables and [`NODATA_CODE`].
impl Default for AspectSlopeEncoder {
    fn default() -> Self {
        let pairs = code_pairs(&ReclassTable::aspect().codes(), &ReclassTable::slope().codes())
            .filter_map(|(sum, pair)| Some((sum?, pair)))
            .collect();
        Self {
            aspect: ReclassTable::aspect(),
            slope: ReclassTable::slope(),
            nodata_code: NODATA_CODE,
            pairs,
        }
    }
}
