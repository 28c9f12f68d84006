//! Reclassification tables and the built-in aspect/slope breakpoints

use aspectslope_core::{Error, Result};
use std::borrow::Cow;

/// Code written for cells that are no-data or fall outside every range.
pub const NODATA_CODE: i32 = -9999;

/// One row of a reclassification table: `[low, high)` maps to `code`.
///
/// When the range is the last row of its table the upper bound is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReclassRange {
    pub low: f64,
    pub high: f64,
    pub code: i32,
}

impl ReclassRange {
    pub const fn new(low: f64, high: f64, code: i32) -> Self {
        Self { low, high, code }
    }

    fn contains(&self, value: f64, closed_high: bool) -> bool {
        value >= self.low && (value < self.high || (closed_high && value <= self.high))
    }
}

/// Aspect degrees to compass decade codes.
///
/// Breakpoints sit on the half-degree so an exact compass boundary such as
/// 22.5 belongs to the bin clockwise of it. Both flanks of north map to 10, and
/// the last bin runs to 360.5 so rounding overshoot past 360 stays north.
pub const ASPECT_RANGES: &[ReclassRange] = &[
    ReclassRange::new(0.0, 22.5, 10),
    ReclassRange::new(22.5, 67.5, 20),
    ReclassRange::new(67.5, 112.5, 30),
    ReclassRange::new(112.5, 157.5, 40),
    ReclassRange::new(157.5, 202.5, 50),
    ReclassRange::new(202.5, 247.5, 60),
    ReclassRange::new(247.5, 292.5, 70),
    ReclassRange::new(292.5, 337.5, 80),
    ReclassRange::new(337.5, 360.5, 10),
];

/// Slope degrees to even unit codes 0..=8.
pub const SLOPE_RANGES: &[ReclassRange] = &[
    ReclassRange::new(0.0, 5.0, 0),
    ReclassRange::new(5.0, 15.0, 2),
    ReclassRange::new(15.0, 30.0, 4),
    ReclassRange::new(30.0, 45.0, 6),
    ReclassRange::new(45.0, 90.0, 8),
];

/// An ordered, non-overlapping sequence of [`ReclassRange`]s.
///
/// Gaps between ranges are allowed; values falling into a gap classify as
/// no-data.
#[derive(Debug, Clone, PartialEq)]
pub struct ReclassTable {
    ranges: Cow<'static, [ReclassRange]>,
}

impl ReclassTable {
    /// Validate and wrap a caller-supplied table.
    ///
    /// Ranges must be finite, have `low < high`, be sorted by `low` and must
    /// not overlap.
    pub fn new(ranges: Vec<ReclassRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::InvalidTable("table has no ranges".into()));
        }

        for (i, r) in ranges.iter().enumerate() {
            if !r.low.is_finite() || !r.high.is_finite() {
                return Err(Error::InvalidTable(format!(
                    "range {} has a non-finite bound ({}, {})",
                    i, r.low, r.high
                )));
            }
            if r.low >= r.high {
                return Err(Error::InvalidTable(format!(
                    "range {} is empty: low {} >= high {}",
                    i, r.low, r.high
                )));
            }
        }

        for (i, pair) in ranges.windows(2).enumerate() {
            if pair[0].high > pair[1].low {
                return Err(Error::InvalidTable(format!(
                    "range {} [{}, {}) overlaps or precedes range {} [{}, {})",
                    i + 1,
                    pair[1].low,
                    pair[1].high,
                    i,
                    pair[0].low,
                    pair[0].high
                )));
            }
        }

        Ok(Self {
            ranges: Cow::Owned(ranges),
        })
    }

    /// Build a table from flat `low, high, code` triples, the layout used by
    /// GIS "reclassify by table" tools.
    pub fn from_triples(values: &[f64]) -> Result<Self> {
        if values.len() % 3 != 0 {
            return Err(Error::InvalidTable(format!(
                "expected low/high/code triples, got {} values",
                values.len()
            )));
        }

        let ranges = values
            .chunks_exact(3)
            .map(|t| {
                let code = t[2];
                if code.fract() != 0.0 || code < i32::MIN as f64 || code > i32::MAX as f64 {
                    return Err(Error::InvalidTable(format!(
                        "class code {} is not an integer",
                        code
                    )));
                }
                Ok(ReclassRange::new(t[0], t[1], code as i32))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(ranges)
    }

    /// Eight 45° compass bins, codes 10..=80
    pub const fn aspect() -> Self {
        Self {
            ranges: Cow::Borrowed(ASPECT_RANGES),
        }
    }

    /// Five slope bins, codes 0, 2, 4, 6, 8
    pub const fn slope() -> Self {
        Self {
            ranges: Cow::Borrowed(SLOPE_RANGES),
        }
    }

    pub fn ranges(&self) -> &[ReclassRange] {
        &self.ranges
    }

    /// Distinct output codes, ascending
    pub fn codes(&self) -> Vec<i32> {
        let mut codes: Vec<i32> = self.ranges.iter().map(|r| r.code).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// The first range, in table order, that holds `value`.
    pub fn range_for(&self, value: f64) -> Option<&ReclassRange> {
        let last = self.ranges.len().checked_sub(1)?;
        self.ranges
            .iter()
            .enumerate()
            .find(|(i, r)| r.contains(value, *i == last))
            .map(|(_, r)| r)
    }

    /// Code for `value`, or `None` when no range holds it (including NaN).
    pub fn lookup(&self, value: f64) -> Option<i32> {
        self.range_for(value).map(|r| r.code)
    }
}
