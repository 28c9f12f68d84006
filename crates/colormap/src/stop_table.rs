//! Text stop tables, as exported by desktop GIS color-map tools.
//!
//! ```text
//! # QGIS Generated Color Map Export File
//! INTERPOLATION:INTERPOLATED
//! 10,191,54,12,255,label
//! 12,216,67,21,255,label
//! ```
//!
//! This is a boundary format only: ramps are built from static palettes and
//! converted here for import/export.

use crate::color::Rgba;
use crate::ramp::{ColorRamp, ColorStop, Interpolation};
use aspectslope_core::{Error, Result};
use std::fmt;

/// First header line written on export
pub const HEADER: &str = "# QGIS Generated Color Map Export File";

/// One `value,R,G,B,A,label` row.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRow {
    pub value: f64,
    pub color: Rgba,
    pub label: String,
}

/// A parsed or to-be-written stop table.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTable {
    pub interpolation: Interpolation,
    pub rows: Vec<StopRow>,
}

impl StopTable {
    /// Parse stop-table text.
    ///
    /// Leading whitespace is ignored on every line, `#` lines are comments and
    /// a missing `INTERPOLATION:` line means linear. Labels may contain commas.
    pub fn parse(text: &str) -> Result<Self> {
        let mut interpolation = Interpolation::Linear;
        let mut rows = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(mode) = line.strip_prefix("INTERPOLATION:") {
                interpolation = Interpolation::from_keyword(mode).ok_or_else(|| Error::Parse {
                    line: line_no,
                    reason: format!("unknown interpolation '{}'", mode.trim()),
                })?;
                continue;
            }

            rows.push(parse_row(line, line_no)?);
        }

        Ok(Self { interpolation, rows })
    }

    /// Rows for every stop of `ramp`, labelled by `labeler`.
    pub fn from_ramp<F>(ramp: &ColorRamp, labeler: F) -> Self
    where
        F: Fn(f64) -> String,
    {
        let rows = ramp
            .stops()
            .iter()
            .map(|s| StopRow {
                value: s.value,
                color: s.color,
                label: labeler(s.value),
            })
            .collect();

        Self {
            interpolation: ramp.interpolation(),
            rows,
        }
    }

    /// Build a ramp whose bounds are the first and last row values.
    pub fn to_ramp(&self) -> Result<ColorRamp> {
        let stops: Vec<ColorStop> = self
            .rows
            .iter()
            .map(|r| ColorStop::new(r.value, r.color))
            .collect();
        let (min, max) = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) => (first.value, last.value),
            _ => return Err(Error::InvalidColorRamp("stop table has no rows".into())),
        };
        ColorRamp::new(stops, min, max, self.interpolation)
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<StopRow> {
    let err = |reason: String| Error::Parse {
        line: line_no,
        reason,
    };

    let mut fields = line.splitn(6, ',');
    let mut next = |what: &str| {
        fields
            .next()
            .map(str::trim)
            .ok_or_else(|| err(format!("missing {} field", what)))
    };

    let value_text = next("value")?;
    let value: f64 = value_text
        .parse()
        .map_err(|_| err(format!("invalid value '{}'", value_text)))?;

    let mut channel = |name: &str| -> Result<u8> {
        let text = next(name)?;
        text.parse::<u8>()
            .map_err(|_| err(format!("invalid {} channel '{}'", name, text)))
    };
    let r = channel("red")?;
    let g = channel("green")?;
    let b = channel("blue")?;
    let a = channel("alpha")?;

    let label = fields.next().map(|s| s.trim().to_string()).unwrap_or_default();

    Ok(StopRow {
        value,
        color: Rgba::new(r, g, b, a),
        label,
    })
}

impl fmt::Display for StopTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        write!(f, "INTERPOLATION:{}", self.interpolation.keyword())?;
        for row in &self.rows {
            let Rgba { r, g, b, a } = row.color;
            write!(f, "\n{},{},{},{},{},{}", row.value, r, g, b, a, row.label)?;
        }
        Ok(())
    }
}
