//! Color ramps: ordered stops with bounded lookup

use crate::color::Rgba;
use crate::direction::Direction;
use crate::palette::{palette, FIRST_CODE, LAST_CODE};
use aspectslope_core::{Error, Result};

/// A code mapped to a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(value: f64, color: Rgba) -> Self {
        Self { value, color }
    }
}

/// How values between stops are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Channel-wise linear blend of the two bracketing stops
    #[default]
    Linear,
    /// Color of the first stop whose value is >= the input
    Discrete,
    /// Stop color on an exact match, transparent otherwise
    Exact,
}

impl Interpolation {
    /// Keyword used on the `INTERPOLATION:` header line of stop tables
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Linear => "INTERPOLATED",
            Self::Discrete => "DISCRETE",
            Self::Exact => "EXACT",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTERPOLATED" | "LINEAR" => Some(Self::Linear),
            "DISCRETE" => Some(Self::Discrete),
            "EXACT" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Immutable ordered stop list with fixed classification bounds.
///
/// Values are clamped into `[min, max]` and then to the stop range before
/// lookup, so out-of-range codes take the nearest boundary color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
    min: f64,
    max: f64,
    interpolation: Interpolation,
}

impl ColorRamp {
    /// Validate and build a ramp.
    ///
    /// Stops must be non-empty, finite and strictly increasing; bounds must be
    /// finite with `min <= max`.
    pub fn new(stops: Vec<ColorStop>, min: f64, max: f64, interpolation: Interpolation) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidColorRamp("ramp has no stops".into()));
        }
        if let Some(bad) = stops.iter().find(|s| !s.value.is_finite()) {
            return Err(Error::InvalidColorRamp(format!(
                "stop value {} is not finite",
                bad.value
            )));
        }
        if let Some(pair) = stops.windows(2).find(|w| w[1].value <= w[0].value) {
            return Err(Error::InvalidColorRamp(format!(
                "stop values must increase strictly: {} then {}",
                pair[0].value, pair[1].value
            )));
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::InvalidColorRamp(format!(
                "invalid classification bounds [{}, {}]",
                min, max
            )));
        }

        Ok(Self {
            stops,
            min,
            max,
            interpolation,
        })
    }

    /// Built-in linear ramp for a highlighted direction, bounds 10..=88
    pub fn for_direction(direction: Direction) -> Self {
        let stops = palette(direction)
            .entries()
            .map(|(code, color)| ColorStop::new(code as f64, color))
            .collect();
        Self {
            stops,
            min: FIRST_CODE as f64,
            max: LAST_CODE as f64,
            interpolation: Interpolation::Linear,
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Color for a scalar code. NaN is transparent.
    pub fn color_at(&self, value: f64) -> Rgba {
        if value.is_nan() {
            return Rgba::TRANSPARENT;
        }

        let v = value.clamp(self.min, self.max);
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if v <= first.value {
            return first.color;
        }
        if v >= last.value {
            return last.color;
        }

        // first.value < v < last.value, so 1 <= i < len
        let i = self.stops.partition_point(|s| s.value <= v);
        let lo = self.stops[i - 1];
        let hi = self.stops[i];

        match self.interpolation {
            Interpolation::Linear => {
                let t = (v - lo.value) / (hi.value - lo.value);
                lo.color.lerp(hi.color, t)
            }
            Interpolation::Discrete if v == lo.value => lo.color,
            Interpolation::Discrete => hi.color,
            Interpolation::Exact if v == lo.value => lo.color,
            Interpolation::Exact => Rgba::TRANSPARENT,
        }
    }
}

/// Build the built-in ramp for a direction choice.
pub fn build_ramp(direction: Direction) -> ColorRamp {
    ColorRamp::for_direction(direction)
}

/// Look up `code` on `ramp`.
pub fn color_at(ramp: &ColorRamp, code: f64) -> Rgba {
    ramp.color_at(code)
}
