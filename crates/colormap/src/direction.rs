//! Highlighted compass direction

use aspectslope_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which aspect, if any, an aspect-slope map should highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Full-spectrum palette, no direction singled out
    #[default]
    NoPreference,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All choices in menu order; `ALL[i]` is `from_index(i)`.
    pub const ALL: [Direction; 9] = [
        Self::NoPreference,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Position in [`Direction::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::NoPreference => "No preference",
            Self::North => "North",
            Self::NorthEast => "North East",
            Self::East => "East",
            Self::SouthEast => "South East",
            Self::South => "South",
            Self::SouthWest => "South West",
            Self::West => "West",
            Self::NorthWest => "North West",
        }
    }

    /// Suffix for the output layer name
    pub fn layer_label(self) -> &'static str {
        match self {
            Self::NoPreference => "Visualised",
            other => other.name(),
        }
    }

    /// Compass abbreviation, `None` for no preference
    pub fn abbreviation(self) -> Option<&'static str> {
        let abbr = match self {
            Self::NoPreference => return None,
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        };
        Some(abbr)
    }

    /// Aspect class code (10, 20, ..., 80) of this direction's compass bin
    pub fn aspect_code(self) -> Option<i32> {
        match self {
            Self::NoPreference => None,
            other => Some(other.index() as i32 * 10),
        }
    }

    /// Inverse of [`Direction::aspect_code`]
    pub fn from_aspect_code(code: i32) -> Option<Self> {
        if code <= 0 || code % 10 != 0 {
            return None;
        }
        match Self::from_index((code / 10) as usize)? {
            Self::NoPreference => None,
            d => Some(d),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Accepts names, abbreviations and menu indices, case-insensitively:
    /// `north-east`, `NorthEast`, `ne` and `2` all parse to [`Direction::NorthEast`].
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        if let Ok(index) = key.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| invalid_direction(s));
        }

        let direction = match key.as_str() {
            "none" | "nopreference" | "all" | "visualised" | "visualized" => Self::NoPreference,
            "n" | "north" => Self::North,
            "ne" | "northeast" => Self::NorthEast,
            "e" | "east" => Self::East,
            "se" | "southeast" => Self::SouthEast,
            "s" | "south" => Self::South,
            "sw" | "southwest" => Self::SouthWest,
            "w" | "west" => Self::West,
            "nw" | "northwest" => Self::NorthWest,
            _ => return Err(invalid_direction(s)),
        };
        Ok(direction)
    }
}

fn invalid_direction(s: &str) -> Error {
    Error::InvalidParameter {
        name: "direction",
        value: s.to_string(),
        reason: "expected none, n, ne, e, se, s, sw, w, nw or an index 0-8".into(),
    }
}
