//! Error types shared by the aspect-slope crates

use thiserror::Error;

/// Main error type for aspect-slope operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid reclassification table: {0}")]
    InvalidTable(String),

    #[error("Code collision: {first:?} and {second:?} both encode to {combined}")]
    CodeCollision {
        combined: i32,
        first: (i32, i32),
        second: (i32, i32),
    },

    #[error("Invalid color ramp: {0}")]
    InvalidColorRamp(String),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for aspect-slope operations
pub type Result<T> = std::result::Result<T, Error>;
