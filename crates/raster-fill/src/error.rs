//! Error types for raster fill operations.
//!
//! This module provides error handling with:
//! - Machine-readable error codes for programmatic handling
//! - Rich context (which void, which shape, what went wrong)
//! - Terminal-friendly display via miette
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `RASTER-XXXX`:
//! - `RASTER-1xxx`: I/O errors (file reading, writing, parsing)
//! - `RASTER-2xxx`: Geometry errors (shape mismatches, bad windows)
//! - `RASTER-3xxx`: Fill faults (voids that cannot be filled)
//!
//! # Example
//!
//! ```rust,ignore
//! use raster_fill::{FillError, ErrorCode};
//!
//! let err = FillError::shape_mismatch("target grid", (6, 6), (6, 7));
//! println!("Error code: {}", err.code()); // RASTER-2001
//! ```

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for raster fill operations.
pub type FillResult<T> = Result<T, FillError>;

/// Machine-readable error codes for raster fill operations.
///
/// Codes follow the pattern `RASTER-XXXX` where:
/// - 1xxx = I/O errors
/// - 2xxx = Geometry errors
/// - 3xxx = Fill faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // I/O errors (1xxx)
    /// RASTER-1001: Failed to read file
    IoRead = 1001,
    /// RASTER-1002: Failed to write file
    IoWrite = 1002,
    /// RASTER-1003: Failed to parse grid file
    ParseError = 1003,

    // Geometry errors (2xxx)
    /// RASTER-2001: Grid shapes do not agree
    ShapeMismatch = 2001,
    /// RASTER-2002: A void's window falls outside the grid
    WindowOutOfBounds = 2002,

    // Fill faults (3xxx)
    /// RASTER-3001: A void has no known boundary cells
    EmptyBoundary = 3001,
    /// RASTER-3002: A boundary ring does not cover its working shape
    RingCoverage = 3002,
    /// RASTER-3003: A boundary ring violates its own invariants
    InvalidRing = 3003,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `RASTER-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IoRead => "RASTER-1001",
            ErrorCode::IoWrite => "RASTER-1002",
            ErrorCode::ParseError => "RASTER-1003",
            ErrorCode::ShapeMismatch => "RASTER-2001",
            ErrorCode::WindowOutOfBounds => "RASTER-2002",
            ErrorCode::EmptyBoundary => "RASTER-3001",
            ErrorCode::RingCoverage => "RASTER-3002",
            ErrorCode::InvalidRing => "RASTER-3003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while filling voids in a raster.
///
/// Faults split into two families with different propagation:
/// - Per-void faults (`EmptyBoundary`, `RingCoverage`) leave one void at the
///   sentinel value while the run continues for the other voids.
/// - Whole-run faults (`ShapeMismatch`, `WindowOutOfBounds`, I/O errors)
///   abort the run immediately.
#[derive(Debug, Error, Diagnostic)]
pub enum FillError {
    /// Error reading from a file.
    #[error("failed to read grid from {path}")]
    #[diagnostic(
        code(raster::io::read),
        help("Check that the file exists and is readable")
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a file.
    #[error("failed to write grid to {path}")]
    #[diagnostic(
        code(raster::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a grid file.
    #[error("failed to parse grid from {path}: {details}")]
    #[diagnostic(
        code(raster::parse::error),
        help("The file may be truncated or not an ESRI ASCII grid")
    )]
    ParseError { path: PathBuf, details: String },

    /// Two grids that must share a shape do not.
    #[error("grid shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    #[diagnostic(
        code(raster::geometry::shape),
        help("Source and target grids must have identical (rows, cols) dimensions")
    )]
    ShapeMismatch {
        context: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A void's working window does not fit inside the grid.
    #[error(
        "window for void {label} at ({row0}, {col0}) sized {rows}x{cols} exceeds grid shape {shape:?}"
    )]
    #[diagnostic(
        code(raster::geometry::window),
        help("Void windows are derived from the grid; this indicates corrupt labeling state")
    )]
    WindowOutOfBounds {
        label: u32,
        row0: usize,
        col0: usize,
        rows: usize,
        cols: usize,
        shape: (usize, usize),
    },

    /// A void has no known cells on its boundary, so there is nothing to
    /// interpolate from.
    #[error("empty boundary: {details}")]
    #[diagnostic(
        code(raster::fill::empty_boundary),
        help("The void has no reachable known neighbor; it is left at the sentinel value")
    )]
    EmptyBoundary { details: String },

    /// A boundary ring reported full but does not cover every cell of its
    /// working shape.
    #[error("boundary ring covers {actual} of {expected} cells in its working shape")]
    #[diagnostic(
        code(raster::fill::ring_coverage),
        help("Aggregation must de-duplicate coordinates; this indicates an internal fault")
    )]
    RingCoverage { expected: usize, actual: usize },

    /// A boundary ring was constructed with inconsistent data.
    #[error("invalid boundary ring: {details}")]
    #[diagnostic(
        code(raster::fill::invalid_ring),
        help("Ring coordinates must be unique and lie inside the working shape")
    )]
    InvalidRing { details: String },
}

impl FillError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            FillError::IoRead { .. } => ErrorCode::IoRead,
            FillError::IoWrite { .. } => ErrorCode::IoWrite,
            FillError::ParseError { .. } => ErrorCode::ParseError,
            FillError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            FillError::WindowOutOfBounds { .. } => ErrorCode::WindowOutOfBounds,
            FillError::EmptyBoundary { .. } => ErrorCode::EmptyBoundary,
            FillError::RingCoverage { .. } => ErrorCode::RingCoverage,
            FillError::InvalidRing { .. } => ErrorCode::InvalidRing,
        }
    }

    /// True for faults that leave a single void unfilled while the run
    /// continues; false for faults that abort the whole run.
    pub fn is_per_void(&self) -> bool {
        matches!(
            self,
            FillError::EmptyBoundary { .. } | FillError::RingCoverage { .. }
        )
    }

    // Constructor helpers for common error patterns

    /// Create an IoRead error.
    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FillError::IoRead {
            path: path.into(),
            source,
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FillError::IoWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseError.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        FillError::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        FillError::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create an EmptyBoundary error.
    pub fn empty_boundary(details: impl Into<String>) -> Self {
        FillError::EmptyBoundary {
            details: details.into(),
        }
    }

    /// Create a RingCoverage error.
    pub fn ring_coverage(expected: usize, actual: usize) -> Self {
        FillError::RingCoverage { expected, actual }
    }

    /// Create an InvalidRing error.
    pub fn invalid_ring(details: impl Into<String>) -> Self {
        FillError::InvalidRing {
            details: details.into(),
        }
    }
}
