//! Grid file I/O: ESRI ASCII grid load and save.
//!
//! The ASCII grid format is a plain-text raster: a short header of
//! `keyword value` lines (`ncols`, `nrows`, `xllcorner`, `yllcorner`,
//! `cellsize`, `NODATA_value`) followed by row-major sample values, top
//! row first. The georeference fields are carried through untouched — this
//! crate does no projection or coordinate handling.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{FillError, FillResult};
use crate::types::Grid;

/// Georeference header fields of an ASCII grid, carried opaquely so a
/// loaded grid can be saved with its original placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoHeader {
    /// X coordinate of the lower-left corner.
    pub xllcorner: f64,
    /// Y coordinate of the lower-left corner.
    pub yllcorner: f64,
    /// Cell size in georeference units.
    pub cellsize: f64,
}

impl Default for GeoHeader {
    fn default() -> Self {
        Self {
            xllcorner: 0.0,
            yllcorner: 0.0,
            cellsize: 1.0,
        }
    }
}

/// Load a grid from an ESRI ASCII grid file.
///
/// `ncols` and `nrows` are required; `xllcorner`/`yllcorner` default to 0,
/// `cellsize` to 1 and `NODATA_value` to -9999 when absent, matching
/// common writer behavior.
pub fn load_ascii_grid(path: &Path) -> FillResult<(Grid, GeoHeader)> {
    let text = fs::read_to_string(path).map_err(|e| FillError::io_read(path, e))?;

    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut header = GeoHeader::default();
    let mut nodata = -9999.0;
    let mut header_lines = 0usize;

    for (lineno, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            header_lines += 1;
            continue;
        };
        if !key.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            break;
        }

        let value = tokens.next().ok_or_else(|| {
            FillError::parse_error(path, format!("line {}: missing header value", lineno + 1))
        })?;
        let parse_f64 = |v: &str| {
            v.parse::<f64>().map_err(|_| {
                FillError::parse_error(
                    path,
                    format!("line {}: invalid number {v:?}", lineno + 1),
                )
            })
        };

        match key.to_ascii_lowercase().as_str() {
            "ncols" => ncols = Some(parse_f64(value)? as usize),
            "nrows" => nrows = Some(parse_f64(value)? as usize),
            "xllcorner" | "xllcenter" => header.xllcorner = parse_f64(value)?,
            "yllcorner" | "yllcenter" => header.yllcorner = parse_f64(value)?,
            "cellsize" => header.cellsize = parse_f64(value)?,
            "nodata_value" => nodata = parse_f64(value)?,
            other => {
                return Err(FillError::parse_error(
                    path,
                    format!("line {}: unknown header keyword {other:?}", lineno + 1),
                ));
            }
        }
        header_lines += 1;
    }

    let cols =
        ncols.ok_or_else(|| FillError::parse_error(path, "missing ncols header entry"))?;
    let rows =
        nrows.ok_or_else(|| FillError::parse_error(path, "missing nrows header entry"))?;

    let mut data = Vec::with_capacity(rows * cols);
    for token in text
        .lines()
        .skip(header_lines)
        .flat_map(str::split_whitespace)
    {
        let value = token.parse::<f64>().map_err(|_| {
            FillError::parse_error(path, format!("invalid sample value {token:?}"))
        })?;
        data.push(value);
    }

    if data.len() != rows * cols {
        return Err(FillError::parse_error(
            path,
            format!(
                "expected {} samples for {rows}x{cols}, found {}",
                rows * cols,
                data.len()
            ),
        ));
    }

    debug!(path = %path.display(), rows, cols, nodata, "loaded ASCII grid");
    let grid = Grid::from_data(data, rows, cols, nodata)?;
    Ok((grid, header))
}

/// Save a grid as an ESRI ASCII grid file.
///
/// Missing parent directories are created first.
pub fn save_ascii_grid(path: &Path, grid: &Grid, header: &GeoHeader) -> FillResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| FillError::io_write(path, e))?;
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "ncols {}", grid.cols);
    let _ = writeln!(out, "nrows {}", grid.rows);
    let _ = writeln!(out, "xllcorner {}", header.xllcorner);
    let _ = writeln!(out, "yllcorner {}", header.yllcorner);
    let _ = writeln!(out, "cellsize {}", header.cellsize);
    let _ = writeln!(out, "NODATA_value {}", grid.nodata);
    for row in grid.data.chunks(grid.cols) {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}", value);
        }
        out.push('\n');
    }

    fs::write(path, out).map_err(|e| FillError::io_write(path, e))?;
    debug!(path = %path.display(), rows = grid.rows, cols = grid.cols, "saved ASCII grid");
    Ok(())
}
