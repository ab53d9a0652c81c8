//! raster info command - display raster and void statistics.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use raster_fill::load_ascii_grid;
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct RasterInfo {
    path: String,
    rows: usize,
    cols: usize,
    nodata: f64,
    xllcorner: f64,
    yllcorner: f64,
    cellsize: f64,
    nodata_cells: usize,
    voids: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    largest_void_cells: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    smallest_void_cells: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    void_sizes: Vec<usize>,
}

pub fn run(input: &Path, detailed: bool, cli: &Cli) -> Result<()> {
    let (grid, header) = load_ascii_grid(input)
        .with_context(|| format!("Failed to load raster from {:?}", input))?;

    let analysis = grid.label_voids();

    let info = RasterInfo {
        path: input.display().to_string(),
        rows: grid.rows,
        cols: grid.cols,
        nodata: grid.nodata,
        xllcorner: header.xllcorner,
        yllcorner: header.yllcorner,
        cellsize: header.cellsize,
        nodata_cells: analysis.nodata_cells,
        voids: analysis.void_count(),
        largest_void_cells: (!analysis.is_empty()).then(|| analysis.largest_void_cells()),
        smallest_void_cells: (!analysis.is_empty()).then(|| analysis.smallest_void_cells()),
        void_sizes: if detailed {
            analysis.regions.iter().map(|r| r.cells).collect()
        } else {
            Vec::new()
        },
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Raster Information".bold().underline());
                println!("  {}: {}", "File".cyan(), input.display());
                println!("  {}: {} x {}", "Shape".cyan(), info.rows, info.cols);
                println!("  {}: {}", "No-data value".cyan(), info.nodata);
                println!(
                    "  {}: ({}, {}) at cellsize {}",
                    "Origin".cyan(),
                    info.xllcorner,
                    info.yllcorner,
                    info.cellsize
                );
                println!("  {}: {}", "No-data cells".cyan(), info.nodata_cells);
                println!("  {}: {}", "Voids".cyan(), info.voids);

                if let (Some(largest), Some(smallest)) =
                    (info.largest_void_cells, info.smallest_void_cells)
                {
                    println!("  {}: {} cells", "Largest void".cyan(), largest);
                    println!("  {}: {} cells", "Smallest void".cyan(), smallest);
                }

                if detailed && !info.void_sizes.is_empty() {
                    println!("  {}:", "Void sizes".cyan());
                    for (i, cells) in info.void_sizes.iter().enumerate() {
                        println!("    void {}: {} cells", i + 1, cells);
                    }
                }
            }
        }
    }

    Ok(())
}
