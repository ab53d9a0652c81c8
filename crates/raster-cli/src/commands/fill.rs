//! raster fill command - fill no-data voids in a raster.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use raster_fill::{Exchange, ProgressCallback, load_ascii_grid, save_ascii_grid};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct FillResult {
    input: String,
    output: String,
    rows: usize,
    cols: usize,
    voids_found: usize,
    voids_filled: usize,
    cells_filled: usize,
    voids_skipped: usize,
    skipped: Vec<SkipInfo>,
}

#[derive(Serialize)]
struct SkipInfo {
    label: u32,
    cells: usize,
    code: String,
    reason: String,
}

pub fn run(input: &Path, output_path: &Path, merge: bool, force: bool, cli: &Cli) -> Result<()> {
    // Skip existing targets so batch runs can resume where they stopped.
    if output_path.exists() && !force {
        output::info(
            &format!("{} exists, skipping (use --force to overwrite)", output_path.display()),
            cli.quiet,
        );
        return Ok(());
    }

    let (source, header) = load_ascii_grid(input)
        .with_context(|| format!("Failed to load raster from {:?}", input))?;
    let (rows, cols) = source.shape();

    let mut exchange = if merge {
        let seeded = source.clone();
        Exchange::with_target(source, seeded)?
    } else {
        Exchange::new(source)
    };

    // Terminal progress, one tick per filled void.
    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Text);
    let progress: Option<ProgressCallback> = show_progress.then(|| {
        let callback: ProgressCallback = Box::new(|progress| {
            eprint!(
                "\r  filling voids: {}/{} ({}%)",
                progress.current,
                progress.total,
                progress.percent()
            );
            let _ = std::io::stderr().flush();
            if progress.is_complete() {
                eprintln!();
            }
        });
        callback
    });

    let report = exchange
        .run(progress.as_ref())
        .with_context(|| "Fill run failed")?;

    let target = exchange.into_target();
    save_ascii_grid(output_path, &target, &header)
        .with_context(|| format!("Failed to save raster to {:?}", output_path))?;

    let result = FillResult {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        rows,
        cols,
        voids_found: report.voids_found,
        voids_filled: report.voids_filled,
        cells_filled: report.cells_filled,
        voids_skipped: report.skipped.len(),
        skipped: report
            .skipped
            .iter()
            .map(|s| SkipInfo {
                label: s.label,
                cells: s.cells,
                code: s.code.to_string(),
                reason: s.reason.clone(),
            })
            .collect(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            output::success(
                &format!(
                    "filled {} of {} voids ({} cells) -> {}",
                    result.voids_filled, result.voids_found, result.cells_filled, result.output
                ),
                cli.quiet,
            );
            if !cli.quiet {
                for skip in &result.skipped {
                    println!(
                        "  {} void {} ({} cells): {}",
                        "skipped".yellow(),
                        skip.label,
                        skip.cells,
                        skip.reason
                    );
                }
            }
        }
    }

    Ok(())
}
