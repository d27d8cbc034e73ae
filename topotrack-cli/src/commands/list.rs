use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use topotrack::TileId;

pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = super::require_data_dir(data_dir)?;

    if !dir.exists() {
        anyhow::bail!("Data directory does not exist: {}", dir.display());
    }

    // Collect .hgt and .hgt.zip files
    let mut tiles: Vec<_> = fs::read_dir(&dir)
        .context("Failed to read data directory")?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".hgt") || name.ends_with(".hgt.zip")
        })
        .collect();

    if tiles.is_empty() {
        println!("No .hgt or .hgt.zip files found in: {}", dir.display());
        return Ok(());
    }

    // Sort by filename
    tiles.sort_by_key(|e| e.file_name());

    // Detect resolution from file size (plain files only; archives are
    // compressed, so size is not meaningful)
    const SRTM1_SIZE: u64 = 3601 * 3601 * 2;
    const SRTM3_SIZE: u64 = 1201 * 1201 * 2;

    let mut srtm1_count = 0;
    let mut srtm3_count = 0;
    let mut zip_count = 0;
    let mut unknown_count = 0;
    let mut total_size: u64 = 0;

    println!("{:<16} {:>8} {:>26}", "TILE", "TYPE", "COVERAGE");
    println!("{}", "-".repeat(52));

    for entry in &tiles {
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        let size = fs::metadata(entry.path()).map(|m| m.len()).unwrap_or(0);
        total_size += size;

        let kind = if filename_str.ends_with(".hgt.zip") {
            zip_count += 1;
            "ZIP"
        } else {
            match size {
                s if s == SRTM1_SIZE => {
                    srtm1_count += 1;
                    "SRTM1"
                }
                s if s == SRTM3_SIZE => {
                    srtm3_count += 1;
                    "SRTM3"
                }
                _ => {
                    unknown_count += 1;
                    "???"
                }
            }
        };

        // Parse coverage from the tile name
        let coverage = match TileId::parse(&filename_str) {
            Some(id) => {
                let lat_prefix = if id.lat() >= 0 { "N" } else { "S" };
                let lon_prefix = if id.lon() >= 0 { "E" } else { "W" };
                format!(
                    "{}{:02} to {}{:02}, {}{:03} to {}{:03}",
                    lat_prefix,
                    id.lat().abs(),
                    lat_prefix,
                    (id.lat() + 1).abs(),
                    lon_prefix,
                    id.lon().abs(),
                    lon_prefix,
                    (id.lon() + 1).abs()
                )
            }
            None => "Unknown".to_string(),
        };

        println!("{:<16} {:>8} {:>26}", filename_str, kind, coverage);
    }

    // Summary
    println!();
    println!("Summary:");
    println!("  Total tiles: {}", tiles.len());
    if srtm1_count > 0 {
        println!("  SRTM1 (30m): {}", srtm1_count);
    }
    if srtm3_count > 0 {
        println!("  SRTM3 (90m): {}", srtm3_count);
    }
    if zip_count > 0 {
        println!("  Zipped: {}", zip_count);
    }
    if unknown_count > 0 {
        println!("  Unknown: {}", unknown_count);
    }
    println!("  Total size: {}", format_size(total_size));
    println!("  Data directory: {}", dir.display());

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
