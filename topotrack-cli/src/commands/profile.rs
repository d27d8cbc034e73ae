use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use topotrack::track::cumulative_distances_km;
use topotrack::ElevationService;

use crate::gpx_file;

pub fn run(data_dir: Option<PathBuf>, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let data_dir = super::require_data_dir(data_dir)?;
    let points = gpx_file::read_track_points(&input)?;

    // One batch resolution for the whole track; points sharing a tile reuse
    // one load.
    let service = ElevationService::new(data_dir);
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.lat, p.lon)).collect();
    let elevations = service
        .elevations(&coords)
        .context("Failed to resolve elevations")?;

    let distances = cumulative_distances_km(&points);

    // Prepare output
    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_profile.csv", stem))
    });
    let output_file = File::create(&output_path).context("Failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    writer.write_record(["distance_km", "ele", "srtm_ele"])?;
    for (i, point) in points.iter().enumerate() {
        let ele = point.ele.map(|e| format!("{e:.2}")).unwrap_or_default();
        let srtm_ele = match elevations[i] {
            Some(elev) => elev.to_string(),
            None => "void".to_string(),
        };
        writer.write_record([format!("{:.4}", distances[i]), ele, srtm_ele])?;
    }
    writer.flush()?;

    let stats = service.cache_stats();
    println!(
        "Resolved {} points across {} tiles",
        points.len(),
        stats.miss_count
    );
    println!("Output written to: {}", output_path.display());
    Ok(())
}
