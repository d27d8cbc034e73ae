use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::gpx_file;

pub fn run(input: PathBuf, output: Option<PathBuf>, max_points: usize) -> Result<()> {
    if max_points == 0 {
        bail!("--max-points must be at least 1");
    }

    let points = gpx_file::read_track_points(&input)?;

    // Keep every stride-th point so at most roughly max_points remain.
    let stride = 1 + points.len() / max_points;
    let kept: Vec<_> = points.iter().copied().step_by(stride).collect();

    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_thin.gpx", stem))
    });
    gpx_file::write_track_points(&output_path, &kept)?;

    println!(
        "Kept {} of {} points (stride {})",
        kept.len(),
        points.len(),
        stride
    );
    println!("Output written to: {}", output_path.display());
    Ok(())
}
