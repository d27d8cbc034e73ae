use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use topotrack::track::{total_ascent_m, total_distance_km};

use crate::gpx_file;

#[derive(Serialize)]
struct TrackSummary {
    points: usize,
    distance_km: f64,
    ascent_m: f64,
}

pub fn run(input: PathBuf, json: bool) -> Result<()> {
    let points = gpx_file::read_track_points(&input)?;

    let summary = TrackSummary {
        points: points.len(),
        distance_km: total_distance_km(&points),
        ascent_m: total_ascent_m(&points),
    };

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("Points:   {}", summary.points);
        println!("Distance: {:.2} km", summary.distance_km);
        println!("Ascent:   {:.0} m", summary.ascent_m);
    }

    Ok(())
}
