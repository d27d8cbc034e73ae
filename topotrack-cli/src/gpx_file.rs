//! GPX reading and writing for the CLI commands.
//!
//! Reading flattens the file's containers (tracks, segments, routes) into
//! one ordered list of [`TrackPoint`]s, in document order; nodes that are
//! not track or route points are ignored. Writing produces a single-segment
//! track, which is enough for the thinned-copy export.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use topotrack::TrackPoint;

/// Parse a GPX file into a flat ordered list of track points.
pub fn read_track_points(path: &Path) -> Result<Vec<TrackPoint>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let gpx = gpx::read(BufReader::new(file))
        .with_context(|| format!("Failed to parse GPX file {}", path.display()))?;

    let mut points = Vec::new();
    for track in &gpx.tracks {
        for segment in &track.segments {
            points.extend(segment.points.iter().map(to_track_point));
        }
    }
    for route in &gpx.routes {
        points.extend(route.points.iter().map(to_track_point));
    }

    Ok(points)
}

fn to_track_point(waypoint: &Waypoint) -> TrackPoint {
    let point = waypoint.point();
    TrackPoint {
        lat: point.y(),
        lon: point.x(),
        ele: waypoint.elevation,
    }
}

/// Write track points as a single-segment GPX track.
pub fn write_track_points(path: &Path, points: &[TrackPoint]) -> Result<()> {
    let waypoints = points
        .iter()
        .map(|p| {
            let mut waypoint = Waypoint::new(geo_types::Point::new(p.lon, p.lat));
            waypoint.elevation = p.ele;
            waypoint
        })
        .collect();

    let track = Track {
        segments: vec![TrackSegment { points: waypoints }],
        ..Default::default()
    };
    let gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("topotrack".to_string()),
        tracks: vec![track],
        ..Default::default()
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    gpx::write(&gpx, BufWriter::new(file))
        .with_context(|| format!("Failed to write GPX file {}", path.display()))?;

    Ok(())
}
