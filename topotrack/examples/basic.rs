//! Basic example demonstrating topotrack library usage.
//!
//! Run with: cargo run --example basic -- /path/to/hgt/files

use std::env;

use topotrack::{track, ElevationError, ElevationService, TrackPoint};

fn main() -> Result<(), ElevationError> {
    // Get data directory from command line
    let data_dir = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/hgt/files");
        std::process::exit(1);
    });

    let service = ElevationService::new(&data_dir);

    // Query some famous peaks
    let locations = [
        ("Mount Fuji, Japan", 35.3606, 138.7274),
        ("Mount Everest, Nepal", 27.9881, 86.9250),
        ("Denali, Alaska", 63.0695, -151.0074),
    ];

    println!("Elevation queries (nearest cell):");
    println!("{:-<50}", "");

    for (name, lat, lon) in &locations {
        match service.elevation(*lat, *lon) {
            Ok(Some(elev)) => println!("{name:<25} {elev}m"),
            Ok(None) => println!("{name:<25} void"),
            Err(e) => println!("{name:<25} {e}"),
        }
    }

    let stats = service.cache_stats();
    println!();
    println!(
        "Tiles loaded: {}, cache hit rate: {:.1}%",
        stats.miss_count,
        stats.hit_rate() * 100.0
    );

    // Route metrics need no tiles at all: distance and ascent come from the
    // recorded coordinates.
    let leg = vec![
        TrackPoint::with_elevation(35.3606, 138.7274, 3700.0),
        TrackPoint::with_elevation(35.3640, 138.7300, 3730.0),
        TrackPoint::with_elevation(35.3670, 138.7320, 3776.0),
    ];
    println!();
    println!(
        "Summit leg: {:.2} km, {:.0} m ascent",
        track::total_distance_km(&leg),
        track::total_ascent_m(&leg)
    );

    Ok(())
}
