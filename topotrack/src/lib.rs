//! # topotrack - GPS Track Metrics and SRTM Elevation
//!
//! Library for analyzing GPS tracks against SRTM (Shuttle Radar Topography
//! Mission) elevation tiles: route distance and ascent from recorded
//! coordinates, and per-coordinate elevation resolved from `.hgt` tile
//! grids with session caching.
//!
//! ## Features
//!
//! - **Route metrics**: total distance and cumulative ascent over track
//!   points, using latitude-corrected degree-to-meter scale factors
//! - **Elevation resolution**: nearest-cell sampling of the correct 1°×1°
//!   tile for any coordinate, with each tile loaded once per session
//! - **Flexible storage**: plain `.hgt` files are memory-mapped, `.hgt.zip`
//!   archives are decompressed on demand; other storage plugs in through
//!   the [`TileSource`] trait
//! - **Automatic detection**: tile resolution (SRTM1/SRTM3) is determined
//!   from the payload size
//!
//! ## Quick Start
//!
//! ```ignore
//! use topotrack::{track, ElevationService, TrackPoint};
//!
//! // Route metrics from parsed track points
//! let points = vec![
//!     TrackPoint::with_elevation(34.5, 71.5, 1000.0),
//!     TrackPoint::with_elevation(34.5001, 71.5, 1010.0),
//! ];
//! println!("{:.2} km", track::total_distance_km(&points));
//! println!("{:.0} m ascent", track::total_ascent_m(&points));
//!
//! // Elevation profile from SRTM tiles
//! let service = ElevationService::new("/data/srtm");
//! let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.lat, p.lon)).collect();
//! let profile = service.elevations(&coords)?;
//! ```
//!
//! ## SRTM Data Format
//!
//! SRTM tiles contain elevation data in a simple binary format:
//!
//! - **SRTM1**: 3601×3601 samples, 1 arc-second (~30m) resolution
//! - **SRTM3**: 1201×1201 samples, 3 arc-second (~90m) resolution
//!
//! Each sample is a 16-bit big-endian signed integer representing elevation
//! in meters, rows running north to south. The special value -32768
//! indicates void (no data); the service surfaces it as `None`, never as an
//! error or a silent zero.
//!
//! ## Data Sources
//!
//! Download SRTM data from:
//! - <https://dwtkns.com/srtm30m/>
//! - <https://earthexplorer.usgs.gov/>

pub mod error;
pub mod geodesy;
pub mod service;
pub mod source;
pub mod tile;
pub mod tile_id;
pub mod track;

// Re-export main types at crate root for convenience
pub use error::{ElevationError, Result};
pub use service::{CacheStats, ElevationService};
pub use source::{DiskTileSource, TileBytes, TileSource};
pub use tile::{SrtmResolution, Tile, VOID_VALUE};
pub use tile_id::TileId;
pub use track::TrackPoint;
