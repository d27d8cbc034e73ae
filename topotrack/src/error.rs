//! Error types for the topotrack library.

use thiserror::Error;

/// Errors that can occur when resolving elevations from SRTM tiles.
#[derive(Error, Debug)]
pub enum ElevationError {
    /// IO error when reading tile storage.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Coordinates are not a valid latitude/longitude pair.
    #[error("Invalid coordinate: lat={lat}, lon={lon} (valid: lat ±90°, lon ±180°, finite)")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Neither a `.hgt` file nor a `.hgt.zip` archive exists for the tile.
    #[error("Elevation tile not found: {name}")]
    TileNotFound { name: String },

    /// Tile payload length matches neither SRTM1 nor SRTM3.
    #[error("Corrupt elevation tile {name}: {size} bytes (expected 25934402 for SRTM1 or 2884802 for SRTM3)")]
    TileCorrupt { name: String, size: usize },
}

/// Result type alias using [`ElevationError`].
pub type Result<T> = std::result::Result<T, ElevationError>;
