//! Tile addressing: mapping coordinates to 1°×1° tile identities and to
//! sample indices inside a tile grid.
//!
//! # Naming Format
//!
//! SRTM tiles follow the naming convention `{N|S}{lat}{E|W}{lon}`:
//!
//! - Latitude: 2 digits with N/S prefix (e.g. N35, S12)
//! - Longitude: 3 digits with E/W prefix (e.g. E138, W077)
//!
//! The name encodes the **southwest corner** of the 1° × 1° tile, obtained
//! by flooring both coordinates. A coordinate on an exact integer degree
//! belongs to the tile whose southwest corner equals that integer, so
//! `35.0` falls in `N35...`, not `N34...`, and `-0.5` falls in `S01...`
//! (floor of -0.5 is -1).

use std::fmt;

use crate::error::{ElevationError, Result};

/// Identity of a 1°×1° elevation tile, held as its integer southwest corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    lat: i32,
    lon: i32,
}

impl TileId {
    /// Tile containing the given coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`ElevationError::InvalidCoordinate`] for non-finite input or
    /// `|lat| > 90`, `|lon| > 180`. Validation happens here, before any tile
    /// work, so downstream grid math can assume well-formed coordinates.
    pub fn for_coords(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(ElevationError::InvalidCoordinate { lat, lon });
        }
        Ok(Self {
            lat: lat.floor() as i32,
            lon: lon.floor() as i32,
        })
    }

    /// Tile with an explicit integer southwest corner.
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Southwest corner latitude (integer degrees).
    pub fn lat(&self) -> i32 {
        self.lat
    }

    /// Southwest corner longitude (integer degrees).
    pub fn lon(&self) -> i32 {
        self.lon
    }

    /// Canonical tile name, e.g. `N35E138` or `S01W001`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Parse a tile name back to its identity.
    ///
    /// Accepts bare names (`N35E138`) as well as storage filenames
    /// (`N35E138.hgt`, `N35E138.hgt.zip`), case-insensitively. Returns
    /// `None` if the string does not follow the naming convention.
    pub fn parse(name: &str) -> Option<Self> {
        // Strip a path prefix and known storage suffixes.
        let name = name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(name);
        let name = name.strip_suffix(".zip").unwrap_or(name);
        let name = name.strip_suffix(".hgt").unwrap_or(name);

        // Must be exactly 7 characters: N00E000
        if name.len() != 7 {
            return None;
        }

        let bytes = name.as_bytes();
        let lat_sign = match bytes[0] {
            b'N' | b'n' => 1,
            b'S' | b's' => -1,
            _ => return None,
        };
        let lat: i32 = name[1..3].parse().ok()?;

        let lon_sign = match bytes[3] {
            b'E' | b'e' => 1,
            b'W' | b'w' => -1,
            _ => return None,
        };
        let lon: i32 = name[4..7].parse().ok()?;

        Some(Self {
            lat: lat * lat_sign,
            lon: lon * lon_sign,
        })
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{}{:03}",
            if self.lat >= 0 { 'N' } else { 'S' },
            self.lat.abs(),
            if self.lon >= 0 { 'E' } else { 'W' },
            self.lon.abs()
        )
    }
}

/// Map a coordinate to the (row, col) of the nearest sample in its tile grid.
///
/// Row 0 is the **north** edge of the tile (the raw SRTM layout, kept
/// unflipped), so the row index runs opposite to fractional latitude;
/// column 0 is the west edge. Both indices are clamped to
/// `[0, samples - 1]`, and an exact integer-degree latitude lands on the
/// south edge of its tile (row `samples - 1`).
///
/// Total for all valid coordinates; callers reject NaN/out-of-range input
/// via [`TileId::for_coords`] first.
pub fn grid_index(lat: f64, lon: f64, samples: usize) -> (usize, usize) {
    // f64::floor rounds toward -inf, so the fraction is in [0, 1) for
    // negative coordinates too.
    let lat_frac = lat - lat.floor();
    let lon_frac = lon - lon.floor();

    let max = samples - 1;
    let row = ((1.0 - lat_frac) * max as f64).round() as usize;
    let col = (lon_frac * max as f64).round() as usize;

    (row.min(max), col.min(max))
}
