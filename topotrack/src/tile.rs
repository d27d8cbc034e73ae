//! Elevation tile grids and nearest-cell sampling.
//!
//! A tile is a square grid of big-endian signed 16-bit elevation samples in
//! row-major order, row 0 at the **north** edge and column 0 at the west
//! edge. The payload is kept in its raw byte layout (no flip, no byte swap
//! up front) and samples are decoded on access, which lets memory-mapped
//! tiles be read without copying.

use crate::error::{ElevationError, Result};
use crate::source::TileBytes;
use crate::tile_id::{grid_index, TileId};

/// Payload size for SRTM1 (1 arc-second, ~30m resolution): 3601 × 3601 × 2 bytes
const SRTM1_SIZE: usize = 3601 * 3601 * 2; // 25,934,402 bytes

/// Payload size for SRTM3 (3 arc-second, ~90m resolution): 1201 × 1201 × 2 bytes
const SRTM3_SIZE: usize = 1201 * 1201 * 2; // 2,884,802 bytes

/// Number of samples per row/column for SRTM1
const SRTM1_SAMPLES: usize = 3601;

/// Number of samples per row/column for SRTM3
const SRTM3_SAMPLES: usize = 1201;

/// Sentinel sample meaning "no data" in SRTM tiles.
pub const VOID_VALUE: i16 = -32768;

/// Resolution of an SRTM tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrtmResolution {
    /// SRTM1: 1 arc-second (~30m) resolution
    Srtm1,
    /// SRTM3: 3 arc-second (~90m) resolution
    Srtm3,
}

impl SrtmResolution {
    /// Number of samples per row/column for this resolution.
    pub fn samples(&self) -> usize {
        match self {
            SrtmResolution::Srtm1 => SRTM1_SAMPLES,
            SrtmResolution::Srtm3 => SRTM3_SAMPLES,
        }
    }

    /// Approximate ground resolution in meters.
    pub fn meters(&self) -> f64 {
        match self {
            SrtmResolution::Srtm1 => 30.0,
            SrtmResolution::Srtm3 => 90.0,
        }
    }
}

/// An immutable elevation tile grid.
pub struct Tile {
    id: TileId,
    data: TileBytes,
    samples: usize,
    resolution: SrtmResolution,
}

impl Tile {
    /// Wrap a raw tile payload, detecting the resolution from its length.
    ///
    /// # Errors
    ///
    /// Returns [`ElevationError::TileCorrupt`] if the length matches neither
    /// SRTM1 nor SRTM3.
    pub fn new(id: TileId, data: TileBytes) -> Result<Self> {
        let (samples, resolution) = match data.len() {
            SRTM1_SIZE => (SRTM1_SAMPLES, SrtmResolution::Srtm1),
            SRTM3_SIZE => (SRTM3_SAMPLES, SrtmResolution::Srtm3),
            size => {
                return Err(ElevationError::TileCorrupt {
                    name: id.name(),
                    size,
                })
            }
        };

        Ok(Self {
            id,
            data,
            samples,
            resolution,
        })
    }

    /// Raw sample nearest to the given coordinate.
    ///
    /// Returns [`VOID_VALUE`] untranslated; mapping voids to "no data" is
    /// the resolver's concern. The coordinate is assumed to lie within this
    /// tile; only its fractional degrees are used.
    pub fn sample(&self, lat: f64, lon: f64) -> i16 {
        let (row, col) = grid_index(lat, lon, self.samples);
        self.sample_at(row, col)
    }

    /// Raw sample at a grid index, row 0 = north edge, col 0 = west edge.
    ///
    /// Indices are clamped to the grid.
    pub fn sample_at(&self, row: usize, col: usize) -> i16 {
        let row = row.min(self.samples - 1);
        let col = col.min(self.samples - 1);

        // 2 bytes per sample, row-major, big-endian.
        let offset = (row * self.samples + col) * 2;
        i16::from_be_bytes([self.data[offset], self.data[offset + 1]])
    }

    /// Identity of this tile.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Resolution of this tile.
    pub fn resolution(&self) -> SrtmResolution {
        self.resolution
    }

    /// Number of samples per row/column.
    pub fn samples(&self) -> usize {
        self.samples
    }
}
