//! Elevation resolution with session tile caching.
//!
//! [`ElevationService`] is the high-level interface: it maps coordinates to
//! tiles, loads tiles through a [`TileSource`], caches each loaded grid for
//! its own lifetime, and translates void samples into `None`. One service
//! instance is one resolution session: create it at the start of a batch or
//! profile computation and drop it at the end; tiles are never persisted
//! across sessions.
//!
//! # Example
//!
//! ```ignore
//! use topotrack::ElevationService;
//!
//! let service = ElevationService::new("/path/to/hgt/files");
//!
//! // Query elevation - tile is loaded automatically
//! let elevation = service.elevation(35.6762, 139.6503)?; // Tokyo
//!
//! // Second query in same tile uses the cached grid
//! let elevation2 = service.elevation(35.6800, 139.6500)?;
//!
//! // Check cache statistics
//! let stats = service.cache_stats();
//! println!("Cache hit rate: {:.1}%", stats.hit_rate() * 100.0);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

use crate::error::{ElevationError, Result};
use crate::source::{DiskTileSource, TileSource};
use crate::tile::{Tile, VOID_VALUE};
use crate::tile_id::TileId;

/// Statistics about cache usage.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of tiles currently in the cache.
    pub entry_count: u64,
    /// Number of cache hits (lookups served from cache).
    pub hit_count: u64,
    /// Number of cache misses (tiles loaded from the source).
    pub miss_count: u64,
}

impl CacheStats {
    /// Cache hit rate (0.0 to 1.0); 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

/// Elevation resolver with automatic tile loading and caching.
///
/// Generic over its [`TileSource`] so tests can substitute in-memory
/// storage; the default reads `.hgt` / `.hgt.zip` files from a directory.
/// The cache is unbounded: the tiles a single session touches are few and
/// a route rarely crosses more than a handful of degree cells.
pub struct ElevationService<S: TileSource = DiskTileSource> {
    source: S,
    tile_cache: Cache<TileId, Arc<Tile>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl ElevationService<DiskTileSource> {
    /// Create a service reading tiles from a directory of `.hgt` /
    /// `.hgt.zip` files.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::with_source(DiskTileSource::new(data_dir))
    }
}

impl<S: TileSource> ElevationService<S> {
    /// Create a service over an arbitrary tile source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            tile_cache: Cache::builder().build(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Elevation in meters at the given coordinate, nearest-cell.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(elevation))` - elevation in meters
    /// - `Ok(None)` - the sample is the void sentinel ("no data")
    /// - `Err(...)` - invalid coordinate, missing or corrupt tile, or I/O
    ///   failure; single-point lookups fail fast rather than masking a
    ///   missing tile as `None`
    pub fn elevation(&self, lat: f64, lon: f64) -> Result<Option<i16>> {
        let id = TileId::for_coords(lat, lon)?;
        let tile = self.load_tile(id)?;

        let sample = tile.sample(lat, lon);
        Ok((sample != VOID_VALUE).then_some(sample))
    }

    /// Elevations for a batch of coordinates, aligned 1:1 with the input.
    ///
    /// All coordinates are validated up front: any invalid pair rejects the
    /// whole batch before tile work starts. Coordinates are then grouped by
    /// tile so each unique tile is loaded at most once per call; for a
    /// dense route most points share a tile, and this is what makes a batch
    /// cheaper than repeated single lookups.
    ///
    /// Unlike [`Self::elevation`], a missing or corrupt tile does not fail
    /// the batch: its points are reported as `None` and resolution
    /// continues, so one absent tile at a route's edge does not discard an
    /// otherwise complete profile. Other I/O errors still propagate.
    pub fn elevations(&self, coords: &[(f64, f64)]) -> Result<Vec<Option<i16>>> {
        let mut results = vec![None; coords.len()];

        // Group coordinate indices by tile, validating as we go.
        let mut groups: HashMap<TileId, Vec<usize>> = HashMap::new();
        for (i, &(lat, lon)) in coords.iter().enumerate() {
            let id = TileId::for_coords(lat, lon)?;
            groups.entry(id).or_default().push(i);
        }

        for (id, indices) in &groups {
            let tile = match self.load_tile(*id) {
                Ok(tile) => tile,
                Err(ElevationError::TileNotFound { .. })
                | Err(ElevationError::TileCorrupt { .. }) => continue,
                Err(e) => return Err(e),
            };

            for &i in indices {
                let (lat, lon) = coords[i];
                let sample = tile.sample(lat, lon);
                if sample != VOID_VALUE {
                    results[i] = Some(sample);
                }
            }
        }

        Ok(results)
    }

    /// Load a tile from cache or from the source.
    fn load_tile(&self, id: TileId) -> Result<Arc<Tile>> {
        if let Some(tile) = self.tile_cache.get(&id) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            return Ok(tile);
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);

        let bytes = self.source.load_tile_bytes(id)?;
        let tile = Arc::new(Tile::new(id, bytes)?);

        self.tile_cache.insert(id, tile.clone());
        Ok(tile)
    }

    /// Cache statistics for this session.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.tile_cache.entry_count(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    /// Drop all cached tiles.
    pub fn clear_cache(&self) {
        self.tile_cache.invalidate_all();
    }

    /// The tile source backing this service.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TileBytes;
    use std::fs;
    use std::io::Write;
    use std::sync::atomic::AtomicUsize;
    use tempfile::TempDir;

    const SRTM3_SAMPLES: usize = 1201;
    const SRTM3_SIZE: usize = SRTM3_SAMPLES * SRTM3_SAMPLES * 2;

    /// SRTM3 payload with the given elevation at the grid center.
    fn payload_with_center(center_elevation: i16) -> Vec<u8> {
        let mut data = vec![0u8; SRTM3_SIZE];
        let center = (600 * SRTM3_SAMPLES + 600) * 2;
        data[center..center + 2].copy_from_slice(&center_elevation.to_be_bytes());
        data
    }

    fn create_test_tile(dir: &Path, filename: &str, center_elevation: i16) {
        let path = dir.join(filename);
        let mut file = fs::File::create(path).unwrap();
        file.write_all(&payload_with_center(center_elevation)).unwrap();
    }

    /// In-memory tile source that counts loads, for cache assertions.
    struct MapSource {
        tiles: HashMap<TileId, Vec<u8>>,
        loads: AtomicUsize,
    }

    impl MapSource {
        fn new(tiles: Vec<(TileId, Vec<u8>)>) -> Self {
            Self {
                tiles: tiles.into_iter().collect(),
                loads: AtomicUsize::new(0),
            }
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::Relaxed)
        }
    }

    impl TileSource for MapSource {
        fn load_tile_bytes(&self, id: TileId) -> Result<TileBytes> {
            self.loads.fetch_add(1, Ordering::Relaxed);
            self.tiles
                .get(&id)
                .cloned()
                .map(TileBytes::from)
                .ok_or_else(|| ElevationError::TileNotFound { name: id.name() })
        }
    }

    #[test]
    fn test_service_basic() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);

        let service = ElevationService::new(tmp.path());
        let elevation = service.elevation(35.5, 138.5).unwrap();
        assert_eq!(elevation, Some(500));
    }

    #[test]
    fn test_cache_hit() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);

        let service = ElevationService::new(tmp.path());

        // First query - cache miss
        let _ = service.elevation(35.5, 138.5).unwrap();
        let stats = service.cache_stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_count, 0);

        // Second query in same tile - cache hit
        let _ = service.elevation(35.6, 138.6).unwrap();
        let stats = service.cache_stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_count, 1);
    }

    #[test]
    fn test_multiple_tiles() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);
        create_test_tile(tmp.path(), "N36E138.hgt", 1000);

        let service = ElevationService::new(tmp.path());
        assert_eq!(service.elevation(35.5, 138.5).unwrap(), Some(500));
        assert_eq!(service.elevation(36.5, 138.5).unwrap(), Some(1000));
        assert_eq!(service.cache_stats().miss_count, 2);
    }

    #[test]
    fn test_invalid_coordinates() {
        let tmp = TempDir::new().unwrap();
        let service = ElevationService::new(tmp.path());

        for &(lat, lon) in &[(90.5, 0.0), (-90.5, 0.0), (0.0, 200.0), (f64::NAN, 0.0)] {
            let err = service.elevation(lat, lon).unwrap_err();
            assert!(matches!(err, ElevationError::InvalidCoordinate { .. }));
        }
    }

    #[test]
    fn test_missing_tile_fails_single_lookup() {
        let tmp = TempDir::new().unwrap();
        let service = ElevationService::new(tmp.path());

        let err = service.elevation(50.0, 50.0).unwrap_err();
        assert!(matches!(err, ElevationError::TileNotFound { .. }));
    }

    #[test]
    fn test_void_sample_is_none_not_error() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", VOID_VALUE);

        let service = ElevationService::new(tmp.path());
        assert_eq!(service.elevation(35.5, 138.5).unwrap(), None);
    }

    #[test]
    fn test_batch_alignment_and_values() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);

        let service = ElevationService::new(tmp.path());
        let coords = vec![
            (35.5, 138.5), // center = 500
            (50.0, 50.0),  // missing tile
            (35.1, 138.1), // zero-filled region of the same tile
        ];
        let results = service.elevations(&coords).unwrap();

        assert_eq!(results, vec![Some(500), None, Some(0)]);
    }

    #[test]
    fn test_batch_continues_past_missing_tile() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);

        let service = ElevationService::new(tmp.path());
        // Missing tile first: later points must still resolve.
        let results = service
            .elevations(&[(50.0, 50.0), (35.5, 138.5)])
            .unwrap();
        assert_eq!(results, vec![None, Some(500)]);
    }

    #[test]
    fn test_batch_rejects_invalid_coordinate() {
        let tmp = TempDir::new().unwrap();
        create_test_tile(tmp.path(), "N35E138.hgt", 500);

        let service = ElevationService::new(tmp.path());
        let err = service
            .elevations(&[(35.5, 138.5), (91.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, ElevationError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_batch_loads_shared_tile_once() {
        let source = MapSource::new(vec![(TileId::new(35, 138), payload_with_center(500))]);
        let service = ElevationService::with_source(source);

        let results = service
            .elevations(&[(35.5, 138.5), (35.6, 138.6)])
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Some(500));

        assert_eq!(service.source().load_count(), 1);
    }

    #[test]
    fn test_cache_survives_across_batches_in_one_session() {
        let source = MapSource::new(vec![(TileId::new(35, 138), payload_with_center(500))]);
        let service = ElevationService::with_source(source);

        let _ = service.elevations(&[(35.5, 138.5)]).unwrap();
        let _ = service.elevations(&[(35.6, 138.6)]).unwrap();
        let _ = service.elevation(35.7, 138.7).unwrap();

        assert_eq!(service.source().load_count(), 1);
    }

    #[test]
    fn test_corrupt_tile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("N35E138.hgt"), vec![0u8; 1000]).unwrap();

        let service = ElevationService::new(tmp.path());

        // Single lookup fails fast.
        let err = service.elevation(35.5, 138.5).unwrap_err();
        assert!(matches!(err, ElevationError::TileCorrupt { .. }));

        // Batch marks the points and continues.
        let results = service.elevations(&[(35.5, 138.5)]).unwrap();
        assert_eq!(results, vec![None]);
    }

    #[test]
    fn test_zip_tile_resolves() {
        let tmp = TempDir::new().unwrap();
        let file = fs::File::create(tmp.path().join("N40E010.hgt.zip")).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer.start_file("N40E010.hgt", options).unwrap();
        writer.write_all(&payload_with_center(250)).unwrap();
        writer.finish().unwrap();

        let service = ElevationService::new(tmp.path());
        assert_eq!(service.elevation(40.5, 10.5).unwrap(), Some(250));
    }

    #[test]
    fn test_clear_cache() {
        let source = MapSource::new(vec![(TileId::new(35, 138), payload_with_center(500))]);
        let service = ElevationService::with_source(source);

        let _ = service.elevation(35.5, 138.5).unwrap();
        service.clear_cache();
        let _ = service.elevation(35.5, 138.5).unwrap();

        assert_eq!(service.source().load_count(), 2);
    }

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            entry_count: 5,
            hit_count: 80,
            miss_count: 20,
        };
        assert_eq!(stats.hit_rate(), 0.8);

        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_determinism() {
        let source = MapSource::new(vec![(TileId::new(35, 138), payload_with_center(500))]);
        let service = ElevationService::with_source(source);

        let first = service.elevation(35.5, 138.5).unwrap();
        let second = service.elevation(35.5, 138.5).unwrap();
        assert_eq!(first, second);
    }
}
