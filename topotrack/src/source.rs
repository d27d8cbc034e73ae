//! Tile byte acquisition from local storage.
//!
//! The elevation service only needs "the raw sample bytes for tile X"; where
//! those bytes come from is behind the [`TileSource`] trait. The stock
//! implementation, [`DiskTileSource`], serves a directory of `.hgt` files
//! (memory-mapped) and `.hgt.zip` archives (decompressed into memory), which
//! covers SRTM data as commonly distributed.

use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{ElevationError, Result};
use crate::tile_id::TileId;

/// Raw tile payload, either memory-mapped or owned.
///
/// Dereferences to `[u8]` so tiles can index it uniformly.
#[derive(Debug)]
pub enum TileBytes {
    /// Memory-mapped region backing a plain `.hgt` file.
    Mapped(Mmap),
    /// Bytes decompressed from an archive (or built in tests).
    Owned(Vec<u8>),
}

impl Deref for TileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            TileBytes::Mapped(mmap) => mmap,
            TileBytes::Owned(buf) => buf,
        }
    }
}

impl From<Vec<u8>> for TileBytes {
    fn from(buf: Vec<u8>) -> Self {
        TileBytes::Owned(buf)
    }
}

/// Storage collaborator: fetch the raw sample bytes for a tile.
pub trait TileSource {
    /// Load the payload for `id`.
    ///
    /// # Errors
    ///
    /// [`ElevationError::TileNotFound`] if the backing file or archive entry
    /// does not exist; [`ElevationError::Io`] for underlying read failures.
    /// Both are non-retryable for a given id within a session.
    fn load_tile_bytes(&self, id: TileId) -> Result<TileBytes>;
}

/// Tile source backed by a directory of `.hgt` / `.hgt.zip` files.
///
/// The directory is explicit configuration; there is no process-wide
/// default location.
pub struct DiskTileSource {
    data_dir: PathBuf,
}

impl DiskTileSource {
    /// Create a source serving tiles from `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this source reads from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_zip_entry(&self, zip_path: &Path, name: &str) -> Result<TileBytes> {
        let file = File::open(zip_path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // The archive holds one grid; take the first .hgt entry.
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            if entry.name().ends_with(".hgt") {
                let mut buf = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut buf)?;
                return Ok(TileBytes::Owned(buf));
            }
        }

        Err(ElevationError::TileNotFound {
            name: name.to_string(),
        })
    }
}

impl TileSource for DiskTileSource {
    fn load_tile_bytes(&self, id: TileId) -> Result<TileBytes> {
        let name = id.name();

        let hgt_path = self.data_dir.join(format!("{name}.hgt"));
        if hgt_path.exists() {
            let file = File::open(&hgt_path)?;
            // SAFETY: the mapping is read-only and the file is opened
            // read-only; the map is never exposed mutably.
            let mmap = unsafe { Mmap::map(&file)? };
            return Ok(TileBytes::Mapped(mmap));
        }

        let zip_path = self.data_dir.join(format!("{name}.hgt.zip"));
        if zip_path.exists() {
            return self.read_zip_entry(&zip_path, &name);
        }

        Err(ElevationError::TileNotFound { name })
    }
}
