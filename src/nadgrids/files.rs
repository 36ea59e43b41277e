//!
//! Read grids from files
//!
//! Grid file formats are recognized from their leading bytes: the NTv2
//! binary header (`NUM_OREC`) or the TIFF magic (`II*` / `MM*`) for
//! GeoTIFF packed grids. Anything else is rejected.
//!
use std::env;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::header::Header;
use super::ntv2::read_ntv2;
use crate::errors::{Error, Result};
use crate::nadgrids::Catalog;

/// Additional user provided search path for grid files
static GRID_PATH: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Set the directory searched for grid files in addition to
/// the `PROJ_NADGRIDS` and `PROJ_DATA` environment variables.
pub fn set_grid_path<P: AsRef<Path>>(path: P) {
    GRID_PATH.lock().unwrap().replace(path.as_ref().into());
}

/// Define a default file finder function
fn default_file_finder(name: &str) -> Result<PathBuf> {
    let p = Path::new(name);
    match p
        .exists()
        .then_some(PathBuf::from(p))
        .or_else(|| {
            GRID_PATH
                .lock()
                .unwrap()
                .as_ref()
                .map(|dir| dir.join(name))
                .filter(|p| p.exists())
        })
        .or_else(|| {
            if let Ok(val) = env::var("PROJ_NADGRIDS").or_else(|_| env::var("PROJ_DATA")) {
                val.split(':').find_map(|s| {
                    let p = Path::new(s).join(name);
                    p.exists().then_some(p)
                })
            } else {
                None
            }
        }) {
        Some(p) => Ok(p),
        None => Err(Error::GridFileNotFound(name.into())),
    }
}

pub(crate) enum FileType {
    Ntv2,
    Gtiff,
}

/// Recognize grid file type
pub(crate) fn recognize<R: Read + Seek>(read: &mut R) -> Result<FileType> {
    const BUFSIZE: usize = 56;
    let pos = read.stream_position()?;
    let mut header = Header::<BUFSIZE>::new();

    let rv = header.read_partial(read).and_then(|size| {
        if size >= 48 + 7 && header.cmp_str(0, "NUM_OREC") && header.cmp_str(48, "GS_TYPE") {
            Ok(FileType::Ntv2)
        } else if size >= 4 && (header.cmp_str(0, "II*") || header.cmp_str(0, "MM")) {
            Ok(FileType::Gtiff)
        } else {
            Err(Error::UnknownGridFormat)
        }
    });

    // Restore position
    read.seek(SeekFrom::Start(pos))?;
    rv
}

/// Grid builder that reads from a file
///
/// Install it with
/// `nadgrids::set_builder(nadgrids::files::read_from_file)`.
pub fn read_from_file(catalog: &Catalog, key: &str) -> Result<()> {
    read_from_file_path(catalog, key, &default_file_finder(key)?)
}

/// Read a grid from an explicit path, registering it under `key`
pub fn read_from_file_path(catalog: &Catalog, key: &str, path: &Path) -> Result<()> {
    // Use a BufReader for efficiency
    read(catalog, key, &mut BufReader::new(File::open(path)?))
}

/// Read a grid from a reader, registering it under `key`
pub fn read<R: Read + Seek>(catalog: &Catalog, key: &str, read: &mut R) -> Result<()> {
    match recognize(read)? {
        FileType::Ntv2 => read_ntv2(catalog, key, read),
        #[cfg(feature = "geotiff")]
        FileType::Gtiff => super::gtiff::read_gtiff(catalog, key, read),
        #[cfg(not(feature = "geotiff"))]
        FileType::Gtiff => Err(Error::UnknownGridFormat),
    }
}
