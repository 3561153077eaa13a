//! Dataset discovery.
//!
//! A dataset root holds rasters anywhere below it; each raster's parcel
//! boundaries live in a `Numbers/` directory next to the raster, one KML
//! per parcel number. Rasters without any boundary files are skipped.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// A raster paired with its boundary documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterEntry {
    pub raster: PathBuf,
    pub boundaries: Vec<PathBuf>,
}

/// Walk `root` and pair every `*.tif`/`*.tiff` with its sibling
/// `Numbers/*.kml` files.
///
/// Boundary lists are sorted by file name so batches are deterministic.
pub fn discover_dataset(root: &Path) -> Vec<RasterEntry> {
    let mut entries = Vec::new();

    for item in WalkDir::new(root).follow_links(true) {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !item.file_type().is_file() || !is_raster(item.path()) {
            continue;
        }

        let boundaries = boundary_files(item.path());
        if boundaries.is_empty() {
            debug!(raster = %item.path().display(), "raster has no boundary files");
            continue;
        }

        entries.push(RasterEntry {
            raster: item.path().to_path_buf(),
            boundaries,
        });
    }

    entries.sort_by(|a, b| a.raster.cmp(&b.raster));
    entries
}

fn is_raster(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff")
    )
}

fn boundary_files(raster: &Path) -> Vec<PathBuf> {
    let Some(numbers_dir) = raster.parent().map(|p| p.join("Numbers")) else {
        return Vec::new();
    };

    let mut kmls: Vec<PathBuf> = match std::fs::read_dir(&numbers_dir) {
        Ok(dir) => dir
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some(ext) if ext.eq_ignore_ascii_case("kml")
                )
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    kmls.sort();
    kmls
}
