//! Image path discovery.
//!
//! Scans a directory tree for image files and returns their paths in a
//! deterministic sorted order, ready to be sliced by an image source.

use std::path::{Path, PathBuf};

use rcc_core::{Error, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File extensions treated as images
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Collects image paths under `root`, recursively, in sorted order.
///
/// Non-image files are skipped. Sorting makes the path order, and hence any
/// fractional slice over it, reproducible across runs.
pub fn collect_image_paths<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(Error::NotFound(format!(
            "Image directory not found: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "Path is not a directory: {}",
            root.display()
        )));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| is_image_file(p))
        .collect();
    paths.sort();

    info!("Found {} images under {:?}", paths.len(), root);
    debug!("First path: {:?}", paths.first());

    Ok(paths)
}
