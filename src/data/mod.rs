use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks if a file is a .nii volume, excluding the scratch artifacts the
/// pipeline itself writes into the data directories.
pub fn is_nii(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if name.contains("ref.nii") || name.contains("tmp.nii") {
        return false;
    }
    path.extension().map_or(false, |ext| ext == "nii")
}

/// All .nii files in a directory, sorted by name, optionally truncated to
/// `max_images`.
pub fn find_volumes(dir: &Path, max_images: Option<usize>) -> crate::Result<Vec<PathBuf>> {
    println!("Searching for data in: {}", dir.display());
    let mut volumes: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_nii(path))
        .collect();
    volumes.sort();
    log::debug!("{} files found", volumes.len());

    if let Some(max) = max_images {
        if volumes.len() > max {
            volumes.truncate(max);
            println!("List of files truncated to {}", volumes.len());
        }
    }
    for path in &volumes {
        log::debug!("Found file {}", path.display());
    }
    Ok(volumes)
}

/// Filenames of a zero-padded input series: prefix0000.ext, prefix0001.ext, ...
pub fn input_series(prefix: &str, ext: &str, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| PathBuf::from(format!("{}{:04}{}", prefix, i, ext)))
        .collect()
}

/// Splits an input pattern like `MAT_####.txt` into the series prefix and
/// extension; the `#` placeholders mark where the index goes.
pub fn parse_series_pattern(pattern: &str) -> (String, String) {
    let ext = Path::new(pattern)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stem = pattern.strip_suffix(ext.as_str()).unwrap_or(pattern);
    (stem.replace('#', ""), ext)
}
