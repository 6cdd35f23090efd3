//! Parallel directory scanning for audio files.
//!
//! Directory traversal is parallelized with rayon so large collections scan
//! quickly.
//!
//! # Note on Ordering
//!
//! When parallel processing kicks in (multiple subdirectories), the order of
//! results is non-deterministic; callers that care should sort.

use rayon::prelude::*;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{AUDIO_EXTENSIONS, SKIP_DIRECTORIES};

/// Check if a file or directory is hidden (starts with '.')
pub fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Check if a directory should be skipped during traversal
pub fn should_skip_directory(name: &str) -> bool {
    SKIP_DIRECTORIES.contains(&name)
}

/// Collect all supported audio files in a directory tree.
///
/// # Error Handling
///
/// Errors encountered while scanning subdirectories (e.g., permission denied,
/// I/O errors) are logged but do not stop the scan, so all files in
/// accessible directories are still returned.
pub fn collect_audio_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let audio_exts: HashSet<&str> = AUDIO_EXTENSIONS.iter().copied().collect();
    let mut files = Vec::new();
    scan_directory(dir, &audio_exts, &mut files)?;
    Ok(files)
}

fn scan_directory(
    dir: &Path,
    audio_exts: &HashSet<&str>,
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let entries = fs::read_dir(dir)?;

    // Collect entries first to enable parallel processing
    let entries: Vec<_> = entries.collect::<Result<_, _>>()?;

    // Separate files and directories for different handling
    let mut local_files = Vec::new();
    let mut directories = Vec::new();

    for entry in entries {
        let path = entry.path();

        // Skip hidden files and directories
        if is_hidden_file(&path) {
            continue;
        }

        if path.is_dir() {
            let dir_name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };
            if !should_skip_directory(&dir_name) {
                directories.push(path);
            }
        } else if path.is_file()
            && let Some(extension) = path.extension()
        {
            let ext = extension.to_string_lossy().to_lowercase();
            if audio_exts.contains(ext.as_str()) {
                local_files.push(path);
            }
        }
    }

    files.extend(local_files);

    if directories.len() > 1 {
        // Parallel traversal; errors in one subtree don't halt the others
        let nested_files: Vec<Vec<PathBuf>> = directories
            .par_iter()
            .filter_map(|subdir| {
                let mut nested = Vec::new();
                match scan_directory(subdir, audio_exts, &mut nested) {
                    Ok(()) => Some(nested),
                    Err(e) => {
                        log::warn!("failed to scan directory '{}': {e}", subdir.display());
                        None
                    }
                }
            })
            .collect();

        for nested in nested_files {
            files.extend(nested);
        }
    } else {
        for subdir in directories {
            if let Err(e) = scan_directory(&subdir, audio_exts, files) {
                log::warn!("failed to scan directory '{}': {e}", subdir.display());
            }
        }
    }

    Ok(())
}
