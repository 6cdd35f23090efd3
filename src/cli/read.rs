//! Read command: show the six tag fields for audio files.

use owo_colors::OwoColorize;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::tagging::{Field, TagAccessor, TagSet};
use crate::utils::progress::create_progress_spinner;
use crate::utils::scan;

pub fn handle_read(paths: &[String]) -> Result<(), Box<dyn Error>> {
    let files = gather_files(paths)?;

    if files.is_empty() {
        return Err("No audio files found".into());
    }

    let mut failed = 0;
    for file in &files {
        match TagAccessor::open(file) {
            Ok(accessor) => print_tags(file, &accessor.read()),
            Err(e) => {
                eprintln!("{} {e}", "Error:".red().bold());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} file(s) could not be read").into());
    }
    Ok(())
}

/// Expand the argument list: files pass through, directories are scanned
/// recursively for supported audio files.
pub fn gather_files(paths: &[String]) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files = Vec::new();
    for arg in paths {
        let path = Path::new(arg);
        if !path.exists() {
            return Err(format!("{} Path not found: {arg}", "Error:".red().bold()).into());
        }
        if path.is_dir() {
            let spinner = create_progress_spinner();
            spinner.set_message(format!("Scanning {arg}..."));
            let mut found = scan::collect_audio_files(path)?;
            spinner.finish_and_clear();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn print_tags(file: &Path, tags: &TagSet) {
    println!("{}", file.display().to_string().cyan());
    for field in Field::ALL {
        match tags.get(field) {
            Some(value) => println!("  {:>8}: {}", field.name().yellow(), value),
            None => println!("  {:>8}: {}", field.name().yellow(), "(none)".bright_black()),
        }
    }
}
