//! Set command: write explicit field values with a merge mode, bypassing the
//! key-interpretation layer.

use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;

use crate::tagging::{Field, MergeMode, TagAccessor, TagPatch, WritePlan};

/// Field values supplied on the command line. `None` means "leave alone".
pub struct SetValues {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub grouping: Option<String>,
    pub key: Option<String>,
}

pub fn handle_set(
    file: &str,
    values: SetValues,
    mode: MergeMode,
    overwrite_comment: bool,
    overwrite_grouping: bool,
    delimiter: &str,
) -> Result<(), Box<dyn Error>> {
    let patch = TagPatch {
        title: values.title,
        artist: values.artist,
        album: values.album,
        comment: values.comment,
        grouping: values.grouping,
        key: values.key,
    };

    if patch.is_empty() {
        return Err("No field values provided; nothing to write".into());
    }

    let plan = WritePlan {
        title: mode,
        artist: mode,
        album: mode,
        comment: mode,
        grouping: mode,
        overwrite_comment,
        overwrite_grouping,
        // only an explicit --key asks for the key field to change
        overwrite_key: patch.key.is_some(),
        delimiter: delimiter.to_string(),
    };

    let path = Path::new(file);
    let mut accessor = TagAccessor::open(path)?;
    accessor.write_fields(&patch, &plan)?;

    println!("{} {}", "Updated:".green().bold(), file.cyan());
    let tags = accessor.read();
    for field in Field::ALL {
        if patch.get(field).is_some() {
            println!(
                "  {:>8}: {}",
                field.name().yellow(),
                tags.get(field).unwrap_or_default()
            );
        }
    }

    Ok(())
}
