//! Merge policies applied to field values before they reach the file.
//!
//! A [`WritePlan`] decides, per field, how a new value combines with whatever
//! the file already carries: replace it, or concatenate around it with a
//! delimiter. Resolution is pure string work over a [`TagSet`] snapshot; the
//! accessor applies the resolved patch in a single write.

use std::fmt;
use std::str::FromStr;

use super::store::{Field, TagPatch, TagSet};

/// How a new value combines with an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace the old value outright.
    Overwrite,
    /// `new + delimiter + old`
    Prepend,
    /// `old + delimiter + new`
    Append,
    /// `new + delimiter + old + delimiter + new`
    PrependAppend,
}

impl MergeMode {
    /// Combine `new` with `old` under this mode. An absent or whitespace-only
    /// old value degenerates every mode to the new value alone.
    pub fn merge(self, new: &str, old: Option<&str>, delimiter: &str) -> String {
        let old = match old {
            Some(value) if !value.trim().is_empty() => value,
            _ => return new.to_string(),
        };
        match self {
            MergeMode::Overwrite => new.to_string(),
            MergeMode::Prepend => format!("{new}{delimiter}{old}"),
            MergeMode::Append => format!("{old}{delimiter}{new}"),
            MergeMode::PrependAppend => format!("{new}{delimiter}{old}{delimiter}{new}"),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Overwrite => write!(f, "overwrite"),
            MergeMode::Prepend => write!(f, "prepend"),
            MergeMode::Append => write!(f, "append"),
            MergeMode::PrependAppend => write!(f, "prepend-append"),
        }
    }
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(MergeMode::Overwrite),
            "prepend" => Ok(MergeMode::Prepend),
            "append" => Ok(MergeMode::Append),
            "prepend-append" => Ok(MergeMode::PrependAppend),
            _ => Err(format!(
                "invalid merge mode '{s}' (expected overwrite, prepend, append or prepend-append)"
            )),
        }
    }
}

/// Per-field merge configuration for one write operation.
///
/// Comment and grouping carry an overwrite flag that wins over their merge
/// mode when set. The key field never merges: it changes only when
/// `overwrite_key` is set, and is otherwise left alone no matter what the
/// patch says.
#[derive(Debug, Clone)]
pub struct WritePlan {
    pub title: MergeMode,
    pub artist: MergeMode,
    pub album: MergeMode,
    pub comment: MergeMode,
    pub grouping: MergeMode,
    pub overwrite_comment: bool,
    pub overwrite_grouping: bool,
    pub overwrite_key: bool,
    pub delimiter: String,
}

impl Default for WritePlan {
    fn default() -> Self {
        Self {
            title: MergeMode::Overwrite,
            artist: MergeMode::Overwrite,
            album: MergeMode::Overwrite,
            comment: MergeMode::Overwrite,
            grouping: MergeMode::Overwrite,
            overwrite_comment: false,
            overwrite_grouping: false,
            overwrite_key: true,
            delimiter: " - ".to_string(),
        }
    }
}

impl WritePlan {
    fn mode(&self, field: Field) -> MergeMode {
        match field {
            Field::Title => self.title,
            Field::Artist => self.artist,
            Field::Album => self.album,
            Field::Comment if self.overwrite_comment => MergeMode::Overwrite,
            Field::Comment => self.comment,
            Field::Grouping if self.overwrite_grouping => MergeMode::Overwrite,
            Field::Grouping => self.grouping,
            // never consulted; the key field bypasses merging entirely
            Field::Key => MergeMode::Overwrite,
        }
    }

    /// Resolve `patch` against the current tags into the literal values to
    /// store. Unpopulated patch fields stay unpopulated; a populated key field
    /// is dropped unless `overwrite_key` is set.
    pub fn resolve(&self, patch: &TagPatch, current: &TagSet) -> TagPatch {
        let mut resolved = TagPatch::default();
        for field in Field::ALL {
            let Some(new) = patch.get(field) else { continue };
            if field == Field::Key {
                if self.overwrite_key {
                    resolved.set(field, new.to_string());
                }
                continue;
            }
            let merged = self
                .mode(field)
                .merge(new, current.get(field), &self.delimiter);
            resolved.set(field, merged);
        }
        resolved
    }
}
