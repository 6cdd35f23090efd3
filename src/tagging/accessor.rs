//! Lofty-backed tag I/O.
//!
//! [`TagAccessor`] binds to one audio file for the duration of a
//! read-modify-write cycle. Container and frame parsing is lofty's job; this
//! module only maps the six fields onto lofty's tag model and keeps the
//! error surface of this crate.

use std::io;
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::error::{ErrorKind, LoftyError};
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag};
use log::debug;
use thiserror::Error;

use super::policy::WritePlan;
use super::store::{TagPatch, TagSet};
use super::tagger::TagIo;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("failed to read tags from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },
    #[error("failed to write tags to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },
}

/// One audio file, opened for tag reads and writes.
pub struct TagAccessor {
    path: PathBuf,
    file: TaggedFile,
}

impl std::fmt::Debug for TagAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagAccessor")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl TagAccessor {
    /// Bind to the audio file at `path`.
    ///
    /// Fails with [`TagError::FileNotFound`] when the path does not exist and
    /// [`TagError::UnsupportedFormat`] when lofty cannot identify the
    /// container. No reads are possible on a failed open.
    pub fn open(path: &Path) -> Result<Self, TagError> {
        let probe = Probe::open(path).map_err(|err| open_error(path, err))?;
        let file = probe.read().map_err(|err| open_error(path, err))?;
        debug!("opened {} ({:?})", path.display(), file.file_type());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot the six fields. Fields the file does not carry come back as
    /// `None`; present-but-empty frames come back as `Some("")`.
    pub fn read(&self) -> TagSet {
        let tag = self.file.primary_tag().or_else(|| self.file.first_tag());
        let Some(tag) = tag else {
            return TagSet::default();
        };
        TagSet {
            title: tag.title().map(|v| v.into_owned()),
            artist: tag.artist().map(|v| v.into_owned()),
            album: tag.album().map(|v| v.into_owned()),
            comment: tag.comment().map(|v| v.into_owned()),
            grouping: tag.get_string(&ItemKey::ContentGroup).map(str::to_string),
            key: tag.get_string(&ItemKey::InitialKey).map(str::to_string),
        }
    }

    /// Merge `patch` into the current tags under `plan` and persist the
    /// result in one write.
    pub fn write_fields(&mut self, patch: &TagPatch, plan: &WritePlan) -> Result<(), TagError> {
        let resolved = plan.resolve(patch, &self.read());
        self.write_tags(&resolved)
    }
}

impl TagIo for TagAccessor {
    fn read_tags(&self) -> TagSet {
        self.read()
    }

    /// Store every populated patch field verbatim and save. Unpopulated
    /// fields are left as the file had them.
    fn write_tags(&mut self, patch: &TagPatch) -> Result<(), TagError> {
        if patch.is_empty() {
            return Ok(());
        }

        // Work on the primary tag, falling back to whichever tag exists;
        // files with no tag at all get a fresh one of the primary type.
        if !self.file.contains_tag() {
            let tag_type = self.file.primary_tag_type();
            debug!(
                "{}: no existing tag, creating {:?}",
                self.path.display(),
                tag_type
            );
            self.file.insert_tag(Tag::new(tag_type));
        }
        let tag = if self.file.primary_tag().is_some() {
            self.file.primary_tag_mut()
        } else {
            self.file.first_tag_mut()
        };
        let tag = tag.expect("a tag was ensured above");

        if let Some(title) = &patch.title {
            tag.set_title(title.clone());
        }
        if let Some(artist) = &patch.artist {
            tag.set_artist(artist.clone());
        }
        if let Some(album) = &patch.album {
            tag.set_album(album.clone());
        }
        if let Some(comment) = &patch.comment {
            tag.set_comment(comment.clone());
        }
        if let Some(grouping) = &patch.grouping {
            tag.insert_text(ItemKey::ContentGroup, grouping.clone());
        }
        if let Some(key) = &patch.key {
            tag.insert_text(ItemKey::InitialKey, key.clone());
        }

        self.file
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(|source| TagError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

fn open_error(path: &Path, err: LoftyError) -> TagError {
    let missing = matches!(
        err.kind(),
        ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound
    );
    if missing {
        return TagError::FileNotFound(path.to_path_buf());
    }
    if matches!(err.kind(), ErrorKind::UnknownFormat) {
        return TagError::UnsupportedFormat(path.to_path_buf());
    }
    TagError::Read {
        path: path.to_path_buf(),
        source: err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = TagAccessor::open(Path::new("/nonexistent/audio.mp3")).unwrap_err();
        assert!(matches!(err, TagError::FileNotFound(_)));
    }

    #[test]
    fn test_open_unrecognized_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.mp3");
        std::fs::write(&path, b"this is not audio data").unwrap();

        let err = TagAccessor::open(&path).unwrap_err();
        assert!(matches!(
            err,
            TagError::UnsupportedFormat(_) | TagError::Read { .. }
        ));
    }
}
