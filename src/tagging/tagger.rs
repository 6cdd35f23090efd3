//! The high-level read/interpret/write cycle for one file.

use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::key::Key;

use super::accessor::{TagAccessor, TagError};
use super::interpreter::TagInterpreter;
use super::store::{Field, TagPatch, TagSet};

/// The seam between tagging strategy and actual file I/O.
///
/// [`TagAccessor`](super::accessor::TagAccessor) is the production
/// implementation; tests substitute an in-memory double.
pub trait TagIo {
    fn read_tags(&self) -> TagSet;
    fn write_tags(&mut self, patch: &TagPatch) -> Result<(), TagError>;
}

/// Applies the configured tagging strategy to one file.
pub struct Tagger<W: TagIo> {
    io: W,
    config: Config,
}

impl Tagger<TagAccessor> {
    /// Open `path` with the lofty-backed accessor.
    pub fn open(path: &Path, config: Config) -> Result<Self, TagError> {
        Ok(Self::new(TagAccessor::open(path)?, config))
    }
}

impl<W: TagIo> Tagger<W> {
    pub fn new(io: W, config: Config) -> Self {
        Self { io, config }
    }

    pub fn read_tags(&self) -> TagSet {
        self.io.read_tags()
    }

    /// The per-field values a write for `key` would store, without writing.
    pub fn interpret(&self, key: Key) -> TagPatch {
        let tags = self.io.read_tags();
        let interpreter = TagInterpreter::new(&self.config);
        let mut patch = TagPatch::default();
        for field in Field::ALL {
            if let Some(value) = interpreter.string_to_write(field, key, &tags) {
                patch.set(field, value);
            }
        }
        patch
    }

    /// Interpret `key` against the current tags and write the result.
    ///
    /// Returns the patch that was written; an empty patch means every field
    /// was either switched off or already up to date, and no write happened.
    pub fn write_tags(&mut self, key: Key) -> Result<TagPatch, TagError> {
        let patch = self.interpret(key);
        if patch.is_empty() {
            debug!("nothing to write for {key}");
            return Ok(patch);
        }
        self.io.write_tags(&patch)?;
        Ok(patch)
    }

    /// True when every field the configuration writes to already carries a
    /// recognizable key value.
    pub fn already_tagged(&self) -> bool {
        let tags = self.io.read_tags();
        TagInterpreter::new(&self.config).all_relevant_fields_tagged(&tags)
    }
}
