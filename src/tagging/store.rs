//! Tag field names and the read/write value models.
//!
//! A [`TagSet`] is what a file currently carries; a [`TagPatch`] is what a
//! write wants to change. In both, `None` means "no value" — distinct from an
//! empty string, which is a present-but-empty tag frame.

/// The six tag fields this tool works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Comment,
    Grouping,
    Key,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Comment,
        Field::Grouping,
        Field::Key,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Comment => "comment",
            Field::Grouping => "grouping",
            Field::Key => "key",
        }
    }

    /// The key field holds a 3-character code, not free text.
    pub fn is_short(self) -> bool {
        matches!(self, Field::Key)
    }
}

/// A snapshot of the six fields as read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub grouping: Option<String>,
    pub key: Option<String>,
}

impl TagSet {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Comment => self.comment.as_deref(),
            Field::Grouping => self.grouping.as_deref(),
            Field::Key => self.key.as_deref(),
        }
    }
}

/// Field values to write. Fields left `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub grouping: Option<String>,
    pub key: Option<String>,
}

impl TagPatch {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Comment => self.comment.as_deref(),
            Field::Grouping => self.grouping.as_deref(),
            Field::Key => self.key.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = Some(value),
            Field::Artist => self.artist = Some(value),
            Field::Album => self.album = Some(value),
            Field::Comment => self.comment = Some(value),
            Field::Grouping => self.grouping = Some(value),
            Field::Key => self.key = Some(value),
        }
    }

    /// True when no field is populated, i.e. a write would be a no-op.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }
}
