//! End-to-end tagging cycle over an in-memory tag store.

use keytag::config::{Config, WriteBehavior};
use keytag::key::Key;
use keytag::tagging::{TagError, TagIo, TagPatch, TagSet, Tagger};

/// In-memory stand-in for a tagged audio file. Populated patch fields
/// replace stored values; unpopulated fields are left alone.
#[derive(Default)]
struct FakeTagIo {
    tags: TagSet,
}

impl TagIo for FakeTagIo {
    fn read_tags(&self) -> TagSet {
        self.tags.clone()
    }

    fn write_tags(&mut self, patch: &TagPatch) -> Result<(), TagError> {
        if let Some(title) = &patch.title {
            self.tags.title = Some(title.clone());
        }
        if let Some(artist) = &patch.artist {
            self.tags.artist = Some(artist.clone());
        }
        if let Some(album) = &patch.album {
            self.tags.album = Some(album.clone());
        }
        if let Some(comment) = &patch.comment {
            self.tags.comment = Some(comment.clone());
        }
        if let Some(grouping) = &patch.grouping {
            self.tags.grouping = Some(grouping.clone());
        }
        if let Some(key) = &patch.key {
            self.tags.key = Some(key.clone());
        }
        Ok(())
    }
}

fn config_writing_everywhere() -> Config {
    let mut config = Config::new();
    config.write.title = WriteBehavior::Prepend;
    config.write.artist = WriteBehavior::Prepend;
    config.write.album = WriteBehavior::Prepend;
    config.write.comment = WriteBehavior::Overwrite;
    config.write.grouping = WriteBehavior::Overwrite;
    config.write.key = WriteBehavior::Overwrite;
    config
}

#[test]
fn test_read_tags_passes_values_and_absences_through() {
    let mut io = FakeTagIo::default();
    io.tags.title = Some("TITLE".to_string());
    io.tags.comment = Some(String::new());

    let tagger = Tagger::new(io, Config::new());
    let tags = tagger.read_tags();

    assert_eq!(tags.title.as_deref(), Some("TITLE"));
    // written-empty is not the same as absent
    assert_eq!(tags.comment.as_deref(), Some(""));
    assert_eq!(tags.artist, None);
    assert_eq!(tags.key, None);
}

#[test]
fn test_write_tags_full_cycle() {
    let mut io = FakeTagIo::default();
    io.tags = TagSet {
        title: Some("Song".to_string()),
        artist: Some("Band".to_string()),
        album: Some("Record".to_string()),
        comment: Some("old comment".to_string()),
        grouping: None,
        key: None,
    };

    let mut tagger = Tagger::new(io, config_writing_everywhere());
    let patch = tagger.write_tags(Key::AMinor).unwrap();
    assert!(!patch.is_empty());

    let tags = tagger.read_tags();
    assert_eq!(tags.title.as_deref(), Some("Am - Song"));
    assert_eq!(tags.artist.as_deref(), Some("Am - Band"));
    assert_eq!(tags.album.as_deref(), Some("Am - Record"));
    assert_eq!(tags.comment.as_deref(), Some("Am"));
    assert_eq!(tags.grouping.as_deref(), Some("Am"));
    assert_eq!(tags.key.as_deref(), Some("Am"));
}

#[test]
fn test_second_write_with_same_key_is_a_no_op() {
    let mut tagger = Tagger::new(FakeTagIo::default(), config_writing_everywhere());

    let first = tagger.write_tags(Key::EFlatMinor).unwrap();
    assert!(!first.is_empty());
    let after_first = tagger.read_tags();

    let second = tagger.write_tags(Key::EFlatMinor).unwrap();
    assert!(second.is_empty());
    assert_eq!(tagger.read_tags(), after_first);
}

#[test]
fn test_rewriting_with_a_new_key_prepends_again() {
    let mut tagger = Tagger::new(FakeTagIo::default(), config_writing_everywhere());

    tagger.write_tags(Key::AMinor).unwrap();
    tagger.write_tags(Key::DMajor).unwrap();

    let tags = tagger.read_tags();
    // prepending stacks, overwriting replaces
    assert_eq!(tags.title.as_deref(), Some("D - Am"));
    assert_eq!(tags.comment.as_deref(), Some("D"));
    assert_eq!(tags.key.as_deref(), Some("D"));
}

#[test]
fn test_fields_switched_off_stay_untouched() {
    let mut io = FakeTagIo::default();
    io.tags.title = Some("Song".to_string());

    // default config: only the comment field is written
    let mut tagger = Tagger::new(io, Config::new());
    tagger.write_tags(Key::GMinor).unwrap();

    let tags = tagger.read_tags();
    assert_eq!(tags.title.as_deref(), Some("Song"));
    assert_eq!(tags.comment.as_deref(), Some("Gm"));
    assert_eq!(tags.key, None);
    assert_eq!(tags.grouping, None);
}

#[test]
fn test_already_tagged_detection() {
    let mut config = Config::new();
    config.write.comment = WriteBehavior::Overwrite;
    config.write.title = WriteBehavior::Prepend;

    let mut io = FakeTagIo::default();
    io.tags.title = Some("Bbm - Song".to_string());
    io.tags.comment = Some("Bbm".to_string());
    let tagger = Tagger::new(io, config.clone());
    assert!(tagger.already_tagged());

    // any key counts, not just a matching pair
    let mut io = FakeTagIo::default();
    io.tags.title = Some("F - Song".to_string());
    io.tags.comment = Some("Bbm".to_string());
    let tagger = Tagger::new(io, config.clone());
    assert!(tagger.already_tagged());

    let mut io = FakeTagIo::default();
    io.tags.title = Some("Song".to_string());
    io.tags.comment = Some("Bbm".to_string());
    let tagger = Tagger::new(io, config);
    assert!(!tagger.already_tagged());
}

#[test]
fn test_interpret_does_not_write() {
    let mut io = FakeTagIo::default();
    io.tags.title = Some("Song".to_string());

    let tagger = Tagger::new(io, config_writing_everywhere());
    let patch = tagger.interpret(Key::CMajor);

    assert_eq!(patch.title.as_deref(), Some("C - Song"));
    assert_eq!(tagger.read_tags().title.as_deref(), Some("Song"));
}
