//! Musical key representation and rendering.
//!
//! A [`Key`] is one of the 24 major/minor keys, or silence for material with
//! no tonal content. Keys render to tag-ready strings in one of three
//! notations: standard key names ("Am", "Db"), user-configurable custom codes
//! (Camelot wheel codes like "8d" by default), or both. Values bound for the
//! key tag field are truncated to its three-character width.

use std::fmt;
use std::str::FromStr;

use crate::config::{Config, Notation};
use crate::constants::KEY_FIELD_WIDTH;
use crate::tagging::Field;

/// A musical key, ordered around the circle of semitones from A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    AMajor,
    AMinor,
    BFlatMajor,
    BFlatMinor,
    BMajor,
    BMinor,
    CMajor,
    CMinor,
    DFlatMajor,
    DFlatMinor,
    DMajor,
    DMinor,
    EFlatMajor,
    EFlatMinor,
    EMajor,
    EMinor,
    FMajor,
    FMinor,
    GFlatMajor,
    GFlatMinor,
    GMajor,
    GMinor,
    AFlatMajor,
    AFlatMinor,
    Silence,
}

impl Key {
    pub const ALL: [Key; 25] = [
        Key::AMajor,
        Key::AMinor,
        Key::BFlatMajor,
        Key::BFlatMinor,
        Key::BMajor,
        Key::BMinor,
        Key::CMajor,
        Key::CMinor,
        Key::DFlatMajor,
        Key::DFlatMinor,
        Key::DMajor,
        Key::DMinor,
        Key::EFlatMajor,
        Key::EFlatMinor,
        Key::EMajor,
        Key::EMinor,
        Key::FMajor,
        Key::FMinor,
        Key::GFlatMajor,
        Key::GFlatMinor,
        Key::GMajor,
        Key::GMinor,
        Key::AFlatMajor,
        Key::AFlatMinor,
        Key::Silence,
    ];

    /// Standard notation for this key ("Am", "Db", ...). Silence renders empty.
    pub fn notation(self) -> &'static str {
        match self {
            Key::AMajor => "A",
            Key::AMinor => "Am",
            Key::BFlatMajor => "Bb",
            Key::BFlatMinor => "Bbm",
            Key::BMajor => "B",
            Key::BMinor => "Bm",
            Key::CMajor => "C",
            Key::CMinor => "Cm",
            Key::DFlatMajor => "Db",
            Key::DFlatMinor => "Dbm",
            Key::DMajor => "D",
            Key::DMinor => "Dm",
            Key::EFlatMajor => "Eb",
            Key::EFlatMinor => "Ebm",
            Key::EMajor => "E",
            Key::EMinor => "Em",
            Key::FMajor => "F",
            Key::FMinor => "Fm",
            Key::GFlatMajor => "Gb",
            Key::GFlatMinor => "Gbm",
            Key::GMajor => "G",
            Key::GMinor => "Gm",
            Key::AFlatMajor => "Ab",
            Key::AFlatMinor => "Abm",
            Key::Silence => "",
        }
    }

    /// Pitch-class index into the custom code tables, plus whether the key is
    /// minor. `None` for silence.
    fn code_index(self) -> Option<(usize, bool)> {
        match self {
            Key::AMajor => Some((0, false)),
            Key::AMinor => Some((0, true)),
            Key::BFlatMajor => Some((1, false)),
            Key::BFlatMinor => Some((1, true)),
            Key::BMajor => Some((2, false)),
            Key::BMinor => Some((2, true)),
            Key::CMajor => Some((3, false)),
            Key::CMinor => Some((3, true)),
            Key::DFlatMajor => Some((4, false)),
            Key::DFlatMinor => Some((4, true)),
            Key::DMajor => Some((5, false)),
            Key::DMinor => Some((5, true)),
            Key::EFlatMajor => Some((6, false)),
            Key::EFlatMinor => Some((6, true)),
            Key::EMajor => Some((7, false)),
            Key::EMinor => Some((7, true)),
            Key::FMajor => Some((8, false)),
            Key::FMinor => Some((8, true)),
            Key::GFlatMajor => Some((9, false)),
            Key::GFlatMinor => Some((9, true)),
            Key::GMajor => Some((10, false)),
            Key::GMinor => Some((10, true)),
            Key::AFlatMajor => Some((11, false)),
            Key::AFlatMinor => Some((11, true)),
            Key::Silence => None,
        }
    }

    /// Custom code for this key from the configured tables.
    pub fn custom_code(self, config: &Config) -> String {
        match self.code_index() {
            Some((index, true)) => config
                .custom_codes_minor
                .get(index)
                .cloned()
                .unwrap_or_default(),
            Some((index, false)) => config
                .custom_codes_major
                .get(index)
                .cloned()
                .unwrap_or_default(),
            None => config.custom_code_silence.clone(),
        }
    }

    /// Render this key as the string to store in `field`.
    ///
    /// The notation comes from `config.what_to_write`; values bound for the
    /// key field are cut to [`KEY_FIELD_WIDTH`] characters. The result is
    /// trimmed, so a truncated "1m Am" comes out as "1m".
    pub fn rendered(self, field: Field, config: &Config) -> String {
        let full = match config.what_to_write {
            Notation::Keys => self.notation().to_string(),
            Notation::CustomCodes => self.custom_code(config),
            Notation::Both => format!("{} {}", self.custom_code(config), self.notation()),
        };
        let cut = if field.is_short() {
            full.chars().take(KEY_FIELD_WIDTH).collect()
        } else {
            full
        };
        cut.trim().to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Key::Silence {
            write!(f, "silence")
        } else {
            write!(f, "{}", self.notation())
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Parses standard notation, case-insensitively, accepting sharp synonyms
    /// for the flat spellings ("a#m" == "Bbm") and the literal "silence".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_lowercase().as_str() {
            "a" => Key::AMajor,
            "am" => Key::AMinor,
            "bb" | "a#" => Key::BFlatMajor,
            "bbm" | "a#m" => Key::BFlatMinor,
            "b" => Key::BMajor,
            "bm" => Key::BMinor,
            "c" => Key::CMajor,
            "cm" => Key::CMinor,
            "db" | "c#" => Key::DFlatMajor,
            "dbm" | "c#m" => Key::DFlatMinor,
            "d" => Key::DMajor,
            "dm" => Key::DMinor,
            "eb" | "d#" => Key::EFlatMajor,
            "ebm" | "d#m" => Key::EFlatMinor,
            "e" => Key::EMajor,
            "em" => Key::EMinor,
            "f" => Key::FMajor,
            "fm" => Key::FMinor,
            "gb" | "f#" => Key::GFlatMajor,
            "gbm" | "f#m" => Key::GFlatMinor,
            "g" => Key::GMajor,
            "gm" => Key::GMinor,
            "ab" | "g#" => Key::AFlatMajor,
            "abm" | "g#m" => Key::AFlatMinor,
            "silence" => Key::Silence,
            _ => return Err(format!("unrecognized key '{s}' (expected e.g. Am, F#, Ebm)")),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        assert_eq!("Am".parse::<Key>().unwrap(), Key::AMinor);
        assert_eq!("bbm".parse::<Key>().unwrap(), Key::BFlatMinor);
        assert_eq!("F#".parse::<Key>().unwrap(), Key::GFlatMajor);
        assert_eq!("g#m".parse::<Key>().unwrap(), Key::AFlatMinor);
        assert_eq!("silence".parse::<Key>().unwrap(), Key::Silence);
        assert!("H".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_rendered_notations() {
        let mut config = Config::new();
        assert_eq!(Key::AMinor.rendered(Field::Title, &config), "Am");

        config.what_to_write = Notation::CustomCodes;
        assert_eq!(Key::AMinor.rendered(Field::Title, &config), "1m");
        assert_eq!(Key::AMajor.rendered(Field::Title, &config), "4d");

        config.what_to_write = Notation::Both;
        assert_eq!(Key::AMinor.rendered(Field::Title, &config), "1m Am");
    }

    #[test]
    fn test_rendered_key_field_is_cut_short() {
        let mut config = Config::new();
        config.what_to_write = Notation::Both;
        // "1m Am" loses everything past the third character, then the trim
        // drops the trailing space.
        assert_eq!(Key::AMinor.rendered(Field::Key, &config), "1m");
        assert_eq!(Key::AMinor.rendered(Field::Comment, &config), "1m Am");
    }

    #[test]
    fn test_rendered_silence() {
        let mut config = Config::new();
        assert_eq!(Key::Silence.rendered(Field::Comment, &config), "");

        config.custom_code_silence = "mute".to_string();
        config.what_to_write = Notation::CustomCodes;
        assert_eq!(Key::Silence.rendered(Field::Comment, &config), "mute");
        assert_eq!(Key::Silence.rendered(Field::Key, &config), "mut");
    }

    #[test]
    fn test_camelot_defaults_cover_the_wheel() {
        let config = Config::new();
        for key in Key::ALL {
            if key == Key::Silence {
                continue;
            }
            let code = key.custom_code(&config);
            assert!(!code.is_empty(), "no custom code for {key}");
        }
        assert_eq!(Key::EMinor.custom_code(&config), "2m");
        assert_eq!(Key::DMajor.custom_code(&config), "3d");
    }
}
