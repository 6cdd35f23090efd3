//! Decides what string, if any, each field should receive for a given key.
//!
//! The interpreter is idempotent over its own output: once a field carries
//! the rendered key (alone, or joined to the old value with the configured
//! delimiter), re-interpreting the same file produces nothing to write.

use crate::config::{Config, WriteBehavior};
use crate::key::Key;

use super::store::{Field, TagSet};

pub struct TagInterpreter<'a> {
    config: &'a Config,
}

impl<'a> TagInterpreter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// The value to store in `field` for `key`, or `None` to leave the field
    /// untouched.
    ///
    /// Whitespace-only existing values count as absent. A field already
    /// carrying the rendered value (equal, prepended, or appended, depending
    /// on the behavior) yields `None`.
    pub fn string_to_write(&self, field: Field, key: Key, tags: &TagSet) -> Option<String> {
        let rendered = key.rendered(field, self.config);
        let delimiter = &self.config.field_delimiter;
        let existing = tags.get(field).filter(|value| !value.trim().is_empty());

        match self.config.write.behavior(field) {
            WriteBehavior::No => None,
            WriteBehavior::Prepend => match existing {
                Some(value) => {
                    if value == rendered || value.starts_with(&format!("{rendered}{delimiter}")) {
                        None
                    } else {
                        Some(format!("{rendered}{delimiter}{value}"))
                    }
                }
                None => Some(rendered),
            },
            WriteBehavior::Append => match existing {
                Some(value) => {
                    if value == rendered || value.ends_with(&format!("{delimiter}{rendered}")) {
                        None
                    } else {
                        Some(format!("{value}{delimiter}{rendered}"))
                    }
                }
                None => Some(rendered),
            },
            WriteBehavior::Overwrite => match existing {
                Some(value) if value == rendered => None,
                _ => Some(rendered),
            },
        }
    }

    /// True when every field with a behavior other than "no" already carries
    /// a value recognizable as *some* key, in the position the behavior would
    /// have put it. False when no field is relevant at all.
    pub fn all_relevant_fields_tagged(&self, tags: &TagSet) -> bool {
        let delimiter = &self.config.field_delimiter;
        let mut relevant_fields = 0;

        for field in Field::ALL {
            let behavior = self.config.write.behavior(field);
            if behavior == WriteBehavior::No {
                continue;
            }
            relevant_fields += 1;

            let Some(value) = tags.get(field) else {
                return false;
            };

            let recognized = Key::ALL.iter().any(|key| {
                if *key == Key::Silence {
                    return false;
                }
                let candidate = key.rendered(field, self.config);
                match behavior {
                    WriteBehavior::Prepend => {
                        value == candidate
                            || value.starts_with(&format!("{candidate}{delimiter}"))
                    }
                    WriteBehavior::Append => {
                        value == candidate || value.ends_with(&format!("{delimiter}{candidate}"))
                    }
                    WriteBehavior::Overwrite => value == candidate,
                    WriteBehavior::No => false,
                }
            });
            if !recognized {
                return false;
            }
        }

        relevant_fields > 0
    }
}
