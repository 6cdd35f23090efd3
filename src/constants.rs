//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency across the codebase.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Audio file extensions considered when scanning directories
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "m4a", "mp4", "ogg", "opus", "wav", "aiff", "aif", "wv", "ape",
];

/// Directories to skip during file system traversal
pub const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git", "temp"];

/// Maximum rendered width for values bound for the key field
pub const KEY_FIELD_WIDTH: usize = 3;

/// Number of entries expected in each custom code table (one per pitch class)
pub const CUSTOM_CODE_COUNT: usize = 12;
