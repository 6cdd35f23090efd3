pub mod cli;
pub mod config;
pub mod constants;
pub mod key;
pub mod tagging;
pub mod utils;
