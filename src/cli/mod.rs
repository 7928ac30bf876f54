// CLI module for id3lens
//
// Reads files, expands globs and writes reports. All tag decoding is done
// by the library.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;
