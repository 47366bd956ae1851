//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the keyboard preferences and
//! logging settings as TOML, falling back to defaults on first run.

pub mod config;
