//! CLI command implementations

pub mod completions;
pub mod config;
pub mod has_source_at;
pub mod io;
