//! Computer club CLI library.
//!
//! This crate provides the CLI surface around `club-core`: input-file
//! parsing and report rendering.

mod cli;
pub mod parse;
pub mod render;

pub use cli::Cli;
