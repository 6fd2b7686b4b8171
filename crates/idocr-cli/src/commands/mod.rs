//! Subcommands of the `idocr` binary.

pub mod batch;
pub mod config;
pub mod process;
