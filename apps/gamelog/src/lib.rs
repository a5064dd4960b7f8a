//! # gamelog
//!
//! Library half of the gamelog binary: CLI definitions, command
//! implementations and configuration loading. `main.rs` only sets up
//! logging and dispatches here.

pub mod cli;
pub mod config;
