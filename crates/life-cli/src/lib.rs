//! LIFE log CLI library.
//!
//! This crate provides the `life` command-line interface over `life-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ScopeArgs};
pub use config::Config;
