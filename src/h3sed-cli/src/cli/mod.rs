//! CLI argument definitions for h3sed
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod hero;

pub use core::{Cli, Commands};
pub use hero::HeroCommand;
