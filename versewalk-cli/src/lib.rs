//! versewalk CLI library
//!
//! This library provides the command-line interface for the versewalk
//! rhyme-constrained poem generator.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod rhyme_service;

pub use error::{CliError, CliResult};
