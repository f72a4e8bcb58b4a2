//! # alertbot-cli
//!
//! Command-line front end for the alertbot matcher and silence crates.
//!
//! Provides commands for:
//! - Parsing and normalizing matcher lists
//! - Evaluating matchers against alert labels
//! - Inspecting the state of a silence window
//! - Building maintenance and per-alert silences
//!
//! Silences are built against an in-memory store; nothing is sent to an
//! Alertmanager.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, MatchArgs, StateArgs, TargetArgs};
pub use config::resolve_config;
pub use error::CliError;
pub use output::{OutputFormat, TableDisplay};
