//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`parse`] - Matcher list normalization
//! - [`evaluate`] - Matcher evaluation against labels
//! - [`state`] - Silence window state
//! - [`maintenance`] - Blanket maintenance silences
//! - [`target`] - Silences for a single alert

pub mod evaluate;
pub mod maintenance;
pub mod parse;
pub mod state;
pub mod target;

pub use evaluate::MatchCommand;
pub use maintenance::MaintenanceCommand;
pub use parse::ParseCommand;
pub use state::StateCommand;
pub use target::TargetCommand;
