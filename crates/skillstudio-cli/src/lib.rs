//! SkillStudio command line interface
//!
//! `studio skills list|show|validate|reload|prompt|create`, `studio config show|path|init` and
//! `studio tools`.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
