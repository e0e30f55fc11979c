//! SkillStudio Configuration
//!
//! Layered configuration for the project virtual file store, the skill catalog and the
//! skill workspace. Sources are applied in order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`StudioConfig::default`])
//! 2. Optional TOML file (`<config_dir>/skillstudio/config.toml` or an explicit path)
//! 3. Environment variables `SKILLSTUDIO__<SECTION>__<KEY>`
//!
//! ```ignore
//! use skillstudio_config::ConfigManager;
//!
//! let config = ConfigManager::new().load()?;
//! println!("skills root: {}", config.skills.root_dir.display());
//! ```

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{SkillsSettings, StorageSettings, StudioConfig, WorkspaceSettings};
