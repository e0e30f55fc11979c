// Show or initialize the layered configuration

use skillstudio_config::{ConfigManager, StudioConfig};

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Print the config file location
    Path,
    /// Write the defaults to the config file
    Init { force: bool },
}

pub struct ConfigCommand {
    action: ConfigAction,
    manager: ConfigManager,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, manager: ConfigManager) -> Self {
        Self { action, manager }
    }

    pub fn render(&self) -> CliResult<String> {
        let style = OutputStyle::default();
        match self.action {
            ConfigAction::Show => {
                let config = self.manager.load()?;
                Ok(serde_json::to_string_pretty(&config)?)
            }
            ConfigAction::Path => Ok(self.manager.config_path().display().to_string()),
            ConfigAction::Init { force } => {
                let path = self.manager.config_path();
                if path.exists() && !force {
                    return Err(CliError::invalid_argument(format!(
                        "{} already exists, pass --force to overwrite it",
                        path.display()
                    )));
                }
                self.manager.save(&StudioConfig::default())?;
                Ok(style.success(&format!("Wrote {}", path.display())))
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}
