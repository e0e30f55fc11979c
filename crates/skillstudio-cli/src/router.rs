// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skillstudio_config::ConfigManager;
use tracing::debug;

use crate::commands::*;
use crate::error::{CliError, CliResult};

/// SkillStudio - skill catalog and workspace tooling
#[derive(Parser, Debug)]
#[command(name = "studio")]
#[command(bin_name = "studio")]
#[command(about = "Inspect, validate and author agent skills")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: <config dir>/skillstudio/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skills directory, overriding the configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub skills_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Work with skills in the skills directory
    Skills {
        #[command(subcommand)]
        action: SkillsSubcommand,
    },

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigSubcommand>,
    },

    /// Print the agent tool definitions as JSON
    Tools,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SkillsSubcommand {
    /// List every discovered skill
    List {
        /// Print loadable skills as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a skill's full content block
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Validate all skills, or one by name
    Validate {
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rescan the skills directory
    Reload,

    /// Print the available skills prompt block
    Prompt,

    /// Create a new skill
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Instruction body (default: a starter template)
        #[arg(long)]
        body: Option<String>,

        #[arg(long)]
        license: Option<String>,

        #[arg(long)]
        compatibility: Option<String>,

        /// Metadata entry, repeatable
        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write default configuration
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl From<SkillsSubcommand> for SkillsAction {
    fn from(sub: SkillsSubcommand) -> Self {
        match sub {
            SkillsSubcommand::List { json } => SkillsAction::List { json },
            SkillsSubcommand::Show { name } => SkillsAction::Show { name },
            SkillsSubcommand::Validate { name, json } => SkillsAction::Validate { name, json },
            SkillsSubcommand::Reload => SkillsAction::Reload,
            SkillsSubcommand::Prompt => SkillsAction::Prompt,
            SkillsSubcommand::Create {
                name,
                description,
                body,
                license,
                compatibility,
                metadata,
            } => SkillsAction::Create {
                name,
                description,
                body,
                license,
                compatibility,
                metadata,
            },
        }
    }
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse arguments, set up logging and run the command
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();
        crate::logging::init_logging(cli.verbose, cli.quiet);
        Self::execute(&cli).await
    }

    fn config_manager(cli: &Cli) -> ConfigManager {
        match &cli.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        }
    }

    /// Execute a parsed command line
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let manager = Self::config_manager(cli);
        debug!(path = %manager.config_path().display(), "Using configuration file");

        if let Commands::Config { action } = &cli.command {
            let action = match action {
                Some(ConfigSubcommand::Show) | None => ConfigAction::Show,
                Some(ConfigSubcommand::Path) => ConfigAction::Path,
                Some(ConfigSubcommand::Init { force }) => ConfigAction::Init { force: *force },
            };
            return ConfigCommand::new(action, manager).execute().await;
        }

        let mut config = manager.load().map_err(CliError::from)?;
        if let Some(dir) = &cli.skills_dir {
            config.skills.root_dir = dir.clone();
        }

        match &cli.command {
            Commands::Skills { action } => {
                SkillsCommand::new(action.clone().into(), &config.skills)
                    .execute()
                    .await
            }
            Commands::Tools => ToolsCommand::new(&config).execute().await,
            Commands::Config { .. } => Ok(()),
        }
    }
}
