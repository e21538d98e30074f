//! berth CLI.

use std::path::PathBuf;

use berth_common::path::volume_name_len;
use berth_common::{PathClassifier, Platform};
use berth_mount::{MountValidator, ValidatorConfig};
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tabled::{Table, Tabled};

use crate::task::TaskSpec;

/// berth - Admission checks for container mount declarations
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Validator configuration file (TOML)
    #[arg(short, long, global = true, env = "BERTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Native path grammar (posix, windows)
    #[arg(long, global = true)]
    pub native: Option<Platform>,

    /// Judge sources by the native grammar only
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// berth commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate the mounts of a task file
    Validate {
        /// Task file (YAML, or JSON with a .json extension)
        file: PathBuf,
    },

    /// Show how each path grammar classifies paths
    Classify {
        /// Paths to classify
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Tabled)]
struct ClassifyRow {
    #[tabled(rename = "PATH")]
    path: String,
    #[tabled(rename = "VOLUME NAME")]
    volume_name: String,
    #[tabled(rename = "POSIX")]
    posix: &'static str,
    #[tabled(rename = "WINDOWS")]
    windows: &'static str,
    #[tabled(rename = "ABSOLUTE")]
    absolute: String,
}

const fn verdict(absolute: bool) -> &'static str {
    if absolute { "absolute" } else { "relative" }
}

impl ClassifyRow {
    fn new(classifier: &PathClassifier, path: &str) -> Self {
        let judge = |platform: Platform| verdict(platform.grammar().is_absolute(path));
        Self {
            path: path.to_string(),
            volume_name: path[..volume_name_len(path)].to_string(),
            posix: judge(Platform::Posix),
            windows: judge(Platform::Windows),
            absolute: classifier
                .accepting_grammar(path)
                .map_or_else(|| "no".to_string(), |name| format!("yes ({name})")),
        }
    }
}

impl Cli {
    /// Resolve the validator configuration from the config file and flags.
    pub fn validator_config(&self) -> Result<ValidatorConfig> {
        let mut config = match &self.config {
            Some(path) => ValidatorConfig::from_file(path)?,
            None => ValidatorConfig::default(),
        };
        if let Some(native) = self.native {
            config.native = native;
            config.fallback = ValidatorConfig::for_platform(native).fallback;
        }
        if self.no_fallback {
            config = config.without_fallback();
        }
        Ok(config)
    }

    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        let config = self.validator_config()?;
        let validator = MountValidator::from_config(&config);

        match self.command {
            Commands::Validate { file } => {
                let task = TaskSpec::from_file(&file)?;
                tracing::info!(
                    task = task.task_name(),
                    mounts = task.mounts.len(),
                    native = %config.native,
                    "Validating mounts"
                );
                validator.validate(&task.mounts)?;
                println!("mounts are valid");
                Ok(())
            }

            Commands::Classify { paths } => {
                let rows: Vec<ClassifyRow> = paths
                    .iter()
                    .map(|path| ClassifyRow::new(validator.classifier(), path))
                    .collect();
                println!("{}", Table::new(rows));
                Ok(())
            }
        }
    }
}
