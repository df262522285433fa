//! Configuration management for flagsplit.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project config (`.flagsplit.toml` in the working directory)
//! - User config (`<config dir>/flagsplit/config.toml`)
//!
//! Command-line values win over the project file, which wins over the user file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::platform::PlatformMode;

/// File name of the per-project configuration
pub const PROJECT_CONFIG_FILE: &str = ".flagsplit.toml";

/// How the classification is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One "category: values" line per category
    #[default]
    Text,
    /// The classification as JSON
    Json,
    /// A build environment as JSON
    Env,
}

/// Command-line arguments for flagsplit
#[derive(Debug, Default, Parser)]
#[command(name = "flagsplit")]
#[command(about = "Sort compiler and linker flags into includes, defines, libs and link flags")]
#[command(version)]
pub struct Args {
    /// Flags to classify; read from stdin when omitted
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub flags: Vec<String>,

    /// Classify for 64-bit Windows (same as --platform win64)
    #[arg(long, conflicts_with = "platform")]
    pub win64: bool,

    /// Target platform convention
    #[arg(long, help = "Target platform (posix, win64)")]
    pub platform: Option<PlatformMode>,

    /// Directory searched for DLLs when resolving frameworks on Windows
    #[arg(long)]
    pub dll_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Compiler executable recorded in the build environment
    #[arg(long)]
    pub cxx: Option<String>,

    /// Include directory the compiler already searches (repeatable)
    #[arg(long = "compiler-include")]
    pub compiler_includes: Vec<String>,

    /// Explicit config file, used instead of the project config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Values that may be set in a config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub platform: Option<PlatformMode>,
    pub dll_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub cxx: Option<String>,
    pub compiler_includes: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config file content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a file if it exists
    fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.is_file() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Fill unset values from a lower-priority config
    fn or(self, fallback: FileConfig) -> FileConfig {
        FileConfig {
            platform: self.platform.or(fallback.platform),
            dll_dir: self.dll_dir.or(fallback.dll_dir),
            format: self.format.or(fallback.format),
            cxx: self.cxx.or(fallback.cxx),
            compiler_includes: self.compiler_includes.or(fallback.compiler_includes),
            log_level: self.log_level.or(fallback.log_level),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Flag string given on the command line, if any
    pub flags: Option<String>,
    pub platform: PlatformMode,
    /// Where DLLs are looked up; the working directory when unset
    pub dll_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub cxx: Option<String>,
    pub compiler_includes: Vec<String>,
    pub log_level: String,
    /// Project or explicit config file that was loaded
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments and config files
    pub fn from_args_and_env() -> Result<Self> {
        let project_dir = std::env::current_dir().context("Failed to get working directory")?;
        let user_config = dirs::config_dir().map(|dir| dir.join("flagsplit").join("config.toml"));
        Self::load(Args::parse(), &project_dir, user_config.as_deref())
    }

    /// Create configuration from explicit arguments and locations (useful for testing)
    pub fn load(args: Args, project_dir: &Path, user_config: Option<&Path>) -> Result<Self> {
        let config_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => {
                let path = project_dir.join(PROJECT_CONFIG_FILE);
                path.is_file().then_some(path)
            }
        };

        let project = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let user = match user_config {
            Some(path) => FileConfig::load_optional(path)?.unwrap_or_default(),
            None => FileConfig::default(),
        };

        let mut config = Self::from_args(args, project.or(user));
        config.config_path = config_path;
        Ok(config)
    }

    /// Apply command-line arguments over values from config files
    pub fn from_args(args: Args, file: FileConfig) -> Self {
        let platform = if args.win64 {
            Some(PlatformMode::Win64)
        } else {
            args.platform
        };

        let compiler_includes = if args.compiler_includes.is_empty() {
            file.compiler_includes.unwrap_or_default()
        } else {
            args.compiler_includes
        };

        let flags = (!args.flags.is_empty()).then(|| args.flags.join(" "));

        Config {
            flags,
            platform: platform.or(file.platform).unwrap_or_else(PlatformMode::host),
            dll_dir: args.dll_dir.or(file.dll_dir),
            format: args.format.or(file.format).unwrap_or_default(),
            cxx: args.cxx.or(file.cxx),
            compiler_includes,
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "warn".to_string()),
            config_path: None,
        }
    }

    pub fn has_project_config(&self) -> bool {
        self.config_path.is_some()
    }
}
