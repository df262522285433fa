//! Command-line front end.
//!
//! Builds a classifier from the configuration and renders the result in
//! the requested output format.

use anyhow::{Context, Result};

use crate::classify::{Classification, Classifier};
use crate::config::{Config, OutputFormat};
use crate::env::BuildEnv;
use crate::platform::DirectoryDllLookup;

/// Classifier honouring the configured platform and DLL directory
pub fn classifier(config: &Config) -> Classifier<DirectoryDllLookup> {
    let lookup = match &config.dll_dir {
        Some(dir) => DirectoryDllLookup::new(dir),
        None => DirectoryDllLookup::current_dir(),
    };
    Classifier::new(config.platform, lookup)
}

/// Classify `flags` and render the result
pub fn run(config: &Config, flags: &str) -> Result<String> {
    log::debug!("Classifying for {}: {}", config.platform, flags.trim());
    let classification = classifier(config).classify(flags);

    if !classification.diagnostics.is_empty() {
        log::info!(
            "{} unsupported flag(s) were ignored",
            classification.diagnostics.len()
        );
    }

    render(config, &classification)
}

/// Render a classification in the configured format
pub fn render(config: &Config, classification: &Classification) -> Result<String> {
    match config.format {
        OutputFormat::Text => Ok(classification.to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(classification)
                .context("Failed to serialize classification")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Env => {
            let mut env = BuildEnv::new(config.cxx.clone());
            env.add_flags(classification, &config.compiler_includes);
            let mut json = serde_json::to_string_pretty(&env)
                .context("Failed to serialize build environment")?;
            json.push('\n');
            Ok(json)
        }
    }
}
