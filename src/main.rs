use std::io::Read;

use anyhow::{Context, Result};

use flag_classifier::cli;
use flag_classifier::config::Config;

fn main() -> Result<()> {
    // Parse configuration from command line and config files
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.config_path {
        log::debug!("Using config file {}", path.display());
    }

    let flags = match &config.flags {
        Some(flags) => flags.clone(),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read flags from stdin")?;
            input
        }
    };

    print!("{}", cli::run(&config, &flags)?);

    Ok(())
}
