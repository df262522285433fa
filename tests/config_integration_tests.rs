//! Tests for configuration loading from project and user config files
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use flag_classifier::PlatformMode;
use flag_classifier::config::{Args, Config, OutputFormat, PROJECT_CONFIG_FILE};

fn args(argv: &[&str]) -> Args {
    Args::parse_from(std::iter::once("flagsplit").chain(argv.iter().copied()))
}

#[test]
fn test_project_config_is_loaded() {
    let project = tempfile::tempdir().expect("create project dir");
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "platform = \"win64\"\ndll_dir = \"bin\"\nformat = \"env\"\n",
    )
    .expect("write project config");

    let config = Config::load(args(&[]), project.path(), None).expect("load config");

    assert!(config.has_project_config());
    assert_eq!(config.platform, PlatformMode::Win64);
    assert_eq!(config.dll_dir, Some(PathBuf::from("bin")));
    assert_eq!(config.format, OutputFormat::Env);
}

#[test]
fn test_cli_overrides_project_config() {
    let project = tempfile::tempdir().expect("create project dir");
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "platform = \"win64\"\nformat = \"json\"\n",
    )
    .expect("write project config");

    let config = Config::load(args(&["--platform", "posix"]), project.path(), None)
        .expect("load config");

    assert_eq!(config.platform, PlatformMode::Posix);
    assert_eq!(config.format, OutputFormat::Json);
}

#[test]
fn test_user_config_fills_gaps() {
    let project = tempfile::tempdir().expect("create project dir");
    let user_dir = tempfile::tempdir().expect("create user dir");
    let user_config = user_dir.path().join("config.toml");

    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "cxx = \"clang++\"\n",
    )
    .expect("write project config");
    fs::write(
        &user_config,
        "cxx = \"g++\"\nlog_level = \"debug\"\ncompiler_includes = [\"/usr/include\"]\n",
    )
    .expect("write user config");

    let config =
        Config::load(args(&[]), project.path(), Some(&user_config)).expect("load config");

    assert_eq!(config.cxx.as_deref(), Some("clang++"));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.compiler_includes, vec!["/usr/include".to_string()]);
}

#[test]
fn test_explicit_config_replaces_project_config() {
    let project = tempfile::tempdir().expect("create project dir");
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "format = \"json\"\n")
        .expect("write project config");
    let explicit = project.path().join("ci.toml");
    fs::write(&explicit, "format = \"env\"\n").expect("write explicit config");

    let explicit_arg = explicit.to_string_lossy().into_owned();
    let config = Config::load(args(&["--config", &explicit_arg]), project.path(), None)
        .expect("load config");

    assert_eq!(config.format, OutputFormat::Env);
    assert_eq!(config.config_path, Some(explicit));
}

#[test]
fn test_missing_user_config_is_ignored() {
    let project = tempfile::tempdir().expect("create project dir");
    let missing = project.path().join("nope").join("config.toml");

    let config = Config::load(args(&[]), project.path(), Some(&missing)).expect("load config");
    assert!(!config.has_project_config());
}

#[test]
fn test_malformed_project_config_is_an_error() {
    let project = tempfile::tempdir().expect("create project dir");
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "platform = \"vax\"\n")
        .expect("write project config");

    let err = Config::load(args(&[]), project.path(), None).expect_err("invalid platform");
    assert!(format!("{:#}", err).contains(PROJECT_CONFIG_FILE));
}
