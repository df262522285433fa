//! Flag Classifier
//!
//! Sorts a compiler/linker flag string, as printed by build tools or
//! `pkg-config`, into the pieces a build system needs.
//!
//! This library provides:
//! - Flag tokenizing with `-framework NAME` kept as one unit
//! - Classification into includes, defines, libs, library paths, link flags and other flags
//! - Windows handling that turns frameworks into DLL import libraries
//! - Build environment merging
//! - Configuration management

pub mod classify;
pub mod cli;
pub mod config;
pub mod env;
pub mod flagset;
pub mod parser;
pub mod platform;

// Re-exports for clean public API
pub use classify::{Category, Classification, Classifier, Diagnostic, split_flags};
pub use config::Config;
pub use env::BuildEnv;
pub use flagset::FlagSet;
pub use platform::{DirectoryDllLookup, DllLookup, PlatformMode, StaticDllLookup};
