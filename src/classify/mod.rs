//! Flag Classification
//!
//! Sorts a flag string into includes, defines, libs, library paths,
//! link flags and other compiler flags.

pub mod category;
pub mod engine;

pub use category::{Category, Classification};
pub use engine::{
    Classifier, Diagnostic, DiagnosticKind, split_flags, split_flags_to_strings,
};
