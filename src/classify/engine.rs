//! Classification Engine
//!
//! Walks the tokens of a flag string in order and places each one in a
//! category. Platform differences are delegated to [`PlatformMode`], and the
//! filesystem is only reached through the [`DllLookup`] the classifier owns.

use serde::Serialize;

use super::category::{Category, Classification};
use crate::parser::{Token, TokenKind, tokenize};
use crate::platform::{DirectoryDllLookup, DllLookup, PlatformMode};

/// Kind of problem found while classifying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The token matched none of the known flag families
    UnsupportedFlag,
}

/// A non-fatal problem with a single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub token: String,
    pub message: String,
}

impl Diagnostic {
    fn unsupported(token: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedFlag,
            token: token.to_string(),
            message: format!("Unsupported flag: {}", token),
        }
    }
}

/// Sorts compiler and linker flags into categories
#[derive(Debug, Clone)]
pub struct Classifier<L = DirectoryDllLookup> {
    platform: PlatformMode,
    lookup: L,
}

impl Classifier<DirectoryDllLookup> {
    /// Classifier resolving DLLs in the current working directory
    pub fn in_current_dir(platform: PlatformMode) -> Self {
        Self::new(platform, DirectoryDllLookup::current_dir())
    }
}

impl<L: DllLookup> Classifier<L> {
    pub fn new(platform: PlatformMode, lookup: L) -> Self {
        Self { platform, lookup }
    }

    /// Classify a whitespace-separated flag string
    ///
    /// Never fails: unsupported tokens are reported in
    /// [`Classification::diagnostics`] and left out of every category.
    pub fn classify(&self, flags: &str) -> Classification {
        let mut result = Classification::new();
        // Set right after a framework, so a following bare word can name another one
        let mut after_framework = false;

        for token in tokenize(flags) {
            match self.classify_token(&token, after_framework, &mut result) {
                Some(framework) => after_framework = framework,
                None => {
                    log::warn!("Unsupported flag: {}", token.text);
                    result.diagnostics.push(Diagnostic::unsupported(&token.text));
                }
            }
        }

        result
    }

    /// Place one token. Returns `None` for an unsupported token, otherwise
    /// whether the token leaves a framework run open.
    fn classify_token(
        &self,
        token: &Token,
        after_framework: bool,
        result: &mut Classification,
    ) -> Option<bool> {
        let text = token.text.as_str();

        if let Some(path) = text.strip_prefix("-I") {
            insert_value(result, Category::Include, path);
        } else if let Some(define) = text.strip_prefix("-D") {
            insert_value(result, Category::Define, define);
        } else if let Some(lib) = text.strip_prefix("-l") {
            insert_value(result, Category::Lib, lib);
        } else if text.starts_with("-L") {
            result.get_mut(Category::LibPath).insert(text);
        } else if text.starts_with("-Wl,") {
            if self.platform.accepts_wl_flag(text) {
                result.get_mut(Category::LinkFlag).insert(text);
            }
        } else if text.starts_with("-p") {
            result.get_mut(Category::Other).insert(text);
        } else if is_f_flag(text) {
            let linkflags = result.get_mut(Category::LinkFlag);
            return Some(self.platform.link_framework(token, &self.lookup, linkflags));
        } else if text.starts_with("-stdlib") {
            result.get_mut(Category::LinkFlag).insert(text);
            result.get_mut(Category::Other).insert(text);
        } else if after_framework
            && self.platform.follows_bare_frameworks()
            && is_bare_framework_name(token)
        {
            result
                .get_mut(Category::LinkFlag)
                .insert(format!("-framework {}", text));
            return Some(true);
        } else if text.starts_with("-W") {
            result.get_mut(Category::Other).insert(text);
        } else {
            return None;
        }

        Some(false)
    }
}

/// A bare `-I`, `-D` or `-l` carries no value and adds nothing
fn insert_value(result: &mut Classification, category: Category, value: &str) {
    if !value.is_empty() {
        result.get_mut(category).insert(value);
    }
}

/// `-f` in any case, which also covers `-F` search paths and `-framework` units
fn is_f_flag(text: &str) -> bool {
    text.get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("-f"))
}

/// pkg-config for Qt lists several frameworks after a single "-framework",
/// e.g. "-framework QtCore QtGui"
fn is_bare_framework_name(token: &Token) -> bool {
    token.kind == TokenKind::Word && !token.text.contains('.')
}

/// Classify with DLL lookup in the current working directory
pub fn split_flags(flags: &str, win64: bool) -> Classification {
    Classifier::in_current_dir(PlatformMode::from_win64(win64)).classify(flags)
}

/// Classify and return (includes, defines, libs, libpaths, linkflags, other)
pub fn split_flags_to_strings(
    flags: &str,
    win64: bool,
) -> (String, String, String, String, String, String) {
    split_flags(flags, win64).to_strings()
}
