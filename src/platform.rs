//! Platform handling for framework flags.
//!
//! This module handles:
//! - Selecting between POSIX/macOS and 64-bit Windows conventions
//! - Rewriting `-framework NAME` into a DLL import library on Windows
//! - Case-insensitive DLL lookup through an injectable directory listing

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::flagset::FlagSet;
use crate::parser::{Token, TokenKind};

/// Library flag produced by `-F/Library/Frameworks` on Windows; never a real library.
pub const SPURIOUS_FRAMEWORKS_LIB: &str = "-lFrameworks";

/// Search path added so the linker finds import libraries next to the DLLs.
pub const CURRENT_DIR_LIBPATH: &str = "-L.";

const DLL_EXT: &str = ".dll";
const DLL_PATTERN: &str = r"^.+\.(dll|DLL)$";

static DLL_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DLL_PATTERN));

/// Length of "-framework " in a merged framework unit
const FRAMEWORK_UNIT_PREFIX_LEN: usize = "-framework ".len();

/// Toolchain convention used when classifying flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformMode {
    /// GCC/Clang style toolchains on Linux, BSD and macOS
    #[default]
    Posix,
    /// 64-bit Windows, where frameworks become DLLs
    #[serde(alias = "windows")]
    Win64,
}

impl PlatformMode {
    pub fn from_win64(win64: bool) -> Self {
        if win64 {
            PlatformMode::Win64
        } else {
            PlatformMode::Posix
        }
    }

    /// The mode matching the platform this binary was built for
    pub fn host() -> Self {
        Self::from_win64(cfg!(all(windows, target_pointer_width = "64")))
    }

    pub fn is_win64(self) -> bool {
        self == PlatformMode::Win64
    }

    /// Whether a `-Wl,...` token is kept as a link flag
    pub fn accepts_wl_flag(self, token: &str) -> bool {
        match self {
            PlatformMode::Posix => true,
            PlatformMode::Win64 => !token.contains("-framework"),
        }
    }

    /// Whether bare words after a framework are read as more framework names
    pub fn follows_bare_frameworks(self) -> bool {
        match self {
            PlatformMode::Posix => true,
            PlatformMode::Win64 => false,
        }
    }

    /// Add a `-f*` token to the link flags.
    ///
    /// Returns true when the token was a framework that later bare words
    /// may continue.
    pub fn link_framework<L: DllLookup + ?Sized>(
        self,
        token: &Token,
        lookup: &L,
        linkflags: &mut FlagSet,
    ) -> bool {
        match self {
            PlatformMode::Posix => {
                linkflags.insert(token.text.as_str());
                token.kind == TokenKind::Framework
            }
            PlatformMode::Win64 => {
                let name = match token.framework_name() {
                    Some(name) => name,
                    None => token.text.get(FRAMEWORK_UNIT_PREFIX_LEN..).unwrap_or(""),
                };

                // "-fPIC" and friends have no name; an empty "-l" would only confuse the linker
                if !name.is_empty() {
                    let dll = resolve_dll(name, lookup);
                    let stem = dll
                        .len()
                        .checked_sub(DLL_EXT.len())
                        .and_then(|end| dll.get(..end))
                        .unwrap_or(name);
                    let lib = format!("-l{}", stem);
                    if lib != SPURIOUS_FRAMEWORKS_LIB && linkflags.insert(lib.as_str()) {
                        log::debug!("Linking framework '{}' as {}", name, lib);
                    }
                }
                linkflags.insert(CURRENT_DIR_LIBPATH);
                false
            }
        }
    }
}

impl fmt::Display for PlatformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformMode::Posix => f.write_str("posix"),
            PlatformMode::Win64 => f.write_str("win64"),
        }
    }
}

impl FromStr for PlatformMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posix" | "unix" | "macos" | "linux" => Ok(PlatformMode::Posix),
            "win64" | "windows" => Ok(PlatformMode::Win64),
            other => Err(format!(
                "unknown platform '{}' (expected 'posix' or 'win64')",
                other
            )),
        }
    }
}

/// Source of DLL file names for framework resolution
pub trait DllLookup {
    /// List the DLL file names available for linking
    fn dll_names(&self) -> io::Result<Vec<String>>;
}

impl<T: DllLookup + ?Sized> DllLookup for &T {
    fn dll_names(&self) -> io::Result<Vec<String>> {
        (**self).dll_names()
    }
}

/// Lists `*.dll` and `*.DLL` files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryDllLookup {
    dir: PathBuf,
}

impl DirectoryDllLookup {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lookup in the process working directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }
}

impl DllLookup for DirectoryDllLookup {
    fn dll_names(&self) -> io::Result<Vec<String>> {
        let pattern = DLL_REGEX
            .as_ref()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.clone()))?;

        let mut names = Vec::new();
        // Entries that cannot be read are skipped, not fatal
        for entry in std::fs::read_dir(&self.dir)?.flatten() {
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str()
                && pattern.is_match(name)
            {
                names.push(name.to_string());
            }
        }
        // read_dir order is unspecified; make "first match wins" stable
        names.sort();
        Ok(names)
    }
}

/// Fixed list of DLL names
#[derive(Debug, Clone, Default)]
pub struct StaticDllLookup {
    names: Vec<String>,
}

impl StaticDllLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DllLookup for StaticDllLookup {
    fn dll_names(&self) -> io::Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

/// Find the on-disk spelling of `NAME.dll`, falling back to the guess
pub fn resolve_dll<L: DllLookup + ?Sized>(name: &str, lookup: &L) -> String {
    let guess = format!("{}{}", name, DLL_EXT);

    let names = match lookup.dll_names() {
        Ok(names) => names,
        Err(e) => {
            log::debug!("Could not list DLLs, using '{}': {}", guess, e);
            return guess;
        }
    };

    let wanted = guess.to_lowercase();
    names
        .into_iter()
        .find(|dll| dll.to_lowercase() == wanted)
        .unwrap_or(guess)
}
