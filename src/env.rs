//! Build environment assembled from classified flags.
//!
//! Maps categories onto the fields a compiler/linker invocation needs
//! (CPPPATH, CPPDEFINES, LIBS, LINKFLAGS, CXXFLAGS) and merges results from
//! several classifications without repeating what is already there.

use serde::Serialize;

use crate::classify::Classification;

/// Compilation environment for a C/C++ build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildEnv {
    /// Compiler executable, if known
    pub cxx: Option<String>,
    /// Include directories
    pub cpppath: Vec<String>,
    /// Preprocessor definitions
    pub cppdefines: Vec<String>,
    /// Library names, without the `-l`
    pub libs: Vec<String>,
    /// Linker arguments, including library search paths
    pub linkflags: String,
    /// Remaining compiler arguments
    pub cxxflags: String,
}

impl BuildEnv {
    pub fn new(cxx: Option<String>) -> Self {
        Self {
            cxx,
            ..Self::default()
        }
    }

    pub fn from_classification(classification: &Classification) -> Self {
        let mut env = Self::default();
        env.add_flags(classification, &[]);
        env
    }

    /// Merge a classification into this environment.
    ///
    /// Include directories the compiler already searches are skipped, and
    /// include directories compare case-insensitively.
    pub fn add_flags(&mut self, classification: &Classification, compiler_includes: &[String]) {
        for include in classification.includes.iter() {
            let lowered = include.to_lowercase();
            let known = self.cpppath.iter().any(|p| p.to_lowercase() == lowered);
            if !known && !compiler_includes.iter().any(|c| c == include) {
                self.cpppath.push(include.to_string());
            }
        }

        for define in classification.defines.iter() {
            if !self.cppdefines.iter().any(|d| d == define) {
                self.cppdefines.push(define.to_string());
            }
        }

        for lib in classification.libs.iter() {
            if !self.libs.iter().any(|l| l == lib) {
                self.libs.push(lib.to_string());
            }
        }

        append_once(&mut self.linkflags, &classification.libpaths.to_string());
        append_once(&mut self.linkflags, &classification.linkflags.to_string());
        append_once(&mut self.cxxflags, &classification.other.to_string());
    }
}

/// Append a space-separated group unless the exact group is already present
fn append_once(target: &mut String, group: &str) {
    if group.is_empty() || target.contains(group) {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(group);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::platform::{PlatformMode, StaticDllLookup};

    fn classify(flags: &str) -> Classification {
        Classifier::new(PlatformMode::Posix, StaticDllLookup::default()).classify(flags)
    }

    #[test]
    fn test_from_classification() {
        let env = BuildEnv::from_classification(&classify(
            "-I/usr/include/SDL2 -D_REENTRANT -L/usr/lib -lSDL2 -Wl,--as-needed -pthread",
        ));

        assert_eq!(env.cpppath, vec!["/usr/include/SDL2"]);
        assert_eq!(env.cppdefines, vec!["_REENTRANT"]);
        assert_eq!(env.libs, vec!["SDL2"]);
        assert_eq!(env.linkflags, "-L/usr/lib -Wl,--as-needed");
        assert_eq!(env.cxxflags, "-pthread");
        assert_eq!(env.cxx, None);
    }

    #[test]
    fn test_merge_skips_known_values() {
        let mut env = BuildEnv::new(Some("g++".to_string()));
        env.add_flags(&classify("-I/opt/Include -lz -DA -Wall"), &[]);
        env.add_flags(&classify("-I/opt/include -I/opt/extra -lz -lm -DA -Wall"), &[]);

        assert_eq!(env.cpppath, vec!["/opt/Include", "/opt/extra"]);
        assert_eq!(env.libs, vec!["z", "m"]);
        assert_eq!(env.cppdefines, vec!["A"]);
        assert_eq!(env.cxxflags, "-Wall");
    }

    #[test]
    fn test_compiler_includes_are_skipped() {
        let mut env = BuildEnv::default();
        let compiler_includes = vec!["/usr/include".to_string()];
        env.add_flags(&classify("-I/usr/include -Isrc"), &compiler_includes);

        assert_eq!(env.cpppath, vec!["src"]);
    }

    #[test]
    fn test_append_once() {
        let mut target = String::new();
        append_once(&mut target, "");
        assert_eq!(target, "");

        append_once(&mut target, "-L/a");
        append_once(&mut target, "-L/a");
        append_once(&mut target, "-lfoo");
        assert_eq!(target, "-L/a -lfoo");
    }
}
