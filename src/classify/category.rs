//! Flag categories and the classification result.

use serde::Serialize;
use std::fmt;

use super::engine::Diagnostic;
use crate::flagset::FlagSet;

/// One of the six buckets a flag can end up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Include,
    Define,
    Lib,
    LibPath,
    LinkFlag,
    Other,
}

impl Category {
    /// All categories in output order
    pub const ALL: [Category; 6] = [
        Category::Include,
        Category::Define,
        Category::Lib,
        Category::LibPath,
        Category::LinkFlag,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Include => "includes",
            Category::Define => "defines",
            Category::Lib => "libs",
            Category::LibPath => "libpaths",
            Category::LinkFlag => "linkflags",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags sorted into categories, plus whatever could not be sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub includes: FlagSet,
    pub defines: FlagSet,
    pub libs: FlagSet,
    pub libpaths: FlagSet,
    pub linkflags: FlagSet,
    pub other: FlagSet,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &FlagSet {
        match category {
            Category::Include => &self.includes,
            Category::Define => &self.defines,
            Category::Lib => &self.libs,
            Category::LibPath => &self.libpaths,
            Category::LinkFlag => &self.linkflags,
            Category::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut FlagSet {
        match category {
            Category::Include => &mut self.includes,
            Category::Define => &mut self.defines,
            Category::Lib => &mut self.libs,
            Category::LibPath => &mut self.libpaths,
            Category::LinkFlag => &mut self.linkflags,
            Category::Other => &mut self.other,
        }
    }

    /// True when no flag was placed in any category
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// The six categories as space-joined strings:
    /// (includes, defines, libs, libpaths, linkflags, other)
    pub fn to_strings(&self) -> (String, String, String, String, String, String) {
        (
            self.includes.to_string(),
            self.defines.to_string(),
            self.libs.to_string(),
            self.libpaths.to_string(),
            self.linkflags.to_string(),
            self.other.to_string(),
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            writeln!(f, "{}: {}", category.name(), self.get(category))?;
        }
        Ok(())
    }
}
