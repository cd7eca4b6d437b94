//! Build targets and the special-target predicate

use crate::types;
use lazy_static::lazy_static;

lazy_static! {
    /// GNU Make's built-in special targets
    static ref SPECIAL_TARGETS: types::Set<&'static str> = [
        ".PHONY",
        ".SUFFIXES",
        ".DEFAULT",
        ".PRECIOUS",
        ".INTERMEDIATE",
        ".SECONDARY",
        ".SECONDEXPANSION",
        ".DELETE_ON_ERROR",
        ".IGNORE",
        ".LOW_RESOLUTION_TIME",
        ".SILENT",
        ".EXPORT_ALL_VARIABLES",
        ".NOTPARALLEL",
        ".ONESHELL",
        ".POSIX",
    ]
    .iter()
    .cloned()
    .collect();
}

/// Returns true for names that are Make directives or malformed matches
/// rather than goals a user would ask for: the built-in special targets,
/// anything starting with `.`, anything containing `=`, and blank names.
pub fn is_special_target(name: &str) -> bool {
    SPECIAL_TARGETS.contains(name)
        || name.starts_with('.')
        || name.contains('=')
        || name.trim().is_empty()
}

/// A build goal extracted from a makefile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    name: String,
    dependencies: Vec<String>,
    commands: String,
    required_variables: Vec<String>,
    line: usize,
}

impl Target {
    pub(crate) fn new(
        name: String,
        dependencies: Vec<String>,
        commands: String,
        required_variables: Vec<String>,
        line: usize,
    ) -> Self {
        Target {
            name,
            dependencies,
            commands,
            required_variables,
            line,
        }
    }

    /// The target's name, as written in the header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prerequisites, in source order. Duplicates are kept.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The recipe, one expanded command per line
    pub fn commands(&self) -> &str {
        &self.commands
    }

    /// Variables referenced anywhere in the unexpanded recipe, in the order
    /// they were first seen
    pub fn required_variables(&self) -> &[String] {
        &self.required_variables
    }

    /// Whether running this target could use caller-supplied variables
    pub fn has_variables(&self) -> bool {
        !self.required_variables.is_empty()
    }

    /// 1-based line number of the header that defined this target
    pub fn line(&self) -> usize {
        self.line
    }
}
