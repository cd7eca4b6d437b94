//! Building `make` command lines for a target

use crate::target::Target;
use crate::variable::Variables;
use std::fmt;

/// A `make <target> NAME=value ...` command line.
///
/// Arguments keep the order they were first set in. Nothing is quoted:
/// turning this into something a shell can run safely is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    target: String,
    arguments: Vec<(String, String)>,
}

impl Invocation {
    /// Run `target` with no variable overrides
    pub fn new(target: &Target) -> Self {
        Invocation {
            target: target.name().to_owned(),
            arguments: Vec::new(),
        }
    }

    /// Pre-fill one argument for each variable the target requires, using
    /// the value assigned in the makefile. Variables without a (non-empty)
    /// default are left out.
    pub fn with_defaults(target: &Target, defaults: &Variables) -> Self {
        let mut tr = Invocation::new(target);
        for name in target.required_variables() {
            if let Some(value) = defaults.get(name) {
                tr.set(name.as_str(), value);
            }
        }
        tr
    }

    /// Set `name=value`. The value is trimmed, and an empty value removes
    /// the argument altogether.
    pub fn set(&mut self, name: impl Into<String>, value: &str) -> &mut Self {
        let name = name.into();
        let value = value.trim();

        if value.is_empty() {
            self.arguments.retain(|(existing, _)| *existing != name);
            return self;
        }

        match self.arguments.iter_mut().find(|(existing, _)| *existing == name) {
            Some(argument) => argument.1 = value.to_owned(),
            None => self.arguments.push((name, value.to_owned())),
        }
        self
    }

    /// The target this invocation runs
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Look up the value an argument is currently set to
    pub fn get(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in command line order
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.arguments
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The full command line, one token per element, starting with `make`
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.arguments.len() + 2);
        args.push("make".to_owned());
        args.push(self.target.clone());
        args.extend(
            self.arguments
                .iter()
                .map(|(name, value)| format!("{}={}", name, value)),
        );
        args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
