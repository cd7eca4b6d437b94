/* mktargets's main file
This file is NOT part of GNU Make.
mktargets is free software; you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free
Software Foundation; either version 3 of the License, or (at your option) any
later version.

mktargets is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE.  See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
this program.  If not, see <http://www.gnu.org/licenses/>.  */

//! mktargets pulls the runnable targets out of a makefile: their names,
//! dependencies, recipes, and the variables those recipes reference, so a
//! caller can offer to run `make <target> NAME=value ...`.
//!
//! This is not a make implementation. Only explicit `name: deps` rules and
//! flat `NAME = value` assignments are understood; pattern rules,
//! conditionals, includes, functions and automatic variables are skipped.
//!
//! ```
//! let makefile = mktargets::Makefile::parse_str("CC = gcc\nbuild:\n\t$(CC) -o out main.c\n");
//! let build = makefile.target("build").unwrap();
//! assert_eq!(build.commands(), "gcc -o out main.c");
//! assert_eq!(build.required_variables(), ["CC"]);
//! ```
#![warn(missing_docs)]

#[macro_use]
extern crate log;


pub mod detect;
mod extract;
mod invocation;
mod parsers;
mod target;
mod types;
mod variable;

pub use crate::extract::{extract_targets, extract_variables};
pub use crate::invocation::Invocation;
pub use crate::parsers::Reference;
pub use crate::target::{is_special_target, Target};
pub use crate::variable::Variables;

use failure::Fail;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

/// Represents all the things that can go wrong around extraction. Extraction
/// itself never fails; these come from reading input and from lookups.
#[derive(Debug, Fail)]
pub enum MakefileError {
    /// Reading the makefile failed, including when it isn't valid UTF-8
    #[fail(display = "failed to read {}: {}", path, cause)]
    Io {
        /// What we were trying to read
        path: String,
        /// The underlying error
        #[fail(cause)]
        cause: io::Error,
    },

    /// An invocation was requested for a target the makefile doesn't define
    #[fail(display = "no target named {:?}", _0)]
    UnknownTarget(String),
}

impl MakefileError {
    pub(crate) fn io(path: impl AsRef<Path>, cause: io::Error) -> Self {
        MakefileError::Io {
            path: path.as_ref().display().to_string(),
            cause,
        }
    }
}

/// Both extraction passes run over one makefile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Makefile {
    targets: Vec<Target>,
    variables: Variables,
}

impl Makefile {
    /// Extract targets and variables from already split lines
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        Makefile {
            targets: extract_targets(lines),
            variables: extract_variables(lines),
        }
    }

    /// Split `text` into lines (`\n` or `\r\n`) and parse them. A leading
    /// UTF-8 byte order mark is dropped.
    pub fn parse_str(text: &str) -> Self {
        let text = text.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = text.lines().collect();
        Makefile::parse(&lines)
    }

    /// Read a whole makefile from `input`. `input_name` is only used for
    /// diagnostics.
    pub fn read<R: BufRead>(input: &mut R, input_name: &str) -> Result<Self, MakefileError> {
        info!("Begin reading makefile {:?}", input_name);

        let mut text = String::new();
        input
            .read_to_string(&mut text)
            .map_err(|cause| MakefileError::io(input_name, cause))?;
        let makefile = Makefile::parse_str(&text);

        info!(
            "Complete read of makefile {:?}: {} targets, {} variables",
            input_name,
            makefile.targets.len(),
            makefile.variables.len()
        );
        Ok(makefile)
    }

    /// Open and read the makefile at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MakefileError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|cause| MakefileError::io(path, cause))?;
        let mut reader = io::BufReader::new(file);
        Makefile::read(&mut reader, &path.display().to_string())
    }

    /// Every target, in the order they were defined
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get the target with the given name
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    /// The final value of every variable in the makefile
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// An invocation for `name`, with its required variables pre-filled from
    /// the makefile's own assignments
    pub fn invocation(&self, name: &str) -> Result<Invocation, MakefileError> {
        let target = self
            .target(name)
            .ok_or_else(|| MakefileError::UnknownTarget(name.to_owned()))?;
        Ok(Invocation::with_defaults(target, &self.variables))
    }
}
