/* Flat makefile variable tables
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

use crate::parsers::{self, Reference};
use crate::types;
use std::fmt;
use std::iter::FromIterator;

/// A flat mapping from variable name to its last assigned value.
///
/// Values are stored exactly as written (after trimming), without expanding
/// references to other variables. Cloning is cheap: the table is backed by
/// a persistent map, so the extractor can hand out snapshots freely.
#[derive(Clone, Default, PartialEq)]
pub struct Variables {
    values: types::Map<String, String>,
}

impl Variables {
    /// Create an empty table
    pub fn new() -> Self {
        Default::default()
    }

    /// Set `name` to `value`, replacing anything assigned before.
    /// Every assignment flavor ends up here: `+=` does not append and `?=`
    /// overwrites unconditionally.
    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        debug!("Setting variable {:?} to {:?}", name, value);
        self.values.insert(name, value);
    }

    /// Look up the raw value of a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether `name` has been assigned
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of distinct variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing has been assigned
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Find the variable references (`$(NAME)` / `${NAME}`) in `text`
    pub fn references(text: &str) -> Vec<Reference<'_>> {
        parsers::references(text)
    }

    /// Substitute every reference in `text` whose variable is known.
    ///
    /// Single pass: substituted values are not scanned again, and references
    /// to unknown variables are left exactly as written.
    pub fn expand(&self, text: &str) -> String {
        let mut expanded = String::with_capacity(text.len());
        let mut copied_up_to = 0;

        for reference in parsers::references(text) {
            if let Some(value) = self.get(reference.name) {
                expanded.push_str(&text[copied_up_to..reference.start]);
                expanded.push_str(value);
                copied_up_to = reference.end;
            }
        }

        expanded.push_str(&text[copied_up_to..]);
        expanded
    }
}

impl fmt::Debug for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort();
        f.debug_map().entries(sorted).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tr = Variables::new();
        for (name, value) in iter {
            tr.assign(name, value);
        }
        tr
    }
}
