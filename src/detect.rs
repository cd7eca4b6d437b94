//! Guessing whether a file is a makefile

use crate::MakefileError;
use std::fs;
use std::path::{Path, PathBuf};

/// The names `make` itself looks for, in the order it looks for them
const DEFAULT_NAMES: &[&str] = &["GNUmakefile", "makefile", "Makefile"];

const KNOWN_NAMES: &[&str] = &[
    "makefile",
    "makefile.txt",
    "makefile.mk",
    "gnumakefile",
    "bmakefile",
];

/// How many leading lines [`looks_like_makefile`] inspects
const SNIFF_LINES: usize = 10;

/// Whether the file name alone marks `path` as a makefile
pub fn is_makefile_name(path: &Path) -> bool {
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };

    KNOWN_NAMES.contains(&file_name.as_str())
        || file_name.starts_with("makefile")
        || file_name.ends_with(".mk")
}

/// Content sniffing: true if one of the first few lines looks like a rule,
/// i.e. has a `:` but no `=` and isn't a comment.
pub fn looks_like_makefile<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().take(SNIFF_LINES).any(|line| {
        let trimmed = line.as_ref().trim();
        !trimmed.is_empty() && !trimmed.starts_with('#') && trimmed.contains(':') && !trimmed.contains('=')
    })
}

/// Find the makefile to use in `dir`.
///
/// The conventional names are tried first, then any other entry whose name
/// looks like a makefile, picking the alphabetically first one.
pub fn find_makefile(dir: &Path) -> Result<Option<PathBuf>, MakefileError> {
    for name in DEFAULT_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            debug!("Found default makefile {:?}", candidate);
            return Ok(Some(candidate));
        }
    }

    let entries = fs::read_dir(dir).map_err(|cause| MakefileError::io(dir, cause))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|cause| MakefileError::io(dir, cause))?.path();
        if path.is_file() && is_makefile_name(&path) {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}
