//! Ignore patterns: loading the ignore file and matching relative paths.
//!
//! Patterns use shell-glob semantics over the whole root-relative path, with
//! forward slashes as separators. `*` is allowed to cross `/`, so `*.log`
//! matches `a/b/c.log` as well as `c.log`. A line authored with a trailing
//! slash (`build/`) becomes `build/**`, which matches everything beneath a
//! `build` directory but not the bare name `build`.
//!
//! Beyond plain shell globbing:
//!
//! - `**/` may match zero directories: `**/*.log` matches `debug.log` and
//!   `docs/**/*.md` matches `docs/a.md`.
//! - `**` inside a segment behaves like `*`, so `a**b` matches `a/x/b`.
//! - `{a,b}` is an alternation.
//! - A backslash is an ordinary character, not an escape.

use crate::error::SnapshotError;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::fs;
use std::io;
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// A compiled, ordered list of ignore patterns with any-match semantics.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
    set: GlobSet,
    /// Used only when the compiled globs could not be combined into `set`.
    fallback: Vec<GlobMatcher>,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
            fallback: Vec::new(),
        }
    }

    /// Compiles `patterns`, dropping any that do not parse.
    ///
    /// A dropped pattern simply never matches. If the remaining globs cannot
    /// be combined into one set, each is matched on its own instead.
    pub fn new(patterns: Vec<String>) -> Self {
        let mut globs = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            match compile(pattern) {
                Ok(glob) => globs.push(glob),
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("Ignoring malformed pattern '{}': {}", pattern, _e);
                }
            }
        }
        let mut builder = GlobSetBuilder::new();
        for glob in &globs {
            builder.add(glob.clone());
        }
        match builder.build() {
            Ok(set) => Self {
                patterns,
                set,
                fallback: Vec::new(),
            },
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Failed to build ignore pattern set, matching one by one: {}", _e);
                Self {
                    patterns,
                    set: GlobSet::empty(),
                    fallback: globs.iter().map(Glob::compile_matcher).collect(),
                }
            }
        }
    }

    /// Compiles `patterns`, failing on the first one that does not parse.
    pub fn strict(patterns: Vec<String>) -> Result<Self, SnapshotError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = compile(pattern).map_err(|e| SnapshotError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| SnapshotError::InvalidPattern {
                pattern: patterns.join(", "),
                message: e.to_string(),
            })?;
        Ok(Self {
            patterns,
            set,
            fallback: Vec::new(),
        })
    }

    /// True if the root-relative, slash-separated `relative` path matches any pattern.
    pub fn is_match(&self, relative: &str) -> bool {
        !relative.is_empty()
            && (self.set.is_match(relative) || self.fallback.iter().any(|m| m.is_match(relative)))
    }

    /// The patterns in the order they were supplied, including any that failed to compile.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn compile(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
}

/// One-shot form of [`IgnorePatterns::is_match`].
pub fn matches(relative: &str, patterns: &[String]) -> bool {
    IgnorePatterns::new(patterns.to_vec()).is_match(relative)
}

/// Turns one ignore-file line into a pattern, or `None` for blanks and comments.
pub fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.ends_with('/') {
        Some(format!("{}**", line))
    } else {
        Some(line.to_string())
    }
}

pub fn parse_ignore_list(text: &str) -> Vec<String> {
    text.lines().filter_map(normalize_line).collect()
}

/// Reads an ignore file. A file that does not exist yields no patterns.
pub fn load_ignore_file(path: &Path) -> Result<Vec<String>, SnapshotError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SnapshotError::io(path, e)),
    };
    let patterns = parse_ignore_list(&String::from_utf8_lossy(&bytes));
    #[cfg(feature = "logging")]
    tracing::debug!("Loaded {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}
