use std::ffi::OsStr;
use std::path::{Component, Path};

/// Directory names excluded at any depth, regardless of ignore patterns.
pub const SKIP_DIRS: [&str; 7] = [
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".venv",
    ".env",
    "__pycache__",
];

/// Exact, case-sensitive membership test for a single path segment.
pub fn is_skip_name(name: &OsStr) -> bool {
    SKIP_DIRS.iter().any(|skip| OsStr::new(skip) == name)
}

/// True if any segment of `path` is in [`SKIP_DIRS`].
///
/// Pass a root-relative path; segments above the root are not meant to count.
pub fn is_skipped(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if is_skip_name(name)))
}
