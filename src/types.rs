use serde::Serialize;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Dir,
    /// Anything that is neither, e.g. a dangling symlink.
    Other,
}

/// A filesystem node as reported by a [`FileSystem`](crate::FileSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The full path of the entry.
    pub path: PathBuf,
    /// The kind after following symlinks.
    pub kind: EntryKind,
    /// Whether the entry itself is a symlink. Symlinked directories are never expanded.
    pub is_symlink: bool,
}

impl DirEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            is_symlink: false,
        }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// A file chosen for the content section, before it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Slash-separated path relative to the root.
    pub relative: String,
    pub size: u64,
    /// Fence label, empty when unknown.
    pub language: &'static str,
}

/// What a snapshot run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub tree_lines: usize,
    pub files_written: usize,
    /// Files whose block holds the unreadable placeholder.
    pub unreadable_files: usize,
}

/// `path` relative to `root`, joined with forward slashes.
///
/// Returns `None` for `root` itself and for paths outside it.
pub fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
