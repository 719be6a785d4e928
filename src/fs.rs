//! The filesystem queries the tree and content passes run on.
//!
//! Both passes only see the filesystem through [`FileSystem`], so either can be
//! driven by an in-memory fake in tests.

use crate::skip::is_skip_name;
use crate::types::{DirEntry, EntryKind};
use ignore::WalkBuilder;
use std::fs::{self, File, FileType};
use std::io::{self, Read};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

pub trait FileSystem {
    /// Lists the direct children of `dir`, in no particular order.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Size in bytes, following symlinks.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Every entry strictly beneath `root`, in no particular order.
    ///
    /// Skip-set entries are left out and never descended into, symlinked
    /// directories are not followed, and directories that cannot be listed
    /// contribute nothing.
    fn walk(&self, root: &Path) -> Vec<DirEntry> {
        let mut entries = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let children = match self.read_dir(&dir) {
                Ok(children) => children,
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Cannot list {}: {}", dir.display(), _e);
                    continue;
                }
            };
            for child in children {
                if child.path.file_name().is_some_and(is_skip_name) {
                    continue;
                }
                if child.is_dir() && !child.is_symlink {
                    pending.push(child.path.clone());
                }
                entries.push(child);
            }
        }
        entries
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

fn entry_kind(path: &Path, file_type: Option<FileType>, is_symlink: bool) -> EntryKind {
    let resolved = if is_symlink {
        fs::metadata(path).ok().map(|m| m.file_type())
    } else {
        file_type
    };
    match resolved {
        Some(t) if t.is_dir() => EntryKind::Dir,
        Some(t) if t.is_file() => EntryKind::File,
        _ => EntryKind::Other,
    }
}

impl FileSystem for OsFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let Ok(entry) = entry else { continue };
            let file_type = entry.file_type().ok();
            let is_symlink = file_type.is_some_and(|t| t.is_symlink());
            let path = entry.path();
            let kind = entry_kind(&path, file_type, is_symlink);
            entries.push(DirEntry {
                path,
                kind,
                is_symlink,
            });
        }
        Ok(entries)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(path)?))
    }

    fn walk(&self, root: &Path) -> Vec<DirEntry> {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| entry.depth() == 0 || !is_skip_name(entry.file_name()));
        let mut entries = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) if entry.depth() > 0 => {
                    let is_symlink = entry.path_is_symlink();
                    let kind = entry_kind(entry.path(), entry.file_type(), is_symlink);
                    entries.push(DirEntry {
                        path: entry.into_path(),
                        kind,
                        is_symlink,
                    });
                }
                Ok(_) => {}
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Walk error under {}: {}", root.display(), _e);
                }
            }
        }
        entries
    }
}
