//! Internal module for rendering the directory hierarchy as indented lines.

use crate::fs::FileSystem;
use crate::patterns::IgnorePatterns;
use crate::skip::is_skipped;
use crate::types::{DirEntry, relative_posix};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
const INDENT_STEP: usize = 4;

struct Frame {
    entries: std::vec::IntoIter<DirEntry>,
    indent: usize,
}

/// Renders the tree under `root`, one line per visible entry, root excluded.
///
/// Within a directory, subdirectories come first and names compare
/// case-insensitively. A directory that cannot be listed shows no children.
/// Excluded directories take their whole subtree with them.
pub fn render_tree<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    ignore: &IgnorePatterns,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![Frame {
        entries: visible_children(fs, root, root, ignore).into_iter(),
        indent: 0,
    }];
    while let Some(frame) = stack.last_mut() {
        let indent = frame.indent;
        let Some(entry) = frame.entries.next() else {
            stack.pop();
            continue;
        };
        let glyph = if frame.entries.len() == 0 { CORNER } else { TEE };
        lines.push(format!("{}{}{}", " ".repeat(indent), glyph, entry.name()));
        if entry.is_dir() && !entry.is_symlink {
            stack.push(Frame {
                entries: visible_children(fs, root, &entry.path, ignore).into_iter(),
                indent: indent + INDENT_STEP,
            });
        }
    }
    lines
}

fn visible_children<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    dir: &Path,
    ignore: &IgnorePatterns,
) -> Vec<DirEntry> {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(_e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Cannot list {}: {}", dir.display(), _e);
            return Vec::new();
        }
    };
    let mut visible: Vec<(bool, String, String, DirEntry)> = entries
        .into_iter()
        .filter(|entry| match relative_posix(root, &entry.path) {
            Some(rel) => !is_skipped(Path::new(&rel)) && !ignore.is_match(&rel),
            None => false,
        })
        .map(|entry| {
            let name = entry.name();
            (entry.is_file(), name.to_lowercase(), name, entry)
        })
        .collect();
    visible.sort_by(|a, b| (a.0, &a.1, &a.2).cmp(&(b.0, &b.1, &b.2)));
    visible.into_iter().map(|(_, _, _, entry)| entry).collect()
}
