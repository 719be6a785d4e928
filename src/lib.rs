//! # Snapmd
//!
//! `snapmd` walks a directory tree and writes a single Markdown document: an
//! indented tree of the directory followed by the text of every eligible file
//! in a fenced block.
//!
//! Entries are left out when any path segment is a well-known tooling
//! directory (`.git`, `node_modules`, `.venv`, ...) or when their relative
//! path matches one of the ignore patterns. The content section additionally
//! drops files above a size ceiling and files that are not text. File content
//! is streamed line by line and never held in memory whole.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use snapmd::{SnapshotBuilder, load_ignore_file, write_snapshot};
//! use std::path::Path;
//!
//! let patterns = load_ignore_file(Path::new(".snapshotignore")).expect("Failed to read ignore file");
//! let options = SnapshotBuilder::new(".")
//!     .ignore_patterns(patterns)
//!     .max_mb(1)
//!     .build();
//!
//! let summary = write_snapshot(&options, Path::new("CODEBASE_SNAPSHOT.md"))
//!     .expect("Failed to write snapshot");
//! println!("{} files written", summary.files_written);
//! ```

mod classify;
mod engine;
mod error;
mod fs;
mod options;
pub mod output;
mod patterns;
mod skip;
mod tree;
mod types;

pub use classify::{display_label, has_text_media_type, is_text_eligible, language_from_extension};
pub use engine::{Snapshot, resolve_root, snapshot_files, snapshot_tree, write_snapshot};
pub use error::SnapshotError;
pub use fs::{FileSystem, OsFileSystem};
pub use options::{
    BYTES_PER_MB, BinaryDetection, DEFAULT_IGNORE_FILE, DEFAULT_MAX_MB, DEFAULT_OUTPUT,
    SnapshotBuilder, SnapshotOptions,
};
pub use patterns::{IgnorePatterns, load_ignore_file, matches, normalize_line, parse_ignore_list};
pub use skip::{SKIP_DIRS, is_skip_name, is_skipped};
pub use tree::render_tree;
pub use types::{DirEntry, EntryKind, SelectedFile, SnapshotSummary, relative_posix};
