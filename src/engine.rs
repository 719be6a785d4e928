use crate::classify::{display_label, is_text_eligible};
use crate::error::SnapshotError;
use crate::fs::{FileSystem, OsFileSystem};
use crate::options::{BinaryDetection, SnapshotOptions};
use crate::output::{MarkdownWriter, ReadOutcome};
use crate::patterns::IgnorePatterns;
use crate::skip::is_skipped;
use crate::tree::render_tree;
use crate::types::{DirEntry, SelectedFile, SnapshotSummary, relative_posix};
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Write};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// Bytes inspected when sniffing for binary content.
const SNIFF_LEN: usize = 4096;

/// One snapshot run over a filesystem: the tree pass and the content pass.
///
/// The two passes walk the filesystem independently. If it changes between
/// them the tree and the file listing may disagree.
pub struct Snapshot<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
    ignore: &'a IgnorePatterns,
    options: &'a SnapshotOptions,
    exclude: Option<String>,
}

impl<'a, F: FileSystem + ?Sized> Snapshot<'a, F> {
    pub fn new(
        fs: &'a F,
        root: &'a Path,
        ignore: &'a IgnorePatterns,
        options: &'a SnapshotOptions,
    ) -> Self {
        Self {
            fs,
            root,
            ignore,
            options,
            exclude: None,
        }
    }

    /// Keeps the file at `relative` out of the content section.
    pub fn excluding(mut self, relative: impl Into<String>) -> Self {
        self.exclude = Some(relative.into());
        self
    }

    pub fn tree_lines(&self) -> Vec<String> {
        render_tree(self.fs, self.root, self.ignore)
    }

    /// The files the content section would contain, in output order.
    pub fn select_files(&self) -> Vec<SelectedFile> {
        self.candidates()
            .into_iter()
            .filter_map(|(relative, entry)| self.select(relative, entry))
            .collect()
    }

    /// Every regular file under the root, ordered by relative path.
    ///
    /// FIFOs, sockets, devices and dangling symlinks are dropped here: opening
    /// a FIFO would block the run.
    fn candidates(&self) -> Vec<(String, DirEntry)> {
        let mut candidates: Vec<(String, DirEntry)> = self
            .fs
            .walk(self.root)
            .into_iter()
            .filter(|entry| entry.is_file())
            .filter_map(|entry| relative_posix(self.root, &entry.path).map(|rel| (rel, entry)))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        candidates
    }

    fn select(&self, relative: String, entry: DirEntry) -> Option<SelectedFile> {
        if self.exclude.as_deref() == Some(relative.as_str()) {
            return None;
        }
        if is_skipped(Path::new(&relative)) {
            #[cfg(feature = "logging")]
            tracing::debug!("Skip set: {}", relative);
            return None;
        }
        if self.ignore.is_match(&relative) {
            #[cfg(feature = "logging")]
            tracing::debug!("Ignored by pattern: {}", relative);
            return None;
        }
        let size = match self.fs.file_size(&entry.path) {
            Ok(size) => size,
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Cannot stat {}: {}", relative, _e);
                return None;
            }
        };
        if size > self.options.max_file_size {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "File too large ({} > {}), skipping {}",
                size,
                self.options.max_file_size,
                relative
            );
            return None;
        }
        if !is_text_eligible(&entry.path) {
            #[cfg(feature = "logging")]
            tracing::debug!("Not a text file: {}", relative);
            return None;
        }
        Some(SelectedFile {
            language: display_label(&entry.path),
            path: entry.path,
            relative,
            size,
        })
    }

    /// Writes the whole document to `out`.
    ///
    /// Only failures to write `out` are returned; unreadable inputs are
    /// recorded in the document and in the summary.
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<SnapshotSummary> {
        let mut md = MarkdownWriter::new(out);
        let mut summary = SnapshotSummary::default();
        md.write_header(self.root)?;
        let lines = self.tree_lines();
        summary.tree_lines = lines.len();
        md.write_tree(&lines)?;
        md.begin_files()?;
        for (relative, entry) in self.candidates() {
            let Some(file) = self.select(relative, entry) else {
                continue;
            };
            match self.write_file(&mut md, &file)? {
                Some(ReadOutcome::Complete) => summary.files_written += 1,
                Some(ReadOutcome::Failed) => {
                    summary.files_written += 1;
                    summary.unreadable_files += 1;
                }
                None => {}
            }
        }
        md.finish()?;
        Ok(summary)
    }

    /// Writes one file's block. `None` means sniffing found binary data and
    /// nothing was written.
    fn write_file<W: Write>(
        &self,
        md: &mut MarkdownWriter<W>,
        file: &SelectedFile,
    ) -> io::Result<Option<ReadOutcome>> {
        let mut reader = match self.fs.open(&file.path) {
            Ok(reader) => BufReader::new(reader),
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Cannot open {}: {}", file.relative, _e);
                md.begin_file(&file.relative, file.language)?;
                md.write_unreadable()?;
                md.end_file()?;
                return Ok(Some(ReadOutcome::Failed));
            }
        };
        let outcome = match self.options.binary_detection {
            BinaryDetection::None => {
                md.begin_file(&file.relative, file.language)?;
                md.write_content(reader)?
            }
            method => {
                let mut head = Vec::with_capacity(SNIFF_LEN);
                match reader.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut head) {
                    Ok(_) => {
                        if looks_binary(&head, method) {
                            #[cfg(feature = "logging")]
                            tracing::debug!("Binary file detected: {}", file.relative);
                            return Ok(None);
                        }
                        md.begin_file(&file.relative, file.language)?;
                        md.write_content(Cursor::new(head).chain(reader))?
                    }
                    Err(_e) => {
                        #[cfg(feature = "logging")]
                        tracing::warn!("Cannot read {}: {}", file.relative, _e);
                        md.begin_file(&file.relative, file.language)?;
                        md.write_unreadable()?;
                        ReadOutcome::Failed
                    }
                }
            }
        };
        md.end_file()?;
        Ok(Some(outcome))
    }
}

fn looks_binary(head: &[u8], method: BinaryDetection) -> bool {
    match method {
        BinaryDetection::Simple => head.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(head).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Canonicalizes `root`, failing if it does not exist or is not a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, SnapshotError> {
    let resolved = match fs::canonicalize(root) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let shown = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
            return Err(SnapshotError::RootNotFound(shown));
        }
        Err(e) => return Err(SnapshotError::io(root, e)),
    };
    if !resolved.is_dir() {
        return Err(SnapshotError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// Writes the snapshot document for `options` to `destination`.
///
/// The root is checked and the patterns compiled before `destination` is
/// created, so those failures leave no output behind.
pub fn write_snapshot(
    options: &SnapshotOptions,
    destination: &Path,
) -> Result<SnapshotSummary, SnapshotError> {
    let root = resolve_root(&options.root)?;
    let ignore = options.compile_patterns()?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "Writing snapshot of {} to {}",
        root.display(),
        destination.display()
    );
    let file = File::create(destination).map_err(|e| SnapshotError::io(destination, e))?;
    let mut snapshot = Snapshot::new(&OsFileSystem, &root, &ignore, options);
    if let Some(relative) = fs::canonicalize(destination)
        .ok()
        .and_then(|dest| relative_posix(&root, &dest))
    {
        snapshot = snapshot.excluding(relative);
    }
    let summary = snapshot
        .write_to(io::BufWriter::new(file))
        .map_err(|e| SnapshotError::io(destination, e))?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "Snapshot complete: {} files ({} unreadable)",
        summary.files_written,
        summary.unreadable_files
    );
    Ok(summary)
}

/// The tree lines for `options.root` on the real filesystem.
pub fn snapshot_tree(options: &SnapshotOptions) -> Result<Vec<String>, SnapshotError> {
    let root = resolve_root(&options.root)?;
    let ignore = options.compile_patterns()?;
    Ok(Snapshot::new(&OsFileSystem, &root, &ignore, options).tree_lines())
}

/// The files a snapshot of `options.root` would include, without reading them.
pub fn snapshot_files(options: &SnapshotOptions) -> Result<Vec<SelectedFile>, SnapshotError> {
    let root = resolve_root(&options.root)?;
    let ignore = options.compile_patterns()?;
    Ok(Snapshot::new(&OsFileSystem, &root, &ignore, options).select_files())
}
