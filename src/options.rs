use crate::error::SnapshotError;
use crate::patterns::IgnorePatterns;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-file ceiling applied when nothing else is configured, in mebibytes.
pub const DEFAULT_MAX_MB: u64 = 5;
pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const DEFAULT_OUTPUT: &str = "CODEBASE_SNAPSHOT.md";
pub const DEFAULT_IGNORE_FILE: &str = ".snapshotignore";

/// How (and whether) to sniff file content for binary data before streaming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Trust the extension-based classification alone.
    #[default]
    None,
    /// A NUL byte in the first block marks the file as binary.
    Simple,
    /// Use `content_inspector` on the first block.
    Accurate,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotOptions {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
    /// Files whose reported size exceeds this many bytes are left out.
    pub max_file_size: u64,
    pub binary_detection: BinaryDetection,
    /// Reject malformed ignore patterns instead of letting them never match.
    pub strict_patterns: bool,
}
impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_patterns: Vec::new(),
            max_file_size: DEFAULT_MAX_MB * BYTES_PER_MB,
            binary_detection: BinaryDetection::None,
            strict_patterns: false,
        }
    }
}
impl SnapshotOptions {
    /// Compiles the configured patterns according to `strict_patterns`.
    pub fn compile_patterns(&self) -> Result<IgnorePatterns, SnapshotError> {
        if self.strict_patterns {
            IgnorePatterns::strict(self.ignore_patterns.clone())
        } else {
            Ok(IgnorePatterns::new(self.ignore_patterns.clone()))
        }
    }
}
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    options: SnapshotOptions,
}
impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SnapshotOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.options.max_file_size = bytes;
        self
    }
    pub fn max_mb(mut self, mb: u64) -> Self {
        self.options.max_file_size = mb.saturating_mul(BYTES_PER_MB);
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn strict_patterns(mut self, yes: bool) -> Self {
        self.options.strict_patterns = yes;
        self
    }
    pub fn build(self) -> SnapshotOptions {
        self.options
    }
}
