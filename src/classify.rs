//! Decides which files are text worth dumping, and which fence label they get.
//!
//! A file qualifies if its guessed media type is `text/*` or its extension is
//! in the label table below. Labels are cosmetic: an eligible file with no
//! known label still gets a fenced block, just an unlabeled one.

use mime_guess::mime;
use std::path::Path;

/// Fence label for a lowercased extension, without the leading dot.
pub fn language_from_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "sol" => "solidity",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "cs" => "csharp",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "html" | "htm" => "html",
        "css" => "css",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        "md" | "markdown" => "markdown",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "scala" => "scala",
        "dart" => "dart",
        _ => return None,
    };
    Some(lang)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// The label for `path`, or `""` when the extension is unknown.
pub fn display_label(path: &Path) -> &'static str {
    extension(path)
        .as_deref()
        .and_then(language_from_extension)
        .unwrap_or("")
}

/// Best-effort media-type check from the bundled extension database.
pub fn has_text_media_type(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|m| m.type_() == mime::TEXT)
}

pub fn is_text_eligible(path: &Path) -> bool {
    has_text_media_type(path)
        || extension(path)
            .as_deref()
            .and_then(language_from_extension)
            .is_some()
}
