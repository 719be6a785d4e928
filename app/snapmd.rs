//! Command-line interface for snapmd.
//!
//! Snapshots a directory tree and its text files into one Markdown document,
//! or prints just the tree or the selected paths.

use clap::{Parser, ValueEnum};
use snapmd::{
    BinaryDetection, DEFAULT_IGNORE_FILE, DEFAULT_MAX_MB, DEFAULT_OUTPUT, SnapshotBuilder,
    SnapshotError, SnapshotOptions, load_ignore_file, resolve_root, snapshot_files, snapshot_tree,
    write_snapshot,
};
use std::path::PathBuf;
use std::process::exit;

/// snapmd — export a codebase snapshot as Markdown
#[derive(Parser)]
#[command(name = "snapmd", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output Markdown file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Ignore list file, relative to the root
    #[arg(short = 'I', long, default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: PathBuf,

    /// Max file size in MiB
    #[arg(long, default_value_t = DEFAULT_MAX_MB)]
    max_mb: u64,

    /// Binary detection strategy applied before a file is dumped
    #[arg(long, default_value = "none", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Reject malformed ignore patterns instead of letting them never match
    #[arg(long)]
    strict_patterns: bool,

    /// Operation mode
    #[arg(long, value_enum, default_value_t = Mode::Normal)]
    mode: Mode,

    /// Print paths-only output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Normal,
    TreeOnly,
    PathsOnly,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "none" => Ok(BinaryDetection::None),
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<(SnapshotOptions, PathBuf, Mode, bool), SnapshotError> {
        let root = resolve_root(&self.root)?;
        let patterns = load_ignore_file(&root.join(&self.ignore_file))?;
        let output = std::path::absolute(&self.output)
            .map_err(|source| SnapshotError::Io {
                path: self.output.clone(),
                source,
            })?;
        let options = SnapshotBuilder::new(root)
            .ignore_patterns(patterns)
            .max_mb(self.max_mb)
            .binary_detection(self.binary_detection)
            .strict_patterns(self.strict_patterns)
            .build();
        Ok((options, output, self.mode, self.json))
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    #[cfg(feature = "logging")]
    init_logging();

    let cli = Cli::parse();
    let (options, output, mode, json) = match cli.into_options() {
        Ok(parts) => parts,
        Err(e) => fail(e),
    };

    match mode {
        Mode::Normal => run_normal(&options, output),
        Mode::TreeOnly => run_tree_only(&options),
        Mode::PathsOnly => run_paths_only(&options, json),
    }
}

fn fail(e: SnapshotError) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}

fn run_normal(options: &SnapshotOptions, output: PathBuf) {
    match write_snapshot(options, &output) {
        Ok(_) => println!("✅ Snapshot written to {}", output.display()),
        Err(e) => fail(e),
    }
}

fn run_tree_only(options: &SnapshotOptions) {
    match snapshot_tree(options) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => fail(e),
    }
}

fn run_paths_only(options: &SnapshotOptions, json: bool) {
    let files = match snapshot_files(options) {
        Ok(files) => files,
        Err(e) => fail(e),
    };
    if json {
        let out = serde_json::to_string_pretty(&files).unwrap_or_else(|e| {
            eprintln!("JSON serialization error: {}", e);
            exit(1);
        });
        println!("{}", out);
    } else {
        for file in &files {
            println!("{}", file.relative);
        }
    }
}
