
use harness::MemFs;
use snapmd::{
    IgnorePatterns, Snapshot, SnapshotBuilder, SnapshotError, display_label, is_skipped,
    is_text_eligible, matches, normalize_line, parse_ignore_list, render_tree,
};
use std::path::Path;

fn tree(fs: &MemFs, patterns: &[&str]) -> Vec<String> {
    let ignore = IgnorePatterns::new(patterns.iter().map(|p| p.to_string()).collect());
    render_tree(fs, fs.root(), &ignore)
}

fn document(fs: &MemFs, builder: SnapshotBuilder) -> String {
    let options = builder.build();
    let ignore = options.compile_patterns().unwrap();
    let mut out = Vec::new();
    Snapshot::new(fs, fs.root(), &ignore, &options)
        .write_to(&mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_skip_set_any_depth() {
    assert!(is_skipped(Path::new("a/node_modules/b/c.txt")));
    assert!(is_skipped(Path::new("x/y/z/w/v/u/t/s/r/.git/HEAD")));
    assert!(is_skipped(Path::new(".env")));
    assert!(!is_skipped(Path::new("src/main.rs")));
    assert!(!is_skipped(Path::new("a/Node_Modules/b.txt")));
    assert!(!is_skipped(Path::new("my_node_modules/b.txt")));
}

#[test]
fn test_trailing_slash_pattern() {
    let pattern = normalize_line("build/").unwrap();
    assert_eq!(pattern, "build/**");
    let patterns = vec![pattern];
    assert!(matches("build/out.o", &patterns));
    assert!(matches("build/deep/nested/out.o", &patterns));
    assert!(!matches("build", &patterns));
    assert!(!matches("src/build.rs", &patterns));
}

#[test]
fn test_star_crosses_directories() {
    let patterns = vec!["*.log".to_string()];
    assert!(matches("debug.log", &patterns));
    assert!(matches("logs/2024/debug.log", &patterns));
    assert!(!matches("debug.txt", &patterns));
}

#[test]
fn test_double_star_matches_zero_directories() {
    let any_log = vec!["**/*.log".to_string()];
    assert!(matches("debug.log", &any_log));
    assert!(matches("a/b/debug.log", &any_log));

    let docs = vec!["docs/**/*.md".to_string()];
    assert!(matches("docs/a.md", &docs));
    assert!(matches("docs/x/y/a.md", &docs));
    assert!(!matches("src/a.md", &docs));

    let inner = vec!["a**b".to_string()];
    assert!(matches("a/x/b", &inner));
}

#[test]
fn test_alternation_and_literal_backslash() {
    let alternation = vec!["*.{lock,tmp}".to_string()];
    assert!(matches("Cargo.lock", &alternation));
    assert!(matches("scratch/x.tmp", &alternation));
    assert!(!matches("main.rs", &alternation));

    let backslash = vec![r"dir\name".to_string()];
    assert!(matches(r"dir\name", &backslash));
}

#[test]
fn test_parse_ignore_list() {
    let text = "# comment\n\n  *.tmp  \ndist/\n   \n#another\nsecret.txt\n";
    assert_eq!(
        parse_ignore_list(text),
        vec!["*.tmp", "dist/**", "secret.txt"]
    );
}

#[test]
fn test_malformed_pattern_never_matches() {
    let ignore = IgnorePatterns::new(vec!["[abc".into(), "*.md".into()]);
    assert_eq!(ignore.patterns().to_vec(), vec!["[abc", "*.md"]);
    assert!(ignore.is_match("README.md"));
    assert!(!ignore.is_match("[abc"));
    assert!(!ignore.is_match("a"));
}

#[test]
fn test_malformed_pattern_does_not_disable_the_others() {
    let ignore = IgnorePatterns::new(vec![
        "*.log".into(),
        "[".into(),
        "dist/**".into(),
        "{unclosed".into(),
        "secret.txt".into(),
    ]);
    assert_eq!(ignore.patterns().len(), 5);
    assert!(ignore.is_match("logs/debug.log"));
    assert!(ignore.is_match("dist/app.js"));
    assert!(ignore.is_match("secret.txt"));
    assert!(!ignore.is_match("src/main.rs"));
}

#[test]
fn test_malformed_pattern_rejected_in_strict_mode() {
    let err = IgnorePatterns::strict(vec!["*.md".into(), "[abc".into()]).unwrap_err();
    match err {
        SnapshotError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[abc"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_classifier() {
    assert!(is_text_eligible(Path::new("main.py")));
    assert!(is_text_eligible(Path::new("app.ts")));
    assert!(is_text_eligible(Path::new("data.json")));
    assert!(is_text_eligible(Path::new("notes.txt")));
    assert!(is_text_eligible(Path::new("table.csv")));
    assert!(!is_text_eligible(Path::new("logo.png")));
    assert!(!is_text_eligible(Path::new("archive.zip")));

    assert_eq!(display_label(Path::new("lib.rs")), "rust");
    assert_eq!(display_label(Path::new("MAIN.PY")), "python");
    assert_eq!(display_label(Path::new("config.yml")), "yaml");
    assert_eq!(display_label(Path::new("notes.txt")), "");
}

#[test]
fn test_tree_directories_first_case_insensitive() {
    let mut fs = MemFs::new();
    fs.file("b.txt", "b").dir("A").file("a.txt", "a");
    assert_eq!(tree(&fs, &[]), vec!["├── A", "├── a.txt", "└── b.txt"]);
}

#[test]
fn test_tree_reads_top_to_bottom() {
    let mut fs = MemFs::new();
    fs.file("README.md", "# hi")
        .file("src/main.rs", "fn main() {}")
        .file("src/lib/mod.rs", "")
        .file("docs/guide.md", "");
    assert_eq!(
        tree(&fs, &[]),
        vec![
            "├── docs",
            "    └── guide.md",
            "├── src",
            "    ├── lib",
            "        └── mod.rs",
            "    └── main.rs",
            "└── README.md",
        ]
    );
}

#[test]
fn test_tree_filters_skip_set_and_patterns() {
    let mut fs = MemFs::new();
    fs.file("a/node_modules/b/c.txt", "")
        .file("a/keep.txt", "")
        .file(".git/HEAD", "")
        .file("debug.log", "")
        .file("dist/bundle.js", "");
    let lines = tree(&fs, &["*.log", "dist"]);
    assert_eq!(lines, vec!["└── a", "    └── keep.txt"]);
}

#[test]
fn test_tree_directory_pattern_keeps_bare_directory() {
    let mut fs = MemFs::new();
    fs.file("build/out.txt", "").file("main.rs", "");
    assert_eq!(
        tree(&fs, &["build/**"]),
        vec!["├── build", "└── main.rs"]
    );
}

#[test]
fn test_tree_unlistable_directory() {
    let mut fs = MemFs::new();
    fs.unlistable("locked")
        .file("open/a.txt", "")
        .file("z.txt", "");
    assert_eq!(
        tree(&fs, &[]),
        vec!["├── locked", "├── open", "    └── a.txt", "└── z.txt"]
    );
}

#[test]
fn test_content_order_is_lexicographic() {
    let mut fs = MemFs::new();
    fs.file("z.py", "").file("a.py", "").file("m/n.py", "");
    let options = SnapshotBuilder::new(fs.root()).build();
    let ignore = IgnorePatterns::empty();
    let files = Snapshot::new(&fs, fs.root(), &ignore, &options).select_files();
    let order: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(order, vec!["a.py", "m/n.py", "z.py"]);
    assert!(files.iter().all(|f| f.language == "python"));
}

#[test]
fn test_size_ceiling_is_inclusive() {
    let limit = 1024 * 1024;
    let mut fs = MemFs::new();
    fs.bytes("exact.txt", vec![b'a'; limit])
        .bytes("over.txt", vec![b'a'; limit + 1]);
    let options = SnapshotBuilder::new(fs.root()).max_mb(1).build();
    let ignore = IgnorePatterns::empty();
    let files = Snapshot::new(&fs, fs.root(), &ignore, &options).select_files();
    let names: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(names, vec!["exact.txt"]);
}

#[test]
fn test_content_pass_checks_each_file_independently() {
    // A bare directory pattern hides the directory from the tree but does not
    // match the paths of the files inside it.
    let mut fs = MemFs::new();
    fs.file("build/out.txt", "built").file("main.rs", "");
    let options = SnapshotBuilder::new(fs.root())
        .ignore_patterns(vec!["build".into()])
        .build();
    let ignore = options.compile_patterns().unwrap();
    let snapshot = Snapshot::new(&fs, fs.root(), &ignore, &options);
    assert_eq!(snapshot.tree_lines(), vec!["└── main.rs"]);
    let files: Vec<_> = snapshot
        .select_files()
        .into_iter()
        .map(|f| f.relative)
        .collect();
    assert_eq!(files, vec!["build/out.txt", "main.rs"]);
}

#[test]
fn test_full_document() {
    let mut fs = MemFs::new();
    fs.file("main.rs", "fn main() {}\n")
        .file("src/lib.rs", "pub fn f() {}")
        .bytes("image.png", vec![0x89, b'P', b'N', b'G']);
    let doc = document(&fs, SnapshotBuilder::new(fs.root()));
    let expected = "# Codebase Snapshot\n\
        \n\
        *Root directory:* `/root`\n\
        \n\
        ## Directory structure\n\
        \n\
        ```text\n\
        ├── src\n    └── lib.rs\n├── image.png\n└── main.rs\n\
        ```\n\
        \n\
        ## Files\n\
        \n\
        ### main.rs\n\
        \n\
        ```rust\n\
        fn main() {}\n\
        ```\n\
        \n\
        ### src/lib.rs\n\
        \n\
        ```rust\n\
        pub fn f() {}\n\
        ```\n\
        \n";
    assert_eq!(doc, expected);
}

#[test]
fn test_empty_root() {
    let fs = MemFs::new();
    let doc = document(&fs, SnapshotBuilder::new(fs.root()));
    assert!(doc.contains("```text\n\n```\n\n## Files\n\n"));
    assert!(doc.ends_with("## Files\n\n"));
}

#[test]
fn test_vanished_file_gets_placeholder() {
    let mut fs = MemFs::new();
    fs.vanishing("gone.txt", 10).file("kept.txt", "still here\n");
    let options = SnapshotBuilder::new(fs.root()).build();
    let ignore = IgnorePatterns::empty();
    let mut out = Vec::new();
    let summary = Snapshot::new(&fs, fs.root(), &ignore, &options)
        .write_to(&mut out)
        .unwrap();
    let doc = String::from_utf8(out).unwrap();
    assert!(doc.contains("### gone.txt\n\n```\n<!-- unable to read file -->\n```\n\n"));
    assert!(doc.ends_with("### kept.txt\n\n```\nstill here\n```\n\n"));
    assert_eq!(summary.files_written, 2);
    assert_eq!(summary.unreadable_files, 1);
}

#[test]
fn test_lenient_decoding_and_line_endings() {
    let mut fs = MemFs::new();
    fs.bytes("mixed.txt", b"ok\xff\r\nsecond\nlast".to_vec());
    let doc = document(&fs, SnapshotBuilder::new(fs.root()));
    assert!(doc.contains("```\nok\u{FFFD}\nsecond\nlast\n```\n"));
}

#[test]
fn test_lone_carriage_return_ends_a_line() {
    let mut fs = MemFs::new();
    fs.bytes("old_mac.txt", b"one\rtwo\r\rthree\r\nfour\r".to_vec());
    let doc = document(&fs, SnapshotBuilder::new(fs.root()));
    assert!(doc.contains("```\none\ntwo\n\nthree\nfour\n```\n"));
}

#[test]
fn test_binary_sniffing_omits_file() {
    let mut fs = MemFs::new();
    fs.bytes("blob.txt", b"abc\0def".to_vec())
        .file("plain.txt", "plain\n");
    let lenient = document(&fs, SnapshotBuilder::new(fs.root()));
    assert!(lenient.contains("### blob.txt"));

    let sniffed = document(
        &fs,
        SnapshotBuilder::new(fs.root()).binary_detection(snapmd::BinaryDetection::Simple),
    );
    assert!(!sniffed.contains("### blob.txt"));
    assert!(sniffed.contains("### plain.txt\n\n```\nplain\n```\n"));
}

#[test]
fn test_sniffed_head_is_not_lost() {
    let content = "x".repeat(5000) + "\nend\n";
    let mut fs = MemFs::new();
    fs.file("long.txt", &content);
    let doc = document(
        &fs,
        SnapshotBuilder::new(fs.root()).binary_detection(snapmd::BinaryDetection::Accurate),
    );
    assert!(doc.contains(&format!("```\n{}```\n", content)));
}
