use chrono::{NaiveDate, NaiveDateTime};
use projdoc::{
    Classifier, ConfigFile, Decoding, ExtensionPolicy, FileClass, FileContent, InclusionPolicy,
    PathRulePolicy, ProjdocError, ReportBuilder, TreeEntry, decode_bytes, detect_encoding,
    format_size, render_tree, timestamped_filename,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn entry(path: &str, is_dir: bool) -> TreeEntry {
    TreeEntry {
        path: PathBuf::from(path),
        is_dir,
    }
}

fn frontend_classifier() -> Classifier {
    Classifier::new(&InclusionPolicy::PathRules(PathRulePolicy::frontend())).unwrap()
}

#[test]
fn test_format_size_scales_by_1024() {
    assert_eq!(format_size(0), "0.00 B");
    assert_eq!(format_size(13), "13.00 B");
    assert_eq!(format_size(1023), "1023.00 B");
    assert_eq!(format_size(1024), "1.00 KB");
    assert_eq!(format_size(1536), "1.50 KB");
    assert_eq!(format_size(10 * 1024 * 1024), "10.00 MB");
    assert_eq!(format_size(3 * 1024u64.pow(3)), "3.00 GB");
    assert_eq!(format_size(1024u64.pow(5)), "1.00 PB");
    assert_eq!(format_size(2048 * 1024u64.pow(5)), "2048.00 PB");
}

#[test]
fn test_timestamped_filename() {
    let name = timestamped_filename("out", "PROJECT_STRUCTURE", "md", at(2024, 1, 2, 3, 4, 5));
    assert_eq!(name, Path::new("out").join("PROJECT_STRUCTURE_20240102_030405.md"));
}

#[test]
fn test_extension_policy_classifies_by_extension() {
    let classifier = Classifier::new(&InclusionPolicy::default()).unwrap();
    assert_eq!(classifier.classify(Path::new("a.py")), FileClass::Text);
    assert_eq!(classifier.classify(Path::new("src/App.JSX")), FileClass::Text);
    assert_eq!(classifier.classify(Path::new("notes.prompt")), FileClass::Text);
    assert_eq!(classifier.classify(Path::new("img.png")), FileClass::Binary);
    assert_eq!(classifier.classify(Path::new("Makefile")), FileClass::Binary);
    // A leading dot is a hidden file, not an extension.
    assert_eq!(classifier.classify(Path::new(".md")), FileClass::Binary);
}

#[test]
fn test_text_extensions_accept_missing_dot_and_any_case() {
    let policy = ExtensionPolicy {
        text_extensions: ["RS".to_string(), ".toml".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let classifier = Classifier::new(&InclusionPolicy::Extensions(policy)).unwrap();
    assert_eq!(classifier.classify(Path::new("src/lib.rs")), FileClass::Text);
    assert_eq!(classifier.classify(Path::new("Cargo.toml")), FileClass::Text);
    assert_eq!(classifier.classify(Path::new("main.py")), FileClass::Binary);
}

#[test]
fn test_ignored_dirs_match_by_exact_name() {
    let classifier = Classifier::new(&InclusionPolicy::default()).unwrap();
    assert!(classifier.is_excluded(Path::new("node_modules"), true));
    assert!(classifier.is_excluded(Path::new("pkg/deep/venv"), true));
    assert!(classifier.is_excluded(Path::new(".git"), true));
    assert!(!classifier.is_excluded(Path::new("node_modules"), false));
    assert!(!classifier.is_excluded(Path::new("node_modules_old"), true));
    assert!(!classifier.is_excluded(Path::new("src"), true));
}

#[test]
fn test_exclude_patterns() {
    let policy = ExtensionPolicy {
        exclude_patterns: vec!["*.log".into(), "dist/**".into()],
        ..Default::default()
    };
    let classifier = Classifier::new(&InclusionPolicy::Extensions(policy)).unwrap();
    assert!(classifier.is_excluded(Path::new("logs/app.log"), false));
    assert!(classifier.is_excluded(Path::new("dist/bundle.js"), false));
    assert!(!classifier.is_excluded(Path::new("src/app.js"), false));
}

#[test]
fn test_invalid_glob_is_rejected() {
    let policy = ExtensionPolicy {
        exclude_patterns: vec!["a[".into()],
        ..Default::default()
    };
    let err = Classifier::new(&InclusionPolicy::Extensions(policy)).unwrap_err();
    assert!(matches!(err, ProjdocError::Glob { ref pattern, .. } if pattern == "a["));
}

#[test]
fn test_frontend_content_rules() {
    let classifier = frontend_classifier();
    assert_eq!(classifier.classify(Path::new("src/App.js")), FileClass::Text);
    assert_eq!(
        classifier.classify(Path::new("src/components/Nav.jsx")),
        FileClass::Text
    );
    assert_eq!(classifier.classify(Path::new("package.json")), FileClass::Text);
    assert_eq!(
        classifier.classify(Path::new("public/index.html")),
        FileClass::Text
    );
    assert_eq!(
        classifier.classify(Path::new("README.md")),
        FileClass::StructureOnly
    );
    assert_eq!(
        classifier.classify(Path::new("public/manifest.json")),
        FileClass::StructureOnly
    );
    assert_eq!(
        classifier.classify(Path::new("tools/package.json")),
        FileClass::StructureOnly
    );
    assert_eq!(
        classifier.classify(Path::new("srcmap/a.js")),
        FileClass::StructureOnly
    );
}

#[test]
fn test_frontend_exclusions() {
    let classifier = frontend_classifier();
    assert!(classifier.is_excluded(Path::new("node_modules"), true));
    assert!(classifier.is_excluded(Path::new("src/build"), true));
    assert!(classifier.is_excluded(Path::new("src/logo.svg"), false));
    assert!(classifier.is_excluded(Path::new("src/setupTests.js"), false));
    assert!(classifier.is_excluded(Path::new("server.log"), false));
    assert!(classifier.is_excluded(Path::new(".env"), false));
    assert!(classifier.is_excluded(Path::new("frontend_context.txt"), false));
    assert!(classifier.is_excluded(Path::new("generate_frontend_context.py"), false));
    assert!(!classifier.is_excluded(Path::new("src/App.js"), false));
    assert!(!classifier.is_excluded(Path::new("public"), true));
}

#[test]
fn test_decode_valid_utf8() {
    let content = decode_bytes(Path::new("a.py"), b"x=1".to_vec(), Decoding::Detect);
    assert_eq!(content, FileContent::Text("x=1".into()));
}

#[test]
fn test_decode_strips_null_bytes() {
    let content = decode_bytes(Path::new("a.txt"), b"a\0b\0".to_vec(), Decoding::Detect);
    assert_eq!(content, FileContent::Text("ab".into()));
}

#[test]
fn test_decode_utf16_with_bom() {
    let bytes = vec![0xFF, 0xFE, b'h', 0, b'i', 0];
    let content = decode_bytes(Path::new("w.txt"), bytes, Decoding::Detect);
    assert_eq!(content, FileContent::Text("hi".into()));
}

#[test]
fn test_decode_legacy_encoding_falls_back_to_detection() {
    let bytes = b"caf\xe9 cr\xe8me br\xfbl\xe9e".to_vec();
    match decode_bytes(Path::new("latin1.txt"), bytes, Decoding::Detect) {
        FileContent::Text(text) => assert!(text.starts_with("caf")),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_decode_legacy_encoding_with_null_bytes() {
    let bytes = b"caf\xe9 cr\xe8me\x00 br\xfbl\xe9e\n".to_vec();
    match decode_bytes(Path::new("notes.txt"), bytes, Decoding::Detect) {
        FileContent::Text(text) => {
            assert!(text.starts_with("caf"));
            assert!(!text.contains('\0'));
            assert!(text.ends_with("e\n"));
        }
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_decode_binary_looking_bytes_are_undetectable() {
    let bytes = vec![0x00, 0xC3, 0x28, 0x00];
    let content = decode_bytes(Path::new("odd.txt"), bytes, Decoding::Detect);
    assert_eq!(content, FileContent::Undetectable);
}

#[test]
fn test_decode_lossy_replaces_invalid_sequences() {
    let content = decode_bytes(Path::new("a.js"), b"ok\xff".to_vec(), Decoding::Lossy);
    assert_eq!(content, FileContent::Text("ok\u{FFFD}".into()));
}

#[test]
fn test_detect_encoding_prefers_bom() {
    let guess = detect_encoding(&[0xFE, 0xFF, 0, b'h']).map(|e| e.name());
    assert_eq!(guess, Some("UTF-16BE"));
}

#[test]
fn test_render_tree_connectors() {
    let entries = vec![
        entry("a", true),
        entry("a/b.txt", false),
        entry("a/c", true),
        entry("a/c/d.txt", false),
        entry("e.txt", false),
    ];
    assert_eq!(
        render_tree(&entries),
        "├── a/\n│   ├── b.txt\n│   └── c/\n│       └── d.txt\n└── e.txt\n"
    );
}

#[test]
fn test_render_tree_empty_directory_is_last() {
    let entries = vec![entry("only", true)];
    assert_eq!(render_tree(&entries), "└── only/\n");
    assert_eq!(render_tree(&[]), "");
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projdoc.json");
    fs::write(
        &path,
        r#"{ "ignored_dirs": ["target"], "max_file_size": 2048, "follow_links": true }"#,
    )
    .unwrap();
    let options = ConfigFile::load(&path)
        .unwrap()
        .apply(ReportBuilder::new("."))
        .build();
    assert_eq!(options.file_size_limit, Some(2048));
    assert!(options.follow_links);
    match options.policy {
        InclusionPolicy::Extensions(policy) => {
            assert_eq!(policy.ignored_dirs.len(), 1);
            assert!(policy.ignored_dirs.contains("target"));
            assert!(policy.text_extensions.contains(".py"));
        }
        other => panic!("unexpected policy {:?}", other),
    }
}

#[test]
fn test_config_file_rejects_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projdoc.json");
    fs::write(&path, r#"{ "ignore": ["target"] }"#).unwrap();
    assert!(matches!(
        ConfigFile::load(&path),
        Err(ProjdocError::Config { .. })
    ));
}

#[test]
fn test_builder_switches_to_extension_policy() {
    let options = ReportBuilder::frontend(".").ignored_dirs(["out"]).build();
    match options.policy {
        InclusionPolicy::Extensions(policy) => {
            assert!(policy.ignored_dirs.contains("out"));
        }
        other => panic!("unexpected policy {:?}", other),
    }
}
