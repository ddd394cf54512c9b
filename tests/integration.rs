use dirdigest::{
    DigestBuilder, DigestError, FileRecord, RULE, RecordBody, Reporter, UNREADABLE_REASON,
    WriteOutcome, process_directory, process_directory_with, render_document, run, write_document,
};
use std::cell::RefCell;
use std::fs;
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    warnings: RefCell<Vec<String>>,
}
impl Reporter for Recorder {
    fn info(&self, _message: &str) {}
    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

#[test]
fn integration_text_and_binary_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/c.bin"), vec![0xC3, 0x28, 0xA0, 0xA1]).unwrap();
    let out = tempdir().unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(out.path().join("digest.txt"))
        .build();

    let result = process_directory(&options).unwrap();
    assert_eq!(result.processed_count, 1);
    assert_eq!(result.files.len(), 2);
    assert_eq!(result.files[0].path, "b/c.bin");
    assert_eq!(result.files[0].error_reason(), Some(UNREADABLE_REASON));
    assert_eq!(result.files[1].path, "a.txt");
    assert_eq!(result.files[1].content(), Some("hello"));
    assert_eq!(result.tree.as_deref(), Some("├── b/\n│   └── c.bin\n└── a.txt"));
}

#[test]
fn integration_include_rules_filter_tree_and_content() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("readme.md"), "# hi").unwrap();
    fs::write(dir.path().join("notes.txt"), "notes").unwrap();
    let out = tempdir().unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(out.path().join("out.md"))
        .include_patterns(vec!["*.md".into()])
        .build();

    let result = process_directory(&options).unwrap();
    let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["readme.md"]);
    assert_eq!(result.tree.as_deref(), Some("└── readme.md"));
}

#[test]
fn integration_existing_output_is_not_overwritten() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let output = dir.path().join("out.md");
    fs::write(&output, "keep me").unwrap();
    let options = DigestBuilder::new(dir.path()).output_path(&output).build();

    let err = run(&options).unwrap_err();
    assert!(matches!(err, DigestError::OutputExists { ref path } if *path == output));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn integration_force_overwrites_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let output = dir.path().join("out.md");
    fs::write(&output, "stale").unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(&output)
        .force(true)
        .build();

    let outcome = run(&options).unwrap();
    assert!(matches!(outcome, WriteOutcome::Written { processed_count: 1, .. }));
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("FILE: a.txt"));
    assert!(!written.contains("stale"));
}

#[test]
fn integration_ignored_directory_is_pruned() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/c.txt"), "c").unwrap();
    fs::write(dir.path().join("keep.txt"), "k").unwrap();
    let out = tempdir().unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(out.path().join("digest.txt"))
        .ignore_patterns(vec!["**/b/**".into(), "**/b".into()])
        .build();

    // An unreadable `b` would surface as a warning if the walk opened it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir.path().join("b"), fs::Permissions::from_mode(0o000)).unwrap();
    }
    let recorder = Recorder::default();
    let result = process_directory_with(&options, &recorder);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir.path().join("b"), fs::Permissions::from_mode(0o755)).unwrap();
    }

    let result = result.unwrap();
    let tree = result.tree.unwrap();
    assert_eq!(tree, "└── keep.txt");
    assert!(result.files.iter().all(|f| !f.path.starts_with("b")));
    assert!(recorder.warnings.borrow().is_empty());
}

#[test]
fn integration_text_with_binary_signature_is_kept() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "%PDF-like text is fine\n").unwrap();
    let out = tempdir().unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(out.path().join("digest.txt"))
        .build();

    let result = process_directory(&options).unwrap();
    assert_eq!(result.processed_count, 1);
    assert_eq!(result.files[0].content(), Some("%PDF-like text is fine\n"));
}

#[test]
fn integration_output_never_includes_itself() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/out.md"), "nested namesake").unwrap();
    let output = dir.path().join("out.md");
    let options = DigestBuilder::new(dir.path())
        .output_path(&output)
        .include_patterns(vec!["**/out.md".into(), "out.md".into(), "*.txt".into()])
        .build();

    run(&options).unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(&output)
        .include_patterns(vec!["**/out.md".into(), "out.md".into(), "*.txt".into()])
        .force(true)
        .build();
    let result = process_directory(&options).unwrap();
    let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a.txt"]);
    assert!(!result.tree.unwrap().contains("out.md"));
}

#[test]
fn integration_dry_run_matches_real_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}").unwrap();
    fs::write(dir.path().join("src/blob.dat"), vec![0xFFu8, 0xFE, 0xFD]).unwrap();
    let output = dir.path().join("digest.txt");

    let dry = DigestBuilder::new(dir.path())
        .output_path(&output)
        .dry_run(true)
        .build();
    let summary = match run(&dry).unwrap() {
        WriteOutcome::DryRun(summary) => summary,
        other => panic!("expected dry run, got {:?}", other),
    };
    assert!(!output.exists());
    assert_eq!(summary.destination, output);
    assert_eq!(summary.processed_count, 3);

    let real = DigestBuilder::new(dir.path()).output_path(&output).build();
    let result = process_directory(&real).unwrap();
    let real_paths: Vec<_> = result.files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(summary.paths, real_paths);
    assert_eq!(summary.tree, result.tree);
    let failures = result.files.iter().filter(|f| !f.is_ingested()).count();
    assert_eq!(summary.processed_count, result.processed_count + failures);
}

#[test]
fn integration_dry_run_ignores_existing_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let output = dir.path().join("digest.txt");
    fs::write(&output, "existing").unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(&output)
        .dry_run(true)
        .build();

    assert!(matches!(run(&options).unwrap(), WriteOutcome::DryRun(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "existing");
}

#[test]
fn integration_document_layout() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/c.bin"), vec![0xC3, 0x28]).unwrap();
    let output = dir.path().join("digest.txt");
    let options = DigestBuilder::new(dir.path()).output_path(&output).build();

    run(&options).unwrap();
    let expected = format!(
        "Directory Structure:\n{RULE}\n├── b/\n│   └── c.bin\n└── a.txt\n{RULE}\n\n\
         File Contents:\n\n\
         {RULE}\nFILE: b/c.bin\n{RULE}\n[Content not included: {UNREADABLE_REASON}]\n\n\
         {RULE}\nFILE: a.txt\n{RULE}\nhello"
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert_eq!(RULE.len(), 48);
    assert!(RULE.chars().all(|c| c == '='));
}

#[test]
fn integration_no_tree_omits_structure_section() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let out = tempdir().unwrap();
    let options = DigestBuilder::new(dir.path())
        .output_path(out.path().join("digest.txt"))
        .include_tree(false)
        .build();

    let result = process_directory(&options).unwrap();
    assert!(result.tree.is_none());
    let document = render_document(&result);
    assert!(document.starts_with("File Contents:\n\n"));
    assert!(!document.contains("Directory Structure:"));
}

#[test]
fn integration_empty_directory_still_produces_document() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("digest.txt");
    let options = DigestBuilder::new(dir.path()).output_path(&output).build();

    run(&options).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("Directory Structure:\n{RULE}\n(empty)\n{RULE}\n\nFile Contents:\n\nNo files were included.")
    );
}

#[test]
fn integration_write_creates_parent_directories() {
    let out = tempdir().unwrap();
    let output = out.path().join("nested/dir/digest.txt");
    write_document(&output, "body", false).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "body");

    let err = write_document(&output, "other", false).unwrap_err();
    assert!(matches!(err, DigestError::OutputExists { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "body");
}

#[test]
fn integration_write_failure_leaves_no_temp_file() {
    let out = tempdir().unwrap();
    fs::write(out.path().join("file"), "plain").unwrap();
    let output = out.path().join("file/digest.txt");

    let err = write_document(&output, "body", false).unwrap_err();
    assert!(matches!(err, DigestError::Write { ref path, .. } if *path == output));
    let names: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["file"]);
    assert_eq!(fs::read_to_string(out.path().join("file")).unwrap(), "plain");
}

#[test]
fn integration_failed_replace_discards_temp_file() {
    let out = tempdir().unwrap();
    let target = out.path().join("target");
    fs::create_dir(&target).unwrap();

    let err = write_document(&target, "body", true).unwrap_err();
    assert!(matches!(err, DigestError::Write { .. }));
    let names: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["target"]);
    assert!(target.is_dir());
}

#[test]
fn integration_record_serializes_flat() {
    let record = FileRecord {
        path: "a.txt".into(),
        body: RecordBody::Content("hello".into()),
    };
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"path":"a.txt","content":"hello"}"#
    );
    let record = FileRecord {
        path: "b.bin".into(),
        body: RecordBody::Error("nope".into()),
    };
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"path":"b.bin","error":"nope"}"#
    );
}
