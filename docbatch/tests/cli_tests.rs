//! Integration tests for the docbatch binary
//!
//! Each test builds a document tree in a temporary directory and runs the
//! compiled binary against it.

use std::{
    fs,
    path::Path,
    process::{
        Command,
        Output,
    },
};

use tempfile::TempDir;

fn docbatch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docbatch"))
        .args(args)
        .env_remove("DOCBATCH_ROOT")
        .output()
        .expect("failed to run docbatch")
}

fn tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for relative in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }
    dir
}

fn root_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

fn script(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("convert_to_md.bat")).unwrap()
}

#[test]
fn test_two_documents_example() {
    let dir = tree(&["a.docx", "sub/b.docx", "sub/notes.txt"]);

    let output = docbatch(&[root_arg(&dir), "--line-ending", "lf", "--no-color"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let nested = Path::new("sub").join("b.docx");
    let nested_out = Path::new("sub").join("b.md");
    let expected = format!(
        "@echo off\n\
echo Converting .docx files to .md using Pandoc...\n\
\n\
pandoc \"a.docx\" -f docx -t markdown-simple_tables --wrap=none -o \"a.md\"\n\
pandoc \"{}\" -f docx -t markdown-simple_tables --wrap=none -o \"{}\"\n\
\n\
echo Done.\n",
        nested.display(),
        nested_out.display()
    );
    assert_eq!(script(&dir), expected);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("with 2 conversion commands"));
}

#[test]
fn test_empty_tree_has_header_and_footer_only() {
    let dir = tree(&["readme.txt"]);

    let output = docbatch(&[root_arg(&dir), "--line-ending", "lf"]);
    assert!(output.status.success());
    assert_eq!(
        script(&dir),
        "@echo off\necho Converting .docx files to .md using Pandoc...\n\n\necho Done.\n"
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("No .docx files found"));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = tree(&["z.docx", "m/n/o/p.docx", "a.docx", "m/b.docx"]);

    assert!(docbatch(&[root_arg(&dir)]).status.success());
    let first = fs::read(dir.path().join("convert_to_md.bat")).unwrap();
    assert!(docbatch(&[root_arg(&dir)]).status.success());
    let second = fs::read(dir.path().join("convert_to_md.bat")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_dry_run_prints_script_without_writing() {
    let dir = tree(&["a.docx"]);

    let output = docbatch(&[root_arg(&dir), "--dry-run", "--line-ending", "lf"]);
    assert!(output.status.success());
    assert!(!dir.path().join("convert_to_md.bat").exists());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("@echo off\n"));
    assert!(stdout.contains(r#"pandoc "a.docx" -f docx"#));
    assert!(stdout.ends_with("echo Done.\n"));
}

#[test]
fn test_json_report() {
    let dir = tree(&["one.docx", "deep/er/two.docx", "skip.pdf"]);

    let output = docbatch(&[root_arg(&dir), "--output", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["candidates"], 2);
    assert_eq!(report["dry_run"], false);
    assert_eq!(report["commands"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_and_flag_precedence() {
    let dir = tree(&["a.odt", "b.docx"]);
    fs::write(
        dir.path().join("docbatch.toml"),
        "source_extension = \"odt\"\noutput_extension = \"txt\"\n\n[converter]\nfrom = \"odt\"\n",
    )
    .unwrap();

    let output = docbatch(&[root_arg(&dir), "--output-ext", "rst", "--line-ending", "lf"]);
    assert!(output.status.success());

    let content = script(&dir);
    assert!(content.contains("echo Converting .odt files to .rst using Pandoc..."));
    assert!(content.contains(r#"pandoc "a.odt" -f odt -t markdown-simple_tables --wrap=none -o "a.rst""#));
    assert!(!content.contains("b.docx"));
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let output = docbatch(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist"));
}

#[test]
fn test_json_error_document() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone");

    let output = docbatch(&[missing.to_str().unwrap(), "--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["success"], false);
}

#[test]
fn test_root_from_environment() {
    let dir = tree(&["env.docx"]);

    let output = Command::new(env!("CARGO_BIN_EXE_docbatch"))
        .env("DOCBATCH_ROOT", dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(script(&dir).contains("env.docx"));
}
