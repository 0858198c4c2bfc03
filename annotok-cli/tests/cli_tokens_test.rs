use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

fn annotok_cmd() -> Command {
    Command::cargo_bin("annotok").unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_annotated_tokens() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "decl.cpp", "int x;");

    annotok_cmd()
        .arg("tokens")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("4\tx_i:identifier_p:declaration"))
        .stdout(predicate::str::contains("^\t<SENTENCE_START>"));
}

#[test]
fn test_plain_tokens() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "Decl.java", "class A {}");

    annotok_cmd()
        .args(["tokens", "--plain"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("6\tA\n"))
        .stdout(predicate::str::contains("->{").not());
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "script.py", "x = 1\n");

    annotok_cmd()
        .args(["tokens", "--output", "json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"NEWLINE""#))
        .stdout(predicate::str::contains(r#""position":{"offset":0}"#));
}

#[test]
fn test_failed_file_does_not_stop_others() {
    let dir = TempDir::new().unwrap();
    let broken = write_file(&dir, "broken.java", "class A { int x = ; }");
    let good = write_file(&dir, "good.java", "class B {}");

    annotok_cmd()
        .arg("tokens")
        .arg(&broken)
        .arg(&good)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("broken.java"))
        .stdout(predicate::str::contains("B->{in:identifier,parent:class_declaration}"));
}

#[test]
fn test_unknown_language() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "int x;");

    annotok_cmd()
        .arg("tokens")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--language"));

    annotok_cmd()
        .args(["tokens", "--language", "cpp"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_config_selects_tokenizer() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "annotok.json",
        r#"{"languages": {"cpp": {"base_tokenizer": "cpp-type"}}}"#,
    );
    let file = write_file(&dir, "decl.cc", "int x;");

    annotok_cmd()
        .arg("--config")
        .arg(&config)
        .arg("tokens")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("%IDENTIFIER%_i:identifier_p:declaration"));
}

#[test]
fn test_unknown_tokenizer_in_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "annotok.json",
        r#"{"languages": {"cpp": {"base_tokenizer": "fortran"}}}"#,
    );
    let file = write_file(&dir, "decl.cc", "int x;");

    annotok_cmd()
        .arg("--config")
        .arg(&config)
        .arg("tokens")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tokenizer: fortran"));
}

#[test]
fn test_list_tokenizers() {
    annotok_cmd()
        .arg("tokenizers")
        .assert()
        .success()
        .stdout(predicate::str::contains("cpp-type\tcpp"))
        .stdout(predicate::str::contains("java-whitespace\tjava"))
        .stdout(predicate::str::contains("python\tpython"));
}
