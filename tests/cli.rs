use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const EPSILON_TAIL: &str = "G = ({S, A}, {a}, {S -> aA\nA -> &}, S)\n";

fn grammar_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn regram() -> Command {
    Command::cargo_bin("regram").unwrap()
}

#[test]
fn accepts_embedded_word() {
    let file = grammar_file(&format!("{}a\n", EPSILON_TAIL));
    regram()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("accepted\n"))
        .stdout(predicate::str::contains("└─ A\n   └─ &"));
}

#[test]
fn word_flag_overrides_embedded_word() {
    let file = grammar_file(&format!("{}a\n", EPSILON_TAIL));
    regram()
        .arg(file.path())
        .args(["--word", "aa"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("rejected: "));
}

#[test]
fn reads_word_from_stdin() {
    let file = grammar_file(EPSILON_TAIL);
    regram()
        .arg(file.path())
        .args(["--format", "bracketed"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("S(a A(&))"))
        .stderr(predicate::str::contains("Enter the word to validate"));
}

#[test]
fn rejects_with_lexical_error() {
    let file = grammar_file(EPSILON_TAIL);
    regram()
        .arg(file.path())
        .args(["-w", "b"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("lexical error: 'b' at position 0"));
}

#[test]
fn shows_grammar() {
    let file = grammar_file(EPSILON_TAIL);
    regram()
        .arg(file.path())
        .args(["--show-grammar", "--format", "none", "-w", "a"])
        .assert()
        .success()
        .stdout(predicate::eq("S -> aA\nA -> &\naccepted\n"));
}

#[test]
fn invalid_grammar_exits_with_two() {
    let file = grammar_file("G = ({S}, {a}, {S -> b}, S)\n");
    regram()
        .arg(file.path())
        .args(["-w", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("symbol 'b' is not declared"));
}

#[test]
fn missing_file_exits_with_two() {
    regram()
        .arg("does/not/exist.txt")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn long_word() {
    let file = grammar_file("G = ({S}, {a}, {S -> aS | a}, S)\n");
    regram()
        .arg(file.path())
        .args(["--format", "none", "--word", &"a".repeat(100_000)])
        .assert()
        .success()
        .stdout("accepted\n");
}
