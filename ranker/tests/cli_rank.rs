use std::fs;
use std::process::Command;
use tempfile::tempdir;

const FEATURES: &str = "\
query: rust book
url: https://crates.io/
title: crates
body_hits: rust 1 2 3 4
body_length: 100
url: https://doc.rust-lang.org/book/
title: the rust book
header: rust book
body_hits: rust 7
body_length: 100
";

fn write_inputs(dir: &std::path::Path) {
    fs::write(dir.join("features.txt"), FEATURES).unwrap();
    fs::write(dir.join("df.tsv"), "rust 10\nbook 100\n").unwrap();
}

fn run(dir: &std::path::Path, extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ranker"))
        .current_dir(dir)
        .args(["rank", "--features", "features.txt", "--doc-freq", "df.tsv"])
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn writes_ranked_file() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    let out = run(dir.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let ranked = fs::read_to_string(dir.path().join("ranked.txt")).unwrap();
    assert_eq!(
        ranked,
        "query: rust book\n  url: https://doc.rust-lang.org/book/\n  url: https://crates.io/\n"
    );
}

#[test]
fn baseline_to_stdout() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    let out = run(dir.path(), &["--scorer", "baseline", "--output", "-"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "query: rust book\n  url: https://crates.io/\n  url: https://doc.rust-lang.org/book/\n");
}

#[test]
fn unknown_term_fails() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("df.tsv"), "rust 10\n").unwrap();
    let out = run(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("book"));
}
