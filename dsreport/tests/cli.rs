use clap::Parser;
use dsreport::{expand_inputs, run, Cli, Format};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn must_parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap_or_else(|e| panic!("expected parse to succeed, got:\n{}", e))
}

fn write_program(dir: &TempDir, name: &str, source: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path.display().to_string()
}

fn run_to_file(dir: &TempDir, args: &[&str]) -> (bool, String) {
    let output = dir.path().join("report.out");
    let output = output.display().to_string();

    let mut full = vec!["dsreport", "--output", output.as_str()];
    full.extend_from_slice(args);

    let ok = run(&must_parse(&full)).unwrap();
    (ok, fs::read_to_string(Path::new(&output)).unwrap())
}

#[test]
fn parse_arguments() {
    let cli = must_parse(&[
        "dsreport", "a.txt", "b.txt", "-o", "out.txt", "--format", "json", "-vv",
    ]);

    assert_eq!(cli.inputs, &["a.txt", "b.txt"]);
    assert_eq!(cli.output.as_deref(), Some(Path::new("out.txt")));
    assert_eq!(cli.format, Format::Json);
    assert_eq!(cli.verbose, 2);

    let cli = must_parse(&["dsreport", "a.txt"]);
    assert_eq!(cli.format, Format::Text);
    assert_eq!(cli.output, None);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn input_is_required() {
    assert!(Cli::try_parse_from(&["dsreport"]).is_err());
    assert!(Cli::try_parse_from(&["dsreport", "a.txt", "--format", "xml"]).is_err());
}

#[test]
fn single_file_text() {
    let dir = TempDir::new().unwrap();
    let input = write_program(&dir, "prog.txt", "a = 1\na = 2\nb = a\n");

    let (ok, report) = run_to_file(&dir, &[input.as_str()]);

    assert!(ok);
    assert_eq!(report, "a = 1\nb = a\n");
}

#[test]
fn clean_program_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_program(&dir, "prog.txt", "x = 1 while ( x < 10 ) x = x + 1 end");

    let (ok, report) = run_to_file(&dir, &[input.as_str()]);

    assert!(ok);
    assert_eq!(report, "");
}

#[test]
fn glob_prefixes_paths() {
    let dir = TempDir::new().unwrap();
    let first = write_program(&dir, "p1.txt", "x = 1");
    let second = write_program(&dir, "p2.txt", "y = 2 z = y");
    let pattern = dir.path().join("p*.txt").display().to_string();

    assert_eq!(
        expand_inputs(&[pattern.clone()]).unwrap(),
        vec![dir.path().join("p1.txt"), dir.path().join("p2.txt")]
    );

    let (ok, report) = run_to_file(&dir, &[pattern.as_str()]);

    assert!(ok);
    assert_eq!(report, format!("{}: x = 1\n{}: z = y\n", first, second));
}

#[test]
fn json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_program(&dir, "prog.txt", "a = 1\n\na = 2 if a end");

    let (ok, report) = run_to_file(&dir, &["--format", "json", input.as_str()]);
    assert!(ok);

    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    let stores = &value[0]["dead_stores"];

    assert_eq!(value[0]["path"], input.as_str());
    assert_eq!(stores.as_array().map(Vec::len), Some(1));
    assert_eq!(stores[0]["representation"], "a = 1");
    assert_eq!(stores[0]["var"], "a");
    assert_eq!(stores[0]["line"], 1);
}

#[test]
fn failures_do_not_hide_other_files() {
    let dir = TempDir::new().unwrap();
    let bad = write_program(&dir, "bad.txt", "a 10");
    let good = write_program(&dir, "good.txt", "c = 3");
    let missing = dir.path().join("missing.txt").display().to_string();

    let (ok, report) = run_to_file(&dir, &[bad.as_str(), good.as_str(), missing.as_str()]);

    assert!(!ok);
    assert_eq!(report, format!("{}: c = 3\n", good));
}
