use std::fs;
use std::path::Path;

use assert_cmd::Command;
use calamine::{open_workbook_auto, Data, Reader};
use predicates::prelude::*;

fn csv2excel() -> Command {
    Command::cargo_bin("csv2excel").unwrap()
}

fn sheet_rows(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn as_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

#[test]
fn converts_single_file_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("people.csv");
    fs::write(&input, "name,age\nada,36\ngrace,45\n").unwrap();

    csv2excel()
        .arg("--input")
        .arg(&input)
        .arg("--convert")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully converted 2 records with 2 columns to",
        ));

    let rows = sheet_rows(&dir.path().join("people.xlsx"), "Sheet1");
    assert_eq!(rows[0], vec![Data::String("name".into()), Data::String("age".into())]);
    assert_eq!(rows[1][0], Data::String("ada".into()));
    assert_eq!(as_number(&rows[1][1]), Some(36.0));
    assert_eq!(as_number(&rows[2][1]), Some(45.0));
}

#[test]
fn without_convert_numbers_stay_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "a;b\n1;2\n").unwrap();

    csv2excel()
        .args(["-d", ";", "-n", "plain", "-i"])
        .arg(&input)
        .assert()
        .success();

    let rows = sheet_rows(&dir.path().join("plain.xlsx"), "Sheet1");
    assert_eq!(rows[1], vec![Data::String("1".into()), Data::String("2".into())]);
}

#[test]
fn merges_files_in_argument_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("z_first.csv");
    let second = dir.path().join("a_second.csv");
    fs::write(&first, "h1,h2\n1,2\n").unwrap();
    fs::write(&second, "h1,h2\n3,4\n").unwrap();
    let output = dir.path().join("merged.xlsx");

    csv2excel()
        .arg("--files")
        .arg(format!("{}, {}", first.display(), second.display()))
        .arg("--output")
        .arg(&output)
        .arg("--convert")
        .args(["--sheet", "Data", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\": 2"));

    let rows = sheet_rows(&output, "Data");
    let numbers: Vec<Vec<Option<f64>>> = rows[1..]
        .iter()
        .map(|r| r.iter().map(as_number).collect())
        .collect();
    assert_eq!(
        numbers,
        vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]]
    );
}

#[test]
fn merges_folder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("1.csv"), "x\na\n").unwrap();
    fs::write(dir.path().join("2.csv"), "x\nb\n").unwrap();

    csv2excel()
        .arg("--folder")
        .arg(dir.path())
        .args(["--name", "combined"])
        .assert()
        .success();

    let rows = sheet_rows(&dir.path().join("combined.xlsx"), "Sheet1");
    assert_eq!(
        rows,
        vec![
            vec![Data::String("x".into())],
            vec![Data::String("a".into())],
            vec![Data::String("b".into())],
        ]
    );
}

#[test]
fn rejects_non_csv_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "a\n1\n").unwrap();

    csv2excel()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input file format"));
}

#[test]
fn rejects_empty_delimiter() {
    csv2excel()
        .args(["-i", "whatever.csv", "-d", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter cannot be empty"));
}

#[test]
fn reports_every_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.csv");
    fs::write(&good, "a\n1\n").unwrap();
    let missing = dir.path().join("missing.csv");

    csv2excel()
        .arg("--files")
        .arg(format!("{},{}", good.display(), missing.display()))
        .arg("-o")
        .arg(dir.path().join("out.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("encountered errors while reading files"))
        .stderr(predicate::str::contains("missing.csv"));

    assert!(!dir.path().join("out.xlsx").exists());
}

#[test]
fn merge_requires_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    fs::write(&a, "a\n1\n").unwrap();

    csv2excel()
        .arg("-f")
        .arg(&a)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output or --name is required"));
}

#[test]
fn missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "a\n1\n").unwrap();

    csv2excel()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("nope").join("out.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid output path"));
}

#[test]
fn input_modes_are_exclusive() {
    csv2excel()
        .args(["-i", "a.csv", "-F", "dir"])
        .assert()
        .failure();
}
