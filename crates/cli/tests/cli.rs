use rust_xlsxwriter::Workbook;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn sheetdeck(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sheetdeck"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn write_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sales").unwrap();
    sheet.write_string(0, 0, "Region").unwrap();
    sheet.write_string(0, 1, "Amount").unwrap();
    sheet.write_string(1, 0, "North").unwrap();
    sheet.write_number(1, 1, 10.5).unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn test_usage_without_arguments() {
    let output = sheetdeck(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Usage:"), "{stdout}");
}

#[test]
fn test_usage_with_one_argument_does_no_work() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.xlsx");
    write_workbook(&input);

    let output = sheetdeck(&[&input]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_converts_workbook() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.xlsx");
    let report = dir.path().join("Sales Summary.html");
    write_workbook(&input);

    let output = sheetdeck(&[&input, &report]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("Report generated:"), "{stdout}");

    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("<title>Sales Summary</title>"));
    assert!(html.contains("<td>North</td><td>10.5</td>"));
}

#[test]
fn test_missing_input_reports_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("nope.xlsx");
    let report = dir.path().join("out.html");

    let output = sheetdeck(&[&input, &report]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("Error:"), "{stdout}");
    assert!(stdout.contains("not found"), "{stdout}");
    assert!(!report.exists());
}
