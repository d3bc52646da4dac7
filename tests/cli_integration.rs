use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SHEET: &str = "粵語,한국어,例句\n搜,search,검색\n樹,tree,나무\n海,sea,바다\n";

fn sheet() -> Result<(TempDir, String), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.csv");
    fs::write(&path, SHEET)?;
    let location = path.to_string_lossy().into_owned();
    Ok((dir, location))
}

fn yuetko() -> Command {
    Command::cargo_bin("yuetko").expect("binary is built")
}

#[test]
fn search_prints_matching_rows() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, source) = sheet()?;

    yuetko()
        .args(["--source", &source, "search", "나무"])
        .assert()
        .success()
        .stdout(predicate::str::contains("樹"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("search").not());

    Ok(())
}

#[test]
fn search_skips_title_row_unless_asked() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, source) = sheet()?;

    yuetko()
        .args(["--source", &source, "search", "粵語"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found"));

    yuetko()
        .args(["--source", &source, "--no-header", "search", "粵語"])
        .assert()
        .success()
        .stdout(predicate::str::contains("한국어"));

    Ok(())
}

#[test]
fn search_json_caps_rows() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, source) = sheet()?;

    let output = yuetko()
        .args(["--source", &source, "search", "e", "--limit", "1", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["total"], 3);
    assert_eq!(value["shown"], 1);
    assert_eq!(value["rows"][0][0], "搜");

    Ok(())
}

#[test]
fn interactive_reads_lines_until_eof() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, source) = sheet()?;

    yuetko()
        .args(["--source", &source, "interactive"])
        .write_stdin("s\nse\nsea\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("海"))
        .stdout(predicate::str::contains("樹").not());

    Ok(())
}

#[test]
fn today_picks_a_row() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, source) = sheet()?;

    yuetko()
        .args(["--source", &source, "today", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Word of the day"));

    Ok(())
}

#[test]
fn missing_source_fails() {
    yuetko()
        .args(["--source", "/nonexistent/words.csv", "search", "搜"])
        .assert()
        .failure();
}

#[test]
fn completions_generate() {
    yuetko()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yuetko"));
}
