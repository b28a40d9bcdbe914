use assert_cmd::prelude::*;
use assert_fs::TempDir;
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

#[test]
fn search_requires_a_query() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.arg("search");
    cmd.assert().failure();

    Ok(())
}

#[test]
fn last_without_saved_results_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.arg("last").arg("--file").arg(dir.path().join("saved.json"));
    cmd.assert().failure().code(2);

    Ok(())
}

fn write_saved_results(dir: &TempDir) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join("saved.json");
    let saved = serde_json::json!({
        "query": "dune",
        "books": [
            { "title": "Dune", "author": "Frank Herbert", "description": "A novel." },
            { "title": "Dune Messiah", "author": "Frank Herbert", "description": "" }
        ]
    });
    std::fs::write(&path, saved.to_string())?;
    Ok(path)
}

#[test]
fn last_lists_saved_results() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_saved_results(&dir)?;
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.arg("last").arg("-f").arg(&path);
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output)?;

    assert!(stdout.contains("1. Dune\n  by Frank Herbert\n  A novel."), "{stdout}");
    assert!(stdout.contains("2. Dune Messiah"), "{stdout}");

    Ok(())
}

#[test]
fn last_prints_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_saved_results(&dir)?;
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.arg("last").arg("--json").arg("-f").arg(&path);
    let output = cmd.assert().success().get_output().stdout.clone();
    let books: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(2, books.as_array().map_or(0, Vec::len));
    assert_eq!("Dune Messiah", books[1]["title"]);

    Ok(())
}

#[test]
fn interact_and_json_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("booklist")?;

    cmd.args(["last", "--json", "--interact"]);
    cmd.assert().failure();

    Ok(())
}
