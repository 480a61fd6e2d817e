//! E2E tests for the favmark binary

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn favmark(data: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_favmark"))
        .arg("--data")
        .arg(data)
        .args(args)
        .output()
        .expect("failed to run favmark")
}

#[test]
fn help_lists_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_favmark"))
        .arg("--help")
        .output()
        .expect("failed to run favmark");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("toggle"));
    assert!(stdout.contains("tree"));
    assert!(stdout.contains("watch"));
}

#[test]
fn toggle_then_list_round_trip() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");

    let output = favmark(&data, &["toggle", "notes/a.md"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Added"));

    let output = favmark(&data, &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("notes/a.md"));

    let output = favmark(&data, &["toggle", "notes/a.md"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed"));

    let output = favmark(&data, &["list"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No favorites yet"));
}

#[test]
fn toggle_writes_documented_json_layout() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");

    favmark(&data, &["toggle", "a.md"]);

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(doc["icon"], "star");
    assert_eq!(doc["filled"], false);
    assert_eq!(doc["favorites"], serde_json::json!(["a.md"]));
}

#[test]
fn style_rejects_unknown_icon() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");

    let output = favmark(&data, &["style", "--icon", "dragon"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown icon"));
}

#[test]
fn style_set_and_show() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");

    let output = favmark(&data, &["style", "--icon", "heart", "--filled"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("heart (filled)"));

    let output = favmark(&data, &["style"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("icon: heart (filled)"));
}

#[test]
fn tree_marks_favorited_rows() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");
    let vault = dir.path().join("vault");
    std::fs::create_dir_all(vault.join("notes")).unwrap();
    std::fs::write(vault.join("a.md"), "").unwrap();
    std::fs::write(vault.join("notes/b.md"), "").unwrap();

    favmark(&data, &["toggle", "a.md"]);

    let output = favmark(&data, &["tree", vault.to_str().unwrap(), "--depth", "5"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\u{2606} a.md"));
    assert!(stdout.contains("notes/"));
    assert!(stdout.contains("b.md"));
    // Non-favorites carry no marker glyph.
    assert!(!stdout.contains("\u{2606} b.md"));
}

#[test]
fn tree_respects_collapse_depth() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("favorites.json");
    let vault = dir.path().join("vault");
    std::fs::create_dir_all(vault.join("notes/deep")).unwrap();
    std::fs::write(vault.join("notes/deep/b.md"), "").unwrap();

    let output = favmark(&data, &["tree", vault.to_str().unwrap(), "--depth", "1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notes/ (collapsed)"));
    assert!(!stdout.contains("b.md"));
}
