use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn tasklist(home: &Path) -> TestResult<Command> {
    let mut cmd = Command::cargo_bin("tasklist")?;
    cmd.arg("--data-dir")
        .arg(home.join("data"))
        .arg("--config")
        .arg(home.join("absent.toml"))
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn run_ok(home: &Path, args: &[&str]) -> TestResult<String> {
    let output = tasklist(home)?.args(args).output()?;
    assert!(
        output.status.success(),
        "tasklist {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

fn run_err(home: &Path, args: &[&str]) -> TestResult<String> {
    let output = tasklist(home)?.args(args).output()?;
    assert!(!output.status.success(), "tasklist {args:?} should fail");
    Ok(String::from_utf8(output.stderr)?)
}

fn stored(home: &Path) -> TestResult<String> {
    Ok(fs::read_to_string(home.join("data").join("myList.json"))?)
}

#[test]
fn add_and_list_tasks() -> TestResult {
    let home = tempdir()?;

    assert_eq!(run_ok(home.path(), &["add", "buy", "milk"])?, "Added task 1: buy milk\n");
    run_ok(home.path(), &["add", "walk the dog"])?;
    run_ok(home.path(), &["toggle", "1"])?;

    let listing = run_ok(home.path(), &["ls"])?;
    assert_eq!(
        listing,
        "# | Done | Task\n- | ---- | ----\n1 | [x]  | buy milk\n2 | [ ]  | walk the dog\n\n2 task(s), 1 completed\n"
    );
    Ok(())
}

#[test]
fn list_survives_between_invocations_as_json() -> TestResult {
    let home = tempdir()?;
    run_ok(home.path(), &["add", "buy milk"])?;
    run_ok(home.path(), &["toggle", "1"])?;

    assert_eq!(stored(home.path())?, r#"[{"text":"buy milk","completed":true}]"#);
    Ok(())
}

#[test]
fn blank_add_writes_nothing() -> TestResult {
    let home = tempdir()?;
    let out = run_ok(home.path(), &["add", "   "])?;

    assert!(out.contains("Nothing to add"));
    assert!(!home.path().join("data").join("myList.json").exists());
    Ok(())
}

#[test]
fn edit_keeps_completion_state() -> TestResult {
    let home = tempdir()?;
    run_ok(home.path(), &["add", "buy milk"])?;
    run_ok(home.path(), &["toggle", "1"])?;

    let out = run_ok(home.path(), &["edit", "1", "buy", "eggs"])?;

    assert_eq!(out, "Updated task 1: buy eggs\n");
    assert_eq!(stored(home.path())?, r#"[{"text":"buy eggs","completed":true}]"#);
    Ok(())
}

#[test]
fn rm_removes_by_number() -> TestResult {
    let home = tempdir()?;
    for text in ["a", "b", "c"] {
        run_ok(home.path(), &["add", text])?;
    }

    assert_eq!(run_ok(home.path(), &["rm", "2"])?, "Deleted task 2: b\n");

    let json = run_ok(home.path(), &["ls", "--format", "json"])?;
    let listed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(
        listed,
        serde_json::json!([
            {"index": 1, "text": "a", "completed": false},
            {"index": 2, "text": "c", "completed": false}
        ])
    );
    Ok(())
}

#[test]
fn out_of_range_numbers_are_rejected() -> TestResult {
    let home = tempdir()?;
    run_ok(home.path(), &["add", "only"])?;

    assert!(run_err(home.path(), &["rm", "0"])?.contains("Task numbers start at 1"));
    assert!(run_err(home.path(), &["toggle", "2"])?.contains("No task number 2"));
    assert_eq!(stored(home.path())?, r#"[{"text":"only","completed":false}]"#);
    Ok(())
}

#[test]
fn ls_filters_by_state() -> TestResult {
    let home = tempdir()?;
    run_ok(home.path(), &["add", "done"])?;
    run_ok(home.path(), &["add", "open"])?;
    run_ok(home.path(), &["toggle", "1"])?;

    let pending = run_ok(home.path(), &["ls", "--pending"])?;
    assert!(pending.contains("2 | [ ]  | open"));
    assert!(!pending.contains("| done"));

    let completed = run_ok(home.path(), &["ls", "--completed"])?;
    assert!(completed.contains("1 | [x]  | done"));
    assert!(!completed.contains("| open"));
    Ok(())
}

#[test]
fn clear_asks_before_deleting() -> TestResult {
    let home = tempdir()?;
    run_ok(home.path(), &["add", "a"])?;
    run_ok(home.path(), &["add", "b"])?;

    let output = tasklist(home.path())?.arg("clear").write_stdin("n\n").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("Aborted."));
    assert_eq!(run_ok(home.path(), &["ls", "--format", "json"])?.matches("\"index\"").count(), 2);

    assert_eq!(run_ok(home.path(), &["clear", "--yes"])?, "Deleted 2 task(s)\n");
    assert_eq!(stored(home.path())?, "[]");
    assert_eq!(run_ok(home.path(), &["ls"])?, "No tasks found\n");
    Ok(())
}

#[test]
fn corrupt_store_starts_empty() -> TestResult {
    let home = tempdir()?;
    let data = home.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("myList.json"), "{not json")?;

    assert_eq!(run_ok(home.path(), &["ls"])?, "No tasks found\n");
    Ok(())
}

#[test]
fn clear_rewrites_corrupt_store() -> TestResult {
    let home = tempdir()?;
    let data = home.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("myList.json"), "{not json")?;

    assert_eq!(run_ok(home.path(), &["clear", "--yes"])?, "No tasks to delete\n");
    assert_eq!(stored(home.path())?, "[]");
    Ok(())
}

#[test]
fn config_init_writes_defaults() -> TestResult {
    let home = tempdir()?;
    let path = home.path().join("conf").join("config.toml");
    let path_arg = path.to_string_lossy().into_owned();

    let out = run_ok(home.path(), &["config", "init", "--output", &path_arg])?;

    assert!(out.contains("Wrote configuration file"));
    let written = fs::read_to_string(&path)?;
    assert!(written.contains("[tui.keybindings.task_list]"));
    Ok(())
}

#[test]
fn data_dir_can_come_from_config_file() -> TestResult {
    let home = tempdir()?;
    let data = home.path().join("from-config");
    let config = home.path().join("config.toml");
    fs::write(
        &config,
        format!("[storage]\ndata_dir = {:?}\n", data.to_string_lossy()),
    )?;

    let mut cmd = Command::cargo_bin("tasklist")?;
    let output = cmd
        .arg("--config")
        .arg(&config)
        .args(["add", "from config"])
        .env_remove("RUST_LOG")
        .output()?;

    assert!(output.status.success());
    assert!(data.join("myList.json").exists());
    Ok(())
}
