use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskman-{nanos}-{file_name}"))
}

fn run_menu(store_path: &Path, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_taskman");

    let mut child = Command::new(exe)
        .env("TASKMAN_STORE_PATH", store_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn menu session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read menu output")
}

#[test]
fn menu_shows_options_and_exits() {
    let store_path = temp_path("menu-exit.json");
    let output = run_menu(&store_path, "6\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task manager"));
    assert!(stdout.contains("1. View tasks"));
    assert!(stdout.contains("5. Search tasks"));
}

#[test]
fn menu_exits_on_end_of_input() {
    let store_path = temp_path("menu-eof.json");
    let output = run_menu(&store_path, "");

    assert!(output.status.success());
}

#[test]
fn menu_add_then_view() {
    let store_path = temp_path("menu-add.json");
    let input = "2\nBuy milk\nTwo liters\nGroceries\n2026-01-15\nlow\n1\n6\n";
    let output = run_menu(&store_path, input);

    let content = std::fs::read_to_string(&store_path).expect("store file missing");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk (1)"));
    assert!(stdout.contains("Buy milk"));
    assert!(stdout.contains("not completed"));

    let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(saved[0]["title"], "Buy milk");
    assert_eq!(saved[0]["category"], "Groceries");
}

#[test]
fn menu_complete_updates_store() {
    let store_path = temp_path("menu-complete.json");
    let content = serde_json::json!([{
        "id": 1,
        "title": "Finish report",
        "description": "",
        "category": "Work",
        "due_date": "2026-01-31",
        "priority": "high",
        "completed": false
    }]);
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run_menu(&store_path, "3\n1\n6\n");

    let saved = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completed task: Finish report (1)"));

    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["completed"], true);
}

#[test]
fn menu_delete_removes_task() {
    let store_path = temp_path("menu-delete.json");
    let content = serde_json::json!([{
        "id": 1,
        "title": "Old chore",
        "description": "",
        "category": "Home",
        "due_date": "2026-01-31",
        "priority": "low",
        "completed": false
    }]);
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run_menu(&store_path, "4\n1\n6\n");

    let saved = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task: Old chore (1)"));

    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert!(saved.as_array().unwrap().is_empty());
}

#[test]
fn menu_search_filters_by_keyword() {
    let store_path = temp_path("menu-search.json");
    let content = serde_json::json!([
        {
            "id": 1,
            "title": "Search Task 1",
            "description": "Description",
            "category": "Work",
            "due_date": "2026-12-31",
            "priority": "high",
            "completed": false
        },
        {
            "id": 2,
            "title": "Search Task 2",
            "description": "Description",
            "category": "Home",
            "due_date": "2026-12-31",
            "priority": "low",
            "completed": false
        }
    ]);
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run_menu(&store_path, "5\n1\n\n\n6\n");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[1] Search Task 1 - not completed"));
    assert!(!stdout.contains("[2] Search Task 2"));
}

#[test]
fn menu_unknown_id_prints_error_and_continues() {
    let store_path = temp_path("menu-bad-id.json");
    let output = run_menu(&store_path, "3\n42\n6\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}

#[test]
fn menu_non_numeric_id_prints_error_and_continues() {
    let store_path = temp_path("menu-nan-id.json");
    let output = run_menu(&store_path, "4\nabc\n6\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}

#[test]
fn menu_invalid_choice_prints_hint() {
    let store_path = temp_path("menu-bad-choice.json");
    let output = run_menu(&store_path, "9\n6\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid choice, try again."));
}

#[test]
fn menu_duplicate_add_prints_error() {
    let store_path = temp_path("menu-dup.json");
    let input = "2\nDuplicate\n\n\n\n\n2\nDuplicate\n\n\n\n\n6\n";
    let output = run_menu(&store_path, input);

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: duplicate_title"));
}
