//! End-to-end runs of the demo binary

use std::process::Command;

fn demo() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pushqueue-demo"));
    command.args(["--interval-ms", "0", "--no-color", "--log-level", "info"]);
    command
}

#[test]
fn test_demo_succeeds() {
    let output = demo()
        .args(["--pages", "2", "--page-size", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Consumed 6/6 records"),
        "unexpected output: {}",
        stderr
    );
}

#[test]
fn test_demo_source_failure_exits_non_zero() {
    let output = demo()
        .args(["--pages", "3", "--page-size", "2", "--fail-at-page", "2"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FATAL: Draining paginated source"), "{}", stderr);
}

#[test]
fn test_demo_stop_after_cancels_cleanly() {
    let output = demo()
        .args(["--pages", "5", "--page-size", "4", "--stop-after", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cancelled after 3 records"), "{}", stderr);
}

#[test]
fn test_demo_rejects_zero_pages() {
    let output = demo().args(["--pages", "0"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_demo_rejects_failure_page_beyond_last_page() {
    let output = demo()
        .args(["--pages", "2", "--fail-at-page", "3"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: 'fail-at-page' (3) must not exceed 'pages' (2)"),
        "{}",
        stderr
    );
}
