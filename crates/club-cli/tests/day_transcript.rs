//! End-to-end tests: run the built binary over real input files.

use std::process::Command;

use tempfile::TempDir;

fn club_binary() -> String {
    env!("CARGO_BIN_EXE_club").to_string()
}

/// Writes `contents` to a temp file and runs the binary on it.
fn run_on(contents: &str, extra_args: &[&str]) -> std::process::Output {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("day.txt");
    std::fs::write(&input, contents).unwrap();
    Command::new(club_binary())
        .arg(&input)
        .args(extra_args)
        .output()
        .expect("failed to run club")
}

const REFERENCE_INPUT: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

const REFERENCE_TRANSCRIPT: &str = "\
09:00
08:48 1 client1
08:48 13 NotOpenYet
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:52 13 ICanWaitNoLonger!
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:35 13 PlaceIsBusy
11:45 3 client4
12:33 4 client1
12:33 12 client4 1
12:43 4 client2
15:52 4 client4
19:00 11 client3
19:00
1 70 05:58
2 30 02:18
3 90 08:01
";

#[test]
fn reference_log_produces_the_known_transcript() {
    let output = run_on(REFERENCE_INPUT, &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), REFERENCE_TRANSCRIPT);
}

#[test]
fn running_twice_is_byte_identical() {
    let first = run_on(REFERENCE_INPUT, &[]);
    let second = run_on(REFERENCE_INPUT, &[]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn malformed_line_is_echoed_and_nothing_else() {
    let input = "3\n09:00 19:00\n10\n08:48 1 client1\n09:60 1 client2\n";
    let output = run_on(input, &[]);
    // Reference behavior: the offending line, exit code 0, no other output.
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "09:60 1 client2\n");
}

#[test]
fn malformed_header_is_echoed() {
    let output = run_on("three\n09:00 19:00\n10\n", &[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "three\n");
}

#[test]
fn json_report_carries_the_reference_revenue() {
    let output = run_on(REFERENCE_INPUT, &["--json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["opens"], "09:00");
    assert_eq!(value["closes"], "19:00");
    assert_eq!(value["tables"][0]["revenue"], 70);
    assert_eq!(value["tables"][1]["revenue"], 30);
    assert_eq!(value["tables"][2]["revenue"], 90);
    // 14 input events plus the 5 synthesized ones.
    assert_eq!(value["events"].as_array().unwrap().len(), 19);
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = Command::new(club_binary()).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn unreadable_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("no-such-file.txt");
    let output = Command::new(club_binary()).arg(&missing).output().unwrap();
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed to read"),
        "stderr should explain the failure"
    );
}
