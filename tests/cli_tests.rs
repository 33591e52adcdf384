use serial_test::serial;
use std::fs;
use std::process::Command;

const TEST_STORAGE: &str = "test_storage_cli.log";

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("failed to execute process")
}

#[test]
#[serial]
fn put_then_get_round_trips_through_the_binary() {
    cleanup();

    let output = run(&[TEST_STORAGE, "put", "greeting", "hello"]);
    assert!(output.status.success(), "put failed: {output:?}");

    let output = run(&[TEST_STORAGE, "get", "greeting"]);
    assert!(output.status.success(), "get failed: {output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");

    cleanup();
}

#[test]
#[serial]
fn get_of_a_missing_key_exits_non_zero() {
    cleanup();
    run(&[TEST_STORAGE, "put", "k", "v"]);

    let output = run(&[TEST_STORAGE, "get", "does-not-exist"]);
    assert!(!output.status.success());

    cleanup();
}

#[test]
#[serial]
fn delete_then_get_reports_absence() {
    cleanup();
    run(&[TEST_STORAGE, "put", "k", "v"]);
    let deleted = run(&[TEST_STORAGE, "delete", "k"]);
    assert!(deleted.status.success());

    let output = run(&[TEST_STORAGE, "get", "k"]);
    assert!(!output.status.success());

    cleanup();
}

fn cleanup() {
    fs::remove_file(TEST_STORAGE).ok();
    for entry in fs::read_dir(".").unwrap().flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(TEST_STORAGE) && name.contains(".shard") {
            fs::remove_file(entry.path()).ok();
        }
    }
}
