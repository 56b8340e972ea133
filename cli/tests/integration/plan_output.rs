//! Plan and structured output contract tests for chunkcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, sample_bytes};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_plan_json_contract_and_no_mutation() {
    let fx = TestFixture::new();
    let src = fx.write_source("ten.bin", b"0123456789");
    let dst = fx.path("dst.bin");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    let output = cmd
        .arg("--plan")
        .arg("--output")
        .arg("json")
        .arg("-j")
        .arg("4")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "plan");
    assert_eq!(payload["file_size"], 10);
    assert_eq!(payload["workers"], 4);
    assert_eq!(payload["source"], src.display().to_string());

    let ranges = payload["ranges"].as_array().unwrap();
    let lengths: Vec<u64> = ranges
        .iter()
        .map(|r| r["length"].as_u64().unwrap())
        .collect();
    let offsets: Vec<u64> = ranges
        .iter()
        .map(|r| r["offset"].as_u64().unwrap())
        .collect();
    assert_eq!(lengths, [3, 3, 3, 1]);
    assert_eq!(offsets, [0, 3, 6, 9]);

    assert!(!dst.exists(), "plan mode must not mutate filesystem");
}

#[test]
fn test_plan_human_output() {
    let fx = TestFixture::new();
    let src = fx.write_source("three.bin", b"abc");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("-n")
        .arg("-j")
        .arg("5")
        .arg(&src)
        .arg(fx.path("dst.bin"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan (5 ranges, 3 bytes):"))
        .stdout(predicate::str::contains("Thread 2: 1 bytes from offset 2"))
        .stdout(predicate::str::contains("Thread 4: 0 bytes from offset 3"));
}

#[test]
fn test_plan_jsonl_config_first() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.bin", &sample_bytes(20));

    let mut cmd = cargo_bin_cmd!("chunkcp");
    let stdout = cmd
        .arg("--plan")
        .arg("--output")
        .arg("jsonl")
        .arg("-j")
        .arg("2")
        .arg(&src)
        .arg(fx.path("dst.bin"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["record_type"], "copy_config");
    assert_eq!(first["mode"], "plan");
    assert_eq!(first["workers"], 2);

    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["record_type"], "plan_range");
    assert_eq!(second["index"], 0);
    assert_eq!(second["length"], 10);
}

#[test]
fn test_plan_rejects_zero_jobs() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.bin", b"data");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("--plan")
        .arg("-j")
        .arg("0")
        .arg(&src)
        .arg(fx.path("dst.bin"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_configuration]"));
}

#[test]
fn test_plan_zero_jobs_checked_before_source() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("--plan")
        .arg("-j")
        .arg("0")
        .arg(fx.path("missing.bin"))
        .arg(fx.path("dst.bin"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_configuration]"));
}

#[test]
fn test_plan_rejects_directory_source() {
    let fx = TestFixture::new();
    let src = fx.path("subdir");
    std::fs::create_dir(&src).unwrap();

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("--plan")
        .arg(&src)
        .arg(fx.path("dst.bin"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a regular file"));
}

#[test]
fn test_execute_json_contract() {
    let fx = TestFixture::new();
    let content = sample_bytes(10);
    let src = fx.write_source("exec.bin", &content);
    let dst = fx.path("exec-copy.bin");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    let output = cmd
        .arg("--output")
        .arg("json")
        .arg("-j")
        .arg("3")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "execute");
    assert_eq!(payload["file_size"], 10);
    assert_eq!(payload["bytes_copied"], 10);
    assert_eq!(payload["complete"], true);
    assert!(payload["elapsed_seconds"].as_f64().unwrap() >= 0.0);

    let ranges = payload["ranges"].as_array().unwrap();
    assert_eq!(ranges.len(), 3);
    let copied: Vec<u64> = ranges
        .iter()
        .map(|r| r["bytes_copied"].as_u64().unwrap())
        .collect();
    assert_eq!(copied, [4, 4, 2]);
    assert!(ranges.iter().all(|r| r["status"] == "copied"));

    fx.assert_file_bytes(&dst, &content);
}

#[test]
fn test_execute_jsonl_records() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.bin", b"");
    let dst = fx.path("dst.bin");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    let stdout = cmd
        .arg("--output")
        .arg("jsonl")
        .arg("-j")
        .arg("4")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(stdout).unwrap();
    let records: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["record_type"], "copy_config");
    assert_eq!(records[0]["mode"], "execute");
    for record in &records[1..5] {
        assert_eq!(record["record_type"], "range");
        assert_eq!(record["bytes_copied"], 0);
        assert_eq!(record["status"], "empty");
    }
    assert_eq!(records[5]["record_type"], "summary");
    assert_eq!(records[5]["complete"], true);
    assert!(dst.exists());
}
