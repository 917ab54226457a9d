//! Integration tests for eqalert-convert
//!
//! Tests cover:
//! - Reading bulletin files, with unreadable files skipped
//! - Report numbering through the configured cache folder
//! - JSON output written to a file and through the binary

use std::path::PathBuf;
use std::process::Command;

use clap::Parser;
use eqalert_common::config::TomlConfig;
use eqalert_convert::{convert, read_documents, write_records, Args};
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_report(dir: &TempDir, name: &str, event_id: &str) -> PathBuf {
    let path = dir.path().join(name);
    let doc = json!({
        "Report": {"Head": {
            "Title": "震度速報",
            "EventID": event_id,
            "Headline": {
                "Text": "強い揺れを感じました。",
                "Information": {"Item": {
                    "Kind": {"Name": "震度５弱"},
                    "Areas": {"Area": {"Name": "宮城県北部"}}
                }}
            }
        }}
    });
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

fn write_cancelled_information(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let doc = json!({
        "Report": {"Head": {
            "Title": "震源・震度情報",
            "InfoType": "取消",
            "Headline": {"Text": "取り消します。"}
        }}
    });
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

#[test]
fn test_read_documents_marks_unreadable_files() {
    let temp_dir = TempDir::new().unwrap();
    let present = write_cancelled_information(&temp_dir, "a.json");
    let absent = temp_dir.path().join("missing.json");

    let documents = read_documents(&[present, absent]);
    assert_eq!(documents.len(), 2);
    assert!(documents[0].body.is_some());
    assert!(documents[1].body.is_none());
}

#[test]
fn test_report_files_numbered_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_report(&temp_dir, "1.json", "EV1");
    let second = write_report(&temp_dir, "2.json", "EV1");
    let cache_dir = temp_dir.path().join("cache");

    let args = Args::parse_from([
        "eqalert-convert".into(),
        "--cache-dir".into(),
        cache_dir.clone().into_os_string(),
        "report".into(),
        first.into_os_string(),
        second.into_os_string(),
    ]);
    let records = convert(&args, &TomlConfig::default()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "震度速報");
    assert_eq!(records[1].title, "震度速報 第2報");
    assert_eq!(records[1].max_seismic_intensity, "5-");
    assert!(cache_dir.join("report_duplication.json").exists());
}

#[test]
fn test_write_records_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_cancelled_information(&temp_dir, "info.json");
    let output = temp_dir.path().join("out.json");

    let args = Args::parse_from([
        "eqalert-convert".into(),
        "information".into(),
        input.into_os_string(),
    ]);
    let records = convert(&args, &TomlConfig::default()).unwrap();
    write_records(&records, Some(&output)).unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[0]["title"], "震源・震度情報 取消");
    assert_eq!(written[0]["areas"], json!({}));
}

#[test]
fn test_binary_prints_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_cancelled_information(&temp_dir, "info.json");
    let broken = temp_dir.path().join("broken.json");
    std::fs::write(&broken, "not json").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_eqalert-convert"))
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("information")
        .arg(&input)
        .arg(&broken)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout.as_array().unwrap().len(), 1);
    assert_eq!(stdout[0]["magnitude"], "None");
}

#[test]
fn test_binary_warns_about_missing_config() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_cancelled_information(&temp_dir, "info.json");
    let config = temp_dir.path().join("absent.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_eqalert-convert"))
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("information")
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found, using defaults"),
        "stderr should report the missing config file: {}",
        stderr
    );
    assert!(stderr.contains(&config.display().to_string()));
}

#[test]
fn test_binary_quiet_about_present_config() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_cancelled_information(&temp_dir, "info.json");
    let config = temp_dir.path().join("config.toml");
    std::fs::write(&config, "[logging]\nlevel = \"info\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_eqalert-convert"))
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("information")
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("not found"));
}
