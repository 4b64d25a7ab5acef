#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

const PROGRESS_HEX: &str = "0000001101690b08154045e66666666666";

fn robolink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_robolink"))
        .env_remove("ROBOLINK_MAX_SIZE")
        .env_remove("ROBOLINK_LOG_LEVEL")
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("robolink should run")
}

fn unique_temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "robolink-{tag}-{}-{}.bin",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

#[test]
fn decode_progress_hex_as_json() {
    let output = robolink(&["--format", "json", "decode", PROGRESS_HEX]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""name":"progress""#));
    assert!(stdout.contains(r#""size":17"#));
    assert!(stdout.contains(r#""type":"progress","timestamp":1762330645,"progress":43.8"#));
}

#[test]
fn encode_progress_json_matches_reference_hex() {
    let output = robolink(&[
        "--format",
        "json",
        "encode",
        r#"{"type":"progress","timestamp":1762330645,"progress":43.8}"#,
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!(r#""hex":"{PROGRESS_HEX}""#)));
    assert!(stdout.contains(r#""identifier":1"#));
}

#[test]
fn raw_encode_output_decodes_from_file() {
    let encoded = robolink(&[
        "--format",
        "raw",
        "encode",
        r#"{"type":"config_entry","timestamp":7,"key":"server.port","value":{"int32":8000}}"#,
    ]);
    assert!(encoded.status.success());
    assert_eq!(encoded.stdout[4], 0x04);

    let path = unique_temp_file("config");
    std::fs::write(&path, &encoded.stdout).expect("packet file should be writable");

    let decoded = robolink(&["--format", "json", "decode", "--file", path.to_str().unwrap()]);
    let _ = std::fs::remove_file(&path);

    assert!(decoded.status.success());
    let stdout = String::from_utf8_lossy(&decoded.stdout);
    assert!(stdout.contains(r#""key":"server.port""#));
    assert!(stdout.contains(r#""value":{"int32":8000}"#));
}

#[test]
fn unknown_identifier_exits_60() {
    let output = robolink(&["decode", "00000009ff00000001"]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no packet registered for identifier 0xff"));
}

#[test]
fn truncated_packet_exits_60() {
    let output = robolink(&["decode", &PROGRESS_HEX[..PROGRESS_HEX.len() - 2]]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("size mismatch"));
}

#[test]
fn max_size_flag_rejects_larger_packets() {
    let output = robolink(&["--max-size", "16", "decode", PROGRESS_HEX]);

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("message too large"));
}

#[test]
fn malformed_hex_is_usage_error() {
    let output = robolink(&["decode", "0000001"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn invalid_json_is_data_invalid() {
    let output = robolink(&["encode", r#"{"type":"warp_drive"}"#]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn types_lists_every_identifier() {
    let output = robolink(&["--format", "json", "types"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"{"identifier":1,"hex":"0x01","name":"progress"}"#));
    assert!(stdout.contains(r#""name":"selected_robot""#));
    assert!(stdout.contains(r#""name":"roll_event""#));
}

#[test]
fn version_prints_package_version() {
    let output = robolink(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("robolink {}", env!("CARGO_PKG_VERSION")));
}
