#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const METADATA: &str = r#"{
  "chapters": [
    {
      "chapter": 4,
      "narrator": "OREN",
      "flags": {"R": "latent", "G": "active", "B": "latent"},
      "glyphs": ["Ω"],
      "file": "chapter04.md",
      "summary": "The relay goes quiet.",
      "timestamp": "2025-11-03T00:00:00Z",
      "stego_png": "assets/chapter04.png"
    },
    {
      "chapter": 5,
      "narrator": "KIRA",
      "flags": {"R": "active", "G": "latent", "B": "active"},
      "glyphs": ["∆", "Ξ"],
      "file": "chapter05.md",
      "summary": "Kira hears the lattice sync.",
      "timestamp": "2025-11-04T00:00:00Z",
      "stego_png": "assets/chapter05.png"
    }
  ]
}"#;

fn vmrp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vmrp"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("vmrp should run")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document")
}

fn write_metadata(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("chapters_metadata.json");
    std::fs::write(&path, METADATA).expect("metadata should be writable");
    path
}

#[test]
fn encode_then_decode_returns_the_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("assets/chapter05.png");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "5",
        "--out",
        path_str(&image),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report = stdout_json(&output);
    assert_eq!(report["chapter"], 5);
    assert_eq!(report["width"], 32);
    assert_eq!(report["synthesized"], true);
    assert!(image.exists());

    let output = vmrp(&["decode", path_str(&image)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let decoded = stdout_json(&output);
    assert_eq!(decoded["record"]["chapter"], 5);
    assert_eq!(decoded["record"]["narrator"], "KIRA");
    assert_eq!(decoded["record"]["glyphs"][1], "Ξ");
    assert!(decoded["record"].get("stego_png").is_none());
}

#[test]
fn raw_decode_prints_canonical_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("chapter04.png");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "4",
        "--out",
        path_str(&image),
    ]);
    assert!(output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_vmrp"))
        .args(["--format", "raw", "decode", path_str(&image)])
        .output()
        .expect("vmrp should run");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).expect("payload is utf-8"),
        r#"{"chapter":4,"file":"chapter04.md","flags":{"B":"latent","G":"active","R":"latent"},"glyphs":["Ω"],"narrator":"OREN","summary":"The relay goes quiet.","timestamp":"2025-11-03T00:00:00Z"}"#
    );
}

#[test]
fn verify_matches_and_detects_drift() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("chapter05.png");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "5",
        "--out",
        path_str(&image),
    ]);
    assert!(output.status.success());

    let output = vmrp(&["verify", path_str(&image), "--metadata", path_str(&metadata)]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "match");

    let drifted = dir.path().join("drifted.json");
    std::fs::write(
        &drifted,
        METADATA.replace("Kira hears the lattice sync.", "Kira hears nothing."),
    )
    .expect("metadata should be writable");

    let output = vmrp(&["verify", path_str(&image), "--metadata", path_str(&drifted)]);
    assert_eq!(output.status.code(), Some(60));
    let report = stdout_json(&output);
    assert_eq!(report["status"], "mismatch");
    assert_eq!(report["differences"], serde_json::json!(["summary"]));
}

#[test]
fn decode_of_plain_image_is_data_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = dir.path().join("plain.png");
    vmrp::Carrier::filled(32, 32, [12, 12, 12])
        .expect("carrier")
        .save_png(&image)
        .expect("plain image should save");

    let output = vmrp(&["decode", path_str(&image)]);
    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("header"));
}

#[test]
fn undersized_base_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let base = dir.path().join("base.png");
    let image = dir.path().join("out/chapter05.png");
    vmrp::Carrier::filled(4, 4, [200, 100, 50])
        .expect("carrier")
        .save_png(&base)
        .expect("base should save");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "5",
        "--out",
        path_str(&image),
        "--base",
        path_str(&base),
    ]);
    assert_eq!(output.status.code(), Some(73));
    assert!(!image.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn lossy_target_is_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("chapter05.jpg");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "5",
        "--out",
        path_str(&image),
    ]);
    assert_eq!(output.status.code(), Some(64));
    assert!(!image.exists());
}

#[test]
fn ambiguous_record_file_requires_chapter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("chapter.png");

    let output = vmrp(&["encode", "--record", path_str(&metadata), "--out", path_str(&image)]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--chapter"));
}

#[test]
fn inspect_reports_frame_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let metadata = write_metadata(dir.path());
    let image = dir.path().join("chapter05.png");

    let output = vmrp(&[
        "encode",
        "--record",
        path_str(&metadata),
        "--chapter",
        "5",
        "--out",
        path_str(&image),
    ]);
    assert!(output.status.success());

    let output = vmrp(&["inspect", path_str(&image)]);
    assert!(output.status.success());
    let info = stdout_json(&output);
    assert_eq!(info["frame"], "present");
    assert_eq!(info["capacity_bits"], 32 * 32 * 3);
    assert_eq!(info["has_alpha"], false);
}

#[test]
fn doctor_passes_on_clean_env() {
    let output = vmrp(&["doctor"]);
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["schema_id"], "vmrp.cli.v1.doctor-report");
    assert_eq!(report["overall"], "pass");
}

#[test]
fn envinfo_reports_version() {
    let output = vmrp(&["envinfo"]);
    assert!(output.status.success());
    let info = stdout_json(&output);
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["codec_available"], true);
}
