use std::path::{Path, PathBuf};

use serde::Serialize;
use vmrp_record::{ChapterRecord, FlagState, Flags};

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: &'static str,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let scratch = scratch_dir();
    let checks = vec![
        image_codec_check(),
        temp_dir_writable_check(&scratch),
        png_roundtrip_check(&scratch),
        compiled_features_check(),
    ];
    let _ = std::fs::remove_dir_all(&scratch);

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput {
        schema_id: "vmrp.cli.v1.doctor-report",
        checks,
        overall,
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("vmrp doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<18} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => println!("{}", output.overall),
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

fn scratch_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("vmrp-doctor-{}-{nanos}", std::process::id()))
}

fn image_codec_check() -> CheckResult {
    if vmrp_stego::is_available() {
        CheckResult {
            name: "image_codec".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} encoder and decoder compiled in", vmrp_carrier::CODEC_NAME),
        }
    } else {
        CheckResult {
            name: "image_codec".to_string(),
            status: CheckStatus::Fail,
            detail: "no lossless image codec; rebuild with the `png` feature".to_string(),
        }
    }
}

fn temp_dir_writable_check(dir: &Path) -> CheckResult {
    let probe = dir.join("probe");
    let result = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&probe, b"vmrp"));

    match result {
        Ok(()) => CheckResult {
            name: "temp_dir_writable".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} is writable", dir.display()),
        },
        Err(err) => CheckResult {
            name: "temp_dir_writable".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} not writable: {err}", dir.display()),
        },
    }
}

/// Encode a fixed record to disk and read it back.
fn png_roundtrip_check(dir: &Path) -> CheckResult {
    let name = "png_roundtrip".to_string();
    if !vmrp_stego::is_available() {
        return CheckResult {
            name,
            status: CheckStatus::Skip,
            detail: "image codec unavailable".to_string(),
        };
    }

    let flags = Flags::new(FlagState::Active, FlagState::Latent, FlagState::Active);
    let record = match ChapterRecord::new(
        1,
        "DOCTOR",
        flags,
        ["∆", "Ξ"],
        "doctor.md",
        "self-test",
        "1970-01-01T00:00:00Z",
    ) {
        Ok(record) => record,
        Err(err) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                detail: format!("probe record rejected: {err}"),
            }
        }
    };

    let path = dir.join("doctor.png");
    let result = vmrp_stego::encode(&record, &path, None)
        .and_then(|_| vmrp_stego::decode(&path));

    match result {
        Ok(decoded) if decoded == record => CheckResult {
            name,
            status: CheckStatus::Pass,
            detail: "record survived encode and decode".to_string(),
        },
        Ok(_) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: "decoded record differs from the encoded one".to_string(),
        },
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn compiled_features_check() -> CheckResult {
    CheckResult {
        name: "compiled_features".to_string(),
        status: CheckStatus::Info,
        detail: active_features().join(", "),
    }
}

pub(crate) fn active_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if cfg!(feature = "png") {
        features.push("png");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }
    features
}
