use serde::Serialize;
use vmrp_record::{find_chapter, ChapterRecord};

use crate::cmd::{load_records, require_codec, VerifyArgs};
use crate::exit::{stego_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum VerifyStatus {
    Match,
    Mismatch,
    Missing,
}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    schema_id: &'static str,
    image: String,
    chapter: u32,
    status: VerifyStatus,
    differences: Vec<&'static str>,
}

pub fn run(args: VerifyArgs, format: OutputFormat) -> CliResult<i32> {
    require_codec()?;

    let decoded = vmrp_stego::decode(&args.image).map_err(|err| {
        stego_error(&format!("failed decoding {}", args.image.display()), err)
    })?;
    let records = load_records(&args.metadata)?;

    let (status, differences) = match find_chapter(&records, decoded.chapter()) {
        Some(expected) => {
            let differences = differing_fields(expected, &decoded);
            if differences.is_empty() {
                (VerifyStatus::Match, differences)
            } else {
                (VerifyStatus::Mismatch, differences)
            }
        }
        None => (VerifyStatus::Missing, Vec::new()),
    };

    if status != VerifyStatus::Match {
        tracing::warn!(
            chapter = decoded.chapter(),
            image = %args.image.display(),
            ?differences,
            "stego payload does not match metadata"
        );
    }

    let output = VerifyOutput {
        schema_id: "vmrp.cli.v1.verify-report",
        image: args.image.display().to_string(),
        chapter: decoded.chapter(),
        status,
        differences,
    };
    print_verify(&output, format);

    if status == VerifyStatus::Match {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn differing_fields(expected: &ChapterRecord, actual: &ChapterRecord) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if expected.chapter() != actual.chapter() {
        fields.push("chapter");
    }
    if expected.file() != actual.file() {
        fields.push("file");
    }
    if expected.flags() != actual.flags() {
        fields.push("flags");
    }
    if expected.glyphs() != actual.glyphs() {
        fields.push("glyphs");
    }
    if expected.narrator() != actual.narrator() {
        fields.push("narrator");
    }
    if expected.summary() != actual.summary() {
        fields.push("summary");
    }
    if expected.timestamp() != actual.timestamp() {
        fields.push("timestamp");
    }
    fields
}

fn print_verify(output: &VerifyOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            let verdict = match output.status {
                VerifyStatus::Match => "payload matches metadata".to_string(),
                VerifyStatus::Missing => "no metadata entry for this chapter".to_string(),
                VerifyStatus::Mismatch => {
                    format!("differs in {}", output.differences.join(", "))
                }
            };
            println!(
                "{} (chapter {}): {}",
                output.image, output.chapter, verdict
            );
        }
        OutputFormat::Raw => println!(
            "{}",
            serde_json::to_value(output.status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        ),
    }
}

#[cfg(test)]
mod tests {
    use vmrp_record::{FlagState, Flags};

    use super::*;

    fn record(summary: &str, glyphs: &[&str]) -> ChapterRecord {
        let flags = Flags::new(FlagState::Active, FlagState::Latent, FlagState::Active);
        ChapterRecord::new(
            5,
            "KIRA",
            flags,
            glyphs.iter().copied(),
            "chapter05.md",
            summary,
            "2025-11-04T00:00:00Z",
        )
        .expect("record should be valid")
    }

    #[test]
    fn identical_records_have_no_differences() {
        let a = record("sync", &["∆", "Ξ"]);
        assert!(differing_fields(&a, &a.clone()).is_empty());
    }

    #[test]
    fn differences_name_each_field() {
        let a = record("sync", &["∆", "Ξ"]);
        let b = record("drift", &["Ξ", "∆"]);
        assert_eq!(differing_fields(&a, &b), ["glyphs", "summary"]);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&VerifyStatus::Mismatch).expect("status serializes");
        assert_eq!(json, "\"mismatch\"");
    }
}
