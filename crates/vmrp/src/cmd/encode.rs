use serde::Serialize;
use vmrp_stego::{encode_with_config, Carrier, CarrierConfig, EncodeConfig, EncodeReport};

use crate::cmd::{load_records, require_codec, select_record, EncodeArgs};
use crate::exit::{stego_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    schema_id: &'static str,
    path: String,
    chapter: u32,
    width: u32,
    height: u32,
    payload_bytes: usize,
    frame_bits: usize,
    capacity_bits: usize,
    synthesized: bool,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    require_codec()?;

    let records = load_records(&args.record)?;
    let record = select_record(records, args.chapter)?;

    let base = match args.base.as_deref() {
        Some(path) => Some(
            Carrier::open(path)
                .map_err(|err| stego_error("failed opening base carrier", err.into()))?,
        ),
        None => None,
    };

    let config = EncodeConfig {
        carrier: CarrierConfig {
            min_side: args.min_side,
            ..CarrierConfig::default()
        },
        ..EncodeConfig::default()
    };

    let report = encode_with_config(&record, &args.out, base, &config)
        .map_err(|err| stego_error("encode failed", err))?;

    print_report(&report, record.chapter(), format);
    Ok(SUCCESS)
}

fn print_report(report: &EncodeReport, chapter: u32, format: OutputFormat) {
    let out = EncodeOutput {
        schema_id: "vmrp.cli.v1.encode-report",
        path: report.path.display().to_string(),
        chapter,
        width: report.width,
        height: report.height,
        payload_bytes: report.payload_bytes,
        frame_bits: report.frame_bits,
        capacity_bits: report.capacity_bits,
        synthesized: report.synthesized,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["FIELD", "VALUE"],
            vec![
                ("path".to_string(), out.path.clone()),
                ("chapter".to_string(), out.chapter.to_string()),
                ("size".to_string(), format!("{}x{}", out.width, out.height)),
                ("payload".to_string(), format!("{} bytes", out.payload_bytes)),
                (
                    "bits".to_string(),
                    format!("{} / {}", out.frame_bits, out.capacity_bits),
                ),
                ("synthesized".to_string(), out.synthesized.to_string()),
            ],
        ),
        OutputFormat::Pretty => println!(
            "wrote chapter {} to {} ({}x{}, {} of {} bits)",
            out.chapter, out.path, out.width, out.height, out.frame_bits, out.capacity_bits
        ),
        OutputFormat::Raw => println!("{}", out.path),
    }
}
