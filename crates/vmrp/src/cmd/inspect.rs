use serde::Serialize;
use vmrp_stego::{probe_header, Carrier, ErrorKind};

use crate::cmd::{require_codec, InspectArgs};
use crate::exit::{stego_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum FrameStatus {
    /// Header is valid and the declared payload fits.
    Present,
    /// Header is valid but the declared payload runs past the carrier.
    Truncated,
    HeaderMismatch,
    UnsupportedVersion,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    schema_id: &'static str,
    image: String,
    width: u32,
    height: u32,
    has_alpha: bool,
    capacity_bits: usize,
    capacity_bytes: usize,
    frame: FrameStatus,
    payload_bytes: Option<usize>,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    require_codec()?;

    let carrier = Carrier::open(&args.image).map_err(|err| {
        stego_error(&format!("failed opening {}", args.image.display()), err.into())
    })?;

    let (frame, payload_bytes) = frame_status(&carrier);
    let capacity_bits = carrier.capacity_bits();

    let output = InspectOutput {
        schema_id: "vmrp.cli.v1.carrier-info",
        image: args.image.display().to_string(),
        width: carrier.width(),
        height: carrier.height(),
        has_alpha: carrier.layout() == vmrp_carrier::PixelLayout::Rgba,
        capacity_bits,
        capacity_bytes: (capacity_bits / 8).saturating_sub(vmrp_frame::HEADER_SIZE),
        frame,
        payload_bytes,
    };
    print_inspect(&output, format);
    Ok(SUCCESS)
}

fn frame_status(carrier: &Carrier) -> (FrameStatus, Option<usize>) {
    match probe_header(carrier) {
        Ok(header) if header.frame_bits() <= carrier.capacity_bits() => {
            (FrameStatus::Present, Some(header.payload_len()))
        }
        Ok(header) => (FrameStatus::Truncated, Some(header.payload_len())),
        Err(err) => match err.kind() {
            ErrorKind::UnsupportedVersion => (FrameStatus::UnsupportedVersion, None),
            ErrorKind::TruncatedStream => (FrameStatus::Truncated, None),
            _ => (FrameStatus::HeaderMismatch, None),
        },
    }
}

fn print_inspect(output: &InspectOutput, format: OutputFormat) {
    let frame = serde_json::to_value(output.frame)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table => print_table(
            &["FIELD", "VALUE"],
            vec![
                ("image".to_string(), output.image.clone()),
                (
                    "size".to_string(),
                    format!("{}x{}", output.width, output.height),
                ),
                ("alpha".to_string(), output.has_alpha.to_string()),
                ("capacity".to_string(), format!("{} bits", output.capacity_bits)),
                ("frame".to_string(), frame),
                (
                    "payload".to_string(),
                    output
                        .payload_bytes
                        .map(|n| format!("{n} bytes"))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ],
        ),
        OutputFormat::Pretty => println!(
            "{}: {}x{}, {} bits capacity, frame {}",
            output.image, output.width, output.height, output.capacity_bits, frame
        ),
        OutputFormat::Raw => println!("{frame}"),
    }
}
