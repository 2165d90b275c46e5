use crate::cmd::{require_codec, DecodeArgs};
use crate::exit::{stego_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    require_codec()?;

    let record = vmrp_stego::decode(&args.image).map_err(|err| {
        stego_error(&format!("failed decoding {}", args.image.display()), err)
    })?;

    tracing::debug!(chapter = record.chapter(), path = %args.image.display(), "record decoded");
    print_record(&record, &args.image, format);
    Ok(SUCCESS)
}
