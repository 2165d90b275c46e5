use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use vmrp_record::ChapterRecord;

use crate::exit::{record_error, CliError, CliResult, CAPABILITY_UNAVAILABLE, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod doctor;
pub mod encode;
pub mod envinfo;
pub mod inspect;
pub mod verify;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed a chapter record into a PNG carrier.
    Encode(EncodeArgs),
    /// Recover the chapter record from a stego image.
    Decode(DecodeArgs),
    /// Decode an image and compare it against chapter metadata.
    Verify(VerifyArgs),
    /// Report carrier capacity and frame header status.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON file holding a single record or a `{"chapters": [...]}` document.
    #[arg(long, value_name = "PATH")]
    pub record: PathBuf,
    /// Chapter to select when the record file holds several.
    #[arg(long)]
    pub chapter: Option<u32>,
    /// Output PNG path.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
    /// Existing image to embed into instead of a synthesized carrier.
    #[arg(long, value_name = "PATH")]
    pub base: Option<PathBuf>,
    /// Minimum side length of a synthesized carrier.
    #[arg(long, default_value = "32")]
    pub min_side: u32,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Stego image to read.
    pub image: PathBuf,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Stego image to read.
    pub image: PathBuf,
    /// Chapter metadata document to compare against.
    #[arg(long, value_name = "PATH")]
    pub metadata: PathBuf,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image to inspect.
    pub image: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}

/// Fail fast with a capability error when no image codec is compiled in.
pub(crate) fn require_codec() -> CliResult<()> {
    if vmrp_stego::is_available() {
        Ok(())
    } else {
        Err(CliError::new(
            CAPABILITY_UNAVAILABLE,
            "image codec unavailable: rebuild with the `png` feature",
        ))
    }
}

pub(crate) fn load_records(path: &Path) -> CliResult<Vec<ChapterRecord>> {
    vmrp_record::load_metadata(path)
        .map_err(|err| record_error(&format!("failed loading {}", path.display()), err))
}

/// Pick one record out of a metadata file.
pub(crate) fn select_record(
    records: Vec<ChapterRecord>,
    chapter: Option<u32>,
) -> CliResult<ChapterRecord> {
    match chapter {
        Some(wanted) => records
            .into_iter()
            .find(|record| record.chapter() == wanted)
            .ok_or_else(|| CliError::new(USAGE, format!("no record for chapter {wanted}"))),
        None => {
            let count = records.len();
            let mut iter = records.into_iter();
            match (iter.next(), iter.next()) {
                (Some(record), None) => Ok(record),
                _ => Err(CliError::new(
                    USAGE,
                    format!("record file holds {count} chapters; pass --chapter"),
                )),
            }
        }
    }
}
