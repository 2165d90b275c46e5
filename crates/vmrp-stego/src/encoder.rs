use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vmrp_carrier::{ensure_available, Carrier, CarrierConfig};
use vmrp_frame::{bits_of, build_frame, frame_bits};
use vmrp_record::ChapterRecord;

use crate::error::{Result, StegoError};

/// Configuration for [`encode_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeConfig {
    /// How to synthesize a carrier when none is supplied.
    pub carrier: CarrierConfig,
    /// Create missing parent directories of the output path.
    pub create_dirs: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            carrier: CarrierConfig::default(),
            create_dirs: true,
        }
    }
}

/// Summary of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Canonical payload size in bytes.
    pub payload_bytes: usize,
    /// Bits written, header included.
    pub frame_bits: usize,
    pub capacity_bits: usize,
    /// True when no base carrier was supplied.
    pub synthesized: bool,
}

/// Embed `record` into a carrier in memory.
///
/// Uses `base` when given, otherwise synthesizes a carrier just large enough
/// (but at least `config.min_side` square). Fails with
/// `InsufficientCapacity` before any pixel is changed.
pub fn embed_record(
    record: &ChapterRecord,
    base: Option<Carrier>,
    config: &CarrierConfig,
) -> Result<Carrier> {
    embed_counted(record, base, config).map(|(carrier, _)| carrier)
}

fn embed_counted(
    record: &ChapterRecord,
    base: Option<Carrier>,
    config: &CarrierConfig,
) -> Result<(Carrier, usize)> {
    let payload = vmrp_record::serialize(record)?;
    let frame = build_frame(&payload)?;
    let bits = bits_of(&frame);

    let mut carrier = match base {
        Some(carrier) => carrier,
        None => Carrier::synthesize(bits.len(), config)?,
    };
    debug!(
        chapter = record.chapter(),
        payload_bytes = payload.len(),
        frame_bits = bits.len(),
        capacity_bits = carrier.capacity_bits(),
        "embedding record"
    );
    carrier.embed(bits)?;
    Ok((carrier, payload.len()))
}

/// Embed `record` and write the carrier to `output` as PNG.
pub fn encode(record: &ChapterRecord, output: &Path, base: Option<Carrier>) -> Result<EncodeReport> {
    encode_with_config(record, output, base, &EncodeConfig::default())
}

/// Like [`encode`], opening the base carrier from an image file.
pub fn encode_file(
    record: &ChapterRecord,
    output: &Path,
    base_image: Option<&Path>,
) -> Result<EncodeReport> {
    ensure_available()?;
    let base = base_image.map(Carrier::open).transpose()?;
    encode(record, output, base)
}

/// Embed `record` and write the carrier to `output` with explicit config.
///
/// The image is fully built and PNG-encoded in memory first; the output
/// directory and file are only created once that succeeded. The file itself
/// is written to a sibling temporary and renamed into place.
pub fn encode_with_config(
    record: &ChapterRecord,
    output: &Path,
    base: Option<Carrier>,
    config: &EncodeConfig,
) -> Result<EncodeReport> {
    ensure_available()?;
    ensure_lossless_target(output)?;

    let synthesized = base.is_none();
    let (carrier, payload_bytes) = embed_counted(record, base, &config.carrier)?;
    let png = carrier.to_png_bytes()?;

    let created = if config.create_dirs {
        create_parent_dirs(output)?
    } else {
        None
    };
    if let Err(err) = write_replace(output, &png) {
        if let Some(dir) = created {
            let _ = fs::remove_dir_all(&dir);
        }
        return Err(err);
    }

    let report = EncodeReport {
        path: output.to_path_buf(),
        width: carrier.width(),
        height: carrier.height(),
        payload_bytes,
        frame_bits: frame_bits(payload_bytes),
        capacity_bits: carrier.capacity_bits(),
        synthesized,
    };
    info!(
        path = ?report.path,
        chapter = record.chapter(),
        width = report.width,
        height = report.height,
        frame_bits = report.frame_bits,
        "encoded stego image"
    );
    Ok(report)
}

/// Reject output paths that would imply a lossy or non-PNG format.
///
/// Paths without an extension are accepted; they are still written as PNG.
pub fn ensure_lossless_target(output: &Path) -> Result<()> {
    match output.extension().and_then(|ext| ext.to_str()) {
        None => Ok(()),
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        Some(_) => Err(StegoError::LossyTarget {
            path: output.to_path_buf(),
        }),
    }
}

/// Create the missing ancestors of `output`. Returns the topmost directory
/// this call created, if any.
fn create_parent_dirs(output: &Path) -> Result<Option<PathBuf>> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };
    let topmost = parent
        .ancestors()
        .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
        .last()
        .map(Path::to_path_buf);

    fs::create_dir_all(parent).map_err(|source| StegoError::Io {
        path: parent.to_path_buf(),
        source,
    })?;
    Ok(topmost)
}

fn write_replace(output: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| StegoError::Io {
        path: output.to_path_buf(),
        source,
    };

    let mut tmp_name = output
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = output.with_file_name(tmp_name);

    if let Err(err) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(err));
    }
    if let Err(err) = fs::rename(&tmp, output) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(err));
    }
    Ok(())
}
