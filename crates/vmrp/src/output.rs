use std::io::{IsTerminal, Write};
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use vmrp_record::ChapterRecord;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    schema_id: &'a str,
    source: String,
    record: &'a ChapterRecord,
}

/// Print a decoded record. `Raw` writes the canonical payload bytes verbatim.
pub fn print_record(record: &ChapterRecord, source: &Path, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&RecordOutput {
            schema_id: "vmrp.cli.v1.chapter-record",
            source: source.display().to_string(),
            record,
        }),
        OutputFormat::Table => {
            let rows = record_rows(record);
            print_table(&["FIELD", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!("{}\n", source.display());
            for (field, value) in record_rows(record) {
                println!("  {field:<10} {value}");
            }
        }
        OutputFormat::Raw => match vmrp_record::serialize(record) {
            Ok(bytes) => print_raw(&bytes),
            Err(err) => tracing::error!(error = %err, "failed to serialize record"),
        },
    }
}

fn record_rows(record: &ChapterRecord) -> Vec<(String, String)> {
    vec![
        ("chapter".to_string(), record.chapter().to_string()),
        ("narrator".to_string(), record.narrator().to_string()),
        ("flags".to_string(), record.flags().to_string()),
        ("glyphs".to_string(), record.glyphs().join(" ")),
        ("file".to_string(), record.file().to_string()),
        ("summary".to_string(), record.summary().to_string()),
        ("timestamp".to_string(), record.timestamp().to_string()),
    ]
}

pub fn print_table(header: &[&str], rows: Vec<(String, String)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for (key, value) in rows {
        table.add_row(vec![key, value]);
    }
    println!("{table}");
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
