use crate::error::ExportError;
use crate::results::ScrapedItem;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column label used when the caller does not supply one
pub const DEFAULT_COLUMN: &str = "Data";

/// Supported table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

/// Writes `items` as a one-column table headed by `column` to `path`
pub fn export(
    items: &[ScrapedItem],
    column: &str,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if items.is_empty() {
        return Err(ExportError::NoData);
    }

    match format {
        ExportFormat::Csv => {
            let file = File::create(path)?;
            write_csv(items, column, file)?;
        }
        ExportFormat::Xlsx => write_xlsx(items, column, path)?,
    }

    ::log::info!("Exported {} rows to {}", items.len(), path.display());
    Ok(())
}

/// Writes a header row and one row per item
pub fn write_csv<W: Write>(items: &[ScrapedItem], column: &str, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([column])?;
    for item in items {
        writer.write_record([item])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads back a single-column CSV written by `write_csv`, skipping the header
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ScrapedItem>, ExportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        items.push(record.get(0).unwrap_or_default().to_string());
    }
    Ok(items)
}

/// Writes a workbook with a single sheet: header in A1, items below
pub fn write_xlsx(items: &[ScrapedItem], column: &str, path: &Path) -> Result<(), ExportError> {
    let mut workbook = build_workbook(items, column)?;
    workbook.save(path)?;
    Ok(())
}

/// Same as `write_xlsx` but returns the file bytes
pub fn xlsx_bytes(items: &[ScrapedItem], column: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(items, column)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(items: &[ScrapedItem], column: &str) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, column)?;
    for (row, item) in (1u32..).zip(items) {
        worksheet.write_string(row, 0, item)?;
    }
    Ok(workbook)
}
