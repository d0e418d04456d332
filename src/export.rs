use std::path::PathBuf;

use tracing::{info, warn};

use crate::codec::csv::{CSV_MIME, to_csv};
use crate::codec::excel::{SheetRow, XLSX_MIME, ensure_xlsx_extension, write_workbook};
use crate::codec::json::{JSON_MIME, to_json};
use crate::contact::Contact;
use crate::download::{Download, DownloadSink};
use crate::error::Result;

pub const DEFAULT_CSV_FILENAME: &str = "contacts.csv";
pub const DEFAULT_JSON_FILENAME: &str = "contacts.json";
pub const DEFAULT_EXCEL_FILENAME: &str = "data.xlsx";

/// Notice shown when an export is requested for an empty list.
pub const NOTHING_TO_EXPORT: &str = "没有数据可导出";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// The input was empty; nothing was handed to the sink.
    NothingToExport,
}

impl ExportOutcome {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ExportOutcome::Saved(path) => Some(path),
            ExportOutcome::NothingToExport => None,
        }
    }
}

pub fn export_to_csv(
    contacts: &[Contact],
    filename: Option<&str>,
    sink: &dyn DownloadSink,
) -> Result<ExportOutcome> {
    if contacts.is_empty() {
        warn!("{}", NOTHING_TO_EXPORT);
        return Ok(ExportOutcome::NothingToExport);
    }

    let filename = filename.unwrap_or(DEFAULT_CSV_FILENAME);
    let path = sink.deliver(Download::new(filename, CSV_MIME, to_csv(contacts)))?;
    info!("Exported {} contacts as CSV", contacts.len());
    Ok(ExportOutcome::Saved(path))
}

pub fn export_to_json(
    contacts: &[Contact],
    filename: Option<&str>,
    sink: &dyn DownloadSink,
) -> Result<ExportOutcome> {
    if contacts.is_empty() {
        warn!("{}", NOTHING_TO_EXPORT);
        return Ok(ExportOutcome::NothingToExport);
    }

    let filename = filename.unwrap_or(DEFAULT_JSON_FILENAME);
    let path = sink.deliver(Download::new(filename, JSON_MIME, to_json(contacts)?))?;
    info!("Exported {} contacts as JSON", contacts.len());
    Ok(ExportOutcome::Saved(path))
}

/// Writes arbitrary keyed rows to a workbook. Unlike the CSV and JSON
/// exports, an empty row list still produces a (header-less) workbook.
pub fn export_to_excel(
    rows: &[SheetRow],
    filename: Option<&str>,
    sink: &dyn DownloadSink,
) -> Result<ExportOutcome> {
    let filename = ensure_xlsx_extension(filename.unwrap_or(DEFAULT_EXCEL_FILENAME));
    let path = sink.deliver(Download::new(filename, XLSX_MIME, write_workbook(rows)?))?;
    info!("Exported {} rows as Excel", rows.len());
    Ok(ExportOutcome::Saved(path))
}
