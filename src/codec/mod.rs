pub mod csv;
pub mod excel;
pub mod json;

pub use self::csv::{parse_csv, to_csv};
pub use self::excel::{contact_rows, contacts_from_grid, read_excel_file, read_workbook, write_workbook};
pub use self::json::{parse_json, to_json};

use std::path::Path;

use tracing::info;

use crate::contact::Contact;
use crate::error::{FormatError, Result};

/// Import formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Excel,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            "xlsx" | "xls" | "ods" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

/// Reads and parses a contacts file, dispatching on its extension.
pub async fn read_contacts_file(path: impl AsRef<Path>) -> Result<Vec<Contact>> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)
        .ok_or_else(|| FormatError::UnsupportedFile(path.display().to_string()))?;

    let contacts = match format {
        FileFormat::Csv => parse_csv(&read_text(path).await?),
        FileFormat::Json => parse_json(&read_text(path).await?)?,
        FileFormat::Excel => contacts_from_grid(&read_excel_file(path).await?),
    };

    info!("Parsed {} contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}

async fn read_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    String::from_utf8(bytes).map_err(|e| FormatError::Encoding(e.to_string()).into())
}
