use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use tracing::debug;

use crate::contact::{ColumnMap, Contact, EXPORT_HEADERS};
use crate::error::{ContactsError, Result};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLSX_EXTENSION: &str = ".xlsx";
pub const SHEET_NAME: &str = "Sheet1";

/// One spreadsheet row keyed by column header.
pub type SheetRow = Map<String, Value>;

/// Decodes a workbook and returns its first sheet as rows of cell text,
/// header row included.
pub fn read_workbook(bytes: Vec<u8>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ContactsError::Spreadsheet("workbook has no sheets".to_string()))??;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    debug!("Read {} rows from first sheet", grid.len());
    Ok(grid)
}

/// Reads a workbook file in one shot.
pub async fn read_excel_file(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    read_workbook(bytes)
}

/// Maps a row grid whose first row holds the localized headers to contacts.
pub fn contacts_from_grid(grid: &[Vec<String>]) -> Vec<Contact> {
    let Some((header, rows)) = grid.split_first() else {
        return Vec::new();
    };
    let columns = ColumnMap::from_headers(header);
    rows.iter().filter_map(|row| columns.build(row)).collect()
}

/// Renders contacts as rows keyed by the localized export headers.
pub fn contact_rows(contacts: &[Contact]) -> Vec<SheetRow> {
    contacts
        .iter()
        .map(|contact| {
            EXPORT_HEADERS
                .iter()
                .zip(contact.export_row())
                .map(|(header, value)| (header.to_string(), Value::String(value.to_string())))
                .collect::<SheetRow>()
        })
        .collect()
}

/// Encodes rows into a single-sheet workbook. The header row is the union of
/// the rows' keys in first-seen order.
pub fn write_workbook(rows: &[SheetRow]) -> Result<Vec<u8>> {
    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, column_index(col)?, *header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let line = row_index(index + 1)?;
        for (col, header) in headers.iter().enumerate() {
            let col = column_index(col)?;
            match row.get(*header) {
                None | Some(Value::Null) => {}
                Some(Value::String(s)) => {
                    worksheet.write_string(line, col, s)?;
                }
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(f) => {
                        worksheet.write_number(line, col, f)?;
                    }
                    None => {
                        worksheet.write_string(line, col, n.to_string())?;
                    }
                },
                Some(Value::Bool(b)) => {
                    worksheet.write_boolean(line, col, *b)?;
                }
                Some(other) => {
                    worksheet.write_string(line, col, other.to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Appends `.xlsx` unless the name already carries it.
pub fn ensure_xlsx_extension(filename: &str) -> String {
    if filename.to_ascii_lowercase().ends_with(XLSX_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, XLSX_EXTENSION)
    }
}

/// Timestamped export name, e.g. `contacts_20240101_093000.xlsx`.
pub fn timestamped_filename() -> String {
    format!("contacts_{}{}", chrono::Local::now().format("%Y%m%d_%H%M%S"), XLSX_EXTENSION)
}

fn row_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| ContactsError::Spreadsheet(format!("row {} out of range", index)))
}

fn column_index(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| ContactsError::Spreadsheet(format!("column {} out of range", index)))
}
