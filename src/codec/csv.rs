use crate::contact::{ColumnMap, Contact, EXPORT_HEADERS};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Byte-order mark prepended to exports so spreadsheet tools pick UTF-8.
pub const BOM: char = '\u{FEFF}';

/// Parses CSV text whose first non-blank line is the localized header row.
///
/// Rows without both a name and a phone are dropped. Quoted fields may
/// contain commas, but doubled quotes are not treated as escapes.
pub fn parse_csv(text: &str) -> Vec<Contact> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns = ColumnMap::from_headers(header.split(','));

    lines
        .filter_map(|line| columns.build(&split_row(line)))
        .collect()
}

/// Splits one line into trimmed fields. A `"` toggles quoting and is
/// dropped; a comma separates fields only outside quotes.
pub fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut in_quotes = false;
    let mut current = String::new();

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Renders contacts as BOM-prefixed CSV. Every cell is wrapped in quotes
/// without escaping, so values holding `"` do not survive a re-import.
pub fn to_csv(contacts: &[Contact]) -> String {
    let mut out = String::new();
    out.push(BOM);
    push_row(&mut out, &EXPORT_HEADERS);
    for contact in contacts {
        push_row(&mut out, &contact.export_row());
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    let line = fields
        .iter()
        .map(|field| format!("\"{}\"", field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}
