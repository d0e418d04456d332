use serde_json::Value;
use tracing::debug;

use crate::contact::Contact;
use crate::error::{FormatError, Result};

pub const JSON_MIME: &str = "application/json";

/// Parses a JSON array of contact-shaped objects.
///
/// Malformed JSON, or a `null` array element, is a [`FormatError`]. A
/// well-formed document whose root is not an array yields no contacts.
pub fn parse_json(text: &str) -> std::result::Result<Vec<Contact>, FormatError> {
    let data: Value = serde_json::from_str(text).map_err(|e| {
        debug!("Rejected JSON import: {}", e);
        FormatError::InvalidJson(e)
    })?;

    let Value::Array(items) = data else {
        debug!("JSON import root is not an array, nothing to import");
        return Ok(Vec::new());
    };

    if let Some(index) = items.iter().position(Value::is_null) {
        debug!("Rejected JSON import: element {} is null", index);
        return Err(FormatError::NullRecord { index });
    }

    Ok(items
        .iter()
        .map(contact_from_value)
        .filter(Contact::is_importable)
        .collect())
}

fn contact_from_value(item: &Value) -> Contact {
    let text = |key: &str| item.get(key).and_then(scalar_text);

    Contact {
        name: text("name").unwrap_or_default(),
        phone: text("phone").unwrap_or_default(),
        email: text("email"),
        wechat: text("wechat"),
        qq: text("qq"),
        address: text("address"),
        company: text("company"),
        avatar: text("avatar"),
        ..Default::default()
    }
}

// Numbers are accepted so phone and QQ values exported by spreadsheet tools
// still import.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Pretty-prints contacts with two-space indentation in field order.
pub fn to_json(contacts: &[Contact]) -> Result<String> {
    Ok(serde_json::to_string_pretty(contacts)?)
}
