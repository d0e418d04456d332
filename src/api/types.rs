use std::collections::HashMap;

use serde::Deserialize;

/// Message used when a failed response carries none of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "请求失败";

/// Error body returned by the contacts service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: Option<String>,
    pub status: Option<u16>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub path: Option<String>,
    pub details: Option<HashMap<String, String>>,
}

impl ErrorResponse {
    /// Extracts the server message from a response body, if it has one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|resp| resp.message)
            .filter(|message| !message.is_empty())
    }
}

pub mod paths {
    pub const CONTACTS: &str = "/api/contacts";
    pub const BOOKMARKED: &str = "/api/contacts/bookmarked";
    pub const SEARCH: &str = "/api/contacts/search";
    pub const EXPORT_EXCEL: &str = "/api/contacts/export/excel";
    pub const IMPORT_EXCEL: &str = "/api/contacts/import/excel";

    pub fn contact(id: i64) -> String {
        format!("{}/{}", CONTACTS, id)
    }

    pub fn bookmark(id: i64) -> String {
        format!("{}/{}/bookmark", CONTACTS, id)
    }

    pub fn toggle_bookmark(id: i64) -> String {
        format!("{}/{}/bookmark/toggle", CONTACTS, id)
    }

    pub fn search(keyword: &str) -> String {
        format!("{}?keyword={}", SEARCH, urlencoding::encode(keyword))
    }
}
