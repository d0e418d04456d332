mod columns;

pub use columns::*;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A contact record as exchanged with the server and the import/export codecs.
///
/// `id`, `bookmarked` and the timestamps are owned by the server; records
/// produced by the importers leave them at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub wechat: Option<String>,
    pub qq: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bookmarked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<NaiveDateTime>,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_empty(email.into());
        self
    }

    pub fn with_wechat(mut self, wechat: impl Into<String>) -> Self {
        self.wechat = non_empty(wechat.into());
        self
    }

    pub fn with_qq(mut self, qq: impl Into<String>) -> Self {
        self.qq = non_empty(qq.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_empty(address.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = non_empty(company.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = non_empty(avatar.into());
        self
    }

    pub fn bookmarked(mut self, bookmarked: bool) -> Self {
        self.bookmarked = bookmarked;
        self
    }

    /// Whether the record has both required fields and may enter a working set.
    pub fn is_importable(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty()
    }

    /// Cell values in [`EXPORT_HEADERS`] order.
    pub fn export_row(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_deref().unwrap_or_default(),
            self.wechat.as_deref().unwrap_or_default(),
            self.qq.as_deref().unwrap_or_default(),
            self.address.as_deref().unwrap_or_default(),
            self.company.as_deref().unwrap_or_default(),
            bookmark_label(self.bookmarked),
        ]
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
