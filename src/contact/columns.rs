use super::{Contact, non_empty};

pub const HEADER_NAME: &str = "姓名";
pub const HEADER_PHONE: &str = "电话";
pub const HEADER_EMAIL: &str = "邮箱";
pub const HEADER_WECHAT: &str = "微信";
pub const HEADER_QQ: &str = "QQ";
pub const HEADER_ADDRESS: &str = "地址";
pub const HEADER_COMPANY: &str = "公司";
pub const HEADER_BOOKMARKED: &str = "收藏";

pub const BOOKMARKED_YES: &str = "是";
pub const BOOKMARKED_NO: &str = "否";

/// Column labels written by the exporters, in order.
pub const EXPORT_HEADERS: [&str; 8] = [
    HEADER_NAME,
    HEADER_PHONE,
    HEADER_EMAIL,
    HEADER_WECHAT,
    HEADER_QQ,
    HEADER_ADDRESS,
    HEADER_COMPANY,
    HEADER_BOOKMARKED,
];

pub fn bookmark_label(bookmarked: bool) -> &'static str {
    if bookmarked { BOOKMARKED_YES } else { BOOKMARKED_NO }
}

/// Contact fields an imported column can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Email,
    Wechat,
    Qq,
    Address,
    Company,
}

impl Field {
    pub fn from_header(label: &str) -> Option<Self> {
        match label {
            HEADER_NAME => Some(Field::Name),
            HEADER_PHONE => Some(Field::Phone),
            HEADER_EMAIL => Some(Field::Email),
            HEADER_WECHAT => Some(Field::Wechat),
            HEADER_QQ => Some(Field::Qq),
            HEADER_ADDRESS => Some(Field::Address),
            HEADER_COMPANY => Some(Field::Company),
            _ => None,
        }
    }

    pub fn assign(self, contact: &mut Contact, value: String) {
        match self {
            Field::Name => contact.name = value,
            Field::Phone => contact.phone = value,
            Field::Email => contact.email = non_empty(value),
            Field::Wechat => contact.wechat = non_empty(value),
            Field::Qq => contact.qq = non_empty(value),
            Field::Address => contact.address = non_empty(value),
            Field::Company => contact.company = non_empty(value),
        }
    }
}

/// Removes one leading and one trailing `"`, each only if present.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Header-derived mapping from column position to contact field.
///
/// Unknown header labels map to `None`, so their columns are skipped.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: Vec<Option<Field>>,
}

impl ColumnMap {
    pub fn from_headers<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = labels
            .into_iter()
            .map(|label| Field::from_header(strip_quotes(label.as_ref().trim()).trim()))
            .collect();
        Self { columns }
    }

    pub fn fields(&self) -> &[Option<Field>] {
        &self.columns
    }

    /// Builds a contact from one row of cells. Returns `None` when the row
    /// lacks a name or a phone.
    pub fn build<S: AsRef<str>>(&self, cells: &[S]) -> Option<Contact> {
        let mut contact = Contact::default();
        for (index, field) in self.columns.iter().enumerate() {
            let Some(field) = field else { continue };
            let value = cells
                .get(index)
                .map(|cell| strip_quotes(cell.as_ref().trim()).trim())
                .unwrap_or_default();
            field.assign(&mut contact, value.to_string());
        }
        contact.is_importable().then_some(contact)
    }
}
