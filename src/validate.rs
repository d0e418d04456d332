use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::Contact;

/// 6 to 20 characters of digits, `-`, `+`, parentheses or whitespace.
pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\-+()\s]{6,20}$").unwrap());

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Checks parsed records and returns one message per problem, using
/// 1-based row numbers. An empty result means every record is valid.
pub fn validate_contacts(contacts: &[Contact]) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, contact) in contacts.iter().enumerate() {
        let row = index + 1;
        if contact.name.trim().is_empty() {
            errors.push(format!("row {}: name is empty", row));
        }
        if contact.phone.trim().is_empty() {
            errors.push(format!("row {}: phone is empty", row));
        }
        if !contact.phone.is_empty() && !is_valid_phone(&contact.phone) {
            errors.push(format!("row {}: phone format invalid", row));
        }
    }

    errors
}
