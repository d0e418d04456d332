pub mod api;
pub mod codec;
pub mod config;
pub mod contact;
pub mod download;
pub mod error;
pub mod export;
pub mod validate;

pub use api::ContactsClient;
pub use contact::Contact;
pub use error::{ContactsError, Result};

pub const NAME: &str = "contacts";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
