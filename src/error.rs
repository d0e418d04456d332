use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("Format error: {0}")]
    Format(#[source] FormatError),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status. `message` is the
    /// server-supplied message when the body carried one.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON格式不正确")]
    InvalidJson(#[source] serde_json::Error),

    /// An array element was `null`, which cannot be read as a record.
    #[error("JSON格式不正确")]
    NullRecord { index: usize },

    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),
}

impl From<TransportError> for ContactsError {
    fn from(e: TransportError) -> Self {
        ContactsError::Transport(e)
    }
}

impl From<FormatError> for ContactsError {
    fn from(e: FormatError) -> Self {
        ContactsError::Format(e)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Network(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            TransportError::InvalidResponse(e.to_string())
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

impl From<reqwest::Error> for ContactsError {
    fn from(e: reqwest::Error) -> Self {
        ContactsError::Transport(e.into())
    }
}

impl From<calamine::Error> for ContactsError {
    fn from(e: calamine::Error) -> Self {
        ContactsError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ContactsError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ContactsError::Spreadsheet(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContactsError>;
