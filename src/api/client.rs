use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::types::{DEFAULT_ERROR_MESSAGE, ErrorResponse, paths};
use crate::config::ApiConfig;
use crate::contact::Contact;
use crate::error::{ContactsError, Result, TransportError};

/// Client for the contacts REST service.
///
/// One instance wraps one connection pool; clone it to share.
#[derive(Clone)]
pub struct ContactsClient {
    base_url: String,
    client: Client,
}

impl ContactsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::from)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn execute(&self, method: Method, url: &str, req: RequestBuilder) -> Result<Response> {
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Contacts API request error: {} {}: {}", method, url, e);
                return Err(TransportError::from(e).into());
            }
        };

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from(&body)
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        error!("Contacts API request error: {} {} -> {} {}", method, url, status, message);

        Err(TransportError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let url = self.url(path);
        let mut req = self.client.request(method.clone(), &url);

        if let Some(json) = body {
            req = req.json(json);
        }

        debug!("Contacts API request: {} {} {:?}", method, url, body);

        let resp = self.execute(method, &url, req).await?;
        let status = resp.status();
        let text = resp.text().await.map_err(TransportError::from)?;

        debug!("Contacts API response: {} - {}", status, text);

        // 204 and other empty bodies decode as JSON null, which fits `()`.
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| {
            error!("Contacts API response could not be decoded: {} {}: {}", status, url, e);
            ContactsError::Transport(TransportError::InvalidResponse(format!("{} - {}", e, text)))
        })
    }

    pub async fn get_all_contacts(&self) -> Result<Vec<Contact>> {
        self.request(Method::GET, paths::CONTACTS, None).await
    }

    pub async fn get_bookmarked_contacts(&self) -> Result<Vec<Contact>> {
        self.request(Method::GET, paths::BOOKMARKED, None).await
    }

    pub async fn get_contact_by_id(&self, id: i64) -> Result<Contact> {
        self.request(Method::GET, &paths::contact(id), None).await
    }

    pub async fn add_contact(&self, contact: &Contact) -> Result<Contact> {
        let body = serde_json::to_value(contact)?;
        self.request(Method::POST, paths::CONTACTS, Some(&body)).await
    }

    pub async fn update_contact(&self, id: i64, contact: &Contact) -> Result<Contact> {
        let body = serde_json::to_value(contact)?;
        self.request(Method::PUT, &paths::contact(id), Some(&body)).await
    }

    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        self.request(Method::DELETE, &paths::contact(id), None).await
    }

    pub async fn search_contacts(&self, keyword: &str) -> Result<Vec<Contact>> {
        self.request(Method::GET, &paths::search(keyword), None).await
    }

    pub async fn bookmark_contact(&self, id: i64) -> Result<Contact> {
        self.request(Method::PUT, &paths::bookmark(id), None).await
    }

    pub async fn unbookmark_contact(&self, id: i64) -> Result<Contact> {
        self.request(Method::DELETE, &paths::bookmark(id), None).await
    }

    pub async fn toggle_bookmark(&self, id: i64) -> Result<Contact> {
        self.request(Method::PATCH, &paths::toggle_bookmark(id), None).await
    }

    /// Downloads the server-rendered workbook. An empty vector means the
    /// server had no contacts to export.
    pub async fn export_excel(&self) -> Result<Vec<u8>> {
        let url = self.url(paths::EXPORT_EXCEL);
        debug!("Contacts API request: GET {}", url);

        let req = self.client.get(&url);
        let resp = self.execute(Method::GET, &url, req).await?;
        let bytes = resp.bytes().await.map_err(TransportError::from)?;

        debug!("Contacts API response: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Uploads a workbook for server-side import and returns the server's
    /// summary text.
    pub async fn import_excel(&self, filename: &str, content: Vec<u8>) -> Result<String> {
        let url = self.url(paths::IMPORT_EXCEL);
        debug!("Contacts API request: POST {} ({}, {} bytes)", url, filename, content.len());

        let part = Part::bytes(content).file_name(filename.to_string());
        let req = self.client.post(&url).multipart(Form::new().part("file", part));
        let resp = self.execute(Method::POST, &url, req).await?;
        let text = resp.text().await.map_err(TransportError::from)?;

        debug!("Contacts API response: {}", text);
        Ok(text)
    }
}
