use common::registration::RegistrationRecord;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::state::FormDraft;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read file: {0}")]
    File(#[from] std::io::Error),
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Thin async client for the registration API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit a new registration. Returns the server's confirmation message.
    pub async fn register(&self, draft: &FormDraft) -> Result<String, ApiError> {
        let form = form_from_draft(draft).await?;
        let res = self
            .http
            .post(self.url("/register"))
            .multipart(form)
            .send()
            .await?;
        confirmation(res).await
    }

    /// Fetch every registration.
    pub async fn list(&self) -> Result<Vec<RegistrationRecord>, ApiError> {
        let res = self.http.get(self.url("/registrations")).send().await?;
        if !res.status().is_success() {
            return Err(server_error(res).await);
        }
        Ok(res.json().await?)
    }

    /// Replace the fields of an existing registration.
    pub async fn update(&self, id: i32, draft: &FormDraft) -> Result<String, ApiError> {
        let form = form_from_draft(draft).await?;
        let res = self
            .http
            .put(self.url(&format!("/registrations/{id}")))
            .multipart(form)
            .send()
            .await?;
        confirmation(res).await
    }

    /// Delete one registration.
    pub async fn delete(&self, id: i32) -> Result<String, ApiError> {
        let res = self
            .http
            .delete(self.url(&format!("/registrations/{id}")))
            .send()
            .await?;
        confirmation(res).await
    }

    /// Download a stored document by its reference.
    pub async fn fetch_document(&self, file_ref: &str) -> Result<Vec<u8>, ApiError> {
        let res = self
            .http
            .get(self.url(&format!("/uploads/{file_ref}")))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(server_error(res).await);
        }
        Ok(res.bytes().await?.to_vec())
    }
}

/// Build the multipart body the form submits: all text fields, plus the file
/// part when a document was chosen.
async fn form_from_draft(draft: &FormDraft) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("firstName", draft.first_name.clone())
        .text("lastName", draft.last_name.clone())
        .text("email", draft.email.clone())
        .text("contact", draft.contact.clone())
        .text("qualification", draft.qualification.clone())
        .text("gender", draft.gender.to_string());

    if let Some(path) = &draft.file {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        form = form.part("file", Part::bytes(bytes).file_name(file_name));
    }

    Ok(form)
}

/// Extract the `{"message"}` confirmation, or turn a failure status into an
/// `ApiError::Server` carrying whichever of the error body shapes came back.
async fn confirmation(res: reqwest::Response) -> Result<String, ApiError> {
    if !res.status().is_success() {
        return Err(server_error(res).await);
    }
    let body: serde_json::Value = res.json().await?;
    Ok(body["message"].as_str().unwrap_or("OK").to_string())
}

async fn server_error(res: reqwest::Response) -> ApiError {
    let status = res.status().as_u16();
    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| {
            // `{"error"}`, `{"message"}`, and `{"message","error"}` all occur.
            let error = body["error"].as_str().map(str::to_string);
            let message = body["message"].as_str().map(str::to_string);
            match (message, error) {
                (Some(m), Some(e)) => Some(format!("{m}: {e}")),
                (Some(m), None) => Some(m),
                (None, Some(e)) => Some(e),
                (None, None) => None,
            }
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    ApiError::Server { status, message }
}
