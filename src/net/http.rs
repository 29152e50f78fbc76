//! `reqwest`-backed [`Transport`] used by the binary.
//!
//! Thin HTTP wrapper: resolves endpoint paths against the configured base URL,
//! attaches the bearer credential, and encodes JSON or multipart bodies. No
//! timeouts are configured here; transport defaults apply.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::multipart;

use super::api::{ApiRequest, ApiResponse, Endpoint, Method, Part, RequestBody, Transport};
use crate::error::ClientError;

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport rooted at `base_url` (trailing `/` ignored).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url(request.endpoint);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        let builder = match request.bearer.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        tracing::debug!(%url, method = ?request.method, "sending request");
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

fn multipart_form(parts: Vec<Part>) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File { name, file } => {
                let body = multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| ClientError::InvalidRequest(format!("file type `{}`: {e}", file.mime)))?;
                form.part(name, body)
            }
        };
    }
    Ok(form)
}
