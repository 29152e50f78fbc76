//! Endpoint table, request/response envelopes, and the `Transport` seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components build an [`ApiRequest`] and hand it to a [`Transport`]; the
//! production transport lives in `net::http`, tests substitute a stub.
//!
//! ERROR HANDLING
//! ==============
//! Transports only fail with [`ClientError::Network`]. Status classification
//! and body decoding happen once, in [`execute`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Remote API routes consumed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Doctors,
    DoctorSchedules,
    Appointments,
    MedicalRecords,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/api/auth/login",
            Self::Register => "/api/auth/register",
            Self::Doctors => "/api/doctors",
            Self::DoctorSchedules => "/api/doctor-schedules",
            Self::Appointments => "/api/appointments",
            Self::MedicalRecords => "/api/medical-records",
        }
    }

    /// Whether calls attach the stored session token as a bearer credential.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// File content selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    /// Read a file from disk, deriving the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        let mime = mime_for_path(path).to_owned();
        Ok(Self { file_name, mime, bytes })
    }
}

/// MIME type for common medical-record uploads; unknown extensions are octet streams.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "dcm" => "application/dicom",
        _ => "application/octet-stream",
    }
}

/// One part of a multipart form body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: FileAttachment },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    /// Session token sent as `Authorization: Bearer <token>` when present.
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(endpoint: Endpoint, bearer: Option<String>) -> Self {
        Self { method: Method::Get, endpoint, bearer, body: RequestBody::Empty }
    }

    pub fn post(endpoint: Endpoint, bearer: Option<String>, body: RequestBody) -> Self {
        Self { method: Method::Post, endpoint, bearer, body }
    }
}

/// Raw HTTP outcome: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP seam. Enables stubbing the remote API in tests.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when the request never completes.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Send `request`, classify the status, and decode the body as `T`.
///
/// # Errors
///
/// Network failures pass through; non-2xx statuses become
/// [`ClientError::Auth`]/[`ClientError::Server`]; malformed bodies become
/// [`ClientError::Decode`].
pub async fn execute<T: DeserializeOwned>(transport: &dyn Transport, request: ApiRequest) -> Result<T, ClientError> {
    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(ClientError::from_status(response.status, &response.body));
    }
    decode_body(&response.body)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}
