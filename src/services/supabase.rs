// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Supabase Storage and PostgREST client used for receipts and registrations.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::SupabaseConfig;
use crate::models::registration::RegistrationRecord;
use crate::services::{ObjectStorage, RecordStore, ServiceError};

/// Blocking client for one Supabase project, authenticated with the anon key.
///
/// Calls run on the command worker threads, never on the UI thread.
pub struct SupabaseClient {
    http: Client,
    base: Url,
    anon_key: String,
}

impl SupabaseClient {
    /// Build a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot serve as a base or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, anon_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid Supabase URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            bail!("Supabase URL cannot be used as a base: {base_url}");
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base,
            anon_key: anon_key.into(),
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        let (url, key) = config.credentials()?;
        Self::new(url, key, Duration::from_secs(config.timeout_secs))
    }

    /// Append path segments to the project URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl ObjectStorage for SupabaseClient {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint(&["storage", "v1", "object", bucket, key]);
        tracing::debug!(url = %url, "Uploading object");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()?;

        ensure_success(response)
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        self.endpoint(&["storage", "v1", "object", "public", bucket, key])
            .to_string()
    }
}

impl RecordStore for SupabaseClient {
    #[tracing::instrument(skip(self, record))]
    fn insert(&self, table: &str, record: &RegistrationRecord) -> Result<(), ServiceError> {
        let url = self.endpoint(&["rest", "v1", table]);
        tracing::debug!(url = %url, "Inserting row");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()?;

        ensure_success(response)
    }
}

/// Turn a non-2xx response into [`ServiceError::Rejected`] carrying the service's own message.
fn ensure_success(response: Response) -> Result<(), ServiceError> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!(status = status.as_u16(), "Request succeeded");
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
    tracing::warn!(status = status.as_u16(), %message, "Request rejected");
    Err(ServiceError::rejected(status.as_u16(), message))
}

/// Extract a human-readable message from a Storage or PostgREST error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> RegistrationRecord {
        RegistrationRecord {
            full_name: "Juan Dela Cruz".into(),
            age: "20".into(),
            contact_number: "09123456789".into(),
            email: "juan@test.com".into(),
            church_name: "Grace Church".into(),
            photo_url: "https://example.supabase.co/receipt.png".into(),
        }
    }

    fn client(base: &str) -> SupabaseClient {
        SupabaseClient::new(base, "anon-key", Duration::from_secs(5)).unwrap()
    }

    // The blocking client must not be created or dropped on a runtime thread.
    async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    #[test]
    fn public_url_points_at_public_object_path() {
        let client = client("https://project.supabase.co");
        assert_eq!(
            client.public_url("payment_proofs", "1700000000000_JuanDelaCruz.png"),
            "https://project.supabase.co/storage/v1/object/public/payment_proofs/1700000000000_JuanDelaCruz.png"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let client = client("https://proxy.example/supabase/");
        assert_eq!(
            client.public_url("payment_proofs", "a b.png"),
            "https://proxy.example/supabase/storage/v1/object/public/payment_proofs/a%20b.png"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(SupabaseClient::new("mailto:ops@example.com", "k", Duration::from_secs(1)).is_err());
        assert!(SupabaseClient::new("not a url", "k", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#)
                .as_deref(),
            Some("The resource already exists")
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_token"}"#).as_deref(),
            Some("invalid_token")
        );
        assert_eq!(error_message("gateway down").as_deref(), Some("gateway down"));
        assert_eq!(error_message("  "), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_posts_bytes_with_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/payment_proofs/key.png"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(header("content-type", "image/png"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Key":"payment_proofs/key.png"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let result = blocking(move || {
            client(&base).put("payment_proofs", "key.png", b"png-bytes", "image/png")
        })
        .await;

        assert!(result.is_ok(), "upload failed: {result:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_surfaces_storage_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#,
            ))
            .mount(&server)
            .await;

        let base = server.uri();
        let err = blocking(move || client(&base).put("payment_proofs", "k.png", b"x", "image/png"))
            .await
            .unwrap_err();

        match err {
            ServiceError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The resource already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn insert_sends_single_row_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/registrations"))
            .and(header("prefer", "return=minimal"))
            .and(body_json(serde_json::json!([{
                "full_name": "Juan Dela Cruz",
                "age": "20",
                "contact_number": "09123456789",
                "email": "juan@test.com",
                "church_name": "Grace Church",
                "photo_url": "https://example.supabase.co/receipt.png"
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let result = blocking(move || client(&base).insert("registrations", &record())).await;

        assert!(result.is_ok(), "insert failed: {result:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn insert_falls_back_to_status_text_on_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let base = server.uri();
        let err = blocking(move || client(&base).insert("registrations", &record()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Service Unavailable");
    }
}
