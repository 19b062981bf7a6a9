//! Reqwest-backed ViaCEP postal lookup adapter.
//!
//! This adapter owns transport details only: request construction, HTTP
//! error mapping, and JSON decoding into the domain address record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{CepDigits, PostalAddress, PostalLookup, PostalLookupError};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Postal lookup adapter that queries one ViaCEP-compatible endpoint.
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS))
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    async fn fetch(&self, cep: &CepDigits) -> Result<PostalAddress, PostalLookupError> {
        let url = lookup_url(&self.base_url, cep)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_address(body.as_ref())
    }
}

fn lookup_url(base_url: &Url, cep: &CepDigits) -> Result<Url, PostalLookupError> {
    let base = base_url.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}/ws/{cep}/json/"))
        .map_err(|error| PostalLookupError::request(format!("invalid lookup URL: {error}")))
}

fn parse_address(body: &[u8]) -> Result<PostalAddress, PostalLookupError> {
    let decoded: ViaCepBodyDto = serde_json::from_slice(body).map_err(|error| {
        PostalLookupError::decode(format!("invalid ViaCEP JSON payload: {error}"))
    })?;
    if decoded.is_miss() {
        return Err(PostalLookupError::not_found());
    }
    Ok(decoded.into_address())
}

/// Response body for `GET /ws/<digits>/json/`. Unknown codes come back as
/// HTTP 200 with an `erro` flag instead of a failure status.
#[derive(Debug, Deserialize)]
struct ViaCepBodyDto {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    erro: Option<ErrorFlagDto>,
}

/// The API has served the miss flag both as a boolean and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorFlagDto {
    Flag(bool),
    Text(String),
}

impl ViaCepBodyDto {
    fn is_miss(&self) -> bool {
        match &self.erro {
            Some(ErrorFlagDto::Flag(flag)) => *flag,
            Some(ErrorFlagDto::Text(text)) => !text.is_empty(),
            None => false,
        }
    }

    fn into_address(self) -> PostalAddress {
        PostalAddress {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> PostalLookupError {
    PostalLookupError::request(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostalLookupError {
    let preview = body_preview(body);
    if preview.is_empty() {
        PostalLookupError::request(format!("status {}", status.as_u16()))
    } else {
        PostalLookupError::request(format!("status {}: {preview}", status.as_u16()))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
