//! HTTP client for the compras.gov.br open-data API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{AdhesionQuery, ArpItemQuery, ArpQuery, Query, QueryParams},
    types::{Adhesion, Arp, ArpItem, Page},
    Error,
};

/// Production host of the open-data API.
pub const DEFAULT_BASE_URL: &str = "https://dadosabertos.compras.gov.br";

/// The three endpoints of the ARP module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Arps,
    ArpItems,
    ItemAdhesions,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Arps => "/modulo-arp/1_consultarARP",
            Endpoint::ArpItems => "/modulo-arp/2_consultarARPItem",
            Endpoint::ItemAdhesions => "/modulo-arp/5_consultarAdesoesItem",
        }
    }
}

/// Connection settings for [`Client`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// HTTP client for the open-data API.
///
/// Each call is a single GET with no retries and no caching. A 404 from the
/// API means "no records" and is returned as an empty page.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production open-data API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from explicit settings. Fails rather than dropping
    /// any of them.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::ClientBuild(e.to_string())
        })?;
        Ok(Self {
            http,
            base_api_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, endpoint.path()).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        Ok(params.add_to_url(&url))
    }

    /// Fetches one page from `endpoint` using a raw parameter mapping.
    pub async fn get_page<T>(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(endpoint, params)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("{} returned 404, treating as empty page", endpoint.path());
            return Ok(Page::empty());
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<Page<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches a page of price-registration records.
    pub async fn get_arps(&self, query: &ArpQuery) -> Result<Page<Arp>, Error> {
        self.get_page(Endpoint::Arps, &query.to_params()).await
    }

    /// Fetches a page of price-registration items.
    pub async fn get_arp_items(&self, query: &ArpItemQuery) -> Result<Page<ArpItem>, Error> {
        self.get_page(Endpoint::ArpItems, &query.to_params()).await
    }

    /// Fetches the adhesions requested against one item of one ata.
    pub async fn get_item_adhesions(
        &self,
        query: &AdhesionQuery,
    ) -> Result<Page<Adhesion>, Error> {
        self.get_page(Endpoint::ItemAdhesions, &query.to_params())
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("erro"), "erro");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ã".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("http://localhost:1234/");
        let url = client
            .get_url(Endpoint::Arps, &QueryParams::new())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/modulo-arp/1_consultarARP");
    }

    #[test]
    fn with_config_keeps_base_url() {
        let client = Client::with_config(ClientConfig {
            base_url: "http://localhost:1234/".to_string(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
