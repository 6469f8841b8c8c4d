use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::{CheckError, Result};
use crate::http_client::create_client;

pub const API_KEY_HEADER: &str = "hibp-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Breach,
    Paste,
}

/// A single request target on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// `verbose` asks for full breach records instead of names only.
    Breach { address: String, verbose: bool },
    Paste { address: String },
}

impl Lookup {
    pub fn breach(address: &str, verbose: bool) -> Self {
        Lookup::Breach { address: address.to_string(), verbose }
    }

    pub fn paste(address: &str) -> Self {
        Lookup::Paste { address: address.to_string() }
    }

    pub fn address(&self) -> &str {
        match self {
            Lookup::Breach { address, .. } | Lookup::Paste { address } => address,
        }
    }

    pub fn kind(&self) -> LookupKind {
        match self {
            Lookup::Breach { .. } => LookupKind::Breach,
            Lookup::Paste { .. } => LookupKind::Paste,
        }
    }

    /// Path and query relative to the API base, with the address escaped.
    pub fn path(&self) -> String {
        match self {
            Lookup::Breach { address, verbose } => format!(
                "breachedaccount/{}?truncateResponse={}",
                urlencoding::encode(address),
                !verbose
            ),
            Lookup::Paste { address } => format!("pasteaccount/{}", urlencoding::encode(address)),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What came back over the wire, before classification.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self { status, ..Default::default() }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Invalid names or values are skipped. Names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(n), Ok(v)) = (HeaderName::from_bytes(name.as_bytes()), value.parse::<HeaderValue>()) {
            self.headers.insert(n, v);
        }
        self
    }
}

/// Transport seam between the checker and the network.
#[async_trait]
pub trait BreachApi: Send + Sync {
    async fn send(&self, lookup: &Lookup) -> Result<RawResponse>;
}

/// reqwest-backed client for the breach-notification service.
pub struct HibpClient {
    client: Client,
    base: Url,
    api_key: Option<String>,
}

impl HibpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| CheckError::Config(format!("api base {:?}: {}", config.api_base, e)))?;
        let client = create_client(config.timeout_secs, &config.user_agent)?;
        Ok(Self {
            client,
            base,
            api_key: config.api_key.clone(),
        })
    }

    pub fn url_for(&self, lookup: &Lookup) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), lookup.path())
    }
}

#[async_trait]
impl BreachApi for HibpClient {
    async fn send(&self, lookup: &Lookup) -> Result<RawResponse> {
        let url = self.url_for(lookup);
        let mut req = self.client.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await?;
        tracing::debug!(url = %url, status, bytes = body.len(), "lookup response");

        Ok(RawResponse {
            status,
            headers,
            body: if body.is_empty() { None } else { Some(body) },
        })
    }
}
