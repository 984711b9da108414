//! Fetching data files over HTTP, from disk, or from memory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(&self) -> bool { (200..300).contains(&self.status) }
}

/// A transport for data files. Errors are transport failures; HTTP error
/// statuses come back as responses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("lesson-accordion/0.1").build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        debug!(%url, status, bytes = body.len(), "http fetch");
        Ok(FetchResponse { status, body })
    }
}

/// Serves `file://` URLs. A missing file is reported as status 404, like a
/// static file server would.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        let path = url.to_file_path().map_err(|_| anyhow!("not a file URL: {}", url))?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse { status: 200, body }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse { status: 404, body: Vec::new() }),
            Err(e) => Err(anyhow!("reading {}: {}", path.display(), e)),
        }
    }
}

/// Picks HTTP or file transport by URL scheme.
pub struct SchemeFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SchemeFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self { http: HttpFetcher::new()?, file: FileFetcher })
    }
}

#[async_trait]
impl Fetcher for SchemeFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        match url.scheme() {
            "http" | "https" => self.http.fetch(url).await,
            "file" => self.file.fetch(url).await,
            other => bail!("unsupported scheme: {}", other),
        }
    }
}

/// In-memory responses keyed by URL. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, FetchResponse>,
    requests: Mutex<Vec<Url>>,
}

impl MemoryFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), FetchResponse { status, body: body.into() });
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        if let Ok(mut log) = self.requests.lock() { log.push(url.clone()); }
        Ok(self
            .responses
            .get(url.as_str())
            .cloned()
            .unwrap_or(FetchResponse { status: 404, body: Vec::new() }))
    }
}
