use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::RawRecord;

pub const DEFAULT_BASE_URL: &str = "https://govpulse-backend-sbgz.onrender.com";
pub const EXPLAIN_PATH: &str = "/services/explain";

/// The two failure classes a load can end in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Parse,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response is not a JSON array of service records: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Parse { .. } => FetchErrorKind::Parse,
            _ => FetchErrorKind::Network,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FetcherOptions {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            proxy: None,
        }
    }
}

pub fn explain_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), EXPLAIN_PATH)
}

fn build_client(options: &FetcherOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "govpulse/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(options.timeout_seconds.max(1)));

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetchError::HttpClientBuild { source: e })
}

pub fn decode_records(body: &[u8]) -> Result<Vec<RawRecord>, FetchError> {
    serde_json::from_slice::<Vec<RawRecord>>(body).map_err(|e| FetchError::Parse { source: e })
}

/// Issues exactly one request per call. Retrying is left to the caller.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    url: String,
}

impl Fetcher {
    pub fn new(options: &FetcherOptions) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(options)?,
            url: explain_url(&options.base_url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_services(&self) -> Result<Vec<RawRecord>, FetchError> {
        debug!(url = %self.url, "fetching services");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: self.url.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| FetchError::Body {
            url: self.url.clone(),
            source: e,
        })?;
        let records = decode_records(&body)?;
        info!(count = records.len(), "loaded services");
        Ok(records)
    }
}

pub async fn load_file(path: &Path) -> Result<Vec<RawRecord>, FetchError> {
    let body = tokio::fs::read(path).await.map_err(|e| FetchError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = decode_records(&body)?;
    info!(count = records.len(), path = %path.display(), "loaded services from file");
    Ok(records)
}

/// Where a load cycle reads the feed from.
#[derive(Clone, Debug)]
pub enum Source {
    Http(Fetcher),
    File(PathBuf),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Self::Http(fetcher) => fetcher.url().to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub async fn load(&self) -> Result<Vec<RawRecord>, FetchError> {
        match self {
            Self::Http(fetcher) => fetcher.fetch_services().await,
            Self::File(path) => load_file(path).await,
        }
    }
}
