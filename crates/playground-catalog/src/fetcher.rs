//! Static resource fetchers
//!
//! All paths handed to a fetcher are relative to its root. Absolute paths and
//! `..` segments are rejected so a manifest cannot point outside the root.

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use crate::error::CatalogError;
use crate::Result;

pub trait ResourceFetcher: Send + Sync {
    /// Root the fetcher resolves against, for logging
    fn root(&self) -> String;

    fn fetch_text<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Pick a fetcher for an examples root: `http(s)://` URLs go over the
/// network, everything else is treated as a local directory.
pub fn fetcher_for_root(root: &str) -> Result<Arc<dyn ResourceFetcher>> {
    let trimmed = root.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidRoot("examples root is empty".to_string()));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(Arc::new(HttpFetcher::new(trimmed)?))
    } else {
        Ok(Arc::new(FileFetcher::new(trimmed)))
    }
}

fn validate_relative(path: &str) -> Result<&str> {
    let trimmed = path.trim();
    let escapes = trimmed.starts_with('/')
        || trimmed.starts_with('\\')
        || trimmed.contains("://")
        || trimmed.split(['/', '\\']).any(|segment| segment == "..");

    if trimmed.is_empty() || escapes {
        return Err(CatalogError::InvalidPath(path.to_string()));
    }
    Ok(trimmed)
}

pub struct HttpFetcher {
    client: reqwest::Client,
    root: Url,
}

impl HttpFetcher {
    pub fn new(root: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rufus-playground/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let root = Url::parse(root).map_err(|e| CatalogError::InvalidRoot(format!("{root}: {e}")))?;

        Ok(Self::with_client(client, root))
    }

    pub fn with_client(client: reqwest::Client, mut root: Url) -> Self {
        // Without a trailing slash `join` would replace the last segment
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Self { client, root }
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        let relative = validate_relative(path)?;
        self.root
            .join(relative)
            .map_err(|e| CatalogError::InvalidPath(format!("{path}: {e}")))
    }
}

impl ResourceFetcher for HttpFetcher {
    fn root(&self) -> String {
        self.root.to_string()
    }

    fn fetch_text<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let url = self.resolve(path)?;
            let response = self.client.get(url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            Ok(response.text().await?)
        })
    }
}

pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceFetcher for FileFetcher {
    fn root(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch_text<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let full = self.root.join(validate_relative(path)?);
            tokio::fs::read_to_string(&full)
                .await
                .map_err(|source| CatalogError::Io {
                    path: full.display().to_string(),
                    source,
                })
        })
    }
}

/// Examples bundled with the host instead of served from a root
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.resources.insert(path.into(), contents.into());
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn root(&self) -> String {
        "memory:".to_string()
    }

    fn fetch_text<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let relative = validate_relative(path)?;
            self.resources
                .get(relative)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(relative.to_string()))
        })
    }
}
