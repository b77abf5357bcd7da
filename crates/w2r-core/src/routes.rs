//! Backend route table: endpoint paths, rewrite rules, and base-URL joining.
//!
//! Endpoint paths are relative (`/process`, `/get_books`, `/download`). A
//! rewrite rule maps an exact path to a fixed destination URL; paths without a
//! rule are joined onto the backend base URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Conversion-initiation endpoint.
pub const PROCESS_PATH: &str = "/process";
/// Candidate retrieval endpoint.
pub const GET_BOOKS_PATH: &str = "/get_books";
/// Download endpoint.
pub const DOWNLOAD_PATH: &str = "/download";

/// Default backend for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Maps a request path to an absolute destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub source: String,
    pub destination: String,
}

/// Resolves endpoint paths to absolute URLs.
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
    rewrites: Vec<RewriteRule>,
}

impl Routes {
    /// Build from a base URL (e.g. `http://localhost:5000`) and rewrite rules.
    pub fn new(base_url: &str, rewrites: Vec<RewriteRule>) -> Result<Self> {
        let mut base =
            Url::parse(base_url).with_context(|| format!("invalid backend URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("backend URL cannot be used as a base: {base_url}");
        }
        // Keep any path prefix on the base: `http://host/api` + `/process` => `http://host/api/process`.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        for rule in &rewrites {
            Url::parse(&rule.destination).with_context(|| {
                format!("invalid rewrite destination for {}: {}", rule.source, rule.destination)
            })?;
        }
        Ok(Self { base, rewrites })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Absolute URL for `path`: the first rewrite whose source equals the path, else base + path.
    pub fn resolve(&self, path: &str) -> String {
        if let Some(rule) = self.rewrites.iter().find(|r| r.source == path) {
            return rule.destination.clone();
        }
        match self.base.join(path.trim_start_matches('/')) {
            Ok(u) => u.to_string(),
            Err(_) => format!("{}{}", self.base, path.trim_start_matches('/')),
        }
    }
}
