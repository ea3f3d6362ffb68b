//! Facilities for retrieving remote context and frame documents.
//!
//! Context and frame documents are plain JSON fetched over HTTP. Servers
//! hosting them do not always advertise a JSON media type, so after content
//! negotiation the body is parsed as JSON regardless and the media type is
//! only used for logging.

use crate::errors::OfflineRetrievalError;
use anyhow::{anyhow, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// Options that control how remote JSON documents are fetched.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Fail immediately when `true`; callers use this to guard offline modes.
    pub offline: bool,
    /// Overall network timeout applied to individual HTTP requests.
    pub timeout: Duration,
    /// Ordered list of media types to negotiate, highest priority first.
    pub accept_order: Vec<&'static str>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        const DEFAULT_ACCEPT: &[&str] = &[
            "application/ld+json",
            "application/json",
            "text/json",
        ];
        Self {
            offline: false,
            timeout: Duration::from_secs(30),
            accept_order: DEFAULT_ACCEPT.to_vec(),
        }
    }
}

/// Builds a weighted `Accept` header string honoring the provided priority order.
fn build_accept(accept_order: &[&'static str]) -> String {
    if accept_order.is_empty() {
        return "*/*".to_string();
    }
    let mut parts = Vec::new();
    let mut q = 1.0f32;
    for t in accept_order {
        parts.push(format!("{t}; q={:.2}", q));
        q = (q - 0.1f32).max(0.1f32);
    }
    parts.push("*/*; q=0.05".to_string());
    parts.join(", ")
}

/// Fetches a JSON document (context or frame) from the provided `url`.
pub fn fetch_json(url: &str, opts: &FetchOptions) -> Result<Value> {
    if opts.offline {
        return Err(anyhow!(OfflineRetrievalError {
            file: url.to_string()
        }));
    }
    let client = Client::builder().timeout(opts.timeout).build()?;
    let accept = build_accept(&opts.accept_order);
    let resp = client.get(url).header(ACCEPT, accept).send()?;
    if !resp.status().is_success() {
        return Err(anyhow!(
            "Failed to fetch document from {}: HTTP {}",
            url,
            resp.status()
        ));
    }
    if let Some(ct) = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
    {
        debug!("Fetched {} with content type {}", url, ct);
    }
    let bytes = resp.bytes()?;
    serde_json::from_slice(&bytes)
        .map_err(|e| anyhow!("Document at {} is not valid JSON: {}", url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_mode_refuses_fetch() {
        let opts = FetchOptions {
            offline: true,
            ..FetchOptions::default()
        };
        let result = fetch_json("http://example.org/context.json", &opts);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<OfflineRetrievalError>().is_some());
    }

    #[test]
    fn accept_header_is_weighted() {
        let accept = build_accept(&["application/ld+json", "application/json"]);
        assert!(accept.starts_with("application/ld+json; q=1.00"));
        assert!(accept.contains("application/json; q=0.90"));
        assert!(accept.ends_with("*/*; q=0.05"));
    }
}
