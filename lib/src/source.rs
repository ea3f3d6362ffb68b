//! Locations for context and frame documents: a local JSON file or a URL.

use crate::fetch::{fetch_json, FetchOptions};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::BufReader;
use std::path::PathBuf;

/// Where a context or frame document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl DocumentSource {
    /// Interprets a CLI-provided string: http(s) prefixes become URLs,
    /// everything else is treated as a file path.
    pub fn from_str(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DocumentSource::Url(value.to_string())
        } else {
            DocumentSource::File(PathBuf::from(value))
        }
    }

    /// Loads the JSON document at this source. URL sources honor the offline
    /// flag via [`FetchOptions`] and fail with an offline retrieval error.
    pub fn load(&self, offline: bool) -> Result<Value> {
        match self {
            DocumentSource::File(path) => {
                let file = std::fs::File::open(path)?;
                let reader = BufReader::new(file);
                let doc = serde_json::from_reader(reader)?;
                Ok(doc)
            }
            DocumentSource::Url(url) => {
                let opts = FetchOptions {
                    offline,
                    ..FetchOptions::default()
                };
                fetch_json(url, &opts)
            }
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{}", url),
        }
    }
}
