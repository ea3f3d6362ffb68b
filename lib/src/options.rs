//! Shared option types that replace boolean and string flag parameters in the Rust API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects the output shape of the grouped JSON-LD document.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// A JSON object keyed by subject identifier; the raw grouped mapping.
    Basic,
    /// A document with an `@graph` array of node objects. The default.
    #[default]
    Grouped,
    /// A bare JSON array of node objects with no wrapper object.
    Flat,
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Strategy::Basic),
            "grouped" => Ok(Strategy::Grouped),
            "flat" => Ok(Strategy::Flat),
            other => Err(anyhow::anyhow!(
                "Unknown strategy '{}'. Use one of: basic, grouped, flat",
                other
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Basic => write!(f, "basic"),
            Strategy::Grouped => write!(f, "grouped"),
            Strategy::Flat => write!(f, "flat"),
        }
    }
}

/// Controls how the writer handles an existing output file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Overwrite {
    /// Replace any existing file with the new document.
    Allow,
    /// Preserve an existing file and fail instead of replacing it.
    Preserve,
}

impl Overwrite {
    pub fn as_bool(self) -> bool {
        matches!(self, Overwrite::Allow)
    }
}

impl From<bool> for Overwrite {
    fn from(value: bool) -> Self {
        if value {
            Overwrite::Allow
        } else {
            Overwrite::Preserve
        }
    }
}

impl From<Overwrite> for bool {
    fn from(value: Overwrite) -> Self {
        value.as_bool()
    }
}
