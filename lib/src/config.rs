//! Defines the configuration structure for a conversion run.
//! A `Config` captures everything the converter needs: the input Turtle file,
//! optional context and frame sources, the output shape, and the destination.

use crate::options::Strategy;
use crate::source::DocumentSource;
use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

fn default_overwrite() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// The Turtle file to convert.
    pub input: PathBuf,
    /// Where the converted document is written.
    pub output: PathBuf,
    /// Optional JSON-LD context used for compaction (file path or URL).
    #[builder(default)]
    #[serde(default)]
    pub context: Option<DocumentSource>,
    /// Optional JSON-LD frame applied after compaction (file path or URL).
    #[builder(default)]
    #[serde(default)]
    pub frame: Option<DocumentSource>,
    /// Output shape of the grouped document.
    #[builder(default)]
    #[serde(default)]
    pub strategy: Strategy,
    /// Offline mode: never fetch context or frame documents from the web.
    #[builder(default)]
    #[serde(default)]
    pub offline: bool,
    /// Whether an existing output file may be replaced.
    #[builder(default = "true")]
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Input: {}", self.input.display());
        println!("  Output: {}", self.output.display());
        if let Some(context) = &self.context {
            println!("  Context: {}", context);
        }
        if let Some(frame) = &self.frame {
            println!("  Frame: {}", frame);
        }
        println!("  Strategy: {}", self.strategy);
        println!("  Offline: {}", self.offline);
        println!("  Overwrite: {}", self.overwrite);
    }
}
