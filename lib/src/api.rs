//! The high-level conversion API: a `Converter` runs the whole pipeline from
//! a Turtle file on disk to a JSON-LD document written to the output path.
//!
//! Stage order and failure policy: read input, parse, group, load + apply
//! context compaction, load + apply frame, write output. Each stage failure
//! aborts the run with a message naming the stage; no partial output is
//! written once a stage fails.

use crate::compact::compact;
use crate::config::Config;
use crate::frame::frame;
use crate::group::group_triples;
use crate::options::Strategy;
use crate::util::{read_turtle_file, write_json_to_file};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub fn init_logging() {
    // Allow TTL2JSONLD_LOG to override RUST_LOG for consistent CLI defaults.
    if let Ok(log_level) = std::env::var("TTL2JSONLD_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

/// Summary of a completed conversion run, for CLI display.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub triples: usize,
    pub subjects: usize,
    pub output: PathBuf,
}

impl std::fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} triples across {} subjects -> {}",
            self.triples,
            self.subjects,
            self.output.display()
        )
    }
}

pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full pipeline and returns a summary of what was written.
    pub fn run(&self) -> Result<ConversionReport> {
        let triples = read_turtle_file(&self.config.input)?;
        info!(
            "Parsed {} triples from {}",
            triples.len(),
            self.config.input.display()
        );

        let doc = group_triples(&triples);
        debug!("Grouped into {} subjects", doc.len());

        let context: Option<Value> = match &self.config.context {
            Some(source) => Some(source.load(self.config.offline).with_context(|| {
                format!("Failed to load context document from {}", source)
            })?),
            None => None,
        };

        let mut document = doc.to_json(self.config.strategy, context.as_ref());
        if let Some(ctx) = &context {
            document = compact(&document, ctx);
        }

        if let Some(source) = &self.config.frame {
            let frame_doc = source.load(self.config.offline).with_context(|| {
                format!("Failed to load frame document from {}", source)
            })?;
            document = frame(&document, &frame_doc)
                .with_context(|| format!("Failed to frame document against {}", source))?;
        }

        write_json_to_file(&self.config.output, &document, self.config.overwrite.into())
            .with_context(|| {
                format!("Failed to write output file {}", self.config.output.display())
            })?;

        Ok(ConversionReport {
            triples: triples.len(),
            subjects: doc.len(),
            output: self.config.output.clone(),
        })
    }

    /// Parses and groups the input without writing anything; used by the
    /// `inspect` command.
    pub fn inspect(&self) -> Result<ConversionReport> {
        let triples = read_turtle_file(&self.config.input)?;
        let doc = group_triples(&triples);
        Ok(ConversionReport {
            triples: triples.len(),
            subjects: doc.len(),
            output: self.config.output.clone(),
        })
    }
}

/// One-shot conversion with no context or frame, writing next to `output`.
pub fn convert_file(input: &Path, output: &Path, strategy: Strategy) -> Result<ConversionReport> {
    let config = Config::builder()
        .input(input)
        .output(output)
        .strategy(strategy)
        .build()?;
    Converter::new(config).run()
}
