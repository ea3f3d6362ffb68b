//! Converts RDF Turtle files into JSON-LD documents.
//!
//! The core is the quad grouper in [`group`]: a pure pass that folds triples
//! into a subject-keyed JSON-LD document. Everything around it is glue:
//! reading Turtle with oxigraph, fetching context and frame documents,
//! compacting and framing the grouped output, and writing indented JSON.

pub mod api;
pub mod compact;
pub mod config;
pub mod consts;
pub mod errors;
pub mod fetch;
pub mod frame;
pub mod group;
pub mod options;
pub mod source;
pub mod util;

pub use api::{convert_file, Converter, ConversionReport};
pub use config::Config;
pub use group::{group_triples, GroupedDocument, NodeObject, PropertyValue, ValueRepr};
pub use options::{Overwrite, Strategy};
pub use source::DocumentSource;
